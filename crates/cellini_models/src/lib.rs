//! Language-model provider integrations for Cellini.
//!
//! Currently ships one driver: an OpenAI-compatible chat-completions client
//! with JSON response mode and multimodal image input.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod openai;

pub use openai::OpenAiClient;
