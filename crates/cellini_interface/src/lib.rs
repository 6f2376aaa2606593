//! Trait definitions for the Cellini video generation pipeline.
//!
//! This crate provides the seams between the orchestration core and its
//! external services: the language-model driver and the remote video
//! generation service. Both are traits so tests can script their behavior.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;

pub use traits::{AgentDriver, VideoGenerator, Vision};
