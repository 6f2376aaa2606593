//! Remote video generation client for Cellini.
//!
//! Two halves: deterministic prompt assembly (pure text composition over the
//! refined creative prompt and request flags) and the HTTP client that
//! submits a generation job and polls it to a terminal state.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod client;
pub mod prompt;

pub use client::ViduClient;
