//! Error types for the Cellini video generation pipeline.
//!
//! This crate provides the foundation error types used throughout the Cellini
//! workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern for clean error
//! handling:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use cellini_error::{CelliniResult, HttpError};
//!
//! fn fetch_data() -> CelliniResult<String> {
//!     Err(HttpError::new("Connection refused"))?
//! }
//!
//! match fetch_data() {
//!     Ok(data) => println!("Got: {}", data),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod agent;
mod builder;
mod config;
mod error;
mod generation;
mod http;
mod json;
mod pipeline;
mod server;
mod storage;

pub use agent::{AgentError, AgentErrorKind};
pub use builder::{BuilderError, BuilderErrorKind};
pub use config::ConfigError;
pub use error::{CelliniError, CelliniErrorKind, CelliniResult};
pub use generation::{GenerationError, GenerationErrorKind};
pub use http::HttpError;
pub use json::JsonError;
pub use pipeline::{PipelineError, PipelineErrorKind};
pub use server::{ServerError, ServerErrorKind};
pub use storage::{StorageError, StorageErrorKind};
