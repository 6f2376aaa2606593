//! HTTP API surface for the Cellini video generation service.
//!
//! One operation: `POST /api/v1/generate` runs a full orchestration and
//! returns the generation response. Fatal pipeline errors map to HTTP 500
//! with the error's message; the status-code mapping lives here, not in the
//! core.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod routes;
mod state;

pub use error::{ApiError, ApiResult};
pub use routes::router;
pub use state::{AppState, ProductionOrchestrator};
