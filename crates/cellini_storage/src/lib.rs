//! Per-generation asset persistence for Cellini.
//!
//! Every completed generation leaves a directory of artifacts behind: the
//! concept, the visual plan, the final prompt bundle, both auditor outputs,
//! and the downloaded video. Persistence is best-effort from the pipeline's
//! point of view: the orchestrator logs failures and never propagates them.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod store;

pub use store::{AssetStore, GenerationArtifacts};
