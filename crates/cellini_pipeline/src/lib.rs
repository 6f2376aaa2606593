//! Orchestration pipeline for Cellini video generation.
//!
//! The orchestrator sequences the specialized agents into a pipeline with a
//! bounded refine/evaluate cycle, runs the remote generation job, persists
//! artifacts best-effort, and assembles the caller's response.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod orchestrator;

pub use orchestrator::Orchestrator;
