//! Cellini - Agent-Orchestrated Jewellery Commercial Generation
//!
//! Cellini turns a product photo and description into a short cinematic
//! jewellery-commercial video by sequencing structured language-model agent
//! calls into a refine/evaluate pipeline, then driving a remote
//! image-to-video service to completion.
//!
//! # Architecture
//!
//! Cellini is organized as a workspace with focused crates:
//!
//! - `cellini_core` - Core data types (requests, agent outputs, config)
//! - `cellini_interface` - `AgentDriver` and `VideoGenerator` trait seams
//! - `cellini_error` - Error types
//! - `cellini_models` - Language-model provider implementations
//! - `cellini_agents` - The structured agent call contract and the six agents
//! - `cellini_video` - Video generation client (submit + bounded polling)
//! - `cellini_storage` - Per-generation asset persistence
//! - `cellini_pipeline` - The orchestration state machine
//! - `cellini_server` - Axum HTTP surface
//!
//! This crate (`cellini`) re-exports everything for convenience.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use cellini::{
//!     AgentExecutor, CelliniConfig, OpenAiClient, Orchestrator, ViduClient,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = CelliniConfig::load()?;
//!     let agents = AgentExecutor::new(OpenAiClient::new(config.openai())?);
//!     let video = ViduClient::new(config.vidu())?;
//!     let orchestrator = Orchestrator::new(agents, video);
//!
//!     let request = serde_json::from_str(r#"{ ... }"#)?;
//!     let response = orchestrator.process(&request).await?;
//!     println!("video: {}", response.video_url);
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub use cellini_agents::{
    AgentExecutor, AgentProfile, concept, continuity, extract_json, image_analysis, parse_json,
    prompt_refinement, qa, visual_director,
};
pub use cellini_core::{
    CelliniConfig, ChatRequest, ChatResponse, ConceptOutput, ContinuityControlOutput,
    FinishReason, GenerationOutput, GenerationRequest, GenerationResponse, ImageAnalysisOutput,
    Input, MediaSource, Message, Output, PromptRefinementOutput, QaAgentOutput, Role,
    SceneDetail, StructuredOutput, VideoJob, VideoType, VisualDirectorOutput, init_telemetry,
    shutdown_telemetry,
};
pub use cellini_error::{CelliniError, CelliniErrorKind, CelliniResult};
pub use cellini_interface::{AgentDriver, VideoGenerator, Vision};
pub use cellini_models::OpenAiClient;
pub use cellini_pipeline::Orchestrator;
pub use cellini_storage::{AssetStore, GenerationArtifacts};
pub use cellini_video::{ViduClient, prompt};
