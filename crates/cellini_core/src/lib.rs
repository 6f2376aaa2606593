//! Core data types for the Cellini video generation pipeline.
//!
//! This crate provides the foundation data types used across the Cellini
//! workspace: the chat-model types exchanged with language-model drivers,
//! the domain records flowing through the orchestration pipeline, the
//! process configuration, and telemetry initialization.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod generation;
mod input;
mod media;
mod message;
mod output;
mod outputs;
mod request;
mod role;
mod telemetry;
mod video_type;

pub use config::{
    CelliniConfig, OpenAiConfig, PipelineConfig, ServerConfig, StorageConfig, ViduConfig,
};
pub use generation::{GenerationOutput, GenerationRequest, GenerationResponse, VideoJob};
pub use input::Input;
pub use media::MediaSource;
pub use message::{Message, MessageBuilder};
pub use output::Output;
pub use outputs::{
    CONTINUITY_PASS_SCORE, ConceptOutput, ContinuityControlOutput, ImageAnalysisOutput,
    PromptRefinementOutput, QA_APPROVAL_THRESHOLD, QaAgentOutput, SceneDetail, StructuredOutput,
    VisualDirectorOutput,
};
pub use request::{ChatRequest, ChatRequestBuilder, ChatResponse, FinishReason};
pub use role::Role;
pub use telemetry::{init_telemetry, shutdown_telemetry};
pub use video_type::VideoType;
