//! Trait definitions for LLM backends and the video generation service.

use async_trait::async_trait;
use cellini_core::{ChatRequest, ChatResponse, GenerationOutput, VideoJob};
use cellini_error::CelliniResult;

/// Core trait that all language-model backends must implement.
///
/// This provides the minimal interface for one synchronous inference turn.
/// The driver performs exactly one attempt per call; retry policy, if any,
/// belongs to the caller.
#[async_trait]
pub trait AgentDriver: Send + Sync {
    /// Generate model output given a multimodal request.
    async fn generate(&self, req: &ChatRequest) -> CelliniResult<ChatResponse>;

    /// Provider name (e.g., "openai").
    fn provider_name(&self) -> &'static str;

    /// Model identifier used when `ChatRequest.model` is None.
    fn model_name(&self) -> &str;
}

/// Trait for models that support image inputs (multimodal vision).
pub trait Vision: AgentDriver {
    /// Maximum number of images per request.
    fn max_images_per_request(&self) -> usize {
        1
    }

    /// Supported image formats (MIME types).
    fn supported_image_formats(&self) -> &[&'static str] {
        &["image/png", "image/jpeg", "image/webp", "image/gif"]
    }

    /// Maximum image size in bytes.
    fn max_image_size_bytes(&self) -> usize {
        5 * 1024 * 1024 // 5MB default
    }
}

/// The remote video generation seam.
///
/// One call submits a job and awaits its terminal state; the implementation
/// owns submission, polling cadence, and the attempt ceiling.
#[async_trait]
pub trait VideoGenerator: Send + Sync {
    /// Run one generation job to a terminal state.
    async fn generate(&self, job: &VideoJob) -> CelliniResult<GenerationOutput>;
}
