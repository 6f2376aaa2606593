//! Domain records for one video generation request.

use crate::{ConceptOutput, VideoType, VisualDirectorOutput};
use serde::{Deserialize, Serialize};

fn default_model_consistency() -> bool {
    true
}

/// One incoming request to produce a jewellery commercial.
///
/// Created once per API call and owned by the orchestrator for the request's
/// lifetime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Detailed description of the product (optional)
    #[serde(default)]
    pub product_description: Option<String>,
    /// Type of jewellery (ring, necklace, etc.)
    pub jewellery_type: String,
    /// Target gender (male | female)
    pub gender: String,
    /// Video type (ecommerce | ugc)
    pub video_type: VideoType,
    /// Duration in seconds (8 | 12)
    pub duration: u32,
    /// Base64 encoded image string
    pub base64_image: String,
    /// Generate background music
    pub is_music: bool,
    /// Include a model in the video
    pub is_model: bool,
    /// Enforce a stable model identity across frames (only meaningful when a
    /// model is present)
    #[serde(default = "default_model_consistency")]
    pub model_consistency: bool,
    /// Optional reference video path for style continuity
    #[serde(default)]
    pub reference_video: Option<String>,
}

/// The final response returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationResponse {
    /// The final video URL
    pub video_url: String,
    /// Identifier of the remote generation job
    pub generation_id: String,
    /// Terminal status of the generation job
    pub status: String,
    /// The generated concept
    pub concept: ConceptOutput,
    /// The visual director's plan
    pub visual_plan: VisualDirectorOutput,
    /// The final prompt used
    pub final_prompt: String,
    /// The per-scene prompt breakdown from the final refinement
    pub scene_prompts: Vec<String>,
    /// Final QA score
    pub qa_score: f64,
    /// Number of refinement loops used
    pub feedback_iterations: u32,
}

/// Everything the video generation client needs to run one job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoJob {
    /// The refined creative prompt (before deterministic enhancement)
    pub prompt: String,
    /// Source image (base64 or URL)
    pub image: String,
    /// Commercial format
    pub video_type: VideoType,
    /// Duration in seconds
    pub duration: u32,
    /// Generate background audio
    pub is_music: bool,
    /// A human model appears in the video
    pub is_model: bool,
}

/// Terminal result of a remote video generation job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationOutput {
    /// URL of the generated video
    pub video_url: String,
    /// ID of the generation task
    pub generation_id: String,
    /// Status of the generation (e.g., success, failed)
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_deserializes_with_minimal_fields() {
        let raw = r#"{
            "jewellery_type": "ring",
            "gender": "female",
            "video_type": "ecommerce",
            "duration": 8,
            "base64_image": "abc123",
            "is_music": true,
            "is_model": false
        }"#;
        let request: GenerationRequest = serde_json::from_str(raw).unwrap();
        assert_eq!(request.video_type, VideoType::Ecommerce);
        assert!(request.model_consistency);
        assert!(request.product_description.is_none());
        assert!(request.reference_video.is_none());
    }
}
