//! Typed outputs for the specialized agents, with colocated JSON schemas.
//!
//! Every agent must emit a single JSON object; the executor renders the
//! output type's schema into the system instruction and validates the raw
//! response against the type. Keeping each schema next to its struct means
//! the two cannot drift apart.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// A quality score at or above this value approves a refined prompt.
pub const QA_APPROVAL_THRESHOLD: f64 = 9.0;

/// The only continuity score that counts as approval; anything else is a
/// rejection (the continuity gate is all-or-nothing).
pub const CONTINUITY_PASS_SCORE: f64 = 10.0;

/// An output type an agent can be asked to produce.
///
/// Implementors pair a Rust struct with the JSON Schema document that is
/// rendered into the agent's instructions at call time.
pub trait StructuredOutput: serde::de::DeserializeOwned {
    /// Schema title rendered into the instruction text.
    const NAME: &'static str;

    /// JSON Schema document describing the required output shape.
    fn schema() -> Value;
}

/// Structured visual description of the product image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageAnalysisOutput {
    /// Type of jewellery identified
    pub jewellery_type: String,
    /// Metal and finish details
    pub materials: String,
    /// Stone details, cuts, and settings
    pub gemstones: String,
    /// Aesthetic style (Modern, Vintage, etc.)
    pub design_style: String,
    /// Engravings, filigree, structural elements
    pub detailed_features: String,
    /// Dominant colors
    pub color_palette: String,
    /// A concise paragraph summarizing the visual appearance for prompting
    pub visual_context_summary: String,
}

impl StructuredOutput for ImageAnalysisOutput {
    const NAME: &'static str = "ImageAnalysisOutput";

    fn schema() -> Value {
        json!({
            "title": Self::NAME,
            "type": "object",
            "properties": {
                "jewellery_type": {"type": "string", "description": "Type of jewellery identified"},
                "materials": {"type": "string", "description": "Metal and finish details"},
                "gemstones": {"type": "string", "description": "Stone details, cuts, and settings"},
                "design_style": {"type": "string", "description": "Aesthetic style (Modern, Vintage, etc.)"},
                "detailed_features": {"type": "string", "description": "Engravings, filigree, structural elements"},
                "color_palette": {"type": "string", "description": "Dominant colors"},
                "visual_context_summary": {"type": "string", "description": "A concise paragraph summarizing the visual appearance for prompting"}
            },
            "required": [
                "jewellery_type", "materials", "gemstones", "design_style",
                "detailed_features", "color_palette", "visual_context_summary"
            ]
        })
    }
}

/// Narrative and creative framing for the commercial.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConceptOutput {
    /// Title of the cinematic concept
    pub title: String,
    /// The narrative arc and emotional tone of the video
    pub storytelling_concept: String,
    /// Visual style, color palette, and mood
    pub aesthetic_direction: String,
    /// Description of lighting setup (e.g., soft, dramatic, golden hour)
    pub lighting_mood: String,
    /// How the jewellery pieces will be highlighted
    pub product_focus_strategy: String,
    /// Step-by-step flow of the commercial
    pub narrative_flow: String,
}

impl StructuredOutput for ConceptOutput {
    const NAME: &'static str = "ConceptOutput";

    fn schema() -> Value {
        json!({
            "title": Self::NAME,
            "type": "object",
            "properties": {
                "title": {"type": "string", "description": "Title of the cinematic concept"},
                "storytelling_concept": {"type": "string", "description": "The narrative arc and emotional tone of the video"},
                "aesthetic_direction": {"type": "string", "description": "Visual style, color palette, and mood"},
                "lighting_mood": {"type": "string", "description": "Description of lighting setup (e.g., soft, dramatic, golden hour)"},
                "product_focus_strategy": {"type": "string", "description": "How the jewellery pieces will be highlighted"},
                "narrative_flow": {"type": "string", "description": "Step-by-step flow of the commercial"}
            },
            "required": [
                "title", "storytelling_concept", "aesthetic_direction",
                "lighting_mood", "product_focus_strategy", "narrative_flow"
            ]
        })
    }
}

/// One shot in the visual production plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDetail {
    /// Position of this scene in the sequence
    pub sequence_number: u32,
    /// Detailed visual description of the scene
    pub description: String,
    /// Camera angle (e.g., macro, wide, panning)
    pub camera_angle: String,
    /// Movement description (e.g., slow zoom in, dolly track)
    pub camera_movement: String,
    /// Specific lighting for this shot
    pub lighting_setup: String,
    /// Specific details to focus on (e.g., diamond cut, metal texture)
    pub focus_points: Vec<String>,
    /// Estimated duration in seconds
    pub duration_estimate: f64,
}

/// Technical shot plan produced by the visual director.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualDirectorOutput {
    /// Overall visual cohesion plan
    pub visual_style_summary: String,
    /// Scene-by-scene breakdown
    pub scenes: Vec<SceneDetail>,
    /// Notes on reflection, texture, and stone physics
    pub technical_notes: String,
}

impl StructuredOutput for VisualDirectorOutput {
    const NAME: &'static str = "VisualDirectorOutput";

    fn schema() -> Value {
        json!({
            "title": Self::NAME,
            "type": "object",
            "properties": {
                "visual_style_summary": {"type": "string", "description": "Overall visual cohesion plan"},
                "scenes": {
                    "type": "array",
                    "description": "Scene-by-scene breakdown",
                    "items": {
                        "type": "object",
                        "properties": {
                            "sequence_number": {"type": "integer"},
                            "description": {"type": "string", "description": "Detailed visual description of the scene"},
                            "camera_angle": {"type": "string", "description": "Camera angle (e.g., macro, wide, panning)"},
                            "camera_movement": {"type": "string", "description": "Movement description (e.g., slow zoom in, dolly track)"},
                            "lighting_setup": {"type": "string", "description": "Specific lighting for this shot"},
                            "focus_points": {"type": "array", "items": {"type": "string"}, "description": "Specific details to focus on"},
                            "duration_estimate": {"type": "number", "description": "Estimated duration in seconds"}
                        },
                        "required": [
                            "sequence_number", "description", "camera_angle", "camera_movement",
                            "lighting_setup", "focus_points", "duration_estimate"
                        ]
                    }
                },
                "technical_notes": {"type": "string", "description": "Notes on reflection, texture, and stone physics"}
            },
            "required": ["visual_style_summary", "scenes", "technical_notes"]
        })
    }
}

/// The assembled generation prompt and its per-scene breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptRefinementOutput {
    /// The optimized prompt for the video generation model
    pub final_prompt: String,
    /// A breakdown of prompts for each individual scene or segment
    #[serde(default)]
    pub individual_prompts: Vec<String>,
    /// Explanation of why this prompt structure was chosen
    pub rationale: String,
    /// Elements to avoid
    #[serde(default)]
    pub negative_prompt: Option<String>,
}

impl StructuredOutput for PromptRefinementOutput {
    const NAME: &'static str = "PromptRefinementOutput";

    fn schema() -> Value {
        json!({
            "title": Self::NAME,
            "type": "object",
            "properties": {
                "final_prompt": {"type": "string", "description": "The optimized prompt for the video generation model"},
                "individual_prompts": {"type": "array", "items": {"type": "string"}, "description": "A breakdown of prompts for each individual scene or segment"},
                "rationale": {"type": "string", "description": "Explanation of why this prompt structure was chosen"},
                "negative_prompt": {"type": ["string", "null"], "description": "Elements to avoid"}
            },
            "required": ["final_prompt", "rationale"]
        })
    }
}

/// Graded creative evaluation of a refined prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QaAgentOutput {
    /// Quality score out of 10
    pub score: f64,
    /// Detailed feedback on the prompt quality and alignment
    pub feedback: String,
    /// Specific points of critique
    pub critique_points: Vec<String>,
    /// True if score >= 9.0
    pub approved: bool,
}

impl StructuredOutput for QaAgentOutput {
    const NAME: &'static str = "QAAgentOutput";

    fn schema() -> Value {
        json!({
            "title": Self::NAME,
            "type": "object",
            "properties": {
                "score": {"type": "number", "description": "Quality score out of 10"},
                "feedback": {"type": "string", "description": "Detailed feedback on the prompt quality and alignment"},
                "critique_points": {"type": "array", "items": {"type": "string"}, "description": "Specific points of critique"},
                "approved": {"type": "boolean", "description": "True if score >= 9.0"}
            },
            "required": ["score", "feedback", "critique_points", "approved"]
        })
    }
}

/// Binary-gate compliance verdict from the continuity auditor.
///
/// The score is always exactly 0 or 10; a single rule violation drives it to
/// the minimum and approval is true only at 10.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContinuityControlOutput {
    /// Compliance score out of 10; must be 10.0 for approval
    pub score: f64,
    /// Detailed feedback on specific violations of strict rules
    pub feedback: String,
    /// Type of violation (e.g., "Product Change", "Artificial Effect",
    /// "Model Issue"); absent when approved
    #[serde(default)]
    pub violation_type: Option<String>,
    /// True only if score is 10.0
    #[serde(default)]
    pub approved: bool,
}

impl StructuredOutput for ContinuityControlOutput {
    const NAME: &'static str = "ContinuityControlOutput";

    fn schema() -> Value {
        json!({
            "title": Self::NAME,
            "type": "object",
            "properties": {
                "score": {"type": "number", "description": "Compliance score out of 10. Must be 10.0 for approval."},
                "feedback": {"type": "string", "description": "Detailed feedback on specific violations of strict rules."},
                "violation_type": {"type": ["string", "null"], "description": "Type of violation (e.g., 'Product Change', 'Artificial Effect', 'Model Issue'). None if approved."},
                "approved": {"type": "boolean", "description": "True only if score is 10.0"}
            },
            "required": ["score", "feedback", "approved"]
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_analysis_round_trips() {
        let raw = r#"{
            "jewellery_type": "Ring",
            "materials": "18k yellow gold, polished",
            "gemstones": "Round brilliant diamond, prong set",
            "design_style": "Minimalist",
            "detailed_features": "Plain band, no engraving",
            "color_palette": "Warm gold with white sparkle",
            "visual_context_summary": "A minimalist gold solitaire ring."
        }"#;
        let parsed: ImageAnalysisOutput = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.jewellery_type, "Ring");
    }

    #[test]
    fn prompt_refinement_defaults_optional_fields() {
        let raw = r#"{
            "final_prompt": "A ring on slate gray stone.",
            "rationale": "Simple hero shot."
        }"#;
        let parsed: PromptRefinementOutput = serde_json::from_str(raw).unwrap();
        assert!(parsed.individual_prompts.is_empty());
        assert!(parsed.negative_prompt.is_none());
    }

    #[test]
    fn continuity_defaults_to_rejected() {
        let raw = r#"{"score": 0.0, "feedback": "Missing background lock"}"#;
        let parsed: ContinuityControlOutput = serde_json::from_str(raw).unwrap();
        assert!(!parsed.approved);
        assert!(parsed.violation_type.is_none());
        assert_ne!(parsed.score, CONTINUITY_PASS_SCORE);
    }

    #[test]
    fn continuity_approval_rides_on_the_pass_score() {
        let raw = r#"{"score": 10.0, "feedback": "All locks present", "approved": true}"#;
        let parsed: ContinuityControlOutput = serde_json::from_str(raw).unwrap();
        assert!(parsed.approved);
        assert_eq!(parsed.score, CONTINUITY_PASS_SCORE);
    }

    #[test]
    fn schemas_declare_every_required_field() {
        for (schema, required_count) in [
            (ImageAnalysisOutput::schema(), 7),
            (ConceptOutput::schema(), 6),
            (VisualDirectorOutput::schema(), 3),
            (PromptRefinementOutput::schema(), 2),
            (QaAgentOutput::schema(), 4),
            (ContinuityControlOutput::schema(), 3),
        ] {
            let required = schema["required"].as_array().unwrap();
            assert_eq!(required.len(), required_count);
            let properties = schema["properties"].as_object().unwrap();
            for field in required {
                assert!(properties.contains_key(field.as_str().unwrap()));
            }
        }
    }
}
