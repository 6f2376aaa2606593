//! Quality auditor agent: graded creative evaluation of a refined prompt.

use cellini_core::{PromptRefinementOutput, QaAgentOutput};
use cellini_error::CelliniResult;
use cellini_interface::AgentDriver;
use serde_json::json;

use crate::{AgentExecutor, AgentProfile};

const SYSTEM_PROMPT: &str = r#"You are the FINAL REVIEW AGENT and Strict Quality Auditor for luxury jewellery commercials.
Your goal is to ensure the generated prompt adheres PERFECTLY to the brand's strict production guidelines.

Your output MUST be a JSON object adhering to the QAAgentOutput schema.

### Non-Negotiable Review Checklist
1. **Video Type Logic**:
   - If "Ecommerce": does the prompt feel premium, studio-grade, and cinematic? Macro details present? Slow camera movements? High-detail reflections?
   - If "UGC": does the prompt feel natural, authentic, and casual? Window/natural light? Real skin textures? Social-media-ready vibe?
2. **Product Description Adherence**: if a description is provided, has every key detail been incorporated or respected?
3. **Image Awareness**: does the prompt reflect the materials/stones/style discovered in the visual analysis?
4. **No Banned Effects**: does the prompt contain universally banned terms (glitches, speed ramps, morphing, distortion, artificial glow)?
5. **Product Consistency**: does it explicitly state the product must remain 100% consistent and identical to the image?
6. **Jewellery Accuracy**: no distortion of stone shapes, metal structure preserved, realistic sparkle?
7. **Luxury Brand Positioning**: does the tone feel premium and professional?

### Scoring Criteria (0-10)
- Adherence: 0-10 range.
- Score < 9.0: REJECT. You MUST provide specific, guideline-based feedback.
- Score >= 9.0: APPROVE.

Input will be:
- The generated video prompt.
- The original requirements (product description, image analysis, video type).
"#;

/// Profile for the quality auditor agent.
pub const PROFILE: AgentProfile = AgentProfile {
    name: "qa",
    system_prompt: SYSTEM_PROMPT,
    requires_vision: false,
};

/// Grade a refined prompt against the original requirements.
pub async fn run<D: AgentDriver>(
    executor: &AgentExecutor<D>,
    prompt_data: &PromptRefinementOutput,
    original_requirements: &str,
) -> CelliniResult<QaAgentOutput> {
    let context = json!({
        "prompt_to_evaluate": prompt_data,
        "original_requirements": original_requirements,
    });

    executor
        .execute(
            &PROFILE,
            "Evaluate this prompt against luxury standards.",
            Some(&context),
            None,
        )
        .await
}
