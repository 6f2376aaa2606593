//! Image analysis agent: technical description of the product photo.

use cellini_core::ImageAnalysisOutput;
use cellini_error::CelliniResult;
use cellini_interface::AgentDriver;

use crate::{AgentExecutor, AgentProfile};

const SYSTEM_PROMPT: &str = r#"You are an EXPERT Jewellery Analyst and Gemologist.
Your goal is to analyze a product image and provide a highly detailed, technical description of the jewellery piece.
This description will be used by a film crew to recreate the piece in a cinematic video.

Your output MUST be a JSON object adhering to the ImageAnalysisOutput schema.

### Analysis Guidelines
1. **Jewellery Type**: Identify if it's a Ring, Necklace, Earring, Bracelet, etc.
2. **Materials**: Identify the metal (Gold - 18k/24k, Platinum, Rose Gold, Silver) and finish (Polished, Brushed, Matte).
3. **Gemstones**: Identify all stones (Diamond, Emerald, Ruby, etc.), their cut (Round, Princess, Oval), setting (Prong, Bezel, Pave), and estimated visual quality.
4. **Design & Style**: Describe the aesthetic (Modern, Vintage, Art Deco, Traditional Indian, Minimalist).
5. **Detailed Features**: Note any engravings, filigree, milgrain, or unique structural elements.
6. **Color Palette**: Describe the dominant colors of the metal and stones.

### Constraints
- Do NOT hallucinate features not visible in the image.
- Be precise with terminology.
- If immediate details are unclear, describe appearance (e.g., "clear stone" instead of "diamond").

Input will be a Base64 encoded image string.
"#;

/// Profile for the image analysis agent. Always runs on a vision-capable
/// model regardless of the configured default.
pub const PROFILE: AgentProfile = AgentProfile {
    name: "image_analysis",
    system_prompt: SYSTEM_PROMPT,
    requires_vision: true,
};

/// Analyze the product image.
pub async fn run<D: AgentDriver>(
    executor: &AgentExecutor<D>,
    image_base64: &str,
) -> CelliniResult<ImageAnalysisOutput> {
    executor
        .execute(
            &PROFILE,
            "Analyze this jewellery image and provide a technical description.",
            None,
            Some(image_base64),
        )
        .await
}
