//! Deterministic assembly of the enhanced generation prompt.
//!
//! Pure text composition over the refined creative prompt plus request
//! flags; no failure modes. Repeated key phrases in the lock blocks are
//! intentional: repetition raises attention weight in diffusion-based video
//! models.

use cellini_core::{VideoJob, VideoType};

/// A resolved backdrop for product-only shots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Backdrop {
    /// Color name, e.g. "rich charcoal gray"
    pub color: &'static str,
    /// Hex value, e.g. "#121212"
    pub hex: &'static str,
    /// Full sentence used verbatim in the style block
    pub description: &'static str,
    /// Physical material for the cyclorama
    pub surface: &'static str,
}

/// Light / white metals and clear stones: very dark backdrop for contrast.
const LIGHT_KEYWORDS: [&str; 8] = [
    "silver",
    "platinum",
    "white gold",
    "palladium",
    "diamond",
    "moissanite",
    "white sapphire",
    "clear stone",
];

/// Warm / dark metals and coloured stones: light, neutral backdrop.
const WARM_KEYWORDS: [&str; 12] = [
    "yellow gold",
    "rose gold",
    "22k gold",
    "18k gold",
    "24k gold",
    "emerald",
    "ruby",
    "red stone",
    "green stone",
    "antique gold",
    "bronze",
    "copper tone",
];

const SLATE: Backdrop = Backdrop {
    color: "deep slate gray",
    hex: "#1C1C1C",
    description: "premium textured deep slate gray stone surface, realistic mineral grain, \
        high-end matte stone finish, zero background variation, \
        perfectly stable stone texture, no color drift, background locked to #1C1C1C stone throughout",
    surface: "textured slate gray stone cyclorama",
};

const PARCHMENT: Backdrop = Backdrop {
    color: "warm parchment gray",
    hex: "#E8E8E8",
    description: "elegant light ash gray silk fabric surface, realistic micro-weave texture, \
        soft premium fabric sheen, zero background variation, \
        perfectly uniform light gray surface, background locked to #E8E8E8 silk throughout",
    surface: "light gray silk cyclorama",
};

const SMOKE: Backdrop = Backdrop {
    color: "polished smoke gray",
    hex: "#2F2F2F",
    description: "premium polished smoke gray marble surface, subtle realistic mineral veining, \
        luxury stone texture, zero background variation, perfectly uniform gray marble, \
        no shifts in veining, background locked to #2F2F2F marble throughout",
    surface: "polished gray marble cyclorama",
};

const CHARCOAL: Backdrop = Backdrop {
    color: "rich charcoal gray",
    hex: "#121212",
    description: "solid rich charcoal gray textured volcanic stone surface, microscopic stone grain, \
        premium tactile finish, zero background variation, perfectly uniform charcoal surface, \
        no gradients, no color cast, background locked to #121212 stone throughout",
    surface: "charcoal gray textured stone cyclorama",
};

/// Product-lock block, injected verbatim with high token weight.
pub const PRODUCT_LOCK: &str = "PRODUCT CONSISTENCY ABSOLUTE LOCK: \
    the jewellery piece is 100% identical to the reference image in every frame, \
    exact same shape, exact same stone count, exact same stone placement, \
    exact same metal colour, exact same proportions, exact same design details, \
    static product geometry throughout, no morphing whatsoever, \
    no redesign, no extra stones, no missing stones, no size change, \
    no style drift, subject locked to reference image, \
    preserve every engraving and filigree detail as seen in reference, \
    stone facets identical to reference, metal grain identical to reference";

/// Model-lock block, appended only when a model is present.
pub const MODEL_LOCK: &str = "MODEL CONSISTENCY ABSOLUTE LOCK: \
    The human model's facial features, hair style, skin tone, and body proportions \
    must remain 100% identical in every frame. Zero facial morphing, zero feature drift, \
    clothing remains exactly the same throughout, preserve stable human identity.";

/// Inspect the prompt for metal/stone keywords and pick the contrasting
/// backdrop. The same (keyword-set, backdrop) table appears in the Prompt
/// Refinement agent's instructions; keep the two in sync.
pub fn resolve_backdrop(prompt: &str) -> Backdrop {
    let p = prompt.to_lowercase();

    let is_light = LIGHT_KEYWORDS.iter().any(|k| p.contains(k));
    let is_warm = WARM_KEYWORDS.iter().any(|k| p.contains(k));

    match (is_light, is_warm) {
        (true, false) => SLATE,
        (false, true) => PARCHMENT,
        (true, true) => SMOKE,
        (false, false) => CHARCOAL,
    }
}

/// Audio direction phrase; empty when music is disabled.
fn audio_phrase(video_type: VideoType, is_music: bool) -> &'static str {
    if !is_music {
        return "";
    }
    match video_type {
        VideoType::Ugc => ", soft ambient background music, warm, casual, feel-good, no vocals",
        VideoType::Ecommerce => {
            ", elegant luxury background score, cinematic, premium, sophisticated, no vocals"
        }
    }
}

/// Model-presence phrase. The no-model ecommerce variant names the resolved
/// backdrop so the surface stays consistent with the style block.
fn model_phrase(video_type: VideoType, is_model: bool, backdrop: &Backdrop) -> String {
    match (is_model, video_type) {
        (true, VideoType::Ugc) => ", woman wearing the jewellery appropriately on her body, \
            candid moment, real skin texture with visible pores, authentic pose, casual-elegant, \
            jewellery is perfectly fitted and properly worn"
            .to_string(),
        (true, VideoType::Ecommerce) => ", high-end fashion model, elegant slow-motion pose, \
            premium styling, showcasing the jewellery by wearing it properly on her body, \
            realistic skin textures, high-fidelity human detail, \
            jewellery is perfectly positioned and worn naturally"
            .to_string(),
        (false, VideoType::Ugc) => ", no people, no human, lifestyle flat-lay, \
            product on natural stone or wooden surface, cinematic close-up"
            .to_string(),
        (false, VideoType::Ecommerce) => format!(
            ", no people, no human, product only, \
            product centered on {surface}, \
            majestic ultra-slow 360-degree turntable rotation, \
            product resting on high-end {surface}, \
            background remains {color} in every single frame",
            surface = backdrop.surface,
            color = backdrop.color,
        ),
    }
}

/// Style/background phrase.
fn style_phrase(video_type: VideoType, is_model: bool, backdrop: &Backdrop) -> String {
    match video_type {
        VideoType::Ugc => ", natural daylight, warm golden hour tones, \
            real-world lifestyle setting, authentic cinematic aesthetic, soft natural bokeh, \
            slow-motion handheld breathing, photorealistic 8k, \
            tactile textures, emotionally relatable"
            .to_string(),
        VideoType::Ecommerce if is_model => {
            // Lifestyle background for models even in ecommerce
            ", elegant luxury lifestyle background, high-end interior setting, \
            cinematic lighting, premium editorial aesthetic, \
            ultra-slow constant-speed orbital camera movement, \
            cinematic depth of field, realistic environment, \
            luxurious atmosphere, photorealistic 8k"
                .to_string()
        }
        VideoType::Ecommerce => format!(
            ", {description}, \
            background does NOT change colour or texture at any point, \
            background remains {color} from first frame to last frame, \
            soft cinematic top-down key light plus subtle side fill, \
            ultra-slow constant-speed 360-degree orbital camera orbit, \
            macro detailing of diamond facets and physically accurate metal reflections, \
            perfectly centered product framing, cinematic depth of field, \
            no harsh shadows, premium ecommerce hero-commercial aesthetic, \
            physically accurate diamond sparkle, high-polish metal surface reflections, \
            majestic product showcase, no vignetting on background edges",
            description = backdrop.description,
            color = backdrop.color,
        ),
    }
}

/// Background-lock block, templated on the resolved backdrop.
fn background_lock(backdrop: &Backdrop) -> String {
    format!(
        "BACKGROUND CONSISTENCY ABSOLUTE LOCK: \
        background is {color} (hex {hex}) and must NOT change in any frame, \
        zero background colour drift, zero background texture change, \
        no fade to different colour, no gradient appearing mid-video, \
        background remains perfectly uniform {color} from frame 0 to final frame, \
        background and product DO NOT swap or blend at any point",
        color = backdrop.color,
        hex = backdrop.hex,
    )
}

/// Movement amplitude sent to the generation service: "small" keeps the
/// subtle handheld feel for UGC; "auto" lets the smooth orbital rotation
/// play out for ecommerce.
pub fn movement_amplitude(video_type: VideoType) -> &'static str {
    match video_type {
        VideoType::Ecommerce => "auto",
        VideoType::Ugc => "small",
    }
}

/// Assemble the full enhanced prompt for one job.
pub fn enhance(job: &VideoJob) -> String {
    let backdrop = resolve_backdrop(&job.prompt);
    let audio = audio_phrase(job.video_type, job.is_music);
    let model = model_phrase(job.video_type, job.is_model, &backdrop);
    let style = style_phrase(job.video_type, job.is_model, &backdrop);
    let model_lock = if job.is_model {
        format!(". {}", MODEL_LOCK)
    } else {
        String::new()
    };

    format!(
        "{prompt}{audio}{model}{style}, \
        8k resolution, RAW photo quality, photorealistic masterpiece, \
        physically accurate reflections, realistic sparkle, no artificial glow, \
        preserve metal grain texture and stone facet shapes, \
        avoid overexposure, avoid artificial blur, \
        super slow motion 120fps, majestic cinematic drift, \
        zero jitter, no sudden cuts, no fast zoom. \
        {product_lock}. \
        {background_lock}{model_lock}.",
        prompt = job.prompt,
        audio = audio,
        model = model,
        style = style,
        product_lock = PRODUCT_LOCK,
        background_lock = background_lock(&backdrop),
        model_lock = model_lock,
    )
}
