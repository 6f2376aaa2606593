//! Media source types for multimodal content.

use serde::{Deserialize, Serialize};

/// Where media content is sourced from.
///
/// # Examples
///
/// ```
/// use cellini_core::MediaSource;
///
/// let url = MediaSource::Url("https://example.com/image.png".to_string());
/// let base64 = MediaSource::Base64("iVBORw0KGgo...".to_string());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaSource {
    /// URL to fetch the content from
    Url(String),
    /// Base64-encoded content
    Base64(String),
}

impl MediaSource {
    /// Classify a raw image string as a URL or base64 payload.
    ///
    /// Strings that already look like a URL (or a `data:` URI) are passed
    /// through as [`MediaSource::Url`]; anything else is treated as raw
    /// base64 image data.
    pub fn from_image_string(image: impl Into<String>) -> Self {
        let image = image.into();
        if image.starts_with("http") || image.starts_with("data:") {
            Self::Url(image)
        } else {
            Self::Base64(image)
        }
    }
}
