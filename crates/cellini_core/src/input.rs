//! Input types for language-model requests.

use crate::MediaSource;
use serde::{Deserialize, Serialize};

/// Supported input types to language models.
///
/// # Examples
///
/// ```
/// use cellini_core::{Input, MediaSource};
///
/// // Text input
/// let text = Input::Text("Describe this piece.".to_string());
///
/// // Image input with base64 payload
/// let image = Input::Image {
///     mime: Some("image/jpeg".to_string()),
///     source: MediaSource::Base64("/9j/4AAQSkZJRg...".to_string()),
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Input {
    /// Plain text input.
    Text(String),

    /// Image input (PNG, JPEG, WebP, etc.).
    Image {
        /// MIME type, e.g., "image/png" or "image/jpeg"
        mime: Option<String>,
        /// Media source (URL or base64)
        source: MediaSource,
    },
}
