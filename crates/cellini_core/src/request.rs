//! Request and response types for language-model generation.

use crate::{Message, Output};
use serde::{Deserialize, Serialize};

/// Generic chat generation request (multimodal-safe).
///
/// # Examples
///
/// ```
/// use cellini_core::{ChatRequest, Message, Role, Input};
///
/// let request = ChatRequest {
///     messages: vec![Message {
///         role: Role::User,
///         content: vec![Input::Text("Hello!".to_string())],
///     }],
///     max_tokens: Some(100),
///     temperature: Some(0.7),
///     model: None,
/// };
///
/// assert_eq!(request.messages.len(), 1);
/// assert_eq!(request.max_tokens, Some(100));
/// ```
#[derive(
    Debug, Clone, PartialEq, Serialize, Deserialize, Default, derive_builder::Builder,
)]
#[builder(setter(into), default)]
pub struct ChatRequest {
    /// The conversation messages to send
    pub messages: Vec<Message>,
    /// Maximum number of tokens to generate
    pub max_tokens: Option<u32>,
    /// Sampling temperature (0.0 to 1.0)
    pub temperature: Option<f32>,
    /// Model identifier to use; `None` selects the driver's configured model
    pub model: Option<String>,
}

impl ChatRequest {
    /// Start building a chat request.
    pub fn builder() -> ChatRequestBuilder {
        ChatRequestBuilder::default()
    }
}

/// Why the model stopped generating.
///
/// Drivers map their provider-specific stop reasons onto this enum; values
/// the driver does not recognize are preserved in [`FinishReason::Other`].
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
pub enum FinishReason {
    /// Natural end of generation
    #[display("stop")]
    Stop,
    /// Output token limit reached
    #[display("length")]
    Length,
    /// The response was removed by a content filter
    #[display("content_filter")]
    ContentFilter,
    /// Any other provider-specific reason
    #[display("{}", _0)]
    Other(String),
}

impl FinishReason {
    /// Parse a provider finish-reason string.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "stop" => Self::Stop,
            "length" => Self::Length,
            "content_filter" => Self::ContentFilter,
            other => Self::Other(other.to_string()),
        }
    }
}

/// The unified response object.
///
/// Carries the generated outputs plus the upstream finish reason and any
/// refusal text, so callers can distinguish an empty response from a
/// content-policy rejection.
///
/// # Examples
///
/// ```
/// use cellini_core::{ChatResponse, Output};
///
/// let response = ChatResponse::from_text("Hello! How can I help?");
/// assert_eq!(response.outputs.len(), 1);
/// assert!(response.refusal.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    /// The generated outputs from the model
    pub outputs: Vec<Output>,
    /// Why generation stopped, when the provider reported it
    pub finish_reason: Option<FinishReason>,
    /// Refusal text, when the model explicitly declined the request
    pub refusal: Option<String>,
}

impl ChatResponse {
    /// Convenience constructor for a plain-text response.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            outputs: vec![Output::Text(text.into())],
            finish_reason: Some(FinishReason::Stop),
            refusal: None,
        }
    }
}
