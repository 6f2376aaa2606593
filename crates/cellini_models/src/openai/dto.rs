//! Wire types for the OpenAI chat-completions API.

use serde::{Deserialize, Serialize};

/// A chat-completions request body.
#[derive(Debug, Clone, Serialize, derive_builder::Builder)]
#[builder(setter(into))]
pub struct ChatCompletionRequest {
    /// Model identifier
    pub model: String,
    /// Conversation messages
    pub messages: Vec<ApiMessage>,
    /// Sampling temperature
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub temperature: Option<f32>,
    /// Output token cap
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub max_tokens: Option<u32>,
    /// Response format constraint
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub response_format: Option<ResponseFormat>,
}

impl ChatCompletionRequest {
    /// Start building a request.
    pub fn builder() -> ChatCompletionRequestBuilder {
        ChatCompletionRequestBuilder::default()
    }
}

/// Response format constraint; the service guarantees a single JSON object
/// when the type is `json_object`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseFormat {
    /// Format type
    #[serde(rename = "type")]
    pub kind: String,
}

impl ResponseFormat {
    /// The JSON-object response constraint.
    pub fn json_object() -> Self {
        Self {
            kind: "json_object".to_string(),
        }
    }
}

/// One conversation message on the wire.
#[derive(Debug, Clone, Serialize)]
pub struct ApiMessage {
    /// "system", "user", or "assistant"
    pub role: String,
    /// Message content, plain or multi-part
    pub content: ApiContent,
}

/// Message content: a bare string for text-only messages, or content parts
/// when an image is attached.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ApiContent {
    /// Plain text content
    Text(String),
    /// Multimodal content parts
    Parts(Vec<ContentPart>),
}

/// One multimodal content part.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    /// A text part
    Text {
        /// The text
        text: String,
    },
    /// An image part
    ImageUrl {
        /// The image reference
        image_url: ImageUrl,
    },
}

/// An image reference: an https URL or a `data:` URI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageUrl {
    /// The URL
    pub url: String,
}

/// A chat-completions response body.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    /// Response identifier
    pub id: String,
    /// Generated choices; the driver reads the first
    pub choices: Vec<ApiChoice>,
}

/// One generated choice.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiChoice {
    /// The generated message
    pub message: ApiResponseMessage,
    /// Why generation stopped
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// The generated message payload.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponseMessage {
    /// Text content; absent when the model produced nothing
    #[serde(default)]
    pub content: Option<String>,
    /// Refusal text; present when the model declined the request
    #[serde(default)]
    pub refusal: Option<String>,
}
