//! Conversions between Cellini chat types and the OpenAI wire format.

use cellini_core::{
    ChatRequest, ChatResponse, FinishReason, Input, MediaSource, Output, Role,
};
use cellini_error::{AgentError, AgentErrorKind};
use tracing::{debug, instrument};

use super::dto::{
    ApiContent, ApiMessage, ChatCompletionRequest, ChatCompletionResponse, ContentPart, ImageUrl,
    ResponseFormat,
};

/// Render an image input as the URL string the API expects.
///
/// URLs and `data:` URIs pass through; raw base64 payloads are wrapped in a
/// `data:` URI using the declared MIME type (JPEG when unspecified).
fn image_url(mime: Option<&str>, source: &MediaSource) -> String {
    match source {
        MediaSource::Url(url) => url.clone(),
        MediaSource::Base64(payload) => {
            format!("data:{};base64,{}", mime.unwrap_or("image/jpeg"), payload)
        }
    }
}

/// Convert one Cellini message into the wire shape.
///
/// Text-only messages use the bare-string content form; messages carrying an
/// image use content parts.
fn convert_message(role: Role, content: &[Input]) -> ApiMessage {
    let role = match role {
        Role::System => "system",
        Role::User => "user",
        Role::Assistant => "assistant",
    };

    let has_media = content.iter().any(|i| !matches!(i, Input::Text(_)));
    let content = if has_media {
        let parts = content
            .iter()
            .map(|input| match input {
                Input::Text(text) => ContentPart::Text { text: text.clone() },
                Input::Image { mime, source } => ContentPart::ImageUrl {
                    image_url: ImageUrl {
                        url: image_url(mime.as_deref(), source),
                    },
                },
            })
            .collect();
        ApiContent::Parts(parts)
    } else {
        let text = content
            .iter()
            .filter_map(|input| match input {
                Input::Text(text) => Some(text.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("\n");
        ApiContent::Text(text)
    };

    ApiMessage {
        role: role.to_string(),
        content,
    }
}

/// Convert a Cellini [`ChatRequest`] to an OpenAI chat-completions request.
///
/// The response is always constrained to a single JSON object; every agent
/// in this system consumes schema-validated JSON.
#[instrument(skip(request), fields(message_count = request.messages.len()))]
pub(crate) fn convert_request(
    model: &str,
    request: &ChatRequest,
) -> Result<ChatCompletionRequest, AgentError> {
    debug!("Converting ChatRequest to chat-completions request");

    let messages: Vec<ApiMessage> = request
        .messages
        .iter()
        .map(|msg| convert_message(msg.role, &msg.content))
        .collect();

    if messages.is_empty() {
        return Err(AgentError::new(AgentErrorKind::ApiRequest(
            "Request must contain at least one message".to_string(),
        )));
    }

    ChatCompletionRequest::builder()
        .model(model)
        .messages(messages)
        .temperature(request.temperature)
        .max_tokens(request.max_tokens)
        .response_format(Some(ResponseFormat::json_object()))
        .build()
        .map_err(|e| AgentError::new(AgentErrorKind::ApiRequest(e.to_string())))
}

/// Convert an OpenAI response to a Cellini [`ChatResponse`].
///
/// Empty content is not an error here: the structured-call layer decides how
/// to classify it using the finish reason and refusal carried through.
#[instrument(skip(response), fields(response_id = %response.id))]
pub(crate) fn convert_response(
    response: &ChatCompletionResponse,
) -> Result<ChatResponse, AgentError> {
    let choice = response.choices.first().ok_or_else(|| {
        AgentError::new(AgentErrorKind::ApiRequest(
            "Response contained no choices".to_string(),
        ))
    })?;

    let outputs = match choice.message.content.as_deref() {
        Some(text) if !text.is_empty() => vec![Output::Text(text.to_string())],
        _ => Vec::new(),
    };

    Ok(ChatResponse {
        outputs,
        finish_reason: choice.finish_reason.as_deref().map(FinishReason::parse),
        refusal: choice.message.refusal.clone(),
    })
}
