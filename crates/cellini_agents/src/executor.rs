//! The structured agent call contract.
//!
//! One executor drives every specialized agent: it renders the agent's
//! system prompt plus the required output schema, serializes the input and
//! context into the user message, attaches an image part when present,
//! selects a vision-capable model when the configured one is not, and
//! validates the model's response into the agent's typed output.

use cellini_core::{
    ChatRequest, ChatResponse, FinishReason, Input, MediaSource, Message, Output, Role,
    StructuredOutput,
};
use cellini_error::{AgentError, AgentErrorKind, BuilderError, CelliniResult, JsonError};
use cellini_interface::AgentDriver;
use serde_json::Value;
use tracing::{error, info, instrument};

use crate::extraction::{extract_json, parse_json};

/// Substrings that mark a configured model name as vision-capable. If an
/// image is attached and none of these match, the executor overrides the
/// model with its configured vision model.
const VISION_MODEL_MARKERS: [&str; 4] = ["gpt-4", "4o", "4.1", "vision"];

/// Fallback vision-capable model.
const DEFAULT_VISION_MODEL: &str = "gpt-4o";

/// One bound agent configuration.
///
/// Specialized agents are values of this type plus a typed output; they
/// differ only in prompt content and schema, never in control flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgentProfile {
    /// Short identifier used in log entries
    pub name: &'static str,
    /// Fixed system prompt template
    pub system_prompt: &'static str,
    /// Always run on a vision-capable model, even without an image attached
    pub requires_vision: bool,
}

/// Executes structured agent calls against a language-model driver.
///
/// Holds only the driver and static configuration; safe to share across the
/// lifetime of a request. Exactly one model attempt per call — retry policy
/// belongs to the orchestrator.
#[derive(Debug)]
pub struct AgentExecutor<D> {
    driver: D,
    vision_model: String,
}

impl<D: AgentDriver> AgentExecutor<D> {
    /// Create a new executor over the given driver.
    pub fn new(driver: D) -> Self {
        Self {
            driver,
            vision_model: DEFAULT_VISION_MODEL.to_string(),
        }
    }

    /// Override the vision-capable model used when an image is attached and
    /// the driver's configured model is not vision-capable.
    pub fn with_vision_model(mut self, model: impl Into<String>) -> Self {
        self.vision_model = model.into();
        self
    }

    /// Get a reference to the underlying driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Execute one structured agent call.
    ///
    /// # Errors
    ///
    /// - [`AgentErrorKind::ContentRejected`] when the model refused or the
    ///   response was filtered
    /// - [`AgentErrorKind::EmptyResponse`] when no content came back for any
    ///   other reason
    /// - [`AgentErrorKind::ValidationFailure`] when the response does not
    ///   parse or does not satisfy the declared schema
    /// - transport errors from the driver, unchanged
    #[instrument(
        skip(self, input, context, image),
        fields(agent = profile.name, vision = image.is_some() || profile.requires_vision)
    )]
    pub async fn execute<T: StructuredOutput>(
        &self,
        profile: &AgentProfile,
        input: &str,
        context: Option<&Value>,
        image: Option<&str>,
    ) -> CelliniResult<T> {
        info!("Agent starting execution");

        let system_prompt = render_system_prompt(profile.system_prompt, &T::schema())?;
        let user_text = render_user_input(input, context)?;

        let mut content = vec![Input::Text(user_text)];
        if let Some(image) = image {
            content.push(Input::Image {
                mime: Some("image/jpeg".to_string()),
                source: MediaSource::from_image_string(image),
            });
        }

        let request = ChatRequest::builder()
            .messages(vec![
                Message::text(Role::System, system_prompt),
                Message {
                    role: Role::User,
                    content,
                },
            ])
            .model(self.select_model(image.is_some() || profile.requires_vision))
            .build()
            .map_err(|e| BuilderError::from(e.to_string()))?;

        let response = self.driver.generate(&request).await.inspect_err(|e| {
            error!(agent = profile.name, error = %e, "Agent call failed");
        })?;

        let output = validate_response::<T>(&response).map_err(|e| {
            error!(agent = profile.name, error = %e, "Agent response rejected");
            e
        })?;

        info!("Agent execution successful");
        Ok(output)
    }

    /// Pick the model for this call. `None` keeps the driver's configured
    /// model; a vision call against a non-vision model forces the override,
    /// keyword-matched against the configured model name.
    fn select_model(&self, needs_vision: bool) -> Option<String> {
        if !needs_vision {
            return None;
        }
        let configured = self.driver.model_name().to_lowercase();
        if VISION_MODEL_MARKERS.iter().any(|m| configured.contains(m)) {
            None
        } else {
            Some(self.vision_model.clone())
        }
    }
}

/// Append the machine-readable schema to the agent's prompt template.
fn render_system_prompt(template: &str, schema: &Value) -> CelliniResult<String> {
    let schema_text = serde_json::to_string_pretty(schema)
        .map_err(|e| JsonError::new(format!("Failed to render schema: {}", e)))?;
    Ok(format!(
        "{}\n\nRequired JSON Schema:\n{}",
        template, schema_text
    ))
}

/// Render the input data and optional context mapping as the user message.
fn render_user_input(input: &str, context: Option<&Value>) -> CelliniResult<String> {
    let mut prompt = format!("Input: {}\n", input);
    if let Some(context) = context {
        let rendered = serde_json::to_string(context)
            .map_err(|e| JsonError::new(format!("Failed to serialize context: {}", e)))?;
        prompt.push_str(&format!("Context: {}\n", rendered));
    }
    prompt.push_str("\nPlease provide your response in valid JSON format matching the required schema.");
    Ok(prompt)
}

/// Apply the response taxonomy: refusal/filter beats empty, empty beats
/// validation, and only a parseable schema-conforming payload succeeds.
fn validate_response<T: StructuredOutput>(response: &ChatResponse) -> Result<T, AgentError> {
    match response.outputs.first() {
        Some(Output::Json(value)) => serde_json::from_value(value.clone()).map_err(|e| {
            AgentError::new(AgentErrorKind::ValidationFailure(format!(
                "JSON output did not match schema: {}",
                e
            )))
        }),
        Some(Output::Text(text)) if !text.trim().is_empty() => {
            info!(response_size = text.len(), "Agent raw response received");
            let json = extract_json(text)?;
            parse_json(&json)
        }
        _ => {
            if let Some(refusal) = &response.refusal {
                return Err(AgentError::new(AgentErrorKind::ContentRejected(
                    refusal.clone(),
                )));
            }
            if response.finish_reason == Some(FinishReason::ContentFilter) {
                return Err(AgentError::new(AgentErrorKind::ContentRejected(
                    "response was filtered by content policy".to_string(),
                )));
            }
            Err(AgentError::new(AgentErrorKind::EmptyResponse {
                finish_reason: response.finish_reason.as_ref().map(|r| r.to_string()),
            }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_prompt_carries_schema() {
        let schema = serde_json::json!({"type": "object"});
        let rendered = render_system_prompt("You are an auditor.", &schema).unwrap();
        assert!(rendered.starts_with("You are an auditor."));
        assert!(rendered.contains("Required JSON Schema:"));
        assert!(rendered.contains("\"object\""));
    }

    #[test]
    fn user_input_includes_context_when_present() {
        let context = serde_json::json!({"is_model": false});
        let rendered = render_user_input("Audit this.", Some(&context)).unwrap();
        assert!(rendered.starts_with("Input: Audit this.\n"));
        assert!(rendered.contains("Context: {\"is_model\":false}"));
        assert!(rendered.ends_with("matching the required schema."));
    }

    #[test]
    fn refusal_wins_over_empty() {
        #[derive(serde::Deserialize, Debug)]
        struct Dummy;
        impl StructuredOutput for Dummy {
            const NAME: &'static str = "Dummy";
            fn schema() -> Value {
                serde_json::json!({"type": "object"})
            }
        }

        let response = ChatResponse {
            outputs: vec![],
            finish_reason: Some(FinishReason::Stop),
            refusal: Some("no".to_string()),
        };
        let err = validate_response::<Dummy>(&response).unwrap_err();
        assert!(matches!(err.kind, AgentErrorKind::ContentRejected(_)));
    }
}
