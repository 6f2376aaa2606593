//! OpenAI-compatible API client.

use std::time::Duration;

use async_trait::async_trait;
use cellini_core::{ChatRequest, ChatResponse, OpenAiConfig};
use cellini_error::{AgentError, AgentErrorKind, CelliniResult};
use cellini_interface::{AgentDriver, Vision};
use reqwest::Client;
use tracing::{debug, error, instrument};

use super::conversion::{convert_request, convert_response};
use super::dto::{ChatCompletionRequest, ChatCompletionResponse};

/// Client for an OpenAI-compatible chat-completions endpoint.
///
/// Holds only static configuration (credentials, endpoint, model name) and is
/// safe to share across concurrent requests. One `generate` call performs
/// exactly one inference attempt; there is no retry at this layer.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenAiClient {
    /// Creates a new client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or the HTTP client cannot
    /// be constructed.
    #[instrument(skip(config), fields(model = %config.model()))]
    pub fn new(config: &OpenAiConfig) -> CelliniResult<Self> {
        if config.api_key().is_empty() {
            return Err(AgentError::new(AgentErrorKind::MissingApiKey).into());
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(*config.request_timeout_secs()))
            .build()
            .map_err(|e| {
                AgentError::new(AgentErrorKind::ApiRequest(format!(
                    "Failed to build HTTP client: {}",
                    e
                )))
            })?;

        debug!("Creating new OpenAI client");
        Ok(Self {
            client,
            api_key: config.api_key().clone(),
            model: config.model().clone(),
            base_url: config.base_url().trim_end_matches('/').to_string(),
        })
    }

    /// Sends one request to the chat-completions endpoint.
    #[instrument(skip(self, request), fields(model = %request.model))]
    async fn generate_completion(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, AgentError> {
        debug!("Sending request to chat-completions API");

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .header("content-type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Failed to send request to chat-completions API");
                AgentError::new(AgentErrorKind::ApiRequest(format!("Request failed: {}", e)))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Chat-completions API returned error");
            return Err(AgentError::new(AgentErrorKind::HttpStatus {
                status_code: status.as_u16(),
                message: body,
            }));
        }

        let completion: ChatCompletionResponse = response.json().await.map_err(|e| {
            error!(error = ?e, "Failed to parse chat-completions response");
            AgentError::new(AgentErrorKind::ApiRequest(format!(
                "Failed to parse response: {}",
                e
            )))
        })?;

        debug!(response_id = %completion.id, "Received chat-completions response");
        Ok(completion)
    }
}

#[async_trait]
impl AgentDriver for OpenAiClient {
    #[instrument(skip(self, request))]
    async fn generate(&self, request: &ChatRequest) -> CelliniResult<ChatResponse> {
        let model = request.model.as_deref().unwrap_or(self.model.as_str());

        let wire_request = convert_request(model, request)?;
        let wire_response = self.generate_completion(&wire_request).await?;
        let response = convert_response(&wire_response)?;

        Ok(response)
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

impl Vision for OpenAiClient {}
