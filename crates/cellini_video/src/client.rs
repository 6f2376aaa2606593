//! HTTP client for the Vidu image-to-video service.
//!
//! One generation is a submit followed by a bounded poll loop. Submission
//! failures are fatal; non-200 poll responses are transient and only consume
//! attempts. The interval and attempt ceiling come from configuration so
//! tests can shrink them.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use cellini_core::{GenerationOutput, VideoJob, ViduConfig};
use cellini_error::{CelliniResult, GenerationError, GenerationErrorKind};
use cellini_interface::VideoGenerator;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, info, instrument};

use crate::prompt;

/// Log a progress line every this many poll attempts.
const POLL_LOG_EVERY: u32 = 15;

/// Submission payload for the image-to-video endpoint.
#[derive(Debug, Serialize)]
struct SubmitPayload<'a> {
    prompt: &'a str,
    image: &'a str,
    duration: u32,
    resolution: &'a str,
    movement_amplitude: &'a str,
    generate_audio: bool,
    // The service's built-in prompt enhancer can strip or dilute the
    // explicit lock phrases, so it stays off.
    enhance_prompt: bool,
}

/// Accepted submission: the job identifier plus an optional poll URL.
#[derive(Debug, Clone, PartialEq, Eq)]
struct SubmitTicket {
    generation_id: String,
    poll_url: Option<String>,
}

/// One observation of the remote job's state.
#[derive(Debug, Clone)]
struct PollProbe {
    status_code: u16,
    body: Option<Value>,
}

/// Client for the Vidu image-to-video API.
///
/// Holds only static configuration and is safe to share across concurrent
/// requests.
#[derive(Debug, Clone)]
pub struct ViduClient {
    http: Client,
    api_key: String,
    base_url: String,
    poll_interval: Duration,
    max_poll_attempts: u32,
}

impl ViduClient {
    /// Creates a new client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or the HTTP client cannot
    /// be constructed.
    #[instrument(skip(config), fields(base_url = %config.base_url()))]
    pub fn new(config: &ViduConfig) -> CelliniResult<Self> {
        if config.api_key().is_empty() {
            return Err(GenerationError::new(GenerationErrorKind::MissingApiKey).into());
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(*config.request_timeout_secs()))
            .build()
            .map_err(|e| {
                GenerationError::new(GenerationErrorKind::Http(format!(
                    "Failed to build HTTP client: {}",
                    e
                )))
            })?;

        Ok(Self {
            http,
            api_key: config.api_key().clone(),
            base_url: config.base_url().trim_end_matches('/').to_string(),
            poll_interval: Duration::from_millis(*config.poll_interval_ms()),
            max_poll_attempts: *config.max_poll_attempts(),
        })
    }

    /// Submit one generation job.
    #[instrument(skip(self, payload))]
    async fn submit(&self, payload: &SubmitPayload<'_>) -> Result<SubmitTicket, GenerationError> {
        let response = self
            .http
            .post(format!("{}/vidu/q3/image-to-video", self.base_url))
            .bearer_auth(&self.api_key)
            .header("content-type", "application/json")
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Generation submission request failed");
                GenerationError::new(GenerationErrorKind::Http(e.to_string()))
            })?;

        let status = response.status();
        if !matches!(status.as_u16(), 200 | 201) {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Generation submission rejected");
            return Err(GenerationError::new(GenerationErrorKind::Submission {
                status_code: status.as_u16(),
                message: body,
            }));
        }

        let body: Value = response.json().await.map_err(|e| {
            GenerationError::new(GenerationErrorKind::Protocol(format!(
                "Submission response was not JSON: {}",
                e
            )))
        })?;

        parse_submission(&body)
    }

    /// Poll a submitted job until it reaches a terminal state.
    async fn poll(&self, ticket: &SubmitTicket) -> CelliniResult<GenerationOutput> {
        let url = ticket.poll_url.clone().unwrap_or_else(|| {
            format!("{}/predictions/{}", self.base_url, ticket.generation_id)
        });

        self.poll_with(&ticket.generation_id, || {
            let request = self.http.get(&url).bearer_auth(&self.api_key);
            async move {
                let response = request.send().await.map_err(|e| {
                    GenerationError::new(GenerationErrorKind::Http(e.to_string()))
                })?;
                let status_code = response.status().as_u16();
                let body = if status_code == 200 {
                    Some(response.json::<Value>().await.map_err(|e| {
                        GenerationError::new(GenerationErrorKind::Protocol(format!(
                            "Poll response was not JSON: {}",
                            e
                        )))
                    })?)
                } else {
                    None
                };
                Ok(PollProbe { status_code, body })
            }
        })
        .await
    }

    /// The bounded poll loop, written against an injected fetch so tests can
    /// script response sequences.
    async fn poll_with<F, Fut>(
        &self,
        generation_id: &str,
        mut fetch: F,
    ) -> CelliniResult<GenerationOutput>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<PollProbe, GenerationError>>,
    {
        for attempt in 1..=self.max_poll_attempts {
            let probe = fetch().await?;

            // Transient service hiccups just consume an attempt.
            let Some(body) = (probe.status_code == 200).then_some(probe.body).flatten() else {
                debug!(
                    generation_id,
                    attempt,
                    status = probe.status_code,
                    "Non-200 poll response, retrying"
                );
                tokio::time::sleep(self.poll_interval).await;
                continue;
            };

            let inner = unwrap_envelope(&body);
            let status = inner.get("status").and_then(Value::as_str).unwrap_or("");

            if attempt % POLL_LOG_EVERY == 0 {
                info!(
                    generation_id,
                    attempt,
                    max_attempts = self.max_poll_attempts,
                    status,
                    "Still polling generation"
                );
            }

            match status {
                "completed" | "success" => {
                    let video_url = extract_video_url(inner).ok_or_else(|| {
                        GenerationError::new(GenerationErrorKind::Protocol(
                            "Job completed but no URL returned".to_string(),
                        ))
                    })?;

                    info!(generation_id, attempt, "Video generation completed");
                    return Ok(GenerationOutput {
                        video_url,
                        generation_id: generation_id.to_string(),
                        status: "success".to_string(),
                    });
                }
                "failed" | "canceled" => {
                    let message = inner
                        .get("error")
                        .and_then(Value::as_str)
                        .unwrap_or("Unknown error");
                    error!(generation_id, status, message, "Generation job failed");
                    return Err(
                        GenerationError::new(GenerationErrorKind::JobFailed(message.to_string()))
                            .into(),
                    );
                }
                _ => {
                    tokio::time::sleep(self.poll_interval).await;
                }
            }
        }

        let waited_secs =
            (self.max_poll_attempts as u64 * self.poll_interval.as_millis() as u64) / 1_000;
        Err(GenerationError::new(GenerationErrorKind::Timeout { waited_secs }).into())
    }
}

/// Some deployments wrap the useful payload in a `data` envelope.
fn unwrap_envelope(body: &Value) -> &Value {
    body.get("data").unwrap_or(body)
}

/// Read the job id and optional poll URL out of a submission response.
fn parse_submission(body: &Value) -> Result<SubmitTicket, GenerationError> {
    let inner = unwrap_envelope(body);

    let generation_id = inner
        .get("id")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| {
            GenerationError::new(GenerationErrorKind::Protocol(format!(
                "No generation ID returned: {}",
                body
            )))
        })?;

    let poll_url = inner
        .get("urls")
        .and_then(|urls| urls.get("get"))
        .and_then(Value::as_str)
        .map(str::to_string);

    Ok(SubmitTicket {
        generation_id,
        poll_url,
    })
}

/// Pull the result URL out of a terminal success payload, across the shapes
/// the service has been observed to produce: `outputs`/`output` as a list or
/// scalar, falling back to top-level `url`/`video_url`.
fn extract_video_url(inner: &Value) -> Option<String> {
    let output = inner.get("outputs").or_else(|| inner.get("output"));

    let url = match output {
        Some(Value::Array(items)) => items.first().and_then(Value::as_str).map(str::to_string),
        Some(Value::String(url)) => Some(url.clone()),
        _ => None,
    };

    url.or_else(|| {
        inner
            .get("url")
            .or_else(|| inner.get("video_url"))
            .and_then(Value::as_str)
            .map(str::to_string)
    })
}

#[async_trait]
impl VideoGenerator for ViduClient {
    #[instrument(
        skip(self, job),
        fields(video_type = %job.video_type, is_model = job.is_model, duration = job.duration)
    )]
    async fn generate(&self, job: &VideoJob) -> CelliniResult<GenerationOutput> {
        let enhanced = prompt::enhance(job);
        debug!(
            prompt_chars = enhanced.len(),
            "Assembled enhanced generation prompt"
        );

        let payload = SubmitPayload {
            prompt: &enhanced,
            image: &job.image,
            duration: job.duration,
            resolution: "720p",
            movement_amplitude: prompt::movement_amplitude(job.video_type),
            generate_audio: job.is_music,
            enhance_prompt: false,
        };

        info!(
            video_type = %job.video_type,
            is_model = job.is_model,
            "Initiating video generation"
        );
        let ticket = self.submit(&payload).await?;
        info!(generation_id = %ticket.generation_id, "Generation submitted");

        self.poll(&ticket).await
    }
}
