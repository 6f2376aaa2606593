//! Agent-call error types.
//!
//! One structured agent call is a single language-model inference turn; these
//! errors describe the ways that turn can fail. None of them are retried at
//! the call layer.

/// Agent-call specific error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum AgentErrorKind {
    /// API key not found in environment or configuration
    #[display("OPENAI_API_KEY environment variable not set")]
    MissingApiKey,
    /// API request failed before a response was received
    #[display("Language model request failed: {}", _0)]
    ApiRequest(String),
    /// HTTP error with status code and message
    #[display("HTTP {} error: {}", status_code, message)]
    HttpStatus {
        /// HTTP status code
        status_code: u16,
        /// Error message from the response body
        message: String,
    },
    /// The model returned no usable content
    #[display("Empty response from model (finish reason: {})", finish_reason.as_deref().unwrap_or("unknown"))]
    EmptyResponse {
        /// The upstream finish reason, when the provider reported one
        finish_reason: Option<String>,
    },
    /// The model refused or the response was filtered by content policy
    #[display("Model rejected the request: {}", _0)]
    ContentRejected(String),
    /// The model output did not parse or did not satisfy the declared schema
    #[display("Response failed schema validation: {}", _0)]
    ValidationFailure(String),
}

/// Agent error with source location tracking.
///
/// # Examples
///
/// ```
/// use cellini_error::{AgentError, AgentErrorKind};
///
/// let err = AgentError::new(AgentErrorKind::MissingApiKey);
/// assert!(format!("{}", err).contains("OPENAI_API_KEY"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Agent Error: {} at line {} in {}", kind, line, file)]
pub struct AgentError {
    /// The kind of error that occurred
    pub kind: AgentErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl AgentError {
    /// Create a new AgentError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: AgentErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
