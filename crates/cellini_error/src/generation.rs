//! Video generation error types.

/// Remote video generation error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum GenerationErrorKind {
    /// API key not found in environment or configuration
    #[display("VIDU_API_KEY environment variable not set")]
    MissingApiKey,
    /// Transport failure talking to the generation service
    #[display("Generation service request failed: {}", _0)]
    Http(String),
    /// The submission request was rejected
    #[display("Generation submission failed with HTTP {}: {}", status_code, message)]
    Submission {
        /// HTTP status code of the rejected submission
        status_code: u16,
        /// Response body text
        message: String,
    },
    /// The service response did not have the expected shape
    #[display("Unexpected generation service response: {}", _0)]
    Protocol(String),
    /// The remote job reached a terminal failure state
    #[display("Generation failed: {}", _0)]
    JobFailed(String),
    /// The poll loop exhausted its attempt budget without a terminal state
    #[display("Generation timed out polling after {} seconds", waited_secs)]
    Timeout {
        /// Total seconds waited across all poll attempts
        waited_secs: u64,
    },
}

/// Generation error with source location tracking.
///
/// # Examples
///
/// ```
/// use cellini_error::{GenerationError, GenerationErrorKind};
///
/// let err = GenerationError::new(GenerationErrorKind::JobFailed("GPU quota".into()));
/// assert!(format!("{}", err).contains("GPU quota"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Generation Error: {} at line {} in {}", kind, line, file)]
pub struct GenerationError {
    /// The kind of error that occurred
    pub kind: GenerationErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl GenerationError {
    /// Create a new GenerationError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: GenerationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
