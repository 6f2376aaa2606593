//! Top-level error wrapper types.

use crate::{
    AgentError, BuilderError, ConfigError, GenerationError, HttpError, JsonError, PipelineError,
    ServerError, StorageError,
};

/// This is the foundation error enum. Every crate in the workspace converts
/// its domain error into one of these variants.
///
/// # Examples
///
/// ```
/// use cellini_error::{CelliniError, HttpError};
///
/// let http_err = HttpError::new("Connection failed");
/// let err: CelliniError = http_err.into();
/// assert!(format!("{}", err).contains("HTTP Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum CelliniErrorKind {
    /// HTTP error
    #[from(HttpError)]
    Http(HttpError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Builder error
    #[from(BuilderError)]
    Builder(BuilderError),
    /// Structured agent call error
    #[from(AgentError)]
    Agent(AgentError),
    /// Remote video generation error
    #[from(GenerationError)]
    Generation(GenerationError),
    /// Asset storage error
    #[from(StorageError)]
    Storage(StorageError),
    /// Orchestration pipeline error
    #[from(PipelineError)]
    Pipeline(PipelineError),
    /// HTTP server error
    #[from(ServerError)]
    Server(ServerError),
}

/// Cellini error with kind discrimination.
///
/// # Examples
///
/// ```
/// use cellini_error::{CelliniResult, ConfigError};
///
/// fn might_fail() -> CelliniResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// match might_fail() {
///     Ok(_) => println!("Success"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Cellini Error: {}", _0)]
pub struct CelliniError(Box<CelliniErrorKind>);

impl CelliniError {
    /// Create a new error from a kind.
    pub fn new(kind: CelliniErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &CelliniErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to CelliniErrorKind
impl<T> From<T> for CelliniError
where
    T: Into<CelliniErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Cellini operations.
///
/// # Examples
///
/// ```
/// use cellini_error::{CelliniResult, HttpError};
///
/// fn fetch_data() -> CelliniResult<String> {
///     Err(HttpError::new("404 Not Found"))?
/// }
/// ```
pub type CelliniResult<T> = std::result::Result<T, CelliniError>;
