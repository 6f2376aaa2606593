//! HTTP server error types.

/// Specific server error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ServerErrorKind {
    /// Failed to bind the listen address
    #[display("Failed to bind {}: {}", address, message)]
    Bind {
        /// The address that could not be bound
        address: String,
        /// The underlying error message
        message: String,
    },
    /// The server terminated unexpectedly
    #[display("Server error: {}", _0)]
    Serve(String),
}

/// Server error with source location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Server Error: {} at line {} in {}", kind, line, file)]
pub struct ServerError {
    /// The kind of error that occurred
    pub kind: ServerErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ServerError {
    /// Create a new ServerError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ServerErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
