//! Error types for spanner-cli.
//!
//! Defines the main error enum used throughout the application.

use thiserror::Error;

/// Main error type for spanner-cli operations.
#[derive(Error, Debug)]
pub enum SpannerCliError {
    /// User input or state errors local to a meta-command (wrong argument
    /// count, unknown database during `use`, etc.)
    #[error("{0}")]
    Command(String),

    /// The requested database, session or resource does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The caller lacks the IAM permission for the operation.
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// The statement or request was rejected as malformed.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Any other Spanner API failure (transport, server errors, aborted
    /// transactions, etc.)
    #[error("API error: {0}")]
    Api(String),

    /// Configuration errors (invalid config file, missing required fields, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Local I/O failures (terminal, pager, history file).
    #[error("I/O error: {0}")]
    Io(String),

    /// Internal application errors (unexpected states, bugs, etc.)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl SpannerCliError {
    /// Creates a command error with the given message.
    pub fn command(msg: impl Into<String>) -> Self {
        Self::Command(msg.into())
    }

    /// Creates a not-found error with the given message.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Creates a permission-denied error with the given message.
    pub fn permission_denied(msg: impl Into<String>) -> Self {
        Self::PermissionDenied(msg.into())
    }

    /// Creates an invalid-argument error with the given message.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Creates an API error with the given message.
    pub fn api(msg: impl Into<String>) -> Self {
        Self::Api(msg.into())
    }

    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates an I/O error with the given message.
    pub fn io(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    /// Creates an internal error with the given message.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns true if the error reports a missing resource.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Returns true if the error originated from the database API rather
    /// than from local input handling.
    pub fn is_database_error(&self) -> bool {
        matches!(
            self,
            Self::NotFound(_) | Self::PermissionDenied(_) | Self::InvalidArgument(_) | Self::Api(_)
        )
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Command(_) => "Command Error",
            Self::NotFound(_) => "Not Found",
            Self::PermissionDenied(_) => "Permission Denied",
            Self::InvalidArgument(_) => "Invalid Argument",
            Self::Api(_) => "API Error",
            Self::Config(_) => "Configuration Error",
            Self::Io(_) => "I/O Error",
            Self::Internal(_) => "Internal Error",
        }
    }
}

impl From<std::io::Error> for SpannerCliError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

/// Result type alias using SpannerCliError.
pub type Result<T> = std::result::Result<T, SpannerCliError>;
