//! Error types for the directory search server.
//!
//! This module defines custom error types using `thiserror` for precise error handling.

use thiserror::Error;

/// Errors that can occur when loading directory data from a source.
#[derive(Error, Debug)]
pub enum DirectoryError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// API returned an error status code
    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse JSON response
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Failed to read or parse a CSV source
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// Local file could not be read
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Network timeout
    #[error("Request timeout")]
    Timeout,

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Authentication failed
    #[error("Authentication failed")]
    Unauthorized,

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Invalid request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Generic error with context
    #[error("Directory error: {0}")]
    Other(String),
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is missing
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },

    /// Generic configuration error
    #[error("Configuration error: {0}")]
    Other(String),
}

/// Errors raised around the search index (never by the index itself).
#[derive(Error, Debug)]
pub enum SearchError {
    /// Invalid search parameters
    #[error("Invalid search parameters: {0}")]
    InvalidParameters(String),

    /// Index build task failed to complete
    #[error("Index build failed: {0}")]
    BuildFailed(String),
}

impl From<SearchError> for DirectoryError {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::InvalidParameters(msg) => DirectoryError::InvalidRequest(msg),
            SearchError::BuildFailed(msg) => DirectoryError::Other(msg),
        }
    }
}

/// Convenience type alias for Results with DirectoryError
pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;
