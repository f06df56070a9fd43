// Error types for the dbdesk shell.
// Covers server API failures, persistence errors, and general application errors.

use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShellError {
    #[error("Server request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Not signed in")]
    Unauthorized,

    #[error("Server error {code}: {message}")]
    Server { code: String, message: String },

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, ShellError>;
