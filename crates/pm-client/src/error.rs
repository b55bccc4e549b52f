//! Error types for pm-client

use thiserror::Error;

/// pm-client error type
#[derive(Error, Debug)]
pub enum PostmarkError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Postmark API error {code}: {message}")]
    Api { code: i64, message: String },

    #[error("Response parsing error: {0}")]
    Parse(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, PostmarkError>;
