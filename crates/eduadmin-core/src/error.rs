//! Error types for eduadmin-core

use thiserror::Error;

/// Result type alias using eduadmin-core's error
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors surfaced by the session store, API client and screen controllers
#[derive(Debug, Error)]
pub enum ApiError {
    /// Base address or other client configuration is unusable
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(&'static str),

    /// Transport-level failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body could not be decoded
    #[error("Failed to parse JSON payload: {0}")]
    Json(#[from] serde_json::Error),

    /// Local file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Server answered with a non-2xx status
    #[error("API error: {message} ({status})")]
    Api { status: u16, message: String },

    /// Login response did not carry a token
    #[error("Login response did not include a token")]
    MissingToken,

    /// Durable token storage failed
    #[error("Token storage error: {0}")]
    TokenStorage(String),

    /// A new textbook needs a file
    #[error("Please select a file to upload")]
    MissingUploadFile,
}

impl ApiError {
    /// HTTP status of an API rejection, if this is one.
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
