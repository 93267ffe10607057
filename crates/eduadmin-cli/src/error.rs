use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Api(#[from] eduadmin_core::ApiError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Not signed in. Run `eduadmin login --username <name> --password <password>` first.")]
    NotSignedIn,
    #[error("Invalid username or password")]
    LoginFailed,
    #[error("{0} not found: {1}")]
    NotFound(&'static str, String),
    #[error("{0} ID cannot be empty")]
    EmptyId(&'static str),
    #[error("{0}. Run `eduadmin dashboard` again to retry.")]
    MetricsUnavailable(String),
    #[error("Cancelled")]
    Cancelled,
}
