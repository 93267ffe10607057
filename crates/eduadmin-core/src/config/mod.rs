//! API base address configuration.
//!
//! The console talks to exactly one REST API. Its base address comes from an
//! explicit override, the `EDUADMIN_API_URL` environment variable, a stored
//! profile value, or the local development default, in that order.

use crate::error::{ApiError, ApiResult};
use crate::util::{is_http_url, non_blank};

/// Environment variable selecting the API base address.
pub const API_URL_ENV: &str = "EDUADMIN_API_URL";

/// Base address used when nothing else is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000/api";

/// Resolved client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }
}

impl ApiConfig {
    /// Builds a configuration from an explicit override and a profile value,
    /// consulting `EDUADMIN_API_URL` between the two.
    pub fn resolve(explicit: Option<String>, profile: Option<String>) -> ApiResult<Self> {
        let base_url =
            resolve_api_base_url(explicit, std::env::var(API_URL_ENV).ok(), profile)?;
        Ok(Self { base_url })
    }
}

/// Picks the first configured base address and normalizes it.
pub fn resolve_api_base_url(
    explicit: Option<String>,
    env: Option<String>,
    profile: Option<String>,
) -> ApiResult<String> {
    let chosen = non_blank(explicit)
        .or_else(|| non_blank(env))
        .or_else(|| non_blank(profile))
        .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
    normalize_base_url(&chosen)
}

pub fn normalize_base_url(raw: &str) -> ApiResult<String> {
    let base = raw.trim().trim_end_matches('/');
    if base.is_empty() {
        return Err(ApiError::InvalidConfiguration(
            "API base URL must not be empty",
        ));
    }
    if !is_http_url(base) {
        return Err(ApiError::InvalidConfiguration(
            "API base URL must include http:// or https://",
        ));
    }
    Ok(base.to_string())
}
