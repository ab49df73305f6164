//! Flight pricing error types.

use std::time::Duration;

/// Errors from a flight pricing provider.
#[derive(Debug, thiserror::Error)]
pub enum PricingError {
    /// HTTP request failed (network error, client-side timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body could not be decoded
    #[error("JSON parse error: {message}{}", .body.as_ref().map(|b| format!(" (body: {b})")).unwrap_or_default())]
    Json {
        message: String,
        body: Option<String>,
    },

    /// API returned an error status code
    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    /// Rate limited by the API
    #[error("rate limited by pricing API")]
    RateLimited,

    /// Invalid API key or unauthorized
    #[error("unauthorized (invalid API key)")]
    Unauthorized,

    /// The provider did not answer in time
    #[error("pricing request timed out after {0:?}")]
    Timeout(Duration),

    /// Feature not configured or not available
    #[error("not configured: {0}")]
    NotConfigured(String),
}
