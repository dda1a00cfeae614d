//! Error types for testrail-bridge

use std::time::Duration;
use thiserror::Error;

/// Result type alias for testrail-bridge operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the crate
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Operation failed: {0}")]
    Other(String),
}

/// TestRail API errors.
///
/// Every variant produced from an HTTP response carries the status code and
/// the response text (the `error` field of TestRail's JSON error body when
/// there is one, the raw body otherwise).
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Authentication failed (401): {0}")]
    Unauthorized(String),

    #[error("Access denied (403): {0}")]
    Forbidden(String),

    #[error("Resource not found (404): {0}")]
    NotFound(String),

    #[error("Bad request (400): {0}")]
    BadRequest(String),

    #[error("Rate limit exceeded (429). Retry after {0:?}")]
    RateLimit(Duration),

    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    #[error("Unexpected status code {status}: {message}")]
    Unexpected { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    /// Build the error for a non-success HTTP status.
    pub fn from_status(status: u16, body: &str, retry_after: Option<Duration>) -> Self {
        let message = error_message(body);
        match status {
            400 => ApiError::BadRequest(message),
            401 => ApiError::Unauthorized(message),
            403 => ApiError::Forbidden(message),
            404 => ApiError::NotFound(message),
            429 => ApiError::RateLimit(retry_after.unwrap_or(Duration::from_secs(60))),
            500..=599 => ApiError::ServerError { status, message },
            _ => ApiError::Unexpected { status, message },
        }
    }

    /// HTTP status code behind this error, if it came from a response.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::BadRequest(_) => Some(400),
            ApiError::Unauthorized(_) => Some(401),
            ApiError::Forbidden(_) => Some(403),
            ApiError::NotFound(_) => Some(404),
            ApiError::RateLimit(_) => Some(429),
            ApiError::ServerError { status, .. } | ApiError::Unexpected { status, .. } => {
                Some(*status)
            }
            ApiError::Network(_) | ApiError::InvalidResponse(_) => None,
        }
    }
}

/// Pull TestRail's `{"error": "..."}` message out of a response body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Network("Request timed out".to_string())
        } else if err.is_connect() {
            ApiError::Network("Failed to connect to TestRail".to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Configuration errors, raised while building a client, listener or filter.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing argument `{0}`")]
    MissingArgument(&'static str),

    #[error("Invalid run id `{0}`: expected a positive integer")]
    InvalidRunId(String),

    #[error("Invalid scheme `{0}`: expected http or https")]
    InvalidScheme(String),

    #[error("Invalid results depth `{0}`: expected a non-negative integer")]
    InvalidDepth(String),

    #[error("Unknown listener flag `{0}`: expected update, juggler or hosted")]
    UnknownFlag(String),

    #[error("There is no status with label '{0}' in TestRail")]
    UnknownStatus(String),

    #[error("TestRail credentials not configured: set --{0} or TESTRAIL_{1}")]
    MissingCredentials(&'static str, &'static str),
}
