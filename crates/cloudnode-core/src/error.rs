//! Error types for compute driver operations.
//!
//! Transport failures, provider-reported failures and schema mismatches all surface
//! through the single [`Error`] type so that every driver shares one taxonomy.

use reqwest::StatusCode;
use thiserror::Error;

/// Main error type for compute driver operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Provider endpoint is unavailable
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Response body did not match the expected schema
    #[error("Failed to parse provider response: {0}")]
    ResponseParseError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Operation timed out
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Credentials were rejected
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Invalid request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// The provider answered, but reported the operation as failed
    #[error("Provider error: {provider}: {message}")]
    ProviderError {
        /// Provider that reported the failure
        provider: String,
        /// Message supplied by the provider
        message: String,
    },

    /// Invalid endpoint
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),
}

/// Specialized result type for compute driver operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns the error code for this error type.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
            Self::ResponseParseError(_) => "RESPONSE_PARSE_ERROR",
            Self::ConfigError(_) => "CONFIG_ERROR",
            Self::HttpError(_) => "HTTP_ERROR",
            Self::Timeout(_) => "TIMEOUT",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::InvalidRequest(_) => "INVALID_REQUEST",
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::ProviderError { .. } => "PROVIDER_ERROR",
            Self::InvalidEndpoint(_) => "INVALID_ENDPOINT",
        }
    }

    /// Returns true if this error should be logged as a serious error.
    #[must_use]
    pub const fn should_log(&self) -> bool {
        matches!(
            self,
            Self::ResponseParseError(_) | Self::ConfigError(_) | Self::ServiceUnavailable(_)
        )
    }

    /// Map a non-success HTTP status and its body text to an error.
    #[must_use]
    pub fn from_status(provider: &str, status: StatusCode, text: String) -> Self {
        match status {
            StatusCode::NOT_FOUND => Self::NotFound(text),
            StatusCode::BAD_REQUEST => Self::InvalidRequest(text),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Self::Unauthorized(format!("{provider} rejected credentials: {text}"))
            }
            StatusCode::TOO_MANY_REQUESTS
            | StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT => {
                Self::ServiceUnavailable(format!("{provider} temporarily unavailable: {text}"))
            }
            status if status.is_server_error() => {
                Self::ServiceUnavailable(format!("{provider} server error {status}: {text}"))
            }
            _ => Self::HttpError(format!("{provider} error {status}: {text}")),
        }
    }
}

// Conversions from external error types
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_connect() {
            Self::ServiceUnavailable(err.to_string())
        } else if err.is_decode() {
            Self::ResponseParseError(err.to_string())
        } else {
            Self::HttpError(err.to_string())
        }
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidEndpoint(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::ResponseParseError(err.to_string())
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::ValidationError(err.to_string())
    }
}
