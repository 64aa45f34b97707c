//! Configuration for provider connections.
//!
//! [`ProviderConfig`] carries what every user-id/API-key authenticated connection
//! needs: the endpoint, the credentials and TLS/timeout settings.

use crate::Error;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer};
use std::time::Duration;
use url::Url;
use validator::Validate;

/// Configuration for a provider connection authenticated by user id and API key.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ProviderConfig {
    /// Provider API base URL
    #[validate(url)]
    pub api_url: String,

    /// User (client) identifier
    #[validate(length(min = 1))]
    pub user_id: String,

    /// API key; redacted in `Debug` output
    #[serde(deserialize_with = "deserialize_secret")]
    pub api_key: SecretString,

    /// Whether to verify TLS certificates
    #[serde(default = "default_tls_verify")]
    pub tls_verify: bool,

    /// Optional path to custom CA certificate
    #[serde(default)]
    pub tls_ca_cert: Option<std::path::PathBuf>,

    /// Request timeout in seconds
    #[validate(range(min = 1, max = 300))]
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

const fn default_tls_verify() -> bool {
    true
}

const fn default_request_timeout_secs() -> u64 {
    30
}

fn deserialize_secret<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(SecretString::from)
}

impl ProviderConfig {
    /// Create a new connection configuration with required parameters.
    ///
    /// # Arguments
    ///
    /// * `api_url` - The provider API base URL (e.g., "https://api.digitalocean.com/")
    /// * `user_id` - The user (client) identifier
    /// * `api_key` - The API key
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or validation fails.
    pub fn new(
        api_url: impl Into<String>,
        user_id: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, Error> {
        let config = Self {
            api_url: api_url.into(),
            user_id: user_id.into(),
            api_key: SecretString::from(api_key.into()),
            tls_verify: default_tls_verify(),
            tls_ca_cert: None,
            request_timeout_secs: default_request_timeout_secs(),
        };

        config.validate().map_err(|e| {
            Error::ConfigError(format!("Invalid configuration: {e}"))
        })?;

        Ok(config)
    }

    /// Set whether to verify TLS certificates.
    #[must_use]
    pub const fn with_tls_verify(mut self, verify: bool) -> Self {
        self.tls_verify = verify;
        self
    }

    /// Set custom CA certificate path.
    #[must_use]
    pub fn with_ca_cert(mut self, path: std::path::PathBuf) -> Self {
        self.tls_ca_cert = Some(path);
        self
    }

    /// Set request timeout in seconds.
    #[must_use]
    pub const fn with_timeout(mut self, seconds: u64) -> Self {
        self.request_timeout_secs = seconds;
        self
    }

    /// Get the request timeout as a Duration.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Reveal the API key for placing it on a request.
    #[must_use]
    pub fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }

    /// Parse and validate the API URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed.
    pub fn parse_api_url(&self) -> Result<Url, Error> {
        Url::parse(&self.api_url)
            .map_err(|e| Error::ConfigError(format!("Invalid API URL: {e}")))
    }
}
