//! HTTP client settings shared by provider connections.
//!
//! Connections never retry: each operation is a single request, so the settings
//! here only cover timeouts, pooling, compression and request logging.

use crate::config::ProviderConfig;
use crate::Error;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use tracing::{debug, warn};

/// Default TCP connect timeout
pub const DEFAULT_CONNECT_TIMEOUT: u64 = 10;

// Connection pool settings

/// Default idle timeout for connection pools
pub const DEFAULT_POOL_IDLE_TIMEOUT: u64 = 90;

/// Default maximum idle connections per host
pub const DEFAULT_POOL_MAX_IDLE_PER_HOST: usize = 10;

/// HTTP client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// TCP connect timeout
    pub connect_timeout: Duration,

    /// Connection pool idle timeout
    pub pool_idle_timeout: Duration,

    /// Maximum idle connections per host
    pub pool_max_idle_per_host: usize,

    /// Enable request/response logging
    pub enable_logging: bool,

    /// Enable response compression
    pub enable_compression: bool,
}

impl ClientConfig {
    /// Create a new client configuration with default values.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT),
            pool_idle_timeout: Duration::from_secs(DEFAULT_POOL_IDLE_TIMEOUT),
            pool_max_idle_per_host: DEFAULT_POOL_MAX_IDLE_PER_HOST,
            enable_logging: true,
            enable_compression: true,
        }
    }

    /// Set TCP connect timeout.
    #[must_use]
    pub const fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set connection pool idle timeout.
    #[must_use]
    pub const fn with_pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.pool_idle_timeout = timeout;
        self
    }

    /// Set maximum idle connections per host.
    #[must_use]
    pub const fn with_pool_max_idle(mut self, max: usize) -> Self {
        self.pool_max_idle_per_host = max;
        self
    }

    /// Enable or disable logging.
    #[must_use]
    pub const fn with_logging(mut self, enabled: bool) -> Self {
        self.enable_logging = enabled;
        self
    }

    /// Enable or disable compression.
    #[must_use]
    pub const fn with_compression(mut self, enabled: bool) -> Self {
        self.enable_compression = enabled;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the reqwest client for a provider connection.
///
/// The request timeout and TLS settings come from `provider`; pooling and
/// compression from `http`.
///
/// # Errors
///
/// Returns [`Error::ConfigError`] if the CA certificate cannot be read or parsed,
/// or if the client cannot be constructed.
pub fn build_http_client(
    user_agent: &str,
    provider: &ProviderConfig,
    http: &ClientConfig,
) -> Result<Client, Error> {
    let mut builder = ClientBuilder::new()
        .user_agent(user_agent)
        .timeout(provider.timeout())
        .connect_timeout(http.connect_timeout)
        .pool_idle_timeout(http.pool_idle_timeout)
        .pool_max_idle_per_host(http.pool_max_idle_per_host)
        .gzip(http.enable_compression);

    if !provider.tls_verify {
        warn!("TLS verification disabled for provider client");
        builder = builder.danger_accept_invalid_certs(true);
    }

    if let Some(ca_cert) = &provider.tls_ca_cert {
        debug!("loading CA certificate from {}", ca_cert.display());
        let bytes = std::fs::read(ca_cert).map_err(|err| {
            Error::ConfigError(format!(
                "Failed to read CA certificate {}: {err}",
                ca_cert.display()
            ))
        })?;
        let cert = reqwest::Certificate::from_pem(&bytes)
            .map_err(|err| Error::ConfigError(format!("Invalid CA certificate: {err}")))?;
        builder = builder.add_root_certificate(cert);
    }

    builder
        .build()
        .map_err(|err| Error::ConfigError(format!("Failed to build HTTP client: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> ProviderConfig {
        ProviderConfig::new("https://api.digitalocean.com/", "client", "secret").unwrap()
    }

    #[test]
    fn test_client_config_new() {
        let config = ClientConfig::new();
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
        assert_eq!(config.pool_max_idle_per_host, DEFAULT_POOL_MAX_IDLE_PER_HOST);
        assert!(config.enable_logging);
        assert!(config.enable_compression);
    }

    #[test]
    fn test_client_config_builder() {
        let config = ClientConfig::new()
            .with_connect_timeout(Duration::from_secs(2))
            .with_pool_idle_timeout(Duration::from_secs(120))
            .with_pool_max_idle(20)
            .with_logging(false)
            .with_compression(false);

        assert_eq!(config.connect_timeout, Duration::from_secs(2));
        assert_eq!(config.pool_idle_timeout, Duration::from_secs(120));
        assert_eq!(config.pool_max_idle_per_host, 20);
        assert!(!config.enable_logging);
        assert!(!config.enable_compression);
    }

    #[test]
    fn test_build_http_client() {
        let client = build_http_client("cloudnode-test/0.1", &provider(), &ClientConfig::new());
        assert!(client.is_ok());
    }

    #[test]
    fn test_build_http_client_without_tls_verify() {
        let provider = provider().with_tls_verify(false);
        assert!(build_http_client("cloudnode-test/0.1", &provider, &ClientConfig::new()).is_ok());
    }

    #[test]
    fn test_build_http_client_missing_ca_cert() {
        let provider = provider().with_ca_cert("/nonexistent/ca.pem".into());
        let err = build_http_client("cloudnode-test/0.1", &provider, &ClientConfig::new())
            .unwrap_err();
        assert!(matches!(err, Error::ConfigError(_)));
    }

    #[test]
    fn test_pool_constants() {
        assert_eq!(DEFAULT_POOL_IDLE_TIMEOUT, 90);
        assert_eq!(DEFAULT_POOL_MAX_IDLE_PER_HOST, 10);
    }
}
