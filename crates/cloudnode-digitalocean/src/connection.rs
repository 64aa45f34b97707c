//! Authenticated connection to the DigitalOcean v1 API.
//!
//! The v1 API authenticates every call with `client_id` and `api_key` query
//! parameters. [`DigitalOceanConnection`] adds them to each request and returns the
//! parsed JSON body.

use async_trait::async_trait;
use cloudnode_core::client::{build_http_client, ClientConfig};
use cloudnode_core::config::ProviderConfig;
use cloudnode_core::query::QueryParams;
use cloudnode_core::{Connection, Error, Provider};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use tracing::{debug, error, info, warn};
use url::Url;

use crate::Result;

const USER_AGENT: &str = concat!("cloudnode-digitalocean/", env!("CARGO_PKG_VERSION"));

/// Default API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.digitalocean.com/";

/// API host.
pub const API_HOST: &str = "api.digitalocean.com";

/// API port.
pub const API_PORT: u16 = 443;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT: u64 = 30;

/// Builder for [`DigitalOceanConnection`].
#[derive(Debug, Clone)]
pub struct DigitalOceanConnectionBuilder {
    config: ProviderConfig,
    http_config: ClientConfig,
}

impl DigitalOceanConnectionBuilder {
    /// Create a new builder from a [`ProviderConfig`].
    #[must_use]
    pub fn new(config: ProviderConfig) -> Self {
        Self {
            config,
            http_config: ClientConfig::new(),
        }
    }

    /// Override the HTTP client configuration used when building the connection.
    #[must_use]
    pub fn with_http_config(mut self, http_config: ClientConfig) -> Self {
        self.http_config = http_config;
        self
    }

    /// Finalise the builder and create the [`DigitalOceanConnection`].
    pub fn build(self) -> Result<DigitalOceanConnection> {
        let mut base_url = self.config.parse_api_url()?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http = build_http_client(USER_AGENT, &self.config, &self.http_config)?;

        Ok(DigitalOceanConnection {
            http,
            base_url,
            user_id: self.config.user_id.clone(),
            api_key: self.config.api_key.clone(),
            enable_logging: self.http_config.enable_logging,
        })
    }
}

/// Connection to the DigitalOcean v1 API.
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct DigitalOceanConnection {
    http: Client,
    base_url: Url,
    user_id: String,
    api_key: SecretString,
    enable_logging: bool,
}

impl DigitalOceanConnection {
    /// Connect to the default endpoint with the given credentials.
    pub fn new(user_id: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        let config = ProviderConfig::new(DEFAULT_API_URL, user_id, api_key)?
            .with_timeout(DEFAULT_TIMEOUT);
        Self::from_config(&config)
    }

    /// Construct a connection directly from the configuration.
    pub fn from_config(config: &ProviderConfig) -> Result<Self> {
        DigitalOceanConnectionBuilder::new(config.clone()).build()
    }

    /// Start a builder pre-populated with the provided configuration.
    #[must_use]
    pub fn builder(config: ProviderConfig) -> DigitalOceanConnectionBuilder {
        DigitalOceanConnectionBuilder::new(config)
    }

    /// Return the base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Return the user (client) identifier.
    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Add the credentials to an outgoing parameter list.
    ///
    /// Values the caller already set for `client_id` or `api_key` are kept.
    pub fn pre_connect_hook(&self, params: &mut QueryParams) {
        params.set_if_absent("client_id", &self.user_id);
        params.set_if_absent("api_key", self.api_key.expose_secret());
    }

    fn build_url(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|err| {
                Error::InvalidEndpoint(format!("Invalid DigitalOcean path `{path}`: {err}"))
            })
    }
}

#[async_trait]
impl Connection for DigitalOceanConnection {
    async fn request(&self, path: &str, mut params: QueryParams) -> Result<Value> {
        self.pre_connect_hook(&mut params);
        let url = self.build_url(path)?;

        if self.enable_logging {
            // Keys only: values include the API key.
            let keys: Vec<_> = params.keys().collect();
            info!(path = %path, params = ?keys, "Sending DigitalOcean request");
        }

        let response = self
            .http
            .get(url)
            .query(params.as_pairs())
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|err| {
                let error = Error::from(err);
                warn!(path = %path, %error, "DigitalOcean request failed");
                error
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            let error = Error::from_status(Provider::DigitalOcean.name(), status, message);
            if error.should_log() {
                error!(path = %path, %status, %error, "DigitalOcean returned an error status");
            } else {
                debug!(path = %path, %status, %error, "DigitalOcean returned an error status");
            }
            return Err(error);
        }

        response.json::<Value>().await.map_err(|err| {
            Error::ResponseParseError(format!(
                "Failed to parse DigitalOcean response for `{path}`: {err}"
            ))
        })
    }
}
