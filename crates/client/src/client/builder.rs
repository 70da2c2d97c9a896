//! Client builder for constructing [`KvStoreClient`] instances.
//!
//! This module is responsible for:
//! - Providing a fluent builder API for client configuration
//! - Validating required configuration (base_url, token)
//! - Normalizing the base URL (removing trailing slashes)
//! - Configuring the underlying HTTP client (timeouts, TLS verification)
//!
//! # What this module does NOT handle:
//! - Record reads and writes (handled by [`KvStoreClient`] in `mod.rs`)
//! - Retrying failed requests; the client never retries
//!
//! # Invariants
//! - `base_url` and `token` must be provided before calling `build()`
//! - The base URL is always normalized to have no trailing slashes
//! - `skip_verify` only affects HTTPS connections; HTTP connections log a warning

use std::time::Duration;

use nsenv_config::KvStoreConfig;
use nsenv_config::constants::{
    DEFAULT_APP, DEFAULT_COLLECTION, DEFAULT_OWNER, DEFAULT_TIMEOUT_SECS,
};
use secrecy::SecretString;

use crate::client::KvStoreClient;
use crate::endpoints::CollectionPath;
use crate::error::{Result, StoreError};
use crate::metrics::MetricsCollector;

const MAX_REDIRECTS: usize = 5;

/// Builder for creating a new [`KvStoreClient`].
///
/// ```rust,ignore
/// use nsenv_client::KvStoreClient;
/// use secrecy::SecretString;
///
/// let client = KvStoreClient::builder()
///     .base_url("https://localhost:8089")
///     .token(SecretString::new("my-token".to_string().into()))
///     .collection("team_settings")
///     .build()?;
/// ```
pub struct KvStoreClientBuilder {
    base_url: Option<String>,
    token: Option<SecretString>,
    app: String,
    owner: String,
    collection: String,
    skip_verify: bool,
    timeout: Duration,
    metrics: Option<MetricsCollector>,
}

impl Default for KvStoreClientBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            token: None,
            app: DEFAULT_APP.to_string(),
            owner: DEFAULT_OWNER.to_string(),
            collection: DEFAULT_COLLECTION.to_string(),
            skip_verify: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            metrics: None,
        }
    }
}

impl KvStoreClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL of the service, e.g. `https://localhost:8089`.
    ///
    /// Trailing slashes will be automatically removed.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the bearer token sent with every request.
    pub fn token(mut self, token: SecretString) -> Self {
        self.token = Some(token);
        self
    }

    /// Set the app namespace of the collection. Default is `search`.
    pub fn app(mut self, app: impl Into<String>) -> Self {
        self.app = app.into();
        self
    }

    /// Set the owner namespace of the collection. Default is `nobody`.
    pub fn owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = owner.into();
        self
    }

    /// Set the collection holding setting records.
    pub fn collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    /// Set whether to skip TLS certificate verification.
    ///
    /// # Security Warning
    /// Only use this in development or testing environments.
    pub fn skip_verify(mut self, skip: bool) -> Self {
        self.skip_verify = skip;
        self
    }

    /// Set the request timeout. Default is 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the metrics collector for request tracking.
    pub fn metrics(mut self, metrics: MetricsCollector) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Create a client builder from a resolved KV store configuration.
    ///
    /// Request metrics are enabled unless a collector was already set. They
    /// cost nothing until a `metrics` recorder is installed.
    pub fn from_config(mut self, config: &KvStoreConfig) -> Self {
        self.metrics.get_or_insert_with(MetricsCollector::new);
        self.base_url = Some(config.base_url.clone());
        self.token = Some(config.token.clone());
        self.app = config.app.clone();
        self.owner = config.owner.clone();
        self.collection = config.collection.clone();
        self.skip_verify = config.skip_verify;
        self.timeout = config.timeout;
        self
    }

    fn normalize_base_url(url: String) -> String {
        url.trim_end_matches('/').to_string()
    }

    /// Build the [`KvStoreClient`] with the configured options.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidUrl`] if `base_url` was not provided.
    /// Returns [`StoreError::Unavailable`] if `token` was not provided.
    /// Returns [`StoreError::HttpError`] if the HTTP client fails to build.
    pub fn build(self) -> Result<KvStoreClient> {
        let base_url = self
            .base_url
            .ok_or_else(|| StoreError::InvalidUrl("base_url is required".to_string()))?;
        let base_url = Self::normalize_base_url(base_url);

        let token = self
            .token
            .ok_or_else(|| StoreError::Unavailable("a bearer token is required".to_string()))?;

        let mut http_builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS));

        if self.skip_verify {
            if base_url.starts_with("https://") {
                http_builder = http_builder.danger_accept_invalid_certs(true);
            } else {
                tracing::warn!(
                    "skip_verify=true has no effect on HTTP URLs. TLS verification only applies to HTTPS connections."
                );
            }
        }

        let http = http_builder.build()?;

        Ok(KvStoreClient {
            http,
            base_url,
            token,
            path: CollectionPath::new(self.owner, self.app, self.collection),
            metrics: self.metrics,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token() -> SecretString {
        SecretString::new("test-token".to_string().into())
    }

    #[test]
    fn test_from_config_preserves_settings() {
        let mut config = KvStoreConfig::new("https://kv.example.com:8089", token());
        config.app = "ops".to_string();
        config.owner = "admin".to_string();
        config.collection = "flags".to_string();
        config.timeout = Duration::from_secs(5);
        config.skip_verify = true;

        let builder = KvStoreClient::builder().from_config(&config);
        assert_eq!(builder.base_url.as_deref(), Some("https://kv.example.com:8089"));
        assert_eq!(builder.app, "ops");
        assert_eq!(builder.owner, "admin");
        assert_eq!(builder.collection, "flags");
        assert_eq!(builder.timeout, Duration::from_secs(5));
        assert!(builder.skip_verify);

        let client = builder.build().unwrap();
        assert_eq!(client.collection_path().collection, "flags");
        assert!(client.metrics.as_ref().is_some_and(MetricsCollector::is_enabled));
    }

    #[test]
    fn test_from_config_keeps_explicit_metrics_choice() {
        let config = KvStoreConfig::new("https://kv.example.com:8089", token());
        let client = KvStoreClient::builder()
            .metrics(MetricsCollector::disabled())
            .from_config(&config)
            .build()
            .unwrap();
        assert!(client.metrics.as_ref().is_some_and(|m| !m.is_enabled()));
    }

    #[test]
    fn test_build_normalizes_base_url() {
        let client = KvStoreClient::builder()
            .base_url("https://localhost:8089//")
            .token(token())
            .build()
            .unwrap();
        assert_eq!(client.base_url(), "https://localhost:8089");
    }

    #[test]
    fn test_build_uses_default_collection_path() {
        let client = KvStoreClient::builder()
            .base_url("https://localhost:8089")
            .token(token())
            .build()
            .unwrap();
        assert_eq!(
            client.collection_path(),
            &CollectionPath::new(DEFAULT_OWNER, DEFAULT_APP, DEFAULT_COLLECTION)
        );
    }

    #[test]
    fn test_build_requires_base_url() {
        let result = KvStoreClient::builder().token(token()).build();
        assert!(matches!(result, Err(StoreError::InvalidUrl(_))));
    }

    #[test]
    fn test_build_requires_token() {
        let result = KvStoreClient::builder()
            .base_url("https://localhost:8089")
            .build();
        assert!(matches!(result, Err(StoreError::Unavailable(_))));
    }

    #[test]
    fn test_skip_verify_on_http_still_builds() {
        let result = KvStoreClient::builder()
            .base_url("http://localhost:8089")
            .token(token())
            .skip_verify(true)
            .build();
        assert!(result.is_ok());
    }
}
