//! Configuration loader builder implementation.
//!
//! Responsibilities:
//! - Provide a builder-pattern `ConfigLoader` for store configuration.
//! - Support loading from `.env`, environment variables, and direct builder methods.
//! - Build the final `StoreConfig` from loaded values.
//!
//! Does NOT handle:
//! - Direct environment variable parsing logic (delegated to env.rs).
//! - Opening the configured store (see the client crate).
//!
//! Invariants / Assumptions:
//! - Builder methods take precedence over environment variables.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.
//! - The `DOTENV_DISABLED` variable is checked before `dotenvy::dotenv()` is called.

use secrecy::SecretString;
use std::path::PathBuf;
use std::time::Duration;

use super::env::apply_env;
use super::error::ConfigError;
use crate::constants::{
    DEFAULT_APP, DEFAULT_COLLECTION, DEFAULT_OWNER, DEFAULT_TIMEOUT_SECS, ENV_DOTENV_DISABLED,
    MAX_TIMEOUT_SECS,
};
use crate::types::{BackendKind, KvStoreConfig, StoreConfig};

/// Configuration loader that builds a [`StoreConfig`] from builder values and
/// environment variables.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    backend: Option<BackendKind>,
    store_file: Option<PathBuf>,
    store_url: Option<String>,
    token: Option<SecretString>,
    app: Option<String>,
    owner: Option<String>,
    collection: Option<String>,
    timeout: Option<Duration>,
    skip_verify: Option<bool>,
}

impl ConfigLoader {
    /// Create a new configuration loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if dotenv loading is disabled via environment variable.
    fn dotenv_disabled() -> bool {
        matches!(
            std::env::var(ENV_DOTENV_DISABLED).ok().as_deref(),
            Some("true") | Some("1")
        )
    }

    /// Load environment variables from .env file if present.
    ///
    /// If `DOTENV_DISABLED` is set to "true" or "1", the .env file is not loaded.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The `.env` file exists but has invalid syntax (`ConfigError::DotenvParse`)
    /// - The `.env` file exists but cannot be read (`ConfigError::DotenvIo`)
    ///
    /// Missing `.env` files are silently ignored (returns `Ok(self)`).
    ///
    /// SAFETY: Error messages never include raw .env line contents to prevent secret leakage.
    pub fn load_dotenv(self) -> Result<Self, ConfigError> {
        if Self::dotenv_disabled() {
            return Ok(self);
        }

        match dotenvy::dotenv() {
            Ok(path) => {
                tracing::debug!(path = %path.display(), "Loaded .env file");
                Ok(self)
            }
            Err(e) if Self::is_not_found(&e) => Ok(self),
            Err(dotenvy::Error::LineParse(_, idx)) => {
                Err(ConfigError::DotenvParse { error_index: idx })
            }
            Err(dotenvy::Error::Io(io_err)) => Err(ConfigError::DotenvIo {
                kind: io_err.kind(),
            }),
            Err(_) => Err(ConfigError::DotenvUnknown),
        }
    }

    /// Check if a dotenv error indicates the file was not found.
    fn is_not_found(err: &dotenvy::Error) -> bool {
        matches!(
            err,
            dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
        )
    }

    /// Read configuration from environment variables.
    ///
    /// Only fills values not already set through builder methods.
    pub fn from_env(mut self) -> Result<Self, ConfigError> {
        apply_env(&mut self)?;
        Ok(self)
    }

    /// Select the backend explicitly.
    pub fn with_backend(mut self, backend: BackendKind) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Set the JSON store file path.
    pub fn with_store_file(mut self, path: PathBuf) -> Self {
        self.store_file = Some(path);
        self
    }

    /// Set the KV store base URL.
    pub fn with_store_url(mut self, url: String) -> Self {
        self.store_url = Some(url);
        self
    }

    /// Set the KV store API token.
    pub fn with_token(mut self, token: String) -> Self {
        self.token = Some(SecretString::new(token.into()));
        self
    }

    /// Set the app namespace.
    pub fn with_app(mut self, app: String) -> Self {
        self.app = Some(app);
        self
    }

    /// Set the owner namespace.
    pub fn with_owner(mut self, owner: String) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Set the collection name.
    pub fn with_collection(mut self, collection: String) -> Self {
        self.collection = Some(collection);
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set whether to skip TLS verification.
    pub fn with_skip_verify(mut self, skip: bool) -> Self {
        self.skip_verify = Some(skip);
        self
    }

    /// Resolve which backend to use.
    ///
    /// An explicit selection wins; otherwise a store file implies `file`,
    /// a store URL implies `kvstore`, and the fallback is `memory`.
    fn resolve_backend(&self) -> BackendKind {
        match self.backend {
            Some(kind) => kind,
            None if self.store_file.is_some() => BackendKind::File,
            None if self.store_url.is_some() => BackendKind::KvStore,
            None => BackendKind::Memory,
        }
    }

    /// Build the final configuration.
    pub fn build(self) -> Result<StoreConfig, ConfigError> {
        let config = match self.resolve_backend() {
            BackendKind::Memory => StoreConfig::Memory,
            BackendKind::File => {
                let path = self
                    .store_file
                    .filter(|p| !p.as_os_str().is_empty())
                    .ok_or(ConfigError::MissingStoreFile)?;
                StoreConfig::File { path }
            }
            BackendKind::KvStore => {
                let base_url = self
                    .store_url
                    .as_deref()
                    .map(validate_and_normalize_base_url)
                    .transpose()?
                    .ok_or(ConfigError::MissingStoreUrl)?;
                let token = self.token.ok_or(ConfigError::MissingAuth)?;
                let timeout = self
                    .timeout
                    .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));
                validate_timeout(timeout)?;

                StoreConfig::KvStore(KvStoreConfig {
                    base_url,
                    token,
                    app: self.app.unwrap_or_else(|| DEFAULT_APP.to_string()),
                    owner: self.owner.unwrap_or_else(|| DEFAULT_OWNER.to_string()),
                    collection: self
                        .collection
                        .unwrap_or_else(|| DEFAULT_COLLECTION.to_string()),
                    timeout,
                    skip_verify: self.skip_verify.unwrap_or(false),
                })
            }
        };

        tracing::debug!(backend = %config.kind(), "Resolved store configuration");
        Ok(config)
    }

    // Internal accessor methods for use by env.rs

    pub(crate) fn backend(&self) -> Option<BackendKind> {
        self.backend
    }

    pub(crate) fn store_file(&self) -> Option<&PathBuf> {
        self.store_file.as_ref()
    }

    pub(crate) fn store_url(&self) -> Option<&String> {
        self.store_url.as_ref()
    }

    pub(crate) fn has_token(&self) -> bool {
        self.token.is_some()
    }

    pub(crate) fn app(&self) -> Option<&String> {
        self.app.as_ref()
    }

    pub(crate) fn owner(&self) -> Option<&String> {
        self.owner.as_ref()
    }

    pub(crate) fn collection(&self) -> Option<&String> {
        self.collection.as_ref()
    }

    pub(crate) fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub(crate) fn skip_verify(&self) -> Option<bool> {
        self.skip_verify
    }

    pub(crate) fn set_backend(&mut self, backend: Option<BackendKind>) {
        self.backend = backend;
    }

    pub(crate) fn set_store_file(&mut self, path: Option<PathBuf>) {
        self.store_file = path;
    }

    pub(crate) fn set_store_url(&mut self, url: Option<String>) {
        self.store_url = url;
    }

    pub(crate) fn set_token(&mut self, token: Option<SecretString>) {
        self.token = token;
    }

    pub(crate) fn set_app(&mut self, app: Option<String>) {
        self.app = app;
    }

    pub(crate) fn set_owner(&mut self, owner: Option<String>) {
        self.owner = owner;
    }

    pub(crate) fn set_collection(&mut self, collection: Option<String>) {
        self.collection = collection;
    }

    pub(crate) fn set_timeout(&mut self, timeout: Option<Duration>) {
        self.timeout = timeout;
    }

    pub(crate) fn set_skip_verify(&mut self, skip: Option<bool>) {
        self.skip_verify = skip;
    }
}

/// Rejects zero timeouts and timeouts above [`MAX_TIMEOUT_SECS`].
fn validate_timeout(timeout: Duration) -> Result<(), ConfigError> {
    let secs = timeout.as_secs();
    if secs == 0 {
        return Err(ConfigError::InvalidTimeout {
            message: "timeout must be greater than 0 seconds".to_string(),
        });
    }
    if secs > MAX_TIMEOUT_SECS {
        return Err(ConfigError::InvalidTimeout {
            message: format!(
                "timeout exceeds maximum allowed value of {} seconds",
                MAX_TIMEOUT_SECS
            ),
        });
    }
    Ok(())
}

/// Validates and normalizes a base URL string.
///
/// Validation rules:
/// - Trim surrounding whitespace
/// - Treat blank/whitespace-only as missing
/// - Parse as an absolute http(s) URL with a host
/// - Normalize by stripping trailing slash
fn validate_and_normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Err(ConfigError::MissingStoreUrl);
    }

    let parsed = url::Url::parse(trimmed).map_err(|e| ConfigError::InvalidValue {
        var: "store_url".into(),
        message: format!(
            "must be an absolute http(s) URL with a host (e.g. https://localhost:8089): {e}"
        ),
    })?;

    let scheme = parsed.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(ConfigError::InvalidValue {
            var: "store_url".into(),
            message: format!(
                "scheme must be http or https (e.g. https://localhost:8089), got: {scheme}"
            ),
        });
    }

    if parsed.host_str().is_none() {
        return Err(ConfigError::InvalidValue {
            var: "store_url".into(),
            message: "host is required (e.g. https://localhost:8089)".into(),
        });
    }

    Ok(parsed.as_str().trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_default_backend_is_memory() {
        let config = ConfigLoader::new().build().unwrap();
        assert!(matches!(config, StoreConfig::Memory));
    }

    #[test]
    fn test_store_file_implies_file_backend() {
        let config = ConfigLoader::new()
            .with_store_file(PathBuf::from("/tmp/settings.json"))
            .build()
            .unwrap();
        match config {
            StoreConfig::File { path } => assert_eq!(path, PathBuf::from("/tmp/settings.json")),
            other => panic!("expected file backend, got {other:?}"),
        }
    }

    #[test]
    fn test_explicit_file_backend_requires_path() {
        let err = ConfigLoader::new()
            .with_backend(BackendKind::File)
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingStoreFile));
    }

    #[test]
    fn test_kvstore_backend_normalizes_url_and_applies_defaults() {
        let config = ConfigLoader::new()
            .with_store_url("https://localhost:8089/".to_string())
            .with_token("token".to_string())
            .build()
            .unwrap();
        let StoreConfig::KvStore(kv) = config else {
            panic!("expected kvstore backend");
        };
        assert_eq!(kv.base_url, "https://localhost:8089");
        assert_eq!(kv.token.expose_secret(), "token");
        assert_eq!(kv.app, DEFAULT_APP);
        assert_eq!(kv.owner, DEFAULT_OWNER);
        assert_eq!(kv.collection, DEFAULT_COLLECTION);
        assert!(!kv.skip_verify);
    }

    #[test]
    fn test_kvstore_backend_requires_token() {
        let err = ConfigLoader::new()
            .with_store_url("https://localhost:8089".to_string())
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingAuth));
    }

    #[test]
    fn test_kvstore_backend_requires_url() {
        let err = ConfigLoader::new()
            .with_backend(BackendKind::KvStore)
            .with_token("token".to_string())
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingStoreUrl));
    }

    #[test]
    fn test_rejects_non_http_scheme() {
        let err = ConfigLoader::new()
            .with_store_url("ftp://example.com".to_string())
            .with_token("token".to_string())
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("scheme must be http or https"));
    }

    #[test]
    fn test_rejects_zero_and_oversized_timeouts() {
        for secs in [0, MAX_TIMEOUT_SECS + 1] {
            let err = ConfigLoader::new()
                .with_store_url("https://localhost:8089".to_string())
                .with_token("token".to_string())
                .with_timeout(Duration::from_secs(secs))
                .build()
                .unwrap_err();
            assert!(matches!(err, ConfigError::InvalidTimeout { .. }), "{secs}");
        }
    }
}
