//! Store configuration types.
//!
//! Responsibilities:
//! - Define which record store backend is in use and its connection settings.
//! - Parse backend names from strings (env vars and CLI flags).
//!
//! Does NOT handle:
//! - Loading values from the environment (see `loader` module).
//! - Opening connections or files (see the client crate).
//!
//! Invariants:
//! - A `KvStore` configuration always carries a normalized base URL (no trailing slash).
//! - Tokens are held as `SecretString` and never appear in `Debug` output.

use secrecy::SecretString;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::constants::{DEFAULT_APP, DEFAULT_COLLECTION, DEFAULT_OWNER, DEFAULT_TIMEOUT_SECS};

/// Record store backend selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// In-process store, lost when the process exits.
    Memory,
    /// JSON document on local disk.
    File,
    /// Remote KV store collection over HTTP.
    KvStore,
}

impl BackendKind {
    /// Returns the canonical lowercase name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Memory => "memory",
            BackendKind::File => "file",
            BackendKind::KvStore => "kvstore",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" | "mem" => Ok(BackendKind::Memory),
            "file" | "json" => Ok(BackendKind::File),
            "kvstore" | "kv" => Ok(BackendKind::KvStore),
            other => Err(format!(
                "unknown backend '{other}' (expected memory, file or kvstore)"
            )),
        }
    }
}

/// Connection settings for a remote KV store collection.
#[derive(Debug, Clone)]
pub struct KvStoreConfig {
    /// Base URL of the service (e.g., https://localhost:8089), no trailing slash.
    pub base_url: String,
    /// Bearer token sent with every request.
    pub token: SecretString,
    /// App namespace of the collection.
    pub app: String,
    /// Owner namespace of the collection.
    pub owner: String,
    /// Collection holding the setting records.
    pub collection: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Whether to skip TLS verification (for self-signed certificates).
    pub skip_verify: bool,
}

impl KvStoreConfig {
    /// Creates a configuration with default namespace, collection and timeout.
    pub fn new(base_url: impl Into<String>, token: SecretString) -> Self {
        Self {
            base_url: base_url.into(),
            token,
            app: DEFAULT_APP.to_string(),
            owner: DEFAULT_OWNER.to_string(),
            collection: DEFAULT_COLLECTION.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            skip_verify: false,
        }
    }
}

/// Fully resolved record store configuration.
#[derive(Debug, Clone)]
pub enum StoreConfig {
    /// In-process store.
    Memory,
    /// JSON file store at `path`.
    File { path: PathBuf },
    /// Remote KV store collection.
    KvStore(KvStoreConfig),
}

impl StoreConfig {
    /// Returns the backend kind of this configuration.
    pub fn kind(&self) -> BackendKind {
        match self {
            StoreConfig::Memory => BackendKind::Memory,
            StoreConfig::File { .. } => BackendKind::File,
            StoreConfig::KvStore(_) => BackendKind::KvStore,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_kind_from_str() {
        assert_eq!("memory".parse::<BackendKind>(), Ok(BackendKind::Memory));
        assert_eq!(" FILE ".parse::<BackendKind>(), Ok(BackendKind::File));
        assert_eq!("kv".parse::<BackendKind>(), Ok(BackendKind::KvStore));
        assert!("redis".parse::<BackendKind>().is_err());
    }

    #[test]
    fn test_backend_kind_display_round_trips() {
        for kind in [BackendKind::Memory, BackendKind::File, BackendKind::KvStore] {
            assert_eq!(kind.to_string().parse::<BackendKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_kvstore_config_debug_redacts_token() {
        let config = KvStoreConfig::new(
            "https://localhost:8089",
            SecretString::new("super-secret".to_string().into()),
        );
        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret"));
        assert_eq!(config.collection, DEFAULT_COLLECTION);
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }
}
