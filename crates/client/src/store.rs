//! The record store adapter contract.
//!
//! Responsibilities:
//! - Define [`RecordStore`], the find/upsert interface every backend implements.
//! - Provide [`ConfiguredStore`], a backend chosen at runtime from a `StoreConfig`.
//!
//! Does NOT handle:
//! - Choosing the partition (see [`crate::partition`]); backends read the
//!   active partition on every call.
//!
//! Invariants:
//! - At most one record exists per (partition, name).
//! - `upsert_by_name` fully overwrites the value; there is no merge.
//! - Failures are surfaced on the first attempt and never retried.

use std::future::Future;
use std::sync::Arc;

use nsenv_config::StoreConfig;

use crate::client::KvStoreClient;
use crate::error::Result;
use crate::file::FileStore;
use crate::memory::MemoryStore;
use crate::models::Lookup;

/// Keyed record store scoped by the active partition.
pub trait RecordStore: Send + Sync {
    /// Finds the record named `name` in the active partition.
    fn find_by_name(&self, name: &str) -> impl Future<Output = Result<Lookup>> + Send;

    /// Overwrites the value of the record named `name` in the active
    /// partition, creating the record if it does not exist.
    fn upsert_by_name(&self, name: &str, value: &str) -> impl Future<Output = Result<()>> + Send;
}

impl<S: RecordStore> RecordStore for Arc<S> {
    fn find_by_name(&self, name: &str) -> impl Future<Output = Result<Lookup>> + Send {
        (**self).find_by_name(name)
    }

    fn upsert_by_name(&self, name: &str, value: &str) -> impl Future<Output = Result<()>> + Send {
        (**self).upsert_by_name(name, value)
    }
}

impl<S: RecordStore> RecordStore for &S {
    fn find_by_name(&self, name: &str) -> impl Future<Output = Result<Lookup>> + Send {
        (**self).find_by_name(name)
    }

    fn upsert_by_name(&self, name: &str, value: &str) -> impl Future<Output = Result<()>> + Send {
        (**self).upsert_by_name(name, value)
    }
}

/// A record store backend selected from configuration.
#[derive(Debug, Clone)]
pub enum ConfiguredStore {
    Memory(MemoryStore),
    File(FileStore),
    KvStore(KvStoreClient),
}

impl ConfiguredStore {
    /// Opens the backend described by `config`.
    ///
    /// Nothing is read or written here; a missing store file or an
    /// unreachable service is reported by the first operation.
    pub fn from_config(config: &StoreConfig) -> Result<Self> {
        let store = match config {
            StoreConfig::Memory => ConfiguredStore::Memory(MemoryStore::new()),
            StoreConfig::File { path } => ConfiguredStore::File(FileStore::new(path.clone())),
            StoreConfig::KvStore(kv) => {
                ConfiguredStore::KvStore(KvStoreClient::builder().from_config(kv).build()?)
            }
        };
        tracing::debug!(backend = %config.kind(), "Opened record store");
        Ok(store)
    }
}

impl RecordStore for ConfiguredStore {
    async fn find_by_name(&self, name: &str) -> Result<Lookup> {
        match self {
            ConfiguredStore::Memory(store) => store.find_by_name(name).await,
            ConfiguredStore::File(store) => store.find_by_name(name).await,
            ConfiguredStore::KvStore(store) => store.find_by_name(name).await,
        }
    }

    async fn upsert_by_name(&self, name: &str, value: &str) -> Result<()> {
        match self {
            ConfiguredStore::Memory(store) => store.upsert_by_name(name, value).await,
            ConfiguredStore::File(store) => store.upsert_by_name(name, value).await,
            ConfiguredStore::KvStore(store) => store.upsert_by_name(name, value).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::partition::run_in_partition;
    use std::path::PathBuf;

    #[tokio::test]
    async fn test_configured_memory_store_round_trip() {
        let store = ConfiguredStore::from_config(&StoreConfig::Memory).unwrap();
        store.upsert_by_name("A", "1").await.unwrap();
        assert_eq!(store.find_by_name("A").await.unwrap().value(), Some("1"));
    }

    #[tokio::test]
    async fn test_arc_store_delegates_in_active_partition() {
        let store = Arc::new(MemoryStore::new());
        run_in_partition("p", store.upsert_by_name("A", "1"))
            .await
            .unwrap();
        assert!(!store.find_by_name("A").await.unwrap().is_present());
        let found = run_in_partition("p", store.find_by_name("A")).await.unwrap();
        assert_eq!(found.value(), Some("1"));
    }

    #[test]
    fn test_from_config_file_backend() {
        let store = ConfiguredStore::from_config(&StoreConfig::File {
            path: PathBuf::from("/tmp/nsenv-test.json"),
        })
        .unwrap();
        assert!(matches!(store, ConfiguredStore::File(_)));
    }
}
