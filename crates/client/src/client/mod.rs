//! HTTP client for a remote KV store collection.
//!
//! # Submodules
//! - [`builder`]: Client construction and configuration
//!
//! # What this module does NOT handle:
//! - Direct HTTP request implementation (delegated to [`crate::endpoints`])
//!
//! # Invariants
//! - Every request carries the bearer token; nothing is retried.
//! - Records are matched on `(partition, name)` using the partition active
//!   when the call is made.
//! - Upsert is find-then-write and is not atomic across processes; two
//!   writers racing on a new name may both insert.

pub mod builder;

use secrecy::SecretString;
use tracing::debug;

use crate::endpoints::{self, CollectionPath, DataEndpoint};
use crate::error::Result;
use crate::metrics::MetricsCollector;
use crate::models::{Lookup, Setting, SettingRecord};
use crate::partition::current_partition;
use crate::store::RecordStore;

/// Record store backed by a KV store collection over HTTP.
#[derive(Debug, Clone)]
pub struct KvStoreClient {
    pub(crate) http: reqwest::Client,
    pub(crate) base_url: String,
    pub(crate) token: SecretString,
    pub(crate) path: CollectionPath,
    pub(crate) metrics: Option<MetricsCollector>,
}

impl KvStoreClient {
    /// Create a new client builder.
    pub fn builder() -> builder::KvStoreClientBuilder {
        builder::KvStoreClientBuilder::new()
    }

    /// Get the base URL of the service.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the collection this client reads and writes.
    pub fn collection_path(&self) -> &CollectionPath {
        &self.path
    }

    fn endpoint(&self) -> DataEndpoint<'_> {
        DataEndpoint {
            client: &self.http,
            base_url: &self.base_url,
            token: &self.token,
            path: &self.path,
            metrics: self.metrics.as_ref(),
        }
    }
}

impl RecordStore for KvStoreClient {
    async fn find_by_name(&self, name: &str) -> Result<Lookup> {
        let partition = current_partition();
        let record = endpoints::find_record(self.endpoint(), &partition, name).await?;
        Ok(record.map(Setting::from).into())
    }

    async fn upsert_by_name(&self, name: &str, value: &str) -> Result<()> {
        let partition = current_partition();
        let existing = endpoints::find_record(self.endpoint(), &partition, name).await?;
        let record = SettingRecord::new(partition, name, value);

        match existing.and_then(|found| found.key) {
            Some(key) => {
                debug!(name, partition = %record.partition, "Updating KV store record");
                endpoints::update_record(self.endpoint(), &key, &record).await
            }
            None => {
                let key = endpoints::insert_record(self.endpoint(), &record).await?;
                debug!(name, partition = %record.partition, key = %key, "Inserted KV store record");
                Ok(())
            }
        }
    }
}
