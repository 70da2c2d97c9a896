//! Record store adapters for namespaced settings.
//!
//! This crate provides the storage side of `nsenv`: a [`RecordStore`] trait
//! with in-memory, JSON file and remote KV store backends, and the
//! task-scoped partition that every backend reads on each call.

mod client;
pub mod endpoints;
pub mod error;
mod file;
mod memory;
pub mod metrics;
pub mod models;
pub mod partition;
mod store;

pub use client::KvStoreClient;
pub use client::builder::KvStoreClientBuilder;
pub use error::{Result, StoreError};
pub use file::FileStore;
pub use memory::MemoryStore;
pub use metrics::{ErrorCategory, MetricsCollector};
pub use models::{Lookup, Setting, SettingRecord};
pub use partition::{Partition, current_partition, run_in_partition, run_in_partition_sync};
pub use store::{ConfiguredStore, RecordStore};
