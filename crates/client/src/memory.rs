//! In-process record store.
//!
//! Records live in a shared map keyed by partition, then by name. Clones share
//! the same data, so a test can keep a handle for inspection while the
//! accessor owns another.

use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::error::Result;
use crate::models::{Lookup, Setting};
use crate::partition::{Partition, current_partition};
use crate::store::RecordStore;

#[derive(Debug, Default)]
struct MemoryState {
    partitions: BTreeMap<Partition, BTreeMap<String, String>>,
    upserts: u64,
}

/// Record store held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<RwLock<MemoryState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Partitions that hold at least one record.
    pub fn partitions(&self) -> Vec<Partition> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        state.partitions.keys().cloned().collect()
    }

    /// All records in `partition`, keyed by name.
    pub fn records(&self, partition: &str) -> BTreeMap<String, String> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        state.partitions.get(partition).cloned().unwrap_or_default()
    }

    /// Total number of records across all partitions.
    pub fn len(&self) -> usize {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        state.partitions.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of upserts performed so far, including redundant ones.
    pub fn upsert_count(&self) -> u64 {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        state.upserts
    }
}

impl RecordStore for MemoryStore {
    async fn find_by_name(&self, name: &str) -> Result<Lookup> {
        let partition = current_partition();
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        let found = state
            .partitions
            .get(&partition)
            .and_then(|records| records.get(name))
            .map(|value| Setting::new(name, value.clone()));
        Ok(Lookup::from(found))
    }

    async fn upsert_by_name(&self, name: &str, value: &str) -> Result<()> {
        let partition = current_partition();
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state
            .partitions
            .entry(partition)
            .or_default()
            .insert(name.to_string(), value.to_string());
        state.upserts += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::partition::run_in_partition;

    #[tokio::test]
    async fn test_find_absent_record() {
        let store = MemoryStore::new();
        assert_eq!(store.find_by_name("MISSING").await.unwrap(), Lookup::Absent);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_upsert_overwrites_existing_record() {
        let store = MemoryStore::new();
        store.upsert_by_name("A", "1").await.unwrap();
        store.upsert_by_name("A", "2").await.unwrap();
        assert_eq!(store.find_by_name("A").await.unwrap().value(), Some("2"));
        assert_eq!(store.len(), 1);
        assert_eq!(store.upsert_count(), 2);
    }

    #[tokio::test]
    async fn test_partitions_are_created_on_first_write() {
        let store = MemoryStore::new();
        assert!(store.partitions().is_empty());
        run_in_partition("tenant", store.upsert_by_name("A", "1"))
            .await
            .unwrap();
        assert_eq!(store.partitions(), vec![Partition::from("tenant")]);
        assert_eq!(store.records("tenant").get("A").map(String::as_str), Some("1"));
        assert!(store.records("").is_empty());
    }

    #[tokio::test]
    async fn test_clones_share_records() {
        let store = MemoryStore::new();
        let handle = store.clone();
        store.upsert_by_name("A", "1").await.unwrap();
        assert_eq!(handle.len(), 1);
    }
}
