//! JSON file record store.
//!
//! Responsibilities:
//! - Persist setting records as one JSON document on local disk.
//! - Read the document on every lookup so out-of-band edits are seen.
//!
//! Does NOT handle:
//! - Coordination between processes; concurrent writers from different
//!   processes follow last-write-wins.
//!
//! Invariants:
//! - A missing file is an empty store.
//! - Writes go to a temporary file that is renamed over the target, so
//!   readers never observe a half-written document.
//! - Writes from clones of the same `FileStore` are serialized.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use crate::error::{Result, StoreError};
use crate::models::{Lookup, Setting};
use crate::partition::{Partition, current_partition};
use crate::store::RecordStore;

/// On-disk layout: partition → name → value.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreDocument {
    #[serde(default)]
    partitions: BTreeMap<Partition, BTreeMap<String, String>>,
}

/// Record store backed by a JSON file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Returns the path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling of the store file with `.tmp` appended to the full file name.
    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(OsString::from).unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn load(&self) -> Result<StoreDocument> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(StoreDocument::default());
            }
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        serde_json::from_str(&content).map_err(|e| StoreError::Corrupt {
            path: self.path.clone(),
            message: e.to_string(),
        })
    }

    fn atomic_save(&self, document: &StoreDocument) -> Result<()> {
        let io_err = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }

        let content = serde_json::to_string_pretty(document).map_err(|e| StoreError::Corrupt {
            path: self.path.clone(),
            message: e.to_string(),
        })?;

        let temp_path = self.temp_path();
        std::fs::write(&temp_path, content).map_err(io_err)?;
        std::fs::rename(&temp_path, &self.path).map_err(io_err)?;

        tracing::debug!(path = %self.path.display(), "Store file saved");
        Ok(())
    }
}

impl RecordStore for FileStore {
    async fn find_by_name(&self, name: &str) -> Result<Lookup> {
        let partition = current_partition();
        let document = self.load()?;
        let found = document
            .partitions
            .get(&partition)
            .and_then(|records| records.get(name))
            .map(|value| Setting::new(name, value.clone()));
        Ok(Lookup::from(found))
    }

    async fn upsert_by_name(&self, name: &str, value: &str) -> Result<()> {
        let partition = current_partition();
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut document = self.load()?;
        document
            .partitions
            .entry(partition)
            .or_default()
            .insert(name.to_string(), value.to_string());
        self.atomic_save(&document)
    }
}
