//! Partition scoping for record store operations.
//!
//! Every record store operation runs against the *active partition*. The
//! active partition is task-local: it is set for the duration of
//! [`run_in_partition`] (or [`run_in_partition_sync`]) and the previous value
//! comes back when that call returns, fails, panics or is cancelled. Nested
//! calls behave as a stack.
//!
//! Outside any scope the active partition is the default (empty) partition.
//! Tasks spawned from inside a scope do not inherit it.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::future::Future;

tokio::task_local! {
    static ACTIVE_PARTITION: Partition;
}

/// Identifier of a disjoint subdivision of the record store's key space.
///
/// The default partition is the empty string. Partitions have no lifecycle of
/// their own: one exists as soon as a record is written while it is active.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Partition(String);

impl Partition {
    /// Creates a partition identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the default (empty) partition.
    pub fn is_default(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Partition {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for Partition {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&Partition> for Partition {
    fn from(partition: &Partition) -> Self {
        partition.clone()
    }
}

impl AsRef<str> for Partition {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Partition {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Returns the partition active in the current task, or the default partition
/// when called outside any scope.
pub fn current_partition() -> Partition {
    ACTIVE_PARTITION
        .try_with(Partition::clone)
        .unwrap_or_default()
}

/// Runs `work` with `partition` active and returns its output unchanged.
///
/// The previously active partition is restored when `work` completes, and
/// also if the returned future is dropped before completion.
pub async fn run_in_partition<F>(partition: impl Into<Partition>, work: F) -> F::Output
where
    F: Future,
{
    let partition = partition.into();
    tracing::trace!(partition = %partition, "Entering partition scope");
    ACTIVE_PARTITION.scope(partition, work).await
}

/// Synchronous form of [`run_in_partition`].
///
/// The previous partition is restored even if `work` panics.
pub fn run_in_partition_sync<R>(partition: impl Into<Partition>, work: impl FnOnce() -> R) -> R {
    ACTIVE_PARTITION.sync_scope(partition.into(), work)
}
