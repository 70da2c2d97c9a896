//! The settings accessor: `get`, `set` and `init`.
//!
//! Responsibilities:
//! - Resolve a name from the environment table first, then from the record
//!   store in the requested partition.
//! - Write the placeholder value for names neither source knows, so the name
//!   shows up in the store for someone to fill in.
//! - Report unset names and convert resolved values to the requested kind.
//!
//! Does NOT handle:
//! - Writing the environment; `set` only ever touches the store.
//! - Caching; every environment miss reaches the store.
//!
//! Invariants:
//! - A non-empty environment value always wins and never reaches the store.
//! - A resolved value equal to [`NOT_SET_VALUE`] is unset, whichever source
//!   it came from. A missing record resolves to that value too, and
//!   [`is_unset`] is the only place the check happens.
//! - Store operations always run inside `run_in_partition` for the
//!   requested partition.

use std::fmt::Display;

use nsenv_client::{Lookup, Partition, RecordStore, run_in_partition};
use nsenv_config::{EnvSource, ProcessEnv};
use tracing::{Instrument, debug, debug_span, field, warn};

use crate::constants::{INIT_KEY, NOT_SET_VALUE};
use crate::error::{ConversionError, Result, SettingsError};
use crate::options::GetOptions;
use crate::value::{ResultKind, SettingValue};

/// Where a resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Source {
    Environment,
    Store,
}

impl Source {
    const fn as_str(self) -> &'static str {
        match self {
            Source::Environment => "environment",
            Source::Store => "store",
        }
    }
}

/// True when a resolved value is the placeholder. An empty string is a real
/// value.
fn is_unset(raw: &str) -> bool {
    raw == NOT_SET_VALUE
}

/// The stored value, or `None` when the store holds nothing usable.
fn stored_value(lookup: Lookup) -> Option<String> {
    match lookup {
        Lookup::Present(setting) if !is_unset(&setting.value) => Some(setting.value),
        Lookup::Present(_) | Lookup::Absent => None,
    }
}

/// A converted value that is not of the kind that was asked for.
fn kind_mismatch(name: &str, value: SettingValue, kind: ResultKind) -> SettingsError {
    ConversionError {
        name: name.to_string(),
        value: value.to_string(),
        kind,
    }
    .into()
}

/// Namespaced settings backed by an environment table and a record store.
///
/// ```rust,ignore
/// use nsenv::{GetOptions, ResultKind, Settings};
/// use nsenv_client::MemoryStore;
///
/// let settings = Settings::new(MemoryStore::new());
/// settings.set("WORKERS", 8, "tenant-a").await?;
/// let workers = settings.get_i64("WORKERS", "tenant-a").await?;
/// ```
#[derive(Debug, Clone)]
pub struct Settings<S, E = ProcessEnv> {
    store: S,
    env: E,
}

impl<S: RecordStore> Settings<S, ProcessEnv> {
    /// Settings over `store`, consulting the process environment first.
    pub fn new(store: S) -> Self {
        Self {
            store,
            env: ProcessEnv,
        }
    }
}

impl<S: RecordStore, E: EnvSource> Settings<S, E> {
    /// Settings over `store`, consulting `env` first.
    pub fn with_env(store: S, env: E) -> Self {
        Self { store, env }
    }

    /// The underlying record store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The environment table consulted before the store.
    pub fn env(&self) -> &E {
        &self.env
    }

    /// Resolves `name` and converts it as `options` request.
    ///
    /// Returns `Ok(None)` only for an unset name when `options` turn raising
    /// off and ask for `None`. With both turned off, an unset name yields the
    /// literal placeholder string whatever the requested kind.
    ///
    /// # Errors
    ///
    /// - [`SettingsError::ValueNotSet`] for an unset name when raising is on.
    /// - [`SettingsError::Conversion`] when the value does not parse.
    /// - [`SettingsError::StoreUnavailable`] when the store fails.
    pub async fn get(&self, name: &str, options: &GetOptions) -> Result<Option<SettingValue>> {
        let span = debug_span!(
            "settings.get",
            name,
            partition = %options.partition,
            source = field::Empty,
        );

        async move {
            let (raw, source) = self.resolve(name, &options.partition).await?;
            tracing::Span::current().record("source", source.as_str());

            if is_unset(&raw) {
                debug!("Setting is unset");
                return if options.raise_if_unset {
                    Err(SettingsError::ValueNotSet {
                        name: name.to_string(),
                        partition: options.partition.to_string(),
                    })
                } else if options.return_none_for_unset {
                    Ok(None)
                } else {
                    Ok(Some(SettingValue::String(raw)))
                };
            }

            let value = options.result_type.convert(name, &raw)?;
            debug!(kind = %options.result_type, "Resolved setting");
            Ok(Some(value))
        }
        .instrument(span)
        .await
    }

    /// Like [`Settings::get`], with the result kind given by name.
    ///
    /// An unknown kind fails with [`SettingsError::InvalidConversionType`]
    /// before the environment or the store is consulted.
    pub async fn get_as(
        &self,
        name: &str,
        result_type: &str,
        options: GetOptions,
    ) -> Result<Option<SettingValue>> {
        let kind: ResultKind = result_type.parse()?;
        self.get(name, &options.result_type(kind)).await
    }

    /// Reads `name` in `partition` as a string. Unset is an error.
    pub async fn get_string(
        &self,
        name: &str,
        partition: impl Into<Partition>,
    ) -> Result<String> {
        let value = self.get_required(name, partition, ResultKind::String).await?;
        Ok(value.into_string())
    }

    /// Reads `name` in `partition` as an `i64`. Unset is an error.
    pub async fn get_i64(&self, name: &str, partition: impl Into<Partition>) -> Result<i64> {
        match self.get_required(name, partition, ResultKind::Integer).await? {
            SettingValue::Integer(value) => Ok(value),
            other => Err(kind_mismatch(name, other, ResultKind::Integer)),
        }
    }

    /// Reads `name` in `partition` as an `f64`. Unset is an error.
    pub async fn get_f64(&self, name: &str, partition: impl Into<Partition>) -> Result<f64> {
        match self.get_required(name, partition, ResultKind::Float).await? {
            SettingValue::Float(value) => Ok(value),
            other => Err(kind_mismatch(name, other, ResultKind::Float)),
        }
    }

    async fn get_required(
        &self,
        name: &str,
        partition: impl Into<Partition>,
        kind: ResultKind,
    ) -> Result<SettingValue> {
        let partition = partition.into();
        let options = GetOptions::new()
            .partition(partition.clone())
            .result_type(kind);
        self.get(name, &options)
            .await?
            .ok_or_else(|| SettingsError::ValueNotSet {
                name: name.to_string(),
                partition: partition.to_string(),
            })
    }

    /// Stores the string form of `value` under `name` in `partition`.
    ///
    /// The record is created if missing and fully overwritten otherwise.
    /// The environment table is never written.
    pub async fn set(
        &self,
        name: &str,
        value: impl Display,
        partition: impl Into<Partition>,
    ) -> Result<()> {
        let partition = partition.into();
        let value = value.to_string();
        debug!(name, partition = %partition, "Writing setting");

        run_in_partition(partition, self.store.upsert_by_name(name, &value))
            .await
            .inspect_err(|e| warn!(name, error = %e, "Failed to write setting"))?;
        Ok(())
    }

    /// Makes sure the store holds at least the reserved init record.
    ///
    /// Probes [`INIT_KEY`] in the default partition without raising, so a
    /// fresh store gets a placeholder record. Store failures are returned.
    pub async fn init(&self) -> Result<()> {
        let options = GetOptions::new().raise_if_unset(false);
        match self.get(INIT_KEY, &options).await {
            Ok(_) => Ok(()),
            Err(SettingsError::ValueNotSet { .. }) => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// Finds the raw value for `name`. When neither source has one, the
    /// placeholder is written to the store and returned.
    async fn resolve(&self, name: &str, partition: &Partition) -> Result<(String, Source)> {
        if let Some(value) = self.env.var(name) {
            return Ok((value, Source::Environment));
        }

        let lookup = run_in_partition(partition.clone(), self.store.find_by_name(name))
            .await
            .inspect_err(|e| warn!(name, error = %e, "Record store lookup failed"))?;

        match stored_value(lookup) {
            Some(value) => Ok((value, Source::Store)),
            None => {
                self.set(name, NOT_SET_VALUE, partition.clone()).await?;
                Ok((NOT_SET_VALUE.to_string(), Source::Store))
            }
        }
    }
}
