//! `nsenv set` command implementation.

use anyhow::{Context, Result};
use nsenv::Settings;
use nsenv_client::RecordStore;
use tracing::info;

/// Store `value` for `name` in `partition`.
pub async fn run<S: RecordStore>(
    settings: &Settings<S>,
    name: &str,
    value: &str,
    partition: &str,
) -> Result<()> {
    settings
        .set(name, value, partition)
        .await
        .with_context(|| format!("Failed to store setting '{name}'"))?;

    info!(name, partition, "Stored setting");
    Ok(())
}
