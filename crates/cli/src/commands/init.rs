//! `nsenv init` command implementation.

use anyhow::{Context, Result};
use nsenv::Settings;
use nsenv_client::RecordStore;

pub async fn run<S: RecordStore>(settings: &Settings<S>) -> Result<()> {
    settings
        .init()
        .await
        .context("Failed to initialize the record store")
}
