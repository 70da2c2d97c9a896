//! `nsenv get` command implementation.

use anyhow::{Context, Result};
use nsenv::{GetOptions, ResultKind, Settings};
use nsenv_client::RecordStore;

/// Options for a single `get`, already validated.
#[derive(Debug, Clone)]
pub struct GetArgs {
    pub name: String,
    pub partition: String,
    pub result_type: ResultKind,
    pub no_raise: bool,
    pub show_sentinel: bool,
}

/// Resolve the setting and print it on stdout.
///
/// An unset setting with `--no-raise` prints nothing, or the placeholder
/// with `--show-sentinel`.
pub async fn run<S: RecordStore>(settings: &Settings<S>, args: GetArgs) -> Result<()> {
    let options = GetOptions::new()
        .partition(args.partition.as_str())
        .result_type(args.result_type)
        .raise_if_unset(!args.no_raise)
        .return_none_for_unset(!args.show_sentinel);

    let value = settings
        .get(&args.name, &options)
        .await
        .with_context(|| format!("Failed to read setting '{}'", args.name))?;

    match value {
        Some(value) => println!("{value}"),
        None => tracing::debug!(name = %args.name, "Setting is unset; printing nothing"),
    }

    Ok(())
}
