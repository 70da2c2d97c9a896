//! Command dispatch logic.
//!
//! Responsibilities:
//! - Validate command arguments that need no store (result type names).
//! - Open the configured record store and route to the command handler.
//!
//! Does NOT handle:
//! - CLI structure definitions (see `args` module).
//! - Configuration loading (see `main()`).
//!
//! Invariants:
//! - An unknown `--type` is rejected before the store is opened.

use anyhow::{Context, Result};
use nsenv::{ResultKind, Settings};
use nsenv_client::ConfiguredStore;
use nsenv_config::StoreConfig;

use crate::args::Commands;
use crate::commands;

/// Dispatch a parsed command against the store described by `config`.
pub(crate) async fn run_command(command: Commands, config: &StoreConfig) -> Result<()> {
    match command {
        Commands::Get {
            name,
            partition,
            result_type,
            no_raise,
            show_sentinel,
        } => {
            let result_type: ResultKind = result_type.parse()?;
            let settings = open_settings(config)?;
            let args = commands::get::GetArgs {
                name,
                partition,
                result_type,
                no_raise,
                show_sentinel,
            };
            commands::get::run(&settings, args).await?;
        }
        Commands::Set {
            name,
            value,
            partition,
        } => {
            let settings = open_settings(config)?;
            commands::set::run(&settings, &name, &value, &partition).await?;
        }
        Commands::Init => {
            let settings = open_settings(config)?;
            commands::init::run(&settings).await?;
        }
    }

    Ok(())
}

fn open_settings(config: &StoreConfig) -> Result<Settings<ConfiguredStore>> {
    let store = ConfiguredStore::from_config(config)
        .with_context(|| format!("Failed to open {} record store", config.kind()))?;
    Ok(Settings::new(store))
}
