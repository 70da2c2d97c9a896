//! nsenv - Command-line access to namespaced settings.
//!
//! Responsibilities:
//! - Parse command-line arguments and environment variables.
//! - Resolve the record store configuration and run one command.
//! - Map failures to structured exit codes.
//!
//! Does NOT handle:
//! - Lookup and conversion rules (see the `nsenv` crate).
//!
//! Invariants:
//! - `load_dotenv()` is called BEFORE CLI parsing to allow `.env` to provide clap defaults.
//! - Logs go to stderr; stdout carries only command output.

mod args;
mod commands;
mod dispatch;
mod error;

use anyhow::Result;
use args::Cli;
use clap::Parser;
use dispatch::run_command;
use error::{ExitCode, ExitCodeExt};
use nsenv_config::{ConfigLoader, StoreConfig};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() {
    // Load .env file BEFORE CLI parsing so clap env defaults can read .env values
    if let Err(e) = ConfigLoader::new().load_dotenv() {
        eprintln!("Failed to load environment: {}", e);
        std::process::exit(ExitCode::GeneralError.as_i32());
    }

    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to build configuration: {:#}", e);
            std::process::exit(ExitCode::GeneralError.as_i32());
        }
    };
    tracing::debug!(backend = %config.kind(), "Resolved record store configuration");

    let exit_code = match run_command(cli.command, &config).await {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            eprintln!("{:#}", e);
            e.exit_code()
        }
    };

    std::process::exit(exit_code.as_i32());
}

/// Resolve the store configuration. CLI values beat the environment.
fn build_config(cli: &Cli) -> Result<StoreConfig> {
    let mut loader = ConfigLoader::new();

    if let Some(backend) = cli.backend {
        loader = loader.with_backend(backend);
    }
    // Blank values are ignored to allow fallback to env var
    if let Some(path) = cli.store_file.as_ref().filter(|p| !p.as_os_str().is_empty()) {
        loader = loader.with_store_file(path.clone());
    }
    if let Some(ref url) = cli.store_url {
        loader = loader.with_store_url(url.clone());
    }
    if let Some(ref token) = cli.token {
        loader = loader.with_token(token.clone());
    }
    if let Some(ref app) = cli.app {
        loader = loader.with_app(app.clone());
    }
    if let Some(ref owner) = cli.owner {
        loader = loader.with_owner(owner.clone());
    }
    if let Some(ref collection) = cli.collection {
        loader = loader.with_collection(collection.clone());
    }
    if let Some(timeout_secs) = cli.timeout {
        loader = loader.with_timeout(std::time::Duration::from_secs(timeout_secs));
    }
    if cli.skip_verify {
        loader = loader.with_skip_verify(true);
    }

    Ok(loader.from_env()?.build()?)
}
