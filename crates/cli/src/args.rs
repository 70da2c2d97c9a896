//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Bind global store options to their environment variables.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `dispatch` module).
//! - Does not validate store configuration (see `nsenv_config::ConfigLoader`).

use clap::{Parser, Subcommand};
use nsenv_config::BackendKind;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "nsenv")]
#[command(
    about = "Read and write namespaced settings from the environment and a record store",
    long_about = None
)]
#[command(version)]
#[command(
    after_help = "Examples:\n  nsenv --store-file settings.json set API_URL https://api.example.com\n  nsenv --store-file settings.json get API_URL\n  nsenv get WORKERS --partition tenant-a --type integer\n  nsenv get OPTIONAL_FLAG --no-raise\n  nsenv init\n"
)]
pub struct Cli {
    /// Record store backend (memory, file, kvstore)
    #[arg(long, global = true, env = "NSENV_BACKEND")]
    pub backend: Option<BackendKind>,

    /// Path of the JSON store file (file backend)
    #[arg(long, global = true, env = "NSENV_STORE_FILE", value_name = "FILE")]
    pub store_file: Option<PathBuf>,

    /// Base URL of the KV store service (e.g., https://localhost:8089)
    #[arg(long, global = true, env = "NSENV_STORE_URL")]
    pub store_url: Option<String>,

    /// Bearer token for the KV store service
    #[arg(long, global = true, env = "NSENV_STORE_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// App namespace of the KV store collection
    #[arg(long, global = true, env = "NSENV_STORE_APP")]
    pub app: Option<String>,

    /// Owner namespace of the KV store collection
    #[arg(long, global = true, env = "NSENV_STORE_OWNER")]
    pub owner: Option<String>,

    /// KV store collection holding the settings
    #[arg(long, global = true, env = "NSENV_COLLECTION")]
    pub collection: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, env = "NSENV_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Skip TLS certificate verification (for self-signed certificates)
    #[arg(long, global = true, env = "NSENV_SKIP_VERIFY")]
    pub skip_verify: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the value of a setting
    Get {
        /// Setting name
        name: String,

        /// Partition to look the setting up in
        #[arg(short, long, default_value = "")]
        partition: String,

        /// Result type: string, integer or float
        #[arg(short = 't', long = "type", default_value = "string")]
        result_type: String,

        /// Exit successfully when the setting has no value
        #[arg(long)]
        no_raise: bool,

        /// With --no-raise, print the placeholder value instead of nothing
        #[arg(long, requires = "no_raise")]
        show_sentinel: bool,
    },

    /// Store a value for a setting
    Set {
        /// Setting name
        name: String,

        /// Value to store
        #[arg(allow_hyphen_values = true)]
        value: String,

        /// Partition to store the setting in
        #[arg(short, long, default_value = "")]
        partition: String,
    },

    /// Create the reserved init record so the store is never empty
    Init,
}
