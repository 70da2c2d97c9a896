//! Configuration loader for environment variables and `.env` files.
//!
//! Responsibilities:
//! - Load store configuration from `.env` files, environment variables and builder overrides.
//! - Expose the environment table used for setting lookups.
//! - Enforce the `DOTENV_DISABLED` gate to prevent accidental dotenv loading in tests.
//!
//! Invariants / Assumptions:
//! - Builder values take precedence over environment variables.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.

mod builder;
mod env;
mod error;

pub use builder::ConfigLoader;
pub use env::{EnvSource, ProcessEnv, env_var_or_none};
pub use error::ConfigError;
