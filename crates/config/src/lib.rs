//! Configuration management for nsenv.
//!
//! This crate provides the environment table abstraction consulted before the
//! record store, and the loader that resolves which record store backend to
//! use from environment variables, `.env` files and explicit overrides.

pub mod constants;
mod loader;
pub mod types;

pub use loader::{ConfigError, ConfigLoader, EnvSource, ProcessEnv, env_var_or_none};
pub use types::{BackendKind, KvStoreConfig, StoreConfig};
