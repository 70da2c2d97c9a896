//! Environment variable access.
//!
//! Responsibilities:
//! - Read `NSENV_*` configuration variables with empty/whitespace filtering.
//! - Abstract the settings environment table behind [`EnvSource`] so lookups
//!   can be served from the process or from a fixed map.
//! - Apply `NSENV_*` variables to a [`ConfigLoader`].
//!
//! Does NOT handle:
//! - Building the final `StoreConfig` (see builder.rs).
//! - .env file loading (handled by `ConfigLoader::load_dotenv`).
//!
//! Invariants:
//! - [`env_var_or_none`] treats empty or whitespace-only variables as unset
//!   and trims what it returns.
//! - [`EnvSource`] lookups treat only the empty string as unset and return
//!   values verbatim.
//! - The environment is never written.

use secrecy::SecretString;
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::time::Duration;

use super::builder::ConfigLoader;
use super::error::ConfigError;
use crate::constants::{
    ENV_BACKEND, ENV_COLLECTION, ENV_SKIP_VERIFY, ENV_STORE_APP, ENV_STORE_FILE, ENV_STORE_OWNER,
    ENV_STORE_TOKEN, ENV_STORE_URL, ENV_TIMEOUT,
};
use crate::types::BackendKind;

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value (leading/trailing whitespace removed) if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(non_blank)
}

fn non_blank(s: String) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else if trimmed.len() == s.len() {
        // No trimming needed, return original to avoid allocation
        Some(s)
    } else {
        Some(trimmed.to_string())
    }
}

fn non_empty(s: String) -> Option<String> {
    (!s.is_empty()).then_some(s)
}

/// A read-only name → value table.
///
/// Implementations return `None` for names that are absent or set to the
/// empty string. Any other value, whitespace included, is returned as is.
pub trait EnvSource: Send + Sync {
    /// Looks up `name`.
    fn var(&self, name: &str) -> Option<String>;
}

/// The process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok().and_then(non_empty)
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned().and_then(non_empty)
    }
}

impl EnvSource for BTreeMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned().and_then(non_empty)
    }
}

impl<E: EnvSource + ?Sized> EnvSource for &E {
    fn var(&self, name: &str) -> Option<String> {
        (**self).var(name)
    }
}

/// Apply environment variable configuration to the loader.
///
/// Values already set on the loader (builder/CLI overrides) are kept.
pub fn apply_env(loader: &mut ConfigLoader) -> Result<(), ConfigError> {
    if let Some(backend) = env_var_or_none(ENV_BACKEND).filter(|_| loader.backend().is_none()) {
        let kind: BackendKind = backend
            .parse()
            .map_err(|message| ConfigError::InvalidValue {
                var: ENV_BACKEND.to_string(),
                message,
            })?;
        loader.set_backend(Some(kind));
    }
    if let Some(path) = env_var_or_none(ENV_STORE_FILE).filter(|_| loader.store_file().is_none()) {
        loader.set_store_file(Some(PathBuf::from(path)));
    }
    if let Some(url) = env_var_or_none(ENV_STORE_URL).filter(|_| loader.store_url().is_none()) {
        loader.set_store_url(Some(url));
    }
    if let Some(token) = env_var_or_none(ENV_STORE_TOKEN).filter(|_| !loader.has_token()) {
        loader.set_token(Some(SecretString::new(token.into())));
    }
    if let Some(app) = env_var_or_none(ENV_STORE_APP).filter(|_| loader.app().is_none()) {
        loader.set_app(Some(app));
    }
    if let Some(owner) = env_var_or_none(ENV_STORE_OWNER).filter(|_| loader.owner().is_none()) {
        loader.set_owner(Some(owner));
    }
    if let Some(collection) =
        env_var_or_none(ENV_COLLECTION).filter(|_| loader.collection().is_none())
    {
        loader.set_collection(Some(collection));
    }
    if let Some(timeout) = env_var_or_none(ENV_TIMEOUT).filter(|_| loader.timeout().is_none()) {
        let secs: u64 = timeout.parse().map_err(|_| ConfigError::InvalidValue {
            var: ENV_TIMEOUT.to_string(),
            message: "must be a number".to_string(),
        })?;
        loader.set_timeout(Some(Duration::from_secs(secs)));
    }
    if let Some(skip) = env_var_or_none(ENV_SKIP_VERIFY).filter(|_| loader.skip_verify().is_none())
    {
        loader.set_skip_verify(Some(skip.parse().map_err(|_| {
            ConfigError::InvalidValue {
                var: ENV_SKIP_VERIFY.to_string(),
                message: "must be true or false".to_string(),
            }
        })?));
    }

    Ok(())
}
