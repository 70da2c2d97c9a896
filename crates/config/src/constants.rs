//! Centralized constants for the nsenv workspace.
//!
//! Default values shared by the config loader, the store backends and the
//! CLI so that no crate carries its own copy of a magic number.

// =============================================================================
// Store Connection Defaults
// =============================================================================

/// Default HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Maximum allowed request timeout in seconds (1 hour).
pub const MAX_TIMEOUT_SECS: u64 = 3600;

/// Default KV store collection holding setting records.
pub const DEFAULT_COLLECTION: &str = "nsenv_settings";

/// Default app namespace used in `servicesNS/{owner}/{app}` paths.
pub const DEFAULT_APP: &str = "search";

/// Default owner namespace used in `servicesNS/{owner}/{app}` paths.
pub const DEFAULT_OWNER: &str = "nobody";

// =============================================================================
// Environment Variable Names
// =============================================================================

/// Selects the store backend (`memory`, `file`, `kvstore`).
pub const ENV_BACKEND: &str = "NSENV_BACKEND";

/// Path of the JSON file backing the `file` backend.
pub const ENV_STORE_FILE: &str = "NSENV_STORE_FILE";

/// Base URL of the KV store service.
pub const ENV_STORE_URL: &str = "NSENV_STORE_URL";

/// Bearer token for the KV store service.
pub const ENV_STORE_TOKEN: &str = "NSENV_STORE_TOKEN";

/// App namespace of the KV store collection.
pub const ENV_STORE_APP: &str = "NSENV_STORE_APP";

/// Owner namespace of the KV store collection.
pub const ENV_STORE_OWNER: &str = "NSENV_STORE_OWNER";

/// KV store collection name.
pub const ENV_COLLECTION: &str = "NSENV_COLLECTION";

/// Request timeout in seconds.
pub const ENV_TIMEOUT: &str = "NSENV_TIMEOUT";

/// Skip TLS certificate verification.
pub const ENV_SKIP_VERIFY: &str = "NSENV_SKIP_VERIFY";

/// Disables `.env` loading when set to `1` or `true`.
pub const ENV_DOTENV_DISABLED: &str = "DOTENV_DISABLED";
