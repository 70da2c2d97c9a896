//! Shared test utilities for nsenv integration tests.
//!
//! Responsibilities:
//! - Provide a hermetic CLI command factory that prevents dotenv loading.
//! - Clear store configuration inherited from the host environment.
//!
//! Invariants / Assumptions:
//! - All integration tests using this helper will be hermetic by default.

use assert_cmd::Command;
use std::path::Path;

/// Returns a hermetic `nsenv` command for integration testing.
///
/// It ensures:
/// - `DOTENV_DISABLED=1` is set to prevent local `.env` contamination.
/// - Store configuration env vars are cleared to ensure no leakage from the host.
pub fn nsenv_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("nsenv");

    // Hermeticity: prevent loading local .env
    cmd.env("DOTENV_DISABLED", "1");

    cmd.env_remove("NSENV_BACKEND")
        .env_remove("NSENV_STORE_FILE")
        .env_remove("NSENV_STORE_URL")
        .env_remove("NSENV_STORE_TOKEN")
        .env_remove("NSENV_STORE_APP")
        .env_remove("NSENV_STORE_OWNER")
        .env_remove("NSENV_COLLECTION")
        .env_remove("NSENV_TIMEOUT")
        .env_remove("NSENV_SKIP_VERIFY")
        .env_remove("RUST_LOG");

    cmd
}

/// Returns a hermetic `nsenv` command using the JSON file store at `path`.
#[allow(dead_code)]
pub fn nsenv_cmd_with_file(path: &Path) -> Command {
    let mut cmd = nsenv_cmd();
    cmd.env("NSENV_STORE_FILE", path);
    cmd
}
