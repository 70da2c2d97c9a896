//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish error types.
//! - Map `SettingsError`, `StoreError` and `ConfigError` to exit codes.
//!
//! Does NOT handle:
//! - Error message formatting (handled by anyhow Display).
//!
//! Invariants:
//! - Exit codes 1-9 are reserved for specific error categories.

use nsenv::SettingsError;
use nsenv_client::StoreError;

/// Structured exit codes for nsenv.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success - command completed successfully.
    Success = 0,

    /// General error - configuration problems or anything unclassified.
    GeneralError = 1,

    /// The record store could not be reached or used.
    StoreUnavailable = 3,

    /// The setting has no value in the environment or the store.
    ///
    /// Scripts should set the value (`nsenv set`) and try again.
    ValueNotSet = 4,

    /// The requested type is unknown or the value does not convert to it.
    InvalidValue = 5,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

impl From<&SettingsError> for ExitCode {
    fn from(err: &SettingsError) -> Self {
        match err {
            SettingsError::ValueNotSet { .. } => ExitCode::ValueNotSet,
            SettingsError::InvalidConversionType(_) | SettingsError::Conversion(_) => {
                ExitCode::InvalidValue
            }
            SettingsError::StoreUnavailable(_) => ExitCode::StoreUnavailable,
        }
    }
}

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    /// Extract the appropriate exit code from this error.
    ///
    /// Returns ExitCode::GeneralError if no known error is in the chain.
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        for cause in self.chain() {
            if let Some(settings_err) = cause.downcast_ref::<SettingsError>() {
                return ExitCode::from(settings_err);
            }
            if cause.downcast_ref::<StoreError>().is_some() {
                return ExitCode::StoreUnavailable;
            }
        }

        ExitCode::GeneralError
    }
}
