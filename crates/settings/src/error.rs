//! Error types for settings access.

use nsenv_client::StoreError;
use thiserror::Error;

use crate::constants::NOT_SET_VALUE;
use crate::value::ResultKind;

/// Result type alias for settings operations.
pub type Result<T> = std::result::Result<T, SettingsError>;

/// Errors returned by [`crate::Settings`].
#[derive(Error, Debug)]
pub enum SettingsError {
    /// The requested result type is not one of `string`, `integer`, `float`.
    #[error("'{0}' is not a supported result type (expected string, integer or float)")]
    InvalidConversionType(String),

    /// Neither the environment nor the store holds a value for the name.
    #[error(
        "No value has been set for '{name}'. A placeholder record with value '{}' \
         now exists for it{}; set a real value with `nsenv set {name} <VALUE>` or by \
         editing that record in the store.",
        NOT_SET_VALUE,
        partition_hint(.partition)
    )]
    ValueNotSet { name: String, partition: String },

    /// The stored value cannot be parsed as the requested kind.
    #[error(transparent)]
    Conversion(#[from] ConversionError),

    /// The record store could not be reached or used.
    #[error("Record store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),
}

fn partition_hint(partition: &str) -> String {
    if partition.is_empty() {
        String::new()
    } else {
        format!(" in partition '{partition}'")
    }
}

impl SettingsError {
    /// Whether this error means the name simply has no value yet.
    pub fn is_not_set(&self) -> bool {
        matches!(self, Self::ValueNotSet { .. })
    }
}

/// A stored value that does not parse as the requested kind.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Value '{value}' for '{name}' cannot be converted to {kind}")]
pub struct ConversionError {
    pub name: String,
    pub value: String,
    pub kind: ResultKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_not_set_message_names_key_and_sentinel() {
        let err = SettingsError::ValueNotSet {
            name: "API_URL".to_string(),
            partition: String::new(),
        };
        let message = err.to_string();
        assert!(message.contains("'API_URL'"));
        assert!(message.contains(NOT_SET_VALUE));
        assert!(message.contains("nsenv set API_URL"));
        assert!(!message.contains("partition"));
        assert!(err.is_not_set());
    }

    #[test]
    fn test_value_not_set_message_mentions_partition() {
        let err = SettingsError::ValueNotSet {
            name: "API_URL".to_string(),
            partition: "tenant-a".to_string(),
        };
        assert!(err.to_string().contains("in partition 'tenant-a'"));
    }

    #[test]
    fn test_store_error_is_source() {
        use std::error::Error as _;

        let err = SettingsError::from(StoreError::Timeout("http://kv".to_string()));
        assert!(matches!(err, SettingsError::StoreUnavailable(_)));
        assert!(err.source().is_some());
        assert!(!err.is_not_set());
    }

    #[test]
    fn test_conversion_error_display() {
        let err = ConversionError {
            name: "PORT".to_string(),
            value: "abc".to_string(),
            kind: ResultKind::Integer,
        };
        assert_eq!(
            err.to_string(),
            "Value 'abc' for 'PORT' cannot be converted to integer"
        );
    }
}
