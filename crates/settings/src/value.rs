//! Result kinds and typed setting values.
//!
//! Responsibilities:
//! - Name the closed set of kinds a setting can be read as.
//! - Convert a resolved string into the requested kind.
//!
//! Invariants:
//! - Numeric conversion ignores surrounding whitespace; nothing else is
//!   normalized.
//! - String conversion never fails.

use std::fmt;
use std::str::FromStr;

use crate::error::{ConversionError, SettingsError};

/// The type a setting is converted to before being returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResultKind {
    #[default]
    String,
    Integer,
    Float,
}

impl ResultKind {
    /// Returns the canonical lowercase name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ResultKind::String => "string",
            ResultKind::Integer => "integer",
            ResultKind::Float => "float",
        }
    }

    /// Converts `raw`, the resolved value of `name`, into this kind.
    pub fn convert(self, name: &str, raw: &str) -> Result<SettingValue, ConversionError> {
        let failed = || ConversionError {
            name: name.to_string(),
            value: raw.to_string(),
            kind: self,
        };
        match self {
            ResultKind::String => Ok(SettingValue::String(raw.to_string())),
            ResultKind::Integer => raw
                .trim()
                .parse::<i64>()
                .map(SettingValue::Integer)
                .map_err(|_| failed()),
            ResultKind::Float => raw
                .trim()
                .parse::<f64>()
                .map(SettingValue::Float)
                .map_err(|_| failed()),
        }
    }
}

impl fmt::Display for ResultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResultKind {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "string" | "str" => Ok(ResultKind::String),
            "integer" | "int" | "i64" => Ok(ResultKind::Integer),
            "float" | "f64" => Ok(ResultKind::Float),
            _ => Err(SettingsError::InvalidConversionType(s.to_string())),
        }
    }
}

/// A setting converted to its requested kind.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingValue {
    String(String),
    Integer(i64),
    Float(f64),
}

impl SettingValue {
    /// The kind this value was converted to.
    pub fn kind(&self) -> ResultKind {
        match self {
            SettingValue::String(_) => ResultKind::String,
            SettingValue::Integer(_) => ResultKind::Integer,
            SettingValue::Float(_) => ResultKind::Float,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            SettingValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            SettingValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            SettingValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Unwraps a string value, or renders a numeric one.
    pub fn into_string(self) -> String {
        match self {
            SettingValue::String(s) => s,
            other => other.to_string(),
        }
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::String(s) => f.write_str(s),
            SettingValue::Integer(i) => write!(f, "{i}"),
            SettingValue::Float(x) => write!(f, "{x}"),
        }
    }
}

impl From<String> for SettingValue {
    fn from(value: String) -> Self {
        SettingValue::String(value)
    }
}

impl From<i64> for SettingValue {
    fn from(value: i64) -> Self {
        SettingValue::Integer(value)
    }
}

impl From<f64> for SettingValue {
    fn from(value: f64) -> Self {
        SettingValue::Float(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_kind_from_str() {
        assert_eq!("string".parse::<ResultKind>().unwrap(), ResultKind::String);
        assert_eq!("INT".parse::<ResultKind>().unwrap(), ResultKind::Integer);
        assert_eq!(" float ".parse::<ResultKind>().unwrap(), ResultKind::Float);
    }

    #[test]
    fn test_result_kind_rejects_unknown_names() {
        for name in ["bool", "list", "", "decimal"] {
            let err = name.parse::<ResultKind>().unwrap_err();
            assert!(
                matches!(&err, SettingsError::InvalidConversionType(n) if n == name),
                "unexpected error for {name:?}: {err:?}"
            );
        }
    }

    #[test]
    fn test_convert_string_passthrough_keeps_whitespace() {
        let value = ResultKind::String.convert("A", "  padded ").unwrap();
        assert_eq!(value.as_str(), Some("  padded "));
    }

    #[test]
    fn test_convert_integer_trims() {
        assert_eq!(
            ResultKind::Integer.convert("PORT", " 8080\n").unwrap(),
            SettingValue::Integer(8080)
        );
        assert_eq!(
            ResultKind::Integer.convert("N", "-3").unwrap().as_i64(),
            Some(-3)
        );
    }

    #[test]
    fn test_convert_integer_rejects_fraction_and_text() {
        for raw in ["1.5", "abc", "", "12abc"] {
            let err = ResultKind::Integer.convert("N", raw).unwrap_err();
            assert_eq!(err.kind, ResultKind::Integer);
            assert_eq!(err.value, raw);
        }
    }

    #[test]
    fn test_convert_float() {
        assert_eq!(
            ResultKind::Float.convert("RATIO", "0.25").unwrap(),
            SettingValue::Float(0.25)
        );
        assert_eq!(ResultKind::Float.convert("N", "3").unwrap().as_f64(), Some(3.0));
        assert!(ResultKind::Float.convert("N", "abc").is_err());
    }

    #[test]
    fn test_setting_value_display() {
        assert_eq!(SettingValue::String("x".into()).to_string(), "x");
        assert_eq!(SettingValue::Integer(42).to_string(), "42");
        assert_eq!(SettingValue::Float(1.5).to_string(), "1.5");
        assert_eq!(SettingValue::Integer(7).into_string(), "7");
    }
}
