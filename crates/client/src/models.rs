//! Record models shared by all store backends.
//!
//! [`Setting`] and [`Lookup`] are what the adapter hands back to callers;
//! [`SettingRecord`] and [`ServiceMessages`] are the KV store wire shapes.

use serde::{Deserialize, Serialize};

use crate::partition::Partition;

/// A single stored setting. Values are always stored as strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Setting {
    pub name: String,
    pub value: String,
}

impl Setting {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Outcome of a find-by-name in the active partition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// A record with that name exists.
    Present(Setting),
    /// No record with that name exists.
    Absent,
}

impl Lookup {
    /// Whether a record was found.
    pub fn is_present(&self) -> bool {
        matches!(self, Lookup::Present(_))
    }

    /// Returns the stored value, if a record was found.
    pub fn value(&self) -> Option<&str> {
        match self {
            Lookup::Present(setting) => Some(&setting.value),
            Lookup::Absent => None,
        }
    }

    /// Converts into the found setting, if any.
    pub fn into_setting(self) -> Option<Setting> {
        match self {
            Lookup::Present(setting) => Some(setting),
            Lookup::Absent => None,
        }
    }
}

impl From<Option<Setting>> for Lookup {
    fn from(setting: Option<Setting>) -> Self {
        setting.map_or(Lookup::Absent, Lookup::Present)
    }
}

/// KV store record (document) holding one setting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingRecord {
    /// Record ID (`_key` field), assigned by the service on insert.
    #[serde(rename = "_key", default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Partition the record belongs to. Always written and always part of
    /// the lookup query, so the default partition is stored as `""`.
    pub partition: Partition,
    pub name: String,
    #[serde(default)]
    pub value: String,
}

impl SettingRecord {
    /// Creates a record without a key, ready for insertion.
    pub fn new(partition: Partition, name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: None,
            partition,
            name: name.into(),
            value: value.into(),
        }
    }
}

impl From<SettingRecord> for Setting {
    fn from(record: SettingRecord) -> Self {
        Setting {
            name: record.name,
            value: record.value,
        }
    }
}

/// Response to a record insert: the assigned key.
#[derive(Debug, Clone, Deserialize)]
pub struct InsertedKey {
    #[serde(rename = "_key")]
    pub key: String,
}

/// A message attached to a KV store error response.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceMessage {
    #[serde(rename = "type")]
    pub message_type: String,
    pub text: String,
}

/// Body of a KV store error response.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceMessages {
    pub messages: Vec<ServiceMessage>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_deserializes_with_service_metadata() {
        let json = r#"{
            "_key": "5f1a",
            "_user": "nobody",
            "partition": "tenant-a",
            "name": "API_URL",
            "value": "https://api.example.com"
        }"#;
        let record: SettingRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.key.as_deref(), Some("5f1a"));
        assert_eq!(record.partition.as_str(), "tenant-a");
        assert_eq!(record.name, "API_URL");
    }

    #[test]
    fn test_record_requires_partition_field() {
        let missing = serde_json::from_str::<SettingRecord>(r#"{"_key": "1", "name": "A", "value": "b"}"#);
        assert!(missing.is_err());

        let record: SettingRecord =
            serde_json::from_str(r#"{"_key": "1", "partition": "", "name": "A", "value": "b"}"#)
                .unwrap();
        assert!(record.partition.is_default());
    }

    #[test]
    fn test_new_record_serializes_without_key() {
        let record = SettingRecord::new(Partition::from("p"), "A", "b");
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("_key").is_none());
        assert_eq!(json["partition"], "p");
        assert_eq!(json["value"], "b");
    }

    #[test]
    fn test_lookup_accessors() {
        let present = Lookup::from(Some(Setting::new("A", "b")));
        assert!(present.is_present());
        assert_eq!(present.value(), Some("b"));
        assert_eq!(Lookup::from(None).value(), None);
        assert_eq!(Lookup::Absent.into_setting(), None);
    }
}
