//! KV store collection data endpoints.
//!
//! Records live in one collection under
//! `/servicesNS/{owner}/{app}/storage/collections/{collection}/data`.
//! Each record carries `partition`, `name` and `value` fields.

use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};

use crate::endpoints::encode_path_segment;
use crate::endpoints::send_request;
use crate::error::{Result, StoreError};
use crate::metrics::MetricsCollector;
use crate::models::{InsertedKey, SettingRecord};
use crate::partition::Partition;

/// Owner, app and collection naming the records' collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionPath {
    pub owner: String,
    pub app: String,
    pub collection: String,
}

impl CollectionPath {
    pub fn new(
        owner: impl Into<String>,
        app: impl Into<String>,
        collection: impl Into<String>,
    ) -> Self {
        Self {
            owner: owner.into(),
            app: app.into(),
            collection: collection.into(),
        }
    }

    /// Path of the collection's data endpoint, relative to the base URL.
    pub fn data_path(&self) -> String {
        format!(
            "/servicesNS/{}/{}/storage/collections/{}/data",
            encode_path_segment(&self.owner),
            encode_path_segment(&self.app),
            encode_path_segment(&self.collection)
        )
    }
}

/// Borrowed connection details shared by every data call.
#[derive(Debug, Clone, Copy)]
pub struct DataEndpoint<'a> {
    pub client: &'a Client,
    pub base_url: &'a str,
    pub token: &'a SecretString,
    pub path: &'a CollectionPath,
    pub metrics: Option<&'a MetricsCollector>,
}

impl DataEndpoint<'_> {
    fn url(&self) -> String {
        format!("{}{}", self.base_url, self.path.data_path())
    }

    fn bearer(&self) -> String {
        format!("Bearer {}", self.token.expose_secret())
    }
}

/// Builds the JSON query matching one name in one partition.
pub fn record_query(partition: &Partition, name: &str) -> String {
    serde_json::json!({ "partition": partition.as_str(), "name": name }).to_string()
}

/// Find the first record named `name` in `partition`.
pub async fn find_record(
    endpoint: DataEndpoint<'_>,
    partition: &Partition,
    name: &str,
) -> Result<Option<SettingRecord>> {
    let url = endpoint.url();
    let query = record_query(partition, name);

    let builder = endpoint
        .client
        .get(&url)
        .header("Authorization", endpoint.bearer())
        .query(&[
            ("output_mode", "json"),
            ("limit", "1"),
            ("query", query.as_str()),
        ]);
    let response = send_request(builder, &url, "find", "GET", endpoint.metrics).await?;

    let records: Vec<SettingRecord> = response.json().await.map_err(|e| {
        StoreError::InvalidResponse(format!("Failed to parse KV store records: {}", e))
    })?;

    Ok(records.into_iter().next())
}

/// Insert a new record and return the key the service assigned.
pub async fn insert_record(endpoint: DataEndpoint<'_>, record: &SettingRecord) -> Result<String> {
    let url = endpoint.url();

    let builder = endpoint
        .client
        .post(&url)
        .header("Authorization", endpoint.bearer())
        .query(&[("output_mode", "json")])
        .json(record);
    let response = send_request(builder, &url, "insert", "POST", endpoint.metrics).await?;

    let inserted: InsertedKey = response.json().await.map_err(|e| {
        StoreError::InvalidResponse(format!("Failed to parse KV store insert response: {}", e))
    })?;

    Ok(inserted.key)
}

/// Replace the record stored under `key`.
pub async fn update_record(
    endpoint: DataEndpoint<'_>,
    key: &str,
    record: &SettingRecord,
) -> Result<()> {
    let url = format!("{}/{}", endpoint.url(), encode_path_segment(key));

    let builder = endpoint
        .client
        .post(&url)
        .header("Authorization", endpoint.bearer())
        .query(&[("output_mode", "json")])
        .json(record);
    send_request(builder, &url, "update", "POST", endpoint.metrics).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_path_encodes_segments() {
        let path = CollectionPath::new("nobody", "search", "team settings");
        assert_eq!(
            path.data_path(),
            "/servicesNS/nobody/search/storage/collections/team%20settings/data"
        );
    }

    #[test]
    fn test_record_query_shape() {
        let query = record_query(&Partition::from("tenant-a"), "API_URL");
        let value: serde_json::Value = serde_json::from_str(&query).unwrap();
        assert_eq!(value["partition"], "tenant-a");
        assert_eq!(value["name"], "API_URL");
    }

    #[test]
    fn test_record_query_default_partition_is_empty_string() {
        let query = record_query(&Partition::default(), "A");
        let value: serde_json::Value = serde_json::from_str(&query).unwrap();
        assert_eq!(value, serde_json::json!({"partition": "", "name": "A"}));
    }
}
