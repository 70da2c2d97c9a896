//! Common test utilities for integration tests.
//!
//! # Invariants
//! - Fixtures are loaded from the `fixtures/` directory relative to the crate root
//! - All fixture files must be valid JSON
//!
//! # What this does NOT handle
//! - Mock server setup (use wiremock directly in tests)

use std::path::PathBuf;

#[allow(unused_imports)]
pub use nsenv_client::{KvStoreClient, Partition, RecordStore, run_in_partition};
#[allow(unused_imports)]
pub use secrecy::SecretString;
#[allow(unused_imports)]
pub use wiremock::{Mock, MockServer, ResponseTemplate};

/// Collection data path used by clients built with [`kvstore_client`].
#[allow(dead_code)]
pub const DATA_PATH: &str = "/servicesNS/nobody/search/storage/collections/nsenv_settings/data";

/// Load a JSON fixture file from the fixtures directory.
pub fn load_fixture(fixture_path: &str) -> serde_json::Value {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join(fixture_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Build a client pointed at the mock server with default namespace and collection.
#[allow(dead_code)]
pub fn kvstore_client(server: &MockServer) -> KvStoreClient {
    KvStoreClient::builder()
        .base_url(server.uri())
        .token(SecretString::new("test-token".to_string().into()))
        .build()
        .expect("client builds")
}
