//! `nsenv` against a mock KV store service.

mod common;

use common::nsenv_cmd;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DATA_PATH: &str = "/servicesNS/nobody/search/storage/collections/nsenv_settings/data";

#[tokio::test]
async fn test_get_reads_record_from_service() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(DATA_PATH))
        .and(header("Authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"_key": "1", "partition": "tenant-a", "name": "API_URL", "value": "https://kv"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    nsenv_cmd()
        .env("NSENV_STORE_URL", server.uri())
        .env("NSENV_STORE_TOKEN", "test-token")
        .args(["get", "API_URL", "--partition", "tenant-a"])
        .assert()
        .success()
        .stdout("https://kv\n");
}

#[tokio::test]
async fn test_set_inserts_new_record() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(DATA_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(DATA_PATH))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({"_key": "new"})))
        .expect(1)
        .mount(&server)
        .await;

    nsenv_cmd()
        .env("NSENV_STORE_URL", server.uri())
        .env("NSENV_STORE_TOKEN", "test-token")
        .args(["set", "API_URL", "https://kv"])
        .assert()
        .success();
}

#[tokio::test]
async fn test_service_error_returns_exit_code_3() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(DATA_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
            "messages": [{ "type": "ERROR", "text": "KV Store is initializing" }]
        })))
        .mount(&server)
        .await;

    nsenv_cmd()
        .env("NSENV_STORE_URL", server.uri())
        .env("NSENV_STORE_TOKEN", "test-token")
        .args(["get", "API_URL"])
        .assert()
        .code(3)
        .stderr(predicates::str::contains("KV Store is initializing"));
}
