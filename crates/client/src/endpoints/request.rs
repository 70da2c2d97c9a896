//! Single-attempt HTTP request helper.
//!
//! Sends a request once, records metrics, and turns non-2xx responses into
//! [`StoreError::ApiError`] with the service's messages when it sent any.
//! Nothing here retries: a failed request is reported as-is.

use std::time::Instant;

use reqwest::{RequestBuilder, Response};
use tracing::debug;

use crate::error::{Result, StoreError};
use crate::metrics::MetricsCollector;
use crate::models::ServiceMessages;

/// Sends an HTTP request and checks its status.
///
/// # Arguments
///
/// * `builder` - The prepared request
/// * `url` - Request URL, used in error messages
/// * `operation` - Metric label naming the store operation
/// * `method` - HTTP method label
/// * `metrics` - Optional collector
///
/// # Errors
///
/// Transport failures map through [`StoreError::from_transport`]; non-success
/// statuses return [`StoreError::ApiError`].
pub async fn send_request(
    builder: RequestBuilder,
    url: &str,
    operation: &'static str,
    method: &'static str,
    metrics: Option<&MetricsCollector>,
) -> Result<Response> {
    if let Some(m) = metrics {
        m.record_request(operation, method);
    }
    let start = Instant::now();

    let result = match builder.send().await {
        Ok(response) if response.status().is_success() => Ok(response),
        Ok(response) => Err(api_error(response).await),
        Err(e) => Err(StoreError::from_transport(e, url)),
    };

    let status = match &result {
        Ok(response) => Some(response.status().as_u16()),
        Err(StoreError::ApiError { status, .. }) => Some(*status),
        Err(_) => None,
    };
    debug!(
        operation,
        method,
        ?status,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "KV store request finished"
    );

    if let Some(m) = metrics {
        m.record_request_duration(operation, method, start.elapsed(), status);
        if let Err(e) = &result {
            m.record_error(operation, method, e);
        }
    }

    result
}

async fn api_error(response: Response) -> StoreError {
    let status = response.status().as_u16();
    let url = response.url().to_string();
    let request_id = response
        .headers()
        .get("X-Request-Id")
        .and_then(|h| h.to_str().ok())
        .map(|s| s.to_string());
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Could not read error response body".to_string());

    let message = match serde_json::from_str::<ServiceMessages>(&body) {
        Ok(m) if !m.messages.is_empty() => m
            .messages
            .iter()
            .map(|msg| format!("{}: {}", msg.message_type, msg.text))
            .collect::<Vec<_>>()
            .join("; "),
        _ => body,
    };

    StoreError::ApiError {
        status,
        url,
        message,
        request_id,
    }
}
