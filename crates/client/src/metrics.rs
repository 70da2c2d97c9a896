//! Metrics collection for record store requests.
//!
//! This module records, for the KV store backend:
//! - Request latency histograms
//! - Request counters
//! - Error counters with a coarse error category
//!
//! # What this module does NOT handle:
//! - Metrics exposition/export (install a `metrics` recorder for that)
//!
//! # Invariants
//! - All metrics use consistent label names: `operation`, `method`, `status`, `error_category`
//! - Metric recording is infallible
//! - Zero-cost when no metrics recorder is installed

use crate::error::StoreError;
use std::time::Duration;

/// Metric name for request duration histogram.
pub const METRIC_REQUEST_DURATION: &str = "nsenv_store_request_duration_seconds";

/// Metric name for total request counter.
pub const METRIC_REQUESTS_TOTAL: &str = "nsenv_store_requests_total";

/// Metric name for error counter.
pub const METRIC_ERRORS_TOTAL: &str = "nsenv_store_errors_total";

/// Error categories for metrics labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Connection refused, DNS, reset.
    Transport,
    /// HTTP 4xx responses.
    Http4xx,
    /// HTTP 5xx responses.
    Http5xx,
    /// Request timeout.
    Timeout,
    /// Unparseable response bodies.
    Response,
    /// Local file problems.
    Storage,
    /// Anything else.
    Unknown,
}

impl ErrorCategory {
    /// Returns the string label for this error category.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Transport => "transport",
            ErrorCategory::Http4xx => "http_4xx",
            ErrorCategory::Http5xx => "http_5xx",
            ErrorCategory::Timeout => "timeout",
            ErrorCategory::Response => "response",
            ErrorCategory::Storage => "storage",
            ErrorCategory::Unknown => "unknown",
        }
    }
}

impl From<&StoreError> for ErrorCategory {
    fn from(error: &StoreError) -> Self {
        match error {
            StoreError::ConnectionRefused(_) => ErrorCategory::Transport,
            StoreError::Timeout(_) => ErrorCategory::Timeout,
            StoreError::ApiError { status, .. } if (400..500).contains(status) => {
                ErrorCategory::Http4xx
            }
            StoreError::ApiError { status, .. } if (500..600).contains(status) => {
                ErrorCategory::Http5xx
            }
            StoreError::InvalidResponse(_) => ErrorCategory::Response,
            StoreError::Io { .. } | StoreError::Corrupt { .. } => ErrorCategory::Storage,
            StoreError::HttpError(e) if e.is_connect() => ErrorCategory::Transport,
            _ => ErrorCategory::Unknown,
        }
    }
}

/// Metrics collector for record store requests.
///
/// Thin wrapper over the `metrics` macros keeping label names consistent.
#[derive(Debug, Clone)]
pub struct MetricsCollector {
    enabled: bool,
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsCollector {
    /// Create an enabled collector.
    pub fn new() -> Self {
        Self { enabled: true }
    }

    /// Create a collector that records nothing.
    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    /// Check if metrics collection is enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Record the duration of a request.
    ///
    /// `status` is None if the request failed before a response arrived.
    pub fn record_request_duration(
        &self,
        operation: &'static str,
        method: &'static str,
        duration: Duration,
        status: Option<u16>,
    ) {
        if !self.enabled {
            return;
        }

        let status_label = status.map_or("error".to_string(), |s| s.to_string());

        metrics::histogram!(METRIC_REQUEST_DURATION,
            "operation" => operation,
            "method" => method,
            "status" => status_label,
        )
        .record(duration.as_secs_f64());
    }

    /// Record a request attempt.
    pub fn record_request(&self, operation: &'static str, method: &'static str) {
        if !self.enabled {
            return;
        }

        metrics::counter!(METRIC_REQUESTS_TOTAL,
            "operation" => operation,
            "method" => method,
        )
        .increment(1);
    }

    /// Record an error, categorized from the store error.
    pub fn record_error(&self, operation: &'static str, method: &'static str, error: &StoreError) {
        if !self.enabled {
            return;
        }

        metrics::counter!(METRIC_ERRORS_TOTAL,
            "operation" => operation,
            "method" => method,
            "error_category" => ErrorCategory::from(error).as_str(),
        )
        .increment(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categorization() {
        let refused = StoreError::ConnectionRefused("localhost:8089".to_string());
        assert_eq!(ErrorCategory::from(&refused), ErrorCategory::Transport);

        let timeout = StoreError::Timeout("localhost:8089".to_string());
        assert_eq!(ErrorCategory::from(&timeout), ErrorCategory::Timeout);

        let api_404 = StoreError::ApiError {
            status: 404,
            url: "test".to_string(),
            message: "collection not found".to_string(),
            request_id: None,
        };
        assert_eq!(ErrorCategory::from(&api_404), ErrorCategory::Http4xx);

        let api_503 = StoreError::ApiError {
            status: 503,
            url: "test".to_string(),
            message: "unavailable".to_string(),
            request_id: None,
        };
        assert_eq!(ErrorCategory::from(&api_503), ErrorCategory::Http5xx);

        let corrupt = StoreError::Corrupt {
            path: "/tmp/x.json".into(),
            message: "bad".to_string(),
        };
        assert_eq!(ErrorCategory::from(&corrupt), ErrorCategory::Storage);
        assert_eq!(ErrorCategory::from(&corrupt).as_str(), "storage");
    }

    #[test]
    fn test_metrics_collector_enabled() {
        assert!(MetricsCollector::new().is_enabled());
        assert!(!MetricsCollector::disabled().is_enabled());
    }

    #[test]
    fn test_recording_without_recorder_is_noop() {
        let collector = MetricsCollector::new();
        collector.record_request("find", "GET");
        collector.record_request_duration("find", "GET", Duration::from_millis(5), Some(200));
        collector.record_error("find", "GET", &StoreError::Timeout("x".to_string()));
    }
}
