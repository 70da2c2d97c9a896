//! Error types for record store operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for record store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur while talking to a record store.
///
/// None of these are retried; callers see them on the first failure.
#[derive(Error, Debug)]
pub enum StoreError {
    /// HTTP transport error not covered by a more specific variant.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Error response from the KV store service.
    #[error("API error ({status}) at {url}: {message}{}", .request_id.as_ref().map(|id| format!(" [Request ID: {id}]")).unwrap_or_default())]
    ApiError {
        status: u16,
        url: String,
        message: String,
        request_id: Option<String>,
    },

    /// Connection refused or host unreachable.
    #[error("Connection refused to {0}")]
    ConnectionRefused(String),

    /// Request timed out.
    #[error("Request to {0} timed out")]
    Timeout(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Invalid response format from the KV store service.
    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    /// The store file could not be read or written.
    #[error("Store file I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The store file exists but is not a valid store document.
    #[error("Store file at {path} is corrupt: {message}")]
    Corrupt { path: PathBuf, message: String },

    /// The store cannot be used in the current context.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Maps a transport error to the most specific variant available.
    pub fn from_transport(error: reqwest::Error, url: &str) -> Self {
        if error.is_connect() {
            Self::ConnectionRefused(url.to_string())
        } else if error.is_timeout() {
            Self::Timeout(url.to_string())
        } else {
            Self::HttpError(error)
        }
    }

    /// Check if this error indicates an authentication failure.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Self::ApiError { status: 401 | 403, .. })
    }
}
