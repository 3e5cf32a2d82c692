//! Error types for the API client.

use std::time::Duration;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors produced by the transport, the executor and the decoding layers.
///
/// Transport-level failures (`Timeout`, `NetworkFailure`) are the only
/// variants the executor retries; an HTTP error status is surfaced on the
/// attempt that produced it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The attempt did not complete within the configured timeout.
    #[error("request to {url} timed out after {}ms", .timeout.as_millis())]
    Timeout { url: String, timeout: Duration },

    /// Connection-level failure (refused, reset, DNS, body interrupted).
    #[error("network failure for {url}: {message}")]
    NetworkFailure { url: String, message: String },

    /// The server answered with a status outside [200, 400).
    #[error("{message}")]
    HttpStatus {
        message: String,
        status: u16,
        url: String,
    },

    /// A response body could not be decoded, or a payload could not be encoded.
    #[error("parse error: {0}")]
    ParseError(String),

    /// Invalid URL, header or client setup.
    #[error("configuration error: {0}")]
    ConfigurationError(String),

    /// Local I/O failure (e.g. reading a file for upload).
    #[error("io error: {0}")]
    IoError(String),
}

impl ApiError {
    /// Build an HTTP status error.
    pub fn http_status(message: impl Into<String>, status: u16, url: impl Into<String>) -> Self {
        Self::HttpStatus {
            message: message.into(),
            status,
            url: url.into(),
        }
    }

    /// Build a network failure.
    pub fn network(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::NetworkFailure {
            url: url.into(),
            message: message.into(),
        }
    }

    /// HTTP status code, when the error came from a response.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// URL of the request that failed, when known.
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Timeout { url, .. }
            | Self::NetworkFailure { url, .. }
            | Self::HttpStatus { url, .. } => Some(url),
            _ => None,
        }
    }

    /// Transport-level failure (timeout or connection problem).
    pub fn is_network_error(&self) -> bool {
        matches!(self, Self::Timeout { .. } | Self::NetworkFailure { .. })
    }

    /// Whether the default retry policy retries this error.
    pub fn is_retryable(&self) -> bool {
        self.is_network_error()
    }

    /// The server rejected the credentials (HTTP 401).
    pub fn is_unauthorized(&self) -> bool {
        self.status_code() == Some(401)
    }
}
