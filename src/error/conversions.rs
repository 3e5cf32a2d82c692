//! Type Conversions for ApiError
//!
//! `reqwest::Error` carries no URL context the caller controls, so it is
//! mapped through [`from_transport_error`] instead of a `From` impl.

use super::types::ApiError;

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::ParseError(err.to_string())
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        Self::IoError(err.to_string())
    }
}

impl From<reqwest::header::InvalidHeaderName> for ApiError {
    fn from(err: reqwest::header::InvalidHeaderName) -> Self {
        Self::ConfigurationError(format!("Invalid header name: {err}"))
    }
}

impl From<reqwest::header::InvalidHeaderValue> for ApiError {
    fn from(err: reqwest::header::InvalidHeaderValue) -> Self {
        Self::ConfigurationError(format!("Invalid header value: {err}"))
    }
}

/// Classify a `reqwest` failure for the request sent to `url`.
pub fn from_transport_error(err: reqwest::Error, url: &str) -> ApiError {
    if err.is_builder() {
        return ApiError::ConfigurationError(err.to_string());
    }
    if err.is_decode() {
        return ApiError::ParseError(err.to_string());
    }
    // Client-level timeouts are reported with a zero duration; the executor's own
    // timer produces the variant with the configured value.
    if err.is_timeout() {
        return ApiError::Timeout {
            url: url.to_string(),
            timeout: std::time::Duration::ZERO,
        };
    }
    ApiError::network(url, err.to_string())
}
