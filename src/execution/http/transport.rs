//! HTTP transport abstraction.
//!
//! The executor talks to the network only through [`HttpTransport`]. The
//! default implementation is backed by `reqwest`; tests inject scripted
//! transports to observe attempts and simulate failures.

use std::path::Path;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{CONTENT_TYPE, HeaderMap};
use reqwest::multipart::{Form, Part};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;

use crate::defaults;
use crate::error::{ApiError, from_transport_error};

/// A file attached to a multipart upload.
#[derive(Debug, Clone)]
pub struct FilePart {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl FilePart {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            bytes: bytes.into(),
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Read a file from disk, guessing its MIME type from the extension.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, ApiError> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| ApiError::IoError(format!("'{}' is not a file", path.display())))?;
        let content_type = mime_guess::from_path(path).first().map(|m| m.to_string());
        Ok(Self {
            file_name,
            content_type,
            bytes: Bytes::from(bytes),
        })
    }
}

/// Multipart body: one `file` part followed by plain text fields.
#[derive(Debug, Clone)]
pub struct MultipartBody {
    pub file: FilePart,
    pub fields: Vec<(String, String)>,
}

impl MultipartBody {
    pub fn new(file: FilePart) -> Self {
        Self {
            file,
            fields: Vec::new(),
        }
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    fn to_form(&self) -> Result<Form, reqwest::Error> {
        let mut part = Part::bytes(self.file.bytes.to_vec()).file_name(self.file.file_name.clone());
        if let Some(content_type) = &self.file.content_type {
            part = part.mime_str(content_type)?;
        }
        let mut form = Form::new().part("file", part);
        for (name, value) in &self.fields {
            form = form.text(name.clone(), value.clone());
        }
        Ok(form)
    }
}

/// Request body. Kept clonable so every retry sends the same payload.
#[derive(Debug, Clone, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    Text(String),
    Multipart(MultipartBody),
}

impl RequestBody {
    pub fn is_multipart(&self) -> bool {
        matches!(self, Self::Multipart(_))
    }
}

/// Transport-level request data.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub body: RequestBody,
}

/// A completed HTTP response with its body already read.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    url: String,
    status: u16,
    headers: HeaderMap,
    body: Bytes,
}

impl ApiResponse {
    pub fn new(url: impl Into<String>, status: u16, headers: HeaderMap, body: impl Into<Bytes>) -> Self {
        Self {
            url: url.into(),
            status,
            headers,
            body: body.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    /// Canonical reason phrase for the status, or an empty string.
    pub fn status_text(&self) -> &'static str {
        StatusCode::from_u16(self.status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("")
    }

    /// Status in [200, 400).
    pub fn is_success(&self) -> bool {
        (200..400).contains(&self.status)
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// The response declares a JSON content type.
    pub fn is_json(&self) -> bool {
        self.headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.contains("application/json"))
    }

    pub fn bytes(&self) -> &Bytes {
        &self.body
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        Ok(serde_json::from_slice(&self.body)?)
    }
}

/// Custom HTTP transport.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send one request and read the full response. Must not retry.
    async fn send(&self, request: TransportRequest) -> Result<ApiResponse, ApiError>;
}

/// `reqwest`-backed transport.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Client with the crate's connection defaults. Per-attempt timeouts are
    /// enforced by the executor, not by the client.
    pub fn with_defaults() -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .connect_timeout(defaults::http::CONNECT_TIMEOUT)
            .pool_max_idle_per_host(defaults::http::MAX_IDLE_PER_HOST)
            .user_agent(defaults::http::USER_AGENT)
            .build()
            .map_err(|e| ApiError::ConfigurationError(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self::new(client))
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: TransportRequest) -> Result<ApiResponse, ApiError> {
        let TransportRequest {
            method,
            url,
            headers,
            body,
        } = request;

        let mut builder = self.client.request(method, &url).headers(headers);
        builder = match body {
            RequestBody::Empty => builder,
            RequestBody::Text(text) => builder.body(text),
            RequestBody::Multipart(multipart) => builder.multipart(
                multipart
                    .to_form()
                    .map_err(|e| from_transport_error(e, &url))?,
            ),
        };

        let response = builder
            .send()
            .await
            .map_err(|e| from_transport_error(e, &url))?;
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(|e| ApiError::network(&url, format!("failed to read body: {e}")))?;

        Ok(ApiResponse::new(url, status, headers, body))
    }
}
