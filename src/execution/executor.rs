//! Request executor
//!
//! Runs one logical request as up to `max_retries + 1` attempts. Each attempt
//! notifies request interceptors, sends through the transport under a
//! per-attempt timeout, notifies response interceptors, and turns a status
//! outside [200, 400) into [`ApiError::HttpStatus`]. Only transport-level
//! failures are retried, with linear backoff.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use serde_json::Value;

use crate::config::{RequestConfig, merge_headers};
use crate::error::ApiError;
use crate::execution::http::interceptor::{InterceptorRegistry, RequestContext};
use crate::execution::http::transport::{
    ApiResponse, HttpTransport, MultipartBody, RequestBody, TransportRequest,
};
use crate::retry::{RetryExecutor, RetryPolicy};

/// Per-call options. Unset retry fields fall back to the executor's config.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: HeaderMap,
    pub body: RequestBody,
    pub timeout: Option<Duration>,
    pub max_retries: Option<u32>,
    pub retry_delay: Option<Duration>,
}

impl RequestOptions {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            ..Default::default()
        }
    }

    pub fn get() -> Self {
        Self::new(Method::GET)
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Add a header; merged over the configured defaults at execution time.
    pub fn header(mut self, name: &str, value: &str) -> Result<Self, ApiError> {
        self.headers.insert(
            HeaderName::from_bytes(name.as_bytes())?,
            HeaderValue::from_str(value)?,
        );
        Ok(self)
    }

    pub fn headers(mut self, headers: &HeaderMap) -> Self {
        merge_headers(&mut self.headers, headers);
        self
    }

    pub fn body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }

    /// Serialize `payload` as the JSON body and declare the JSON content type.
    pub fn json_body<T: Serialize + ?Sized>(mut self, payload: &T) -> Result<Self, ApiError> {
        self.body = RequestBody::Text(serde_json::to_string(payload)?);
        self.headers
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(self)
    }

    pub fn multipart(mut self, body: MultipartBody) -> Self {
        self.body = RequestBody::Multipart(body);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = Some(max_retries);
        self
    }

    pub fn retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = Some(retry_delay);
        self
    }
}

/// A request with defaults resolved.
#[derive(Debug, Clone)]
struct PreparedRequest {
    method: Method,
    url: String,
    headers: HeaderMap,
    body: RequestBody,
    timeout: Duration,
    policy: RetryPolicy,
}

/// Executes requests against the configured transport.
///
/// Clones share the transport and interceptor registry; the configuration is
/// an immutable snapshot replaced through [`RequestExecutor::with_config`].
#[derive(Clone)]
pub struct RequestExecutor {
    transport: Arc<dyn HttpTransport>,
    config: Arc<RequestConfig>,
    interceptors: InterceptorRegistry,
    origin: String,
}

impl RequestExecutor {
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        config: RequestConfig,
        interceptors: InterceptorRegistry,
        origin: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            config: Arc::new(config),
            interceptors,
            origin: origin.into(),
        }
    }

    pub fn config(&self) -> &RequestConfig {
        &self.config
    }

    pub fn interceptors(&self) -> &InterceptorRegistry {
        &self.interceptors
    }

    /// Executor sharing everything but the configuration.
    pub fn with_config(mut self, config: RequestConfig) -> Self {
        self.config = Arc::new(config);
        self
    }

    /// Run `options` against `url`, retrying transport failures.
    pub async fn execute(&self, url: &str, options: RequestOptions) -> Result<ApiResponse, ApiError> {
        let prepared = self.prepare(url, options);
        tracing::debug!(
            target: "vidcast_admin::http",
            method = %prepared.method,
            url = %prepared.url,
            timeout_ms = prepared.timeout.as_millis() as u64,
            max_retries = prepared.policy.max_retries,
            "executing request"
        );

        let retry = RetryExecutor::new(prepared.policy.clone());
        let prepared = &prepared;
        let result = retry
            .execute(move |attempt| self.attempt(prepared, attempt))
            .await;

        if let Err(error) = &result {
            tracing::warn!(
                target: "vidcast_admin::http",
                method = %prepared.method,
                url = %prepared.url,
                err = %error,
                "request failed"
            );
        }
        result
    }

    fn prepare(&self, url: &str, options: RequestOptions) -> PreparedRequest {
        let config = &self.config;

        let mut headers = config.headers.clone();
        merge_headers(&mut headers, &options.headers);
        if options.body.is_multipart() {
            // Left to the transport so the multipart boundary is included.
            headers.remove(CONTENT_TYPE);
        }
        config.credentials.apply(&mut headers, url, &self.origin);

        let policy = RetryPolicy::new(
            options.max_retries.unwrap_or(config.max_retries),
            options.retry_delay.unwrap_or(config.retry_delay),
        );

        PreparedRequest {
            method: options.method,
            url: url.to_string(),
            headers,
            body: options.body,
            timeout: options.timeout.unwrap_or(config.timeout),
            policy,
        }
    }

    async fn attempt(&self, prepared: &PreparedRequest, attempt: u32) -> Result<ApiResponse, ApiError> {
        self.interceptors.notify_request(&RequestContext {
            method: prepared.method.clone(),
            url: prepared.url.clone(),
            attempt,
            headers: prepared.headers.clone(),
        });

        let request = TransportRequest {
            method: prepared.method.clone(),
            url: prepared.url.clone(),
            headers: prepared.headers.clone(),
            body: prepared.body.clone(),
        };

        let response = match tokio::time::timeout(prepared.timeout, self.transport.send(request)).await {
            Ok(result) => result?,
            Err(_) => {
                return Err(ApiError::Timeout {
                    url: prepared.url.clone(),
                    timeout: prepared.timeout,
                });
            }
        };

        tracing::debug!(
            target: "vidcast_admin::http",
            attempt = attempt + 1,
            status = response.status(),
            url = %prepared.url,
            "response received"
        );
        self.interceptors.notify_response(&response, &prepared.url);

        if !response.is_success() {
            return Err(error_from_response(&response));
        }
        Ok(response)
    }
}

/// Build the API error for a failed response.
///
/// Message priority: JSON `message`, JSON `detail`, raw body text, and finally
/// the status line `HTTP <status>: <status text>`. A JSON body without either
/// field yields the status line, not the raw JSON; a bare `null` body is
/// reported as its text.
pub fn error_from_response(response: &ApiResponse) -> ApiError {
    let status_line = format!("HTTP {}: {}", response.status(), response.status_text());
    let body = response.text();

    let message = match serde_json::from_str::<Value>(&body) {
        Ok(Value::Object(map)) => map
            .get("message")
            .and_then(truthy_text)
            .or_else(|| map.get("detail").and_then(truthy_text))
            .unwrap_or(status_line),
        // A `null` document has no fields to read; report the body as sent.
        Ok(Value::Null) => body,
        Ok(_) => status_line,
        Err(_) if body.is_empty() => status_line,
        Err(_) => body,
    };

    ApiError::http_status(message, response.status(), response.url())
}

fn truthy_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}
