//! API client
//!
//! `ApiClient` bundles the detected environment, the endpoint catalog and a
//! [`RequestExecutor`], and offers the convenience wrappers the console uses:
//! `get`, `post`, `put`, `delete` and `upload`. Responses declaring a JSON
//! content type are decoded as JSON; anything else comes back as a string
//! value.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::{CredentialsMode, RequestConfig};
use crate::endpoints::{Endpoints, build_url};
use crate::environment::{Environment, Location, detect_environment};
use crate::error::ApiError;
use crate::execution::executor::{RequestExecutor, RequestOptions};
use crate::execution::http::interceptor::{
    AuthExpiryInterceptor, InterceptorHandle, InterceptorRegistry, LoggingInterceptor,
    RequestInterceptor, ResponseInterceptor,
};
use crate::execution::http::transport::{
    ApiResponse, HttpTransport, MultipartBody, ReqwestTransport,
};

/// Client for the vidcast REST API.
#[derive(Clone)]
pub struct ApiClient {
    environment: Arc<Environment>,
    endpoints: Endpoints,
    executor: RequestExecutor,
    auth: AuthExpiryInterceptor,
}

impl ApiClient {
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub fn executor(&self) -> &RequestExecutor {
        &self.executor
    }

    pub fn config(&self) -> &RequestConfig {
        self.executor.config()
    }

    pub fn is_secure_context(&self) -> bool {
        self.environment.is_secure
    }

    pub fn api_url(&self) -> &str {
        &self.environment.api_url
    }

    pub fn base_url(&self) -> &str {
        &self.environment.base_url
    }

    /// A 401 has been observed by the built-in auth-expiry interceptor.
    pub fn auth_expired(&self) -> bool {
        self.auth.is_expired()
    }

    pub fn reset_auth_expired(&self) {
        self.auth.reset();
    }

    /// `base` with query parameters appended; `None` values are skipped.
    pub fn build_url(&self, base: &str, params: &[(&str, Option<String>)]) -> Result<String, ApiError> {
        build_url(base, params)
    }

    pub fn add_request_interceptor(
        &self,
        interceptor: impl RequestInterceptor + 'static,
    ) -> InterceptorHandle {
        self.executor.interceptors().add_request_interceptor(interceptor)
    }

    pub fn add_response_interceptor(
        &self,
        interceptor: impl ResponseInterceptor + 'static,
    ) -> InterceptorHandle {
        self.executor.interceptors().add_response_interceptor(interceptor)
    }

    /// Client with a new default timeout.
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        self.with_config(self.config().clone().with_timeout(timeout))
    }

    /// Client with a new default retry budget.
    pub fn with_max_retries(&self, max_retries: u32) -> Self {
        self.with_config(self.config().clone().with_max_retries(max_retries))
    }

    /// Client whose default headers have `headers` merged in.
    pub fn with_global_headers(&self, headers: &HashMap<String, String>) -> Result<Self, ApiError> {
        Ok(self.with_config(self.config().clone().with_custom_headers(headers)?))
    }

    /// Client sharing transport and interceptors but using `config` as defaults.
    pub fn with_config(&self, config: RequestConfig) -> Self {
        Self {
            executor: self.executor.clone().with_config(config),
            ..self.clone()
        }
    }

    /// Execute a raw request.
    pub async fn fetch(&self, url: &str, options: RequestOptions) -> Result<ApiResponse, ApiError> {
        self.executor.execute(url, options).await
    }

    pub async fn get(&self, url: &str) -> Result<Value, ApiError> {
        self.get_with(url, RequestOptions::get()).await
    }

    pub async fn get_with(&self, url: &str, options: RequestOptions) -> Result<Value, ApiError> {
        let response = self.fetch(url, options.method(Method::GET)).await?;
        decode_body(&response)
    }

    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        Ok(serde_json::from_value(self.get(url).await?)?)
    }

    pub async fn post<B: Serialize + ?Sized>(&self, url: &str, payload: &B) -> Result<Value, ApiError> {
        self.send_json(Method::POST, url, Some(payload)).await
    }

    pub async fn post_empty(&self, url: &str) -> Result<Value, ApiError> {
        self.send_json::<()>(Method::POST, url, None).await
    }

    pub async fn post_json<B, T>(&self, url: &str, payload: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        Ok(serde_json::from_value(self.post(url, payload).await?)?)
    }

    pub async fn put<B: Serialize + ?Sized>(&self, url: &str, payload: &B) -> Result<Value, ApiError> {
        self.send_json(Method::PUT, url, Some(payload)).await
    }

    pub async fn put_empty(&self, url: &str) -> Result<Value, ApiError> {
        self.send_json::<()>(Method::PUT, url, None).await
    }

    pub async fn put_json<B, T>(&self, url: &str, payload: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        Ok(serde_json::from_value(self.put(url, payload).await?)?)
    }

    /// DELETE; a 204 resolves to `true` without reading the body.
    pub async fn delete(&self, url: &str) -> Result<Value, ApiError> {
        let response = self.fetch(url, RequestOptions::new(Method::DELETE)).await?;
        if response.status() == 204 {
            return Ok(Value::Bool(true));
        }
        decode_body(&response)
    }

    /// Multipart POST of a file plus extra fields.
    pub async fn upload(&self, url: &str, body: MultipartBody) -> Result<Value, ApiError> {
        let options = RequestOptions::new(Method::POST).multipart(body);
        let response = self.fetch(url, options).await?;
        decode_body(&response)
    }

    async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: &str,
        payload: Option<&B>,
    ) -> Result<Value, ApiError> {
        let options = match payload {
            Some(payload) => RequestOptions::new(method).json_body(payload)?,
            None => RequestOptions::new(method),
        };
        let response = self.fetch(url, options).await?;
        decode_body(&response)
    }
}

/// JSON when the response says so, otherwise the body text.
pub fn decode_body(response: &ApiResponse) -> Result<Value, ApiError> {
    if response.is_json() {
        response.json()
    } else {
        Ok(Value::String(response.text()))
    }
}

/// Builder for [`ApiClient`].
#[derive(Default)]
pub struct ApiClientBuilder {
    location: Option<Location>,
    timeout: Option<Duration>,
    max_retries: Option<u32>,
    retry_delay: Option<Duration>,
    headers: HeaderMap,
    credentials: Option<CredentialsMode>,
    http_client: Option<reqwest::Client>,
    transport: Option<Arc<dyn HttpTransport>>,
    request_interceptors: Vec<Arc<dyn RequestInterceptor>>,
    response_interceptors: Vec<Arc<dyn ResponseInterceptor>>,
    default_interceptors: Option<bool>,
}

impl ApiClientBuilder {
    pub fn location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    /// Parse the console location from a URL.
    pub fn base_url(self, url: &str) -> Result<Self, ApiError> {
        Ok(self.location(Location::parse(url)?))
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

    pub fn header(mut self, name: &str, value: &str) -> Result<Self, ApiError> {
        self.headers.insert(
            HeaderName::from_bytes(name.as_bytes())?,
            HeaderValue::from_str(value)?,
        );
        Ok(self)
    }

    pub fn credentials(mut self, credentials: CredentialsMode) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Use an existing `reqwest` client for the default transport.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Replace the transport entirely.
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn request_interceptor(mut self, interceptor: impl RequestInterceptor + 'static) -> Self {
        self.request_interceptors.push(Arc::new(interceptor));
        self
    }

    pub fn response_interceptor(mut self, interceptor: impl ResponseInterceptor + 'static) -> Self {
        self.response_interceptors.push(Arc::new(interceptor));
        self
    }

    /// Skip the logging and auth-expiry interceptors.
    pub fn without_default_interceptors(mut self) -> Self {
        self.default_interceptors = Some(false);
        self
    }

    pub fn build(self) -> Result<ApiClient, ApiError> {
        let location = self.location.ok_or_else(|| {
            ApiError::ConfigurationError("Location is required (use base_url or location)".into())
        })?;
        let environment = detect_environment(&location);

        let mut config = RequestConfig::for_environment(&environment).with_headers(&self.headers);
        if let Some(timeout) = self.timeout {
            config = config.with_timeout(timeout);
        }
        if let Some(max_retries) = self.max_retries {
            config = config.with_max_retries(max_retries);
        }
        if let Some(retry_delay) = self.retry_delay {
            config = config.with_retry_delay(retry_delay);
        }
        if let Some(credentials) = self.credentials {
            config = config.with_credentials(credentials);
        }

        let transport: Arc<dyn HttpTransport> = match (self.transport, self.http_client) {
            (Some(transport), _) => transport,
            (None, Some(client)) => Arc::new(ReqwestTransport::new(client)),
            (None, None) => Arc::new(ReqwestTransport::with_defaults()?),
        };

        let interceptors = InterceptorRegistry::new();
        let auth = AuthExpiryInterceptor::new();
        if self.default_interceptors.unwrap_or(true) {
            interceptors.add_response_interceptor(LoggingInterceptor);
            interceptors.add_response_interceptor(auth.clone());
        }
        for interceptor in self.request_interceptors {
            interceptors.add_request_arc(interceptor);
        }
        for interceptor in self.response_interceptors {
            interceptors.add_response_arc(interceptor);
        }

        tracing::info!(
            target: "vidcast_admin::client",
            api_url = %environment.api_url,
            secure = environment.is_secure,
            kind = ?environment.kind,
            "api client ready"
        );

        let executor = RequestExecutor::new(transport, config, interceptors, environment.base_url.clone());
        Ok(ApiClient {
            endpoints: Endpoints::new(&environment),
            environment: Arc::new(environment),
            executor,
            auth,
        })
    }
}
