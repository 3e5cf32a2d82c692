//! Request configuration
//!
//! `RequestConfig` is an immutable snapshot. Every `with_*` setter consumes
//! the value and returns a new snapshot; the executor holds its snapshot
//! behind an `Arc`, so updating defaults never affects requests already in
//! flight.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::Url;
use reqwest::header::{
    ACCEPT, AUTHORIZATION, CONTENT_TYPE, COOKIE, HeaderMap, HeaderName, HeaderValue,
};

use crate::defaults;
use crate::environment::Environment;
use crate::error::ApiError;

/// When credentials (`Authorization`, `Cookie`) accompany a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CredentialsMode {
    /// Never send credentials.
    Omit,
    /// Send credentials only to the environment's own origin.
    #[default]
    SameOrigin,
    /// Always send credentials.
    Include,
}

impl CredentialsMode {
    /// Whether credentials may be attached to a request for `url`.
    pub fn allows(&self, url: &str, origin: &str) -> bool {
        match self {
            Self::Omit => false,
            Self::Include => true,
            Self::SameOrigin => same_origin(url, origin),
        }
    }

    /// Remove credential headers that `self` does not allow for `url`.
    pub fn apply(&self, headers: &mut HeaderMap, url: &str, origin: &str) {
        if self.allows(url, origin) {
            return;
        }
        for name in [AUTHORIZATION, COOKIE] {
            if headers.remove(&name).is_some() {
                tracing::debug!(
                    target: "vidcast_admin::http",
                    header = %name,
                    mode = ?self,
                    url = %url,
                    "credential header dropped"
                );
            }
        }
    }
}

fn same_origin(url: &str, origin: &str) -> bool {
    match (Url::parse(url), Url::parse(origin)) {
        (Ok(a), Ok(b)) => a.origin() == b.origin(),
        _ => false,
    }
}

/// Default request settings.
#[derive(Debug, Clone)]
pub struct RequestConfig {
    pub timeout: Duration,
    pub max_retries: u32,
    pub retry_delay: Duration,
    pub headers: HeaderMap,
    pub credentials: CredentialsMode,
}

impl Default for RequestConfig {
    fn default() -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        Self {
            timeout: defaults::request::TIMEOUT,
            max_retries: defaults::request::MAX_RETRIES,
            retry_delay: defaults::request::RETRY_DELAY,
            headers,
            credentials: CredentialsMode::default(),
        }
    }
}

impl RequestConfig {
    /// Defaults for `environment`: secure contexts also send `X-Requested-With`.
    pub fn for_environment(environment: &Environment) -> Self {
        let mut config = Self::default();
        if environment.is_secure {
            config.headers.insert(
                HeaderName::from_static("x-requested-with"),
                HeaderValue::from_static(defaults::http::REQUESTED_WITH),
            );
        }
        config
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    pub fn with_credentials(mut self, credentials: CredentialsMode) -> Self {
        self.credentials = credentials;
        self
    }

    /// Merge `headers` over the current defaults (same name overrides).
    pub fn with_headers(mut self, headers: &HeaderMap) -> Self {
        merge_headers(&mut self.headers, headers);
        self
    }

    /// Merge string headers over the current defaults.
    pub fn with_custom_headers(mut self, headers: &HashMap<String, String>) -> Result<Self, ApiError> {
        for (name, value) in headers {
            self.headers.insert(
                HeaderName::from_bytes(name.as_bytes())?,
                HeaderValue::from_str(value)?,
            );
        }
        Ok(self)
    }
}

/// Insert every header of `extra` into `base`, replacing same-named entries.
pub fn merge_headers(base: &mut HeaderMap, extra: &HeaderMap) {
    for name in extra.keys() {
        base.remove(name);
        for value in extra.get_all(name) {
            base.append(name.clone(), value.clone());
        }
    }
}
