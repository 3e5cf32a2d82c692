//! Environment detection
//!
//! Derives the site origin, the API base URL and the security flag from the
//! location the console is served from. The descriptor is computed once and
//! never mutated afterwards.

use reqwest::Url;
use serde::Serialize;

use crate::defaults::{API_PATH, LOOPBACK_HOSTS};
use crate::error::ApiError;

/// Where the console runs: protocol, hostname and optional explicit port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    protocol: String,
    hostname: String,
    port: Option<u16>,
}

impl Location {
    /// Build a location. The protocol may be given as `https` or `https:`.
    pub fn new(protocol: &str, hostname: &str, port: Option<u16>) -> Self {
        let scheme = protocol.trim_end_matches(':').to_ascii_lowercase();
        Self {
            protocol: format!("{scheme}:"),
            hostname: hostname.to_string(),
            port,
        }
    }

    /// Parse a location from a URL such as `https://admin.example.com:8443/ui`.
    pub fn parse(url: &str) -> Result<Self, ApiError> {
        let parsed = Url::parse(url)
            .map_err(|e| ApiError::ConfigurationError(format!("Invalid location '{url}': {e}")))?;
        let hostname = parsed.host_str().ok_or_else(|| {
            ApiError::ConfigurationError(format!("Location '{url}' has no host"))
        })?;
        Ok(Self::new(parsed.scheme(), hostname, parsed.port()))
    }

    pub fn protocol(&self) -> &str {
        &self.protocol
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    pub fn port(&self) -> Option<u16> {
        self.port
    }
}

/// Deployment flavour inferred from the hostname.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvironmentKind {
    Development,
    Staging,
    Production,
}

/// Immutable environment descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Environment {
    pub base_url: String,
    pub api_url: String,
    pub is_secure: bool,
    pub hostname: String,
    pub protocol: String,
    pub port: Option<u16>,
    pub kind: EnvironmentKind,
}

impl Environment {
    /// Site origin (`protocol//hostname[:port]`).
    pub fn origin(&self) -> &str {
        &self.base_url
    }

    /// Join an endpoint path onto the API base URL.
    pub fn api_path(&self, endpoint: &str) -> String {
        if endpoint.starts_with('/') {
            format!("{}{endpoint}", self.api_url)
        } else {
            format!("{}/{endpoint}", self.api_url)
        }
    }
}

/// Compute the environment descriptor for `location`.
pub fn detect_environment(location: &Location) -> Environment {
    let hostname = location.hostname.clone();
    let protocol = location.protocol.clone();

    let mut base_url = format!("{protocol}//{hostname}");
    if let Some(port) = location.port
        && Some(port) != default_port(&protocol)
    {
        base_url.push_str(&format!(":{port}"));
    }

    let loopback = is_loopback(&hostname);
    let kind = if loopback {
        EnvironmentKind::Development
    } else if hostname.contains("test") || hostname.contains("staging") {
        EnvironmentKind::Staging
    } else {
        EnvironmentKind::Production
    };

    let environment = Environment {
        api_url: format!("{base_url}{API_PATH}"),
        base_url,
        is_secure: protocol == "https:" || loopback,
        hostname,
        protocol,
        port: location.port,
        kind,
    };
    tracing::debug!(
        target: "vidcast_admin::env",
        base_url = %environment.base_url,
        secure = environment.is_secure,
        kind = ?environment.kind,
        "environment detected"
    );
    environment
}

fn default_port(protocol: &str) -> Option<u16> {
    match protocol {
        "http:" => Some(80),
        "https:" => Some(443),
        _ => None,
    }
}

fn is_loopback(hostname: &str) -> bool {
    LOOPBACK_HOSTS.contains(&hostname)
}
