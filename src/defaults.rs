//! Default Configuration Values
//!
//! Defaults used by the request configuration and the HTTP client builder.

use std::time::Duration;

/// Request defaults applied when neither the client nor the call overrides them
pub mod request {
    use super::*;

    /// Per-attempt timeout
    pub const TIMEOUT: Duration = Duration::from_secs(30);

    /// Retries after the first attempt (so up to four attempts in total)
    pub const MAX_RETRIES: u32 = 3;

    /// Base delay for linear backoff; attempt `n` waits `RETRY_DELAY * (n + 1)`
    pub const RETRY_DELAY: Duration = Duration::from_millis(1000);
}

/// HTTP client default configurations
pub mod http {
    use super::*;

    /// Default connection timeout for establishing HTTP connections
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Default User-Agent string for HTTP requests
    pub const USER_AGENT: &str = concat!("vidcast-admin/", env!("CARGO_PKG_VERSION"));

    /// Default maximum number of idle connections per host
    pub const MAX_IDLE_PER_HOST: usize = 10;

    /// Header sent on secure contexts so the API can tell console calls apart
    pub const REQUESTED_WITH: &str = "XMLHttpRequest";
}

/// Path of the REST API relative to the site origin
pub const API_PATH: &str = "/api";

/// Hostnames trusted as secure even over plain HTTP
pub const LOOPBACK_HOSTS: &[&str] = &["localhost", "127.0.0.1"];
