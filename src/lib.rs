//! # vidcast-admin
//!
//! Client library for the vidcast distribution API (videos, playlists,
//! devices and device-playlist assignments).
//!
//! ## Layers
//!
//! - [`environment`]: derives base/API URLs and the security flag from a location.
//! - [`config`]: immutable request configuration snapshots.
//! - [`retry`]: linear-backoff retry policy over the tagged [`ApiError`].
//! - [`execution`]: transport seam, interceptor registry and the request executor.
//! - [`client`]: `ApiClient` with get/post/put/delete/upload wrappers.
//! - [`endpoints`], [`types`], [`resources`]: typed access to the REST surface.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use vidcast_admin::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), ApiError> {
//!     let client = ApiClient::builder()
//!         .base_url("https://admin.example.com")?
//!         .build()?;
//!
//!     let videos = client.videos().list().await?;
//!     println!("{} videos", videos.len());
//!
//!     let raw = client.get(&client.endpoints().system().health()).await?;
//!     println!("health: {raw}");
//!     Ok(())
//! }
//! ```
#![deny(unsafe_code)]

pub mod client;
pub mod config;
pub mod defaults;
pub mod endpoints;
pub mod environment;
pub mod error;
pub mod execution;
pub mod resources;
pub mod retry;
pub mod telemetry;
pub mod types;

pub use client::{ApiClient, ApiClientBuilder};
pub use config::{CredentialsMode, RequestConfig};
pub use endpoints::{Endpoints, build_url};
pub use environment::{Environment, EnvironmentKind, Location, detect_environment};
pub use error::{ApiError, Result};
pub use execution::executor::{RequestExecutor, RequestOptions};
pub use execution::http::interceptor::{
    AuthExpiryInterceptor, InterceptorHandle, InterceptorRegistry, LoggingInterceptor,
    RequestContext, RequestInterceptor, ResponseInterceptor,
};
pub use execution::http::transport::{
    ApiResponse, FilePart, HttpTransport, MultipartBody, ReqwestTransport, RequestBody,
};
pub use retry::{RetryExecutor, RetryPolicy};

/// Commonly used items.
pub mod prelude {
    pub use crate::client::{ApiClient, ApiClientBuilder};
    pub use crate::config::{CredentialsMode, RequestConfig};
    pub use crate::environment::{Environment, Location};
    pub use crate::error::ApiError;
    pub use crate::execution::executor::RequestOptions;
    pub use crate::execution::http::interceptor::{RequestContext, ResponseInterceptor};
    pub use crate::execution::http::transport::{ApiResponse, FilePart, MultipartBody};
    pub use crate::types::*;
}
