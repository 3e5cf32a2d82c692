//! HTTP Utilities
//!
//! This module contains HTTP-related utilities:
//! - Transport abstraction and the `reqwest` implementation
//! - Request/response interceptors

pub mod interceptor;
pub mod transport;

pub use interceptor::*;
pub use transport::*;
