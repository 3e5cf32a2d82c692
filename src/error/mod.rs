//! Error Handling Module
//!
//! - Core error type (`ApiError`) with transport/HTTP classification
//! - Type conversions from common error types
//!
//! # Example
//!
//! ```rust,ignore
//! use vidcast_admin::error::ApiError;
//!
//! let error = ApiError::http_status("Not found", 404, "https://host/api/videos/9");
//! assert!(!error.is_retryable());
//! assert_eq!(error.status_code(), Some(404));
//! ```

mod conversions;
pub mod types;

pub use conversions::from_transport_error;
pub use types::*;
