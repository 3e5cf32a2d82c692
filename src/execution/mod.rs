//! Request execution
//!
//! - `http`: transport seam and interceptors
//! - `executor`: the retrying request executor

pub mod executor;
pub mod http;
