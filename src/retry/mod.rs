//! Retry module
//! - policy.rs: linear-backoff policy and the retry loop

pub mod policy;

pub use policy::*;
