//! Resource types for the vidcast API
//!
//! Timestamps are naive: the API serializes them without an offset.

pub mod device;
pub mod playlist;
pub mod video;

pub use device::*;
pub use playlist::*;
pub use video::*;
