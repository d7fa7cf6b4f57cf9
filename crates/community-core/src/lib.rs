//! Community Core Library
//!
//! Error type and port traits for the community demo server.

// Re-export pure types from community-types
pub use community_types::*;

pub mod error;
pub mod ports;

pub use error::{CommunityError, Result};
