//! Community Types - Pure type definitions shared by the store and the API
//!
//! This crate contains only plain data types with no async runtime or
//! database dependencies.

pub mod comment;
pub mod message;
pub mod post;

pub use comment::*;
pub use message::*;
pub use post::*;

use serde::{Deserialize, Serialize};

/// Fixed acknowledgement returned by delete endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acknowledgement {
    pub message: String,
}

impl Acknowledgement {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn post_deleted() -> Self {
        Self::new("Post deleted successfully")
    }

    pub fn comment_deleted() -> Self {
        Self::new("Comment deleted successfully")
    }
}
