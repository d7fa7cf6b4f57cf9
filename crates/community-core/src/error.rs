//! Error types for the community server

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CommunityError>;

#[derive(Error, Debug)]
pub enum CommunityError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Post not found: {0}")]
    PostNotFound(i64),

    #[error("Comment not found: {0}")]
    CommentNotFound(i64),

    #[error("Interop error: {0}")]
    Interop(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for CommunityError {
    fn from(e: serde_json::Error) -> Self {
        CommunityError::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_error_conversion() {
        let err: CommunityError = serde_json::from_str::<i64>("nope").unwrap_err().into();
        assert!(matches!(err, CommunityError::Serialization(_)));
    }

    #[test]
    fn test_display() {
        assert_eq!(CommunityError::PostNotFound(42).to_string(), "Post not found: 42");
    }
}
