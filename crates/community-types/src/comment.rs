//! Comment types

use serde::{Deserialize, Serialize};

/// A stored comment. `post_id` always refers to an existing post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub post_id: i64,
    pub content: String,
}

/// Comment creation body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewComment {
    #[serde(default)]
    pub id: Option<i64>,
    pub post_id: i64,
    pub content: String,
}

impl NewComment {
    pub fn new(post_id: i64, content: impl Into<String>) -> Self {
        Self {
            id: None,
            post_id,
            content: content.into(),
        }
    }
}

/// Comment update body. Only the content is mutable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommentUpdate {
    #[serde(default)]
    pub content: Option<String>,
}
