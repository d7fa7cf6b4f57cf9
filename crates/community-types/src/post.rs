//! Post types

use serde::{Deserialize, Serialize};

/// A stored post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
}

/// Post creation body
///
/// `id` is normally omitted and assigned by the store; an explicit value is
/// inserted as given.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPost {
    #[serde(default)]
    pub id: Option<i64>,
    pub title: String,
    pub content: String,
}

impl NewPost {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            content: content.into(),
        }
    }
}

/// Post update body. Missing fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostUpdate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}
