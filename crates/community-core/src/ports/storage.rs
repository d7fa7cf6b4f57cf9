//! Storage traits for persistence

use crate::Result;
use async_trait::async_trait;
use community_types::{Comment, CommentUpdate, NewComment, NewPost, Post, PostUpdate};
use serde_json::{Map, Value};

/// Post store
#[async_trait]
pub trait PostStore: Send + Sync {
    async fn list_posts(&self) -> Result<Vec<Post>>;
    async fn get_post(&self, id: i64) -> Result<Option<Post>>;
    async fn create_post(&self, post: &NewPost) -> Result<Post>;
    /// Returns `None` when no post has this id.
    async fn update_post(&self, id: i64, update: &PostUpdate) -> Result<Option<Post>>;
    /// Fails with `PostNotFound` when no post has this id.
    async fn delete_post(&self, id: i64) -> Result<()>;
}

/// Comment store
#[async_trait]
pub trait CommentStore: Send + Sync {
    async fn list_comments(&self) -> Result<Vec<Comment>>;
    async fn list_comments_by_post(&self, post_id: i64) -> Result<Vec<Comment>>;
    async fn get_comment(&self, id: i64) -> Result<Option<Comment>>;
    async fn create_comment(&self, comment: &NewComment) -> Result<Comment>;
    async fn update_comment(&self, id: i64, update: &CommentUpdate) -> Result<Option<Comment>>;
    async fn delete_comment(&self, id: i64) -> Result<()>;
}

/// Direct access to the engine catalog, bypassing the typed mapping
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn catalog_rows(&self) -> Result<Vec<Map<String, Value>>>;
}
