//! Post handlers

use crate::error::ApiError;
use crate::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use community_core::{Acknowledgement, Comment, NewPost, Post, PostUpdate};

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Post>>, ApiError> {
    Ok(Json(state.posts.list_posts().await?))
}

/// Unknown ids answer `null` rather than 404.
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Option<Post>>, ApiError> {
    Ok(Json(state.posts.get_post(id).await?))
}

pub async fn create(
    State(state): State<AppState>,
    Json(req_body): Json<NewPost>,
) -> Result<Json<Post>, ApiError> {
    let post = state.posts.create_post(&req_body).await?;
    tracing::debug!("Created post {}", post.id);
    Ok(Json(post))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req_body): Json<PostUpdate>,
) -> Result<Json<Option<Post>>, ApiError> {
    Ok(Json(state.posts.update_post(id, &req_body).await?))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Acknowledgement>, ApiError> {
    state.posts.delete_post(id).await?;
    Ok(Json(Acknowledgement::post_deleted()))
}

/// Comments owned by one post
pub async fn comments(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<Comment>>, ApiError> {
    Ok(Json(state.comments.list_comments_by_post(id).await?))
}
