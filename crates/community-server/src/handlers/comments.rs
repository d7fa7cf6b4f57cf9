//! Comment handlers

use crate::error::ApiError;
use crate::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use community_core::{Acknowledgement, Comment, CommentUpdate, NewComment};

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Comment>>, ApiError> {
    Ok(Json(state.comments.list_comments().await?))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Option<Comment>>, ApiError> {
    Ok(Json(state.comments.get_comment(id).await?))
}

/// The store rejects a `post_id` that does not resolve.
pub async fn create(
    State(state): State<AppState>,
    Json(req_body): Json<NewComment>,
) -> Result<Json<Comment>, ApiError> {
    let comment = state.comments.create_comment(&req_body).await?;
    tracing::debug!("Created comment {} on post {}", comment.id, comment.post_id);
    Ok(Json(comment))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req_body): Json<CommentUpdate>,
) -> Result<Json<Option<Comment>>, ApiError> {
    Ok(Json(state.comments.update_comment(id, &req_body).await?))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Acknowledgement>, ApiError> {
    state.comments.delete_comment(id).await?;
    Ok(Json(Acknowledgement::comment_deleted()))
}
