//! API error type with IntoResponse
//!
//! Errors are converted to JSON responses with appropriate status codes.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use community_core::CommunityError;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Resource not found (404)
    #[error("{resource} '{id}' not found")]
    NotFound { resource: &'static str, id: i64 },

    /// Downstream interop failure (502)
    #[error("interop failure: {0}")]
    Interop(String),

    /// Everything else (500, logged)
    #[error(transparent)]
    Internal(CommunityError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::NotFound { .. } => (
                StatusCode::NOT_FOUND,
                json!({
                    "error": "not_found",
                    "message": self.to_string()
                }),
            ),
            Self::Interop(message) => {
                tracing::error!("Interop error: {}", message);
                (
                    StatusCode::BAD_GATEWAY,
                    json!({
                        "error": "interop_error",
                        "message": message
                    }),
                )
            }
            Self::Internal(e) => {
                // Log the actual error, return generic message
                tracing::error!("Internal error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "internal_error",
                        "message": "an internal error occurred"
                    }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<CommunityError> for ApiError {
    fn from(e: CommunityError) -> Self {
        match e {
            CommunityError::PostNotFound(id) => Self::NotFound {
                resource: "post",
                id,
            },
            CommunityError::CommentNotFound(id) => Self::NotFound {
                resource: "comment",
                id,
            },
            CommunityError::Interop(message) => Self::Interop(message),
            other => Self::Internal(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn not_found_is_404() {
        let err = ApiError::from(CommunityError::PostNotFound(9));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["error"], "not_found");
        assert_eq!(body["message"], "post '9' not found");
    }

    #[tokio::test]
    async fn interop_is_502() {
        let err = ApiError::from(CommunityError::Interop("down".into()));
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn database_error_is_generic_500() {
        let err = ApiError::from(CommunityError::Database("disk I/O error".into()));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(!text.contains("disk I/O"));
    }
}
