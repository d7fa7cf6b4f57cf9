//! Interop bridge handler

use crate::error::ApiError;
use crate::services::wire::{collect_headers, encode_body};
use crate::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, Uri},
    Json,
};
use community_core::{HttpMessageRequest, HttpMessageResponse};

pub async fn forward(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<HttpMessageResponse>, ApiError> {
    let headers = collect_headers(headers.iter().map(|(k, v)| (k.as_str(), v.as_bytes())));
    let (body, encoding) = encode_body(&body);

    let request = HttpMessageRequest::new(method.as_str(), uri.to_string(), headers, body)
        .with_body_encoding(encoding);
    let response = state.interop.on_process_input(request).await?;
    Ok(Json(response))
}
