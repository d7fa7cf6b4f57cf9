//! Raw catalog query handler

use crate::error::ApiError;
use crate::AppState;
use axum::{extract::State, Json};
use serde_json::{Map, Value};

pub async fn query(
    State(state): State<AppState>,
) -> Result<Json<Vec<Map<String, Value>>>, ApiError> {
    Ok(Json(state.catalog.catalog_rows().await?))
}
