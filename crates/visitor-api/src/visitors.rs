use axum::{Json, extract::State};
use tracing::debug;

use visitor_types::api::VisitorCount;

use crate::error::ApiError;
use crate::state::{AppState, with_db};

pub async fn get_visitor_count(
    State(state): State<AppState>,
) -> Result<Json<VisitorCount>, ApiError> {
    let count = with_db(&state, |db| db.visitor_count())
        .await
        .map_err(ApiError::store("Failed to fetch visitor count"))?;

    Ok(Json(VisitorCount { count }))
}

pub async fn increment_visitor_count(
    State(state): State<AppState>,
) -> Result<Json<VisitorCount>, ApiError> {
    let count = with_db(&state, |db| db.increment_visitor_count())
        .await
        .map_err(ApiError::store("Failed to update visitor count"))?;

    debug!(count, "Visitor count incremented");
    Ok(Json(VisitorCount { count }))
}
