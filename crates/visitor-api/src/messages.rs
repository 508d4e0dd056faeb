use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{DateTime, NaiveDateTime, Utc};
use tracing::{info, warn};

use visitor_db::models::MessageRow;
use visitor_types::api::{CreateMessageRequest, Message};
use visitor_types::models::{MESSAGE_LIST_LIMIT, NAME_MAX_LEN};

use crate::error::{ApiError, FIELDS_REQUIRED};
use crate::state::{AppState, with_db};

pub async fn create_message(
    State(state): State<AppState>,
    body: Result<Json<CreateMessageRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = body.map_err(|e| {
        warn!("Rejected message body: {}", e);
        ApiError::Validation(FIELDS_REQUIRED.into())
    })?;

    // Presence only; trimming is left to the caller
    if req.name.is_empty() || req.content.is_empty() {
        return Err(ApiError::Validation(FIELDS_REQUIRED.into()));
    }
    if req.name.chars().count() > NAME_MAX_LEN {
        return Err(ApiError::Validation(format!(
            "Name must be at most {} characters",
            NAME_MAX_LEN
        )));
    }

    let row = with_db(&state, move |db| db.insert_message(&req.name, &req.content))
        .await
        .map_err(ApiError::store("Failed to create message"))?;

    info!(id = row.id, "Message created");
    Ok((StatusCode::CREATED, Json(message_from_row(row))))
}

pub async fn get_messages(State(state): State<AppState>) -> Result<Json<Vec<Message>>, ApiError> {
    let rows = with_db(&state, |db| db.recent_messages(MESSAGE_LIST_LIMIT))
        .await
        .map_err(ApiError::store("Failed to fetch messages"))?;

    Ok(Json(rows.into_iter().map(message_from_row).collect()))
}

fn message_from_row(row: MessageRow) -> Message {
    let timestamp = parse_timestamp(&row.timestamp).unwrap_or_else(|e| {
        warn!("Corrupt timestamp '{}' on message {}: {}", row.timestamp, row.id, e);
        DateTime::default()
    });

    Message {
        id: row.id,
        name: row.name,
        content: row.content,
        timestamp,
    }
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    raw.parse::<DateTime<Utc>>().or_else(|_| {
        // Rows written by hand through the sqlite shell use "YYYY-MM-DD HH:MM:SS"
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").map(|ndt| ndt.and_utc())
    })
}
