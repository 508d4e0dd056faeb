use axum::{Router, routing::get};

use crate::messages;
use crate::state::AppState;
use crate::visitors;

/// The `/api` surface. Transport layers (CORS, tracing) are added by the binary.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/visitors",
            get(visitors::get_visitor_count).post(visitors::increment_visitor_count),
        )
        .route(
            "/api/messages",
            get(messages::get_messages).post(messages::create_message),
        )
        .with_state(state)
}
