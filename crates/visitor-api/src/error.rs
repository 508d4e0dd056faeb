use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use visitor_types::api::ErrorResponse;

pub const FIELDS_REQUIRED: &str = "Name and content are required";

#[derive(Error, Debug)]
pub enum ApiError {
    /// The caller sent something unusable. The message is returned verbatim.
    #[error("{0}")]
    Validation(String),

    /// The store failed. Only `context` reaches the caller; `cause` is logged.
    #[error("{context}")]
    Store {
        context: &'static str,
        cause: anyhow::Error,
    },
}

impl ApiError {
    /// Adapter for `map_err` that tags a store failure with a public message.
    pub fn store(context: &'static str) -> impl FnOnce(anyhow::Error) -> Self {
        move |cause| Self::Store { context, cause }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Store { context, cause } => {
                error!("{}: {:#}", context, cause);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(ErrorResponse { error: self.to_string() })).into_response()
    }
}
