use serde::{Deserialize, Serialize};

pub use crate::models::{Message, VisitorCount};

// -- Messages --

/// Body of `POST /api/messages`.
///
/// Absent fields deserialize to empty strings so the handler can report them
/// the same way as blank ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateMessageRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub content: String,
}

impl CreateMessageRequest {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

// -- Errors --

/// Body returned with every non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
