use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Upper bound on the rows returned by a message listing.
pub const MESSAGE_LIST_LIMIT: u32 = 100;

/// Longest accepted author name, in characters.
pub const NAME_MAX_LEN: usize = 100;

/// A guest book entry. `id` and `timestamp` are assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: i64,
    pub name: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitorCount {
    pub count: i64,
}
