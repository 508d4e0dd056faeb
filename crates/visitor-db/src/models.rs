//! Database row types. These map directly to SQLite rows and stay
//! independent of the visitor-types wire models.

pub struct MessageRow {
    pub id: i64,
    pub name: String,
    pub content: String,
    /// RFC 3339 UTC text as written by the column default.
    pub timestamp: String,
}
