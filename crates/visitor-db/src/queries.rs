use crate::Database;
use crate::models::MessageRow;
use anyhow::{Result, anyhow};
use rusqlite::Connection;

impl Database {
    // -- Visitors --

    pub fn visitor_count(&self) -> Result<i64> {
        self.with_conn(|conn| {
            conn.query_row("SELECT count FROM visitors WHERE id = 1", [], |row| row.get::<_, i64>(0))
                .optional()?
                .ok_or_else(|| anyhow!("Visitor counter row missing"))
        })
    }

    /// Add one to the counter and return the new value.
    ///
    /// The read-modify-write happens inside a single UPDATE so concurrent
    /// callers never lose an increment.
    pub fn increment_visitor_count(&self) -> Result<i64> {
        self.with_conn(|conn| {
            conn.query_row(
                "UPDATE visitors SET count = count + 1 WHERE id = 1 RETURNING count",
                [],
                |row| row.get::<_, i64>(0),
            )
            .optional()?
            .ok_or_else(|| anyhow!("Visitor counter row missing"))
        })
    }

    // -- Messages --

    pub fn insert_message(&self, name: &str, content: &str) -> Result<MessageRow> {
        self.with_conn(|conn| {
            let row = conn.query_row(
                "INSERT INTO messages (name, content) VALUES (?1, ?2)
                 RETURNING id, name, content, timestamp",
                (name, content),
                map_message,
            )?;
            Ok(row)
        })
    }

    /// Most recent messages first, ties broken by the higher id.
    pub fn recent_messages(&self, limit: u32) -> Result<Vec<MessageRow>> {
        self.with_conn(|conn| query_recent_messages(conn, limit))
    }
}

fn query_recent_messages(conn: &Connection, limit: u32) -> Result<Vec<MessageRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, content, timestamp
         FROM messages
         ORDER BY timestamp DESC, id DESC
         LIMIT ?1",
    )?;

    let rows = stmt
        .query_map([limit], map_message)?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

fn map_message(row: &rusqlite::Row<'_>) -> rusqlite::Result<MessageRow> {
    Ok(MessageRow {
        id: row.get(0)?,
        name: row.get(1)?,
        content: row.get(2)?,
        timestamp: row.get(3)?,
    })
}

/// Extension trait for optional query results
trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
