use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

/// Create both tables and seed the counter row. Safe to run on every start.
pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        BEGIN IMMEDIATE;

        CREATE TABLE IF NOT EXISTS visitors (
            id      INTEGER PRIMARY KEY CHECK (id = 1),
            count   INTEGER NOT NULL DEFAULT 0 CHECK (count >= 0)
        );

        CREATE TABLE IF NOT EXISTS messages (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            name        TEXT NOT NULL CHECK (length(name) BETWEEN 1 AND 100),
            content     TEXT NOT NULL CHECK (length(content) >= 1),
            timestamp   TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );

        CREATE INDEX IF NOT EXISTS idx_messages_recent
            ON messages(timestamp DESC, id DESC);

        -- The single counter row; id = 1 is the only value the CHECK admits
        INSERT OR IGNORE INTO visitors (id, count) VALUES (1, 0);

        COMMIT;
        ",
    )?;

    info!("Database migrations complete");
    Ok(())
}
