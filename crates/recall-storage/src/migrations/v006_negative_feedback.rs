//! v006: negative_feedback_events.

use rusqlite::Connection;

use recall_core::errors::RecallResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> RecallResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS negative_feedback_events (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            memory_id   INTEGER NOT NULL,
            created_at  INTEGER NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_negative_feedback_memory
            ON negative_feedback_events(memory_id, created_at);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
