//! v005: learned_feedback_audit.

use rusqlite::Connection;

use recall_core::errors::RecallResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> RecallResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS learned_feedback_audit (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            memory_id    INTEGER NOT NULL,
            action       TEXT NOT NULL CHECK (action IN ('add', 'expire', 'clear')),
            terms        TEXT NOT NULL DEFAULT '[]',
            source       TEXT NOT NULL,
            timestamp    INTEGER NOT NULL,
            shadow_mode  INTEGER NOT NULL DEFAULT 0
        );

        CREATE INDEX IF NOT EXISTS idx_feedback_audit_memory ON learned_feedback_audit(memory_id);
        CREATE INDEX IF NOT EXISTS idx_feedback_audit_time ON learned_feedback_audit(timestamp);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
