//! v004: memory_promotion_audit. Append-only; the promotion rate limiter
//! counts rows by `promoted_at`.

use rusqlite::Connection;

use recall_core::errors::RecallResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> RecallResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS memory_promotion_audit (
            id                INTEGER PRIMARY KEY AUTOINCREMENT,
            memory_id         INTEGER NOT NULL,
            previous_tier     TEXT NOT NULL,
            new_tier          TEXT NOT NULL,
            validation_count  INTEGER NOT NULL,
            promoted_at       INTEGER NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_promotion_audit_time ON memory_promotion_audit(promoted_at);
        CREATE INDEX IF NOT EXISTS idx_promotion_audit_memory ON memory_promotion_audit(memory_id);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
