//! v001: memory_index, the table every engine reads from.

use rusqlite::Connection;

use recall_core::errors::RecallResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> RecallResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS memory_index (
            id                INTEGER PRIMARY KEY AUTOINCREMENT,
            spec_folder       TEXT NOT NULL,
            title             TEXT NOT NULL DEFAULT '',
            content_text      TEXT NOT NULL DEFAULT '',
            trigger_phrases   TEXT NOT NULL DEFAULT '[]',
            importance_tier   TEXT NOT NULL DEFAULT 'normal'
                CHECK (importance_tier IN
                    ('deprecated', 'temporary', 'normal', 'important', 'critical', 'constitutional')),
            validation_count  INTEGER NOT NULL DEFAULT 0,
            confidence        REAL NOT NULL DEFAULT 1.0,
            created_at        TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
            updated_at        TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );

        CREATE INDEX IF NOT EXISTS idx_memory_index_folder ON memory_index(spec_folder);
        CREATE INDEX IF NOT EXISTS idx_memory_index_tier ON memory_index(importance_tier);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
