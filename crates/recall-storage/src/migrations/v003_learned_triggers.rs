//! v003: learned_triggers column. Idempotent; the FTS5 table is left alone.

use rusqlite::Connection;

use recall_core::constants::LEARNED_TRIGGERS_COLUMN;
use recall_core::errors::RecallResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> RecallResult<()> {
    if column_exists(conn, "memory_index", LEARNED_TRIGGERS_COLUMN)? {
        return Ok(());
    }
    conn.execute_batch(
        "ALTER TABLE memory_index ADD COLUMN learned_triggers TEXT NOT NULL DEFAULT '[]';",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// True when `table` has a column named `column`.
pub fn column_exists(conn: &Connection, table: &str, column: &str) -> RecallResult<bool> {
    let mut stmt = conn
        .prepare(&format!("PRAGMA table_info({table})"))
        .map_err(|e| to_storage_err(e.to_string()))?;
    let names = stmt
        .query_map([], |row| row.get::<_, String>(1))
        .map_err(|e| to_storage_err(e.to_string()))?;
    for name in names {
        if name.map_err(|e| to_storage_err(e.to_string()))? == column {
            return Ok(true);
        }
    }
    Ok(false)
}
