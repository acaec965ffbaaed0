//! Startup check that learned triggers never reach the lexical index.
//!
//! Inspects the stored DDL of the FTS5 table and of every trigger that writes
//! into it. Any mention of the learned-triggers column is a hard failure.

use rusqlite::{params, Connection, OptionalExtension};
use tracing::error;

use recall_core::constants::{LEARNED_TRIGGERS_COLUMN, LEXICAL_INDEX_TABLE};
use recall_core::errors::{RecallError, RecallResult};

use crate::to_storage_err;

/// Fails with `FtsIsolationViolation` when the lexical index definition or
/// one of its sync triggers references `learned_triggers`. A database
/// without an FTS table passes.
pub fn verify_fts_isolation(conn: &Connection) -> RecallResult<()> {
    let table_sql: Option<Option<String>> = conn
        .query_row(
            "SELECT sql FROM sqlite_master WHERE type = 'table' AND name = ?1",
            params![LEXICAL_INDEX_TABLE],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;

    if let Some(sql) = table_sql.flatten() {
        if mentions_learned_column(&sql) {
            return Err(violation(format!("{LEXICAL_INDEX_TABLE} definition: {sql}")));
        }
    }

    let mut stmt = conn
        .prepare("SELECT name, sql FROM sqlite_master WHERE type = 'trigger'")
        .map_err(|e| to_storage_err(e.to_string()))?;
    let triggers = stmt
        .query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, Option<String>>(1)?))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    for trigger in triggers {
        let (name, sql) = trigger.map_err(|e| to_storage_err(e.to_string()))?;
        let Some(sql) = sql else { continue };
        let lowered = sql.to_lowercase();
        if lowered.contains(LEXICAL_INDEX_TABLE) && mentions_learned_column(&lowered) {
            return Err(violation(format!("trigger {name} feeds {LEXICAL_INDEX_TABLE}")));
        }
    }

    Ok(())
}

fn mentions_learned_column(sql: &str) -> bool {
    sql.to_lowercase().contains(LEARNED_TRIGGERS_COLUMN)
}

fn violation(details: String) -> RecallError {
    error!(%details, "lexical index isolation violated");
    RecallError::FtsIsolationViolation { details }
}
