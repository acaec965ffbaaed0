//! Append-only `learned_feedback_audit` table.

use rusqlite::{params, Connection};

use recall_core::errors::RecallResult;
use recall_core::memory::MemoryId;
use recall_core::models::{FeedbackAction, LearnedFeedbackAuditEntry};

use crate::to_storage_err;

pub fn append(conn: &Connection, entry: &LearnedFeedbackAuditEntry) -> RecallResult<()> {
    let terms = serde_json::to_string(&entry.terms)?;
    conn.execute(
        "INSERT INTO learned_feedback_audit
            (memory_id, action, terms, source, timestamp, shadow_mode)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            entry.memory_id,
            entry.action.as_str(),
            terms,
            entry.source,
            entry.timestamp_ms,
            entry.shadow_mode as i32,
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Newest first, optionally for one memory.
pub fn query(
    conn: &Connection,
    memory_id: Option<MemoryId>,
    limit: usize,
) -> RecallResult<Vec<LearnedFeedbackAuditEntry>> {
    let mut stmt = conn
        .prepare(
            "SELECT memory_id, action, terms, source, timestamp, shadow_mode
             FROM learned_feedback_audit
             WHERE ?1 IS NULL OR memory_id = ?1
             ORDER BY timestamp DESC, id DESC
             LIMIT ?2",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![memory_id, limit as i64], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, i64>(4)?,
                row.get::<_, bool>(5)?,
            ))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut out = Vec::new();
    for row in rows {
        let (memory_id, action, terms, source, timestamp_ms, shadow_mode) =
            row.map_err(|e| to_storage_err(e.to_string()))?;
        out.push(LearnedFeedbackAuditEntry {
            memory_id,
            action: action.parse::<FeedbackAction>()?,
            terms: serde_json::from_str(&terms).unwrap_or_default(),
            source,
            timestamp_ms,
            shadow_mode,
        });
    }
    Ok(out)
}
