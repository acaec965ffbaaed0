//! Append-only `negative_feedback_events` and the batch aggregate read.

use std::collections::HashMap;

use rusqlite::{params, params_from_iter, Connection};

use recall_core::errors::RecallResult;
use recall_core::memory::MemoryId;
use recall_core::models::{NegativeFeedbackEvent, NegativeFeedbackStats};

use super::{placeholders, MAX_IN_PARAMS};
use crate::to_storage_err;

pub fn insert_event(conn: &Connection, event: &NegativeFeedbackEvent) -> RecallResult<()> {
    conn.execute(
        "INSERT INTO negative_feedback_events (memory_id, created_at) VALUES (?1, ?2)",
        params![event.memory_id, event.created_at_ms],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Count and most recent timestamp per memory. Ids without events are absent.
pub fn stats_for(
    conn: &Connection,
    ids: &[MemoryId],
) -> RecallResult<HashMap<MemoryId, NegativeFeedbackStats>> {
    let mut out = HashMap::new();
    for chunk in ids.chunks(MAX_IN_PARAMS) {
        let sql = format!(
            "SELECT memory_id, COUNT(*), MAX(created_at) FROM negative_feedback_events
             WHERE memory_id IN ({}) GROUP BY memory_id",
            placeholders(chunk.len())
        );
        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| to_storage_err(e.to_string()))?;
        let rows = stmt
            .query_map(params_from_iter(chunk.iter()), |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, u32>(1)?,
                    row.get::<_, Option<i64>>(2)?,
                ))
            })
            .map_err(|e| to_storage_err(e.to_string()))?;
        for row in rows {
            let (id, negative_count, last_negative_at_ms) =
                row.map_err(|e| to_storage_err(e.to_string()))?;
            out.insert(
                id,
                NegativeFeedbackStats {
                    negative_count,
                    last_negative_at_ms,
                },
            );
        }
    }
    Ok(out)
}
