//! Reads and transactional rewrites of the `learned_triggers` column.
//!
//! Nothing here touches an FTS5-indexed column.

use rusqlite::{params, Connection, OptionalExtension};

use recall_core::constants::LEARNED_TRIGGERS_EMPTY;
use recall_core::errors::{RecallError, RecallResult};
use recall_core::memory::{MemoryId, TermEntry};
use recall_core::traits::{LearningTarget, TriggerUpdate};

use super::memory_ops::parse_trigger_phrases;
use super::parse_timestamp;
use crate::to_storage_err;

pub fn learning_target(conn: &Connection, id: MemoryId) -> RecallResult<Option<LearningTarget>> {
    let raw = conn
        .query_row(
            "SELECT created_at, trigger_phrases, learned_triggers FROM memory_index WHERE id = ?1",
            params![id],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, Option<String>>(1)?,
                    row.get::<_, Option<String>>(2)?,
                ))
            },
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;

    let Some((created, phrases, learned)) = raw else {
        return Ok(None);
    };
    Ok(Some(LearningTarget {
        memory_id: id,
        created_at: parse_timestamp(&created),
        trigger_phrases: parse_trigger_phrases(phrases.as_deref()),
        learned_triggers: TermEntry::parse_list(learned.as_deref()),
    }))
}

/// Every memory whose learned list is non-empty, in id order.
pub fn memories_with_learned_triggers(
    conn: &Connection,
) -> RecallResult<Vec<(MemoryId, Vec<TermEntry>)>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, learned_triggers FROM memory_index
             WHERE learned_triggers IS NOT NULL AND learned_triggers != ?1
             ORDER BY id",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![LEARNED_TRIGGERS_EMPTY], |row| {
            Ok((row.get::<_, i64>(0)?, row.get::<_, Option<String>>(1)?))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut out = Vec::new();
    for row in rows {
        let (id, raw) = row.map_err(|e| to_storage_err(e.to_string()))?;
        let entries = TermEntry::parse_list(raw.as_deref());
        if !entries.is_empty() {
            out.push((id, entries));
        }
    }
    Ok(out)
}

/// Read, transform, and write one memory's list in an immediate transaction.
pub fn update_learned_triggers(
    conn: &Connection,
    id: MemoryId,
    update: &mut TriggerUpdate<'_>,
) -> RecallResult<bool> {
    crate::tx::immediate(conn, "update_learned_triggers", |tx| {
        let raw: Option<Option<String>> = tx
            .query_row(
                "SELECT learned_triggers FROM memory_index WHERE id = ?1",
                params![id],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| to_storage_err(e.to_string()))?;
        let Some(raw) = raw else {
            return Err(RecallError::MemoryNotFound { id });
        };

        let current = TermEntry::parse_list(raw.as_deref());
        let Some(next) = update(&current) else {
            return Ok(false);
        };
        write_list(tx, id, &next)?;
        Ok(true)
    })
}

/// Empty every non-empty list, returning what each memory held.
pub fn clear_learned_triggers(conn: &Connection) -> RecallResult<Vec<(MemoryId, Vec<TermEntry>)>> {
    crate::tx::immediate(conn, "clear_learned_triggers", |tx| {
        let cleared = memories_with_learned_triggers(tx)?;
        tx.execute(
            "UPDATE memory_index SET learned_triggers = ?1
             WHERE learned_triggers IS NULL OR learned_triggers != ?1",
            params![LEARNED_TRIGGERS_EMPTY],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
        Ok(cleared)
    })
}

fn write_list(conn: &Connection, id: MemoryId, entries: &[TermEntry]) -> RecallResult<()> {
    let json = TermEntry::serialize_list(entries)?;
    conn.execute(
        "UPDATE memory_index SET learned_triggers = ?1 WHERE id = ?2",
        params![json, id],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
