//! Insert, get, folder listing, validation bookkeeping, and lexical search
//! over `memory_index`.

use rusqlite::{params, Connection, OptionalExtension, Row};

use recall_core::errors::{RecallError, RecallResult};
use recall_core::memory::{MemoryId, MemoryRecord, TermEntry, Tier};
use recall_core::models::FolderMemory;

use super::parse_timestamp;
use crate::to_storage_err;

const MEMORY_COLUMNS: &str = "id, spec_folder, title, content_text, importance_tier, \
     validation_count, confidence, created_at, updated_at, trigger_phrases, learned_triggers";

/// Insert a memory and return its row id. `memory.id` is ignored.
pub fn insert_memory(conn: &Connection, memory: &MemoryRecord) -> RecallResult<MemoryId> {
    let phrases_json = serde_json::to_string(&memory.trigger_phrases)?;
    let learned_json = TermEntry::serialize_list(&memory.learned_triggers)?;

    conn.execute(
        "INSERT INTO memory_index (
            spec_folder, title, content_text, importance_tier, validation_count,
            confidence, created_at, updated_at, trigger_phrases, learned_triggers
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            memory.folder,
            memory.title,
            memory.content,
            memory.tier.as_str(),
            memory.validation_count,
            memory.confidence,
            memory.created_at.to_rfc3339(),
            memory.updated_at.to_rfc3339(),
            phrases_json,
            learned_json,
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    Ok(conn.last_insert_rowid())
}

/// Get one memory by id.
pub fn get_memory(conn: &Connection, id: MemoryId) -> RecallResult<Option<MemoryRecord>> {
    let raw = conn
        .query_row(
            &format!("SELECT {MEMORY_COLUMNS} FROM memory_index WHERE id = ?1"),
            params![id],
            RawMemoryRow::from_row,
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;
    raw.map(RawMemoryRow::into_record).transpose()
}

/// Folder, tier, and last-update time of every memory.
///
/// `updated_at` falls back to `created_at`; rows where neither parses get
/// `None` and count as inactive.
pub fn list_folder_memories(conn: &Connection) -> RecallResult<Vec<FolderMemory>> {
    let mut stmt = conn
        .prepare("SELECT spec_folder, importance_tier, updated_at, created_at FROM memory_index")
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, Option<String>>(2)?,
                row.get::<_, Option<String>>(3)?,
            ))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut out = Vec::new();
    for row in rows {
        let (folder, tier, updated, created) = row.map_err(|e| to_storage_err(e.to_string()))?;
        let tier: Tier = tier.parse()?;
        let updated_at = updated
            .as_deref()
            .and_then(parse_timestamp)
            .or_else(|| created.as_deref().and_then(parse_timestamp));
        out.push(FolderMemory::new(&folder, tier, updated_at));
    }
    Ok(out)
}

/// Increment the positive validation count and return the new value.
pub fn increment_validation(conn: &Connection, id: MemoryId) -> RecallResult<u32> {
    let changed = conn
        .execute(
            "UPDATE memory_index SET validation_count = validation_count + 1 WHERE id = ?1",
            params![id],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    if changed == 0 {
        return Err(RecallError::MemoryNotFound { id });
    }
    conn.query_row(
        "SELECT validation_count FROM memory_index WHERE id = ?1",
        params![id],
        |row| row.get(0),
    )
    .map_err(|e| to_storage_err(e.to_string()))
}

/// Search the FTS5 index, best match first.
///
/// Each whitespace-separated word is quoted and the words are OR-ed, so
/// user input never reaches the FTS5 query grammar.
pub fn search_lexical(conn: &Connection, query: &str, limit: usize) -> RecallResult<Vec<MemoryId>> {
    let Some(expr) = fts_query(query) else {
        return Ok(Vec::new());
    };
    let mut stmt = conn
        .prepare(
            "SELECT rowid FROM memory_fts
             WHERE memory_fts MATCH ?1
             ORDER BY rank
             LIMIT ?2",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![expr, limit as i64], |row| row.get::<_, i64>(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    rows.collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))
}

/// Quote every word for FTS5. `None` for a blank query.
pub(crate) fn fts_query(query: &str) -> Option<String> {
    let words: Vec<String> = query
        .split_whitespace()
        .map(|w| format!("\"{}\"", w.replace('"', "\"\"")))
        .collect();
    if words.is_empty() {
        None
    } else {
        Some(words.join(" OR "))
    }
}

/// Organic trigger phrases: a JSON array, or a comma-separated list from
/// older writers.
pub(crate) fn parse_trigger_phrases(raw: Option<&str>) -> Vec<String> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Vec::new();
    };
    if let Ok(list) = serde_json::from_str::<Vec<String>>(raw) {
        return list;
    }
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Column values as read, before any parsing that can fail.
struct RawMemoryRow {
    id: MemoryId,
    folder: String,
    title: String,
    content: String,
    tier: String,
    validation_count: u32,
    confidence: f64,
    created_at: String,
    updated_at: String,
    trigger_phrases: Option<String>,
    learned_triggers: Option<String>,
}

impl RawMemoryRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            folder: row.get(1)?,
            title: row.get(2)?,
            content: row.get(3)?,
            tier: row.get(4)?,
            validation_count: row.get(5)?,
            confidence: row.get(6)?,
            created_at: row.get(7)?,
            updated_at: row.get(8)?,
            trigger_phrases: row.get(9)?,
            learned_triggers: row.get(10)?,
        })
    }

    fn into_record(self) -> RecallResult<MemoryRecord> {
        let created_at = parse_timestamp(&self.created_at).ok_or_else(|| {
            to_storage_err(format!("memory {}: bad created_at {:?}", self.id, self.created_at))
        })?;
        let updated_at = parse_timestamp(&self.updated_at).unwrap_or(created_at);
        Ok(MemoryRecord {
            id: self.id,
            folder: self.folder,
            title: self.title,
            content: self.content,
            tier: self.tier.parse()?,
            validation_count: self.validation_count,
            confidence: self.confidence,
            created_at,
            updated_at,
            trigger_phrases: parse_trigger_phrases(self.trigger_phrases.as_deref()),
            learned_triggers: TermEntry::parse_list(self.learned_triggers.as_deref()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fts_query_quotes_words() {
        assert_eq!(fts_query("foo bar").as_deref(), Some("\"foo\" OR \"bar\""));
        assert_eq!(fts_query("say \"hi\"").as_deref(), Some("\"say\" OR \"\"\"hi\"\"\""));
        assert!(fts_query("   ").is_none());
    }

    #[test]
    fn trigger_phrases_accept_json_or_csv() {
        assert_eq!(parse_trigger_phrases(Some(r#"["a","b"]"#)), vec!["a", "b"]);
        assert_eq!(parse_trigger_phrases(Some("a, b,,c")), vec!["a", "b", "c"]);
        assert!(parse_trigger_phrases(None).is_empty());
        assert!(parse_trigger_phrases(Some("  ")).is_empty());
    }
}
