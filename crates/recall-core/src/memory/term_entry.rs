use serde::{Deserialize, Serialize};

/// One learned trigger term attached to a memory.
///
/// Stored as a JSON array in the `learned_triggers` column, which is never
/// part of the lexical index. Timestamps are epoch seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TermEntry {
    /// Lowercased term.
    pub term: String,
    pub added_at: i64,
    /// Provenance: the query id that taught this term.
    pub source: String,
    pub expires_at: i64,
}

impl TermEntry {
    /// Build an entry that expires `ttl_secs` after `now_secs`.
    pub fn new(term: &str, source: &str, now_secs: i64, ttl_secs: i64) -> Self {
        Self {
            term: term.trim().to_lowercase(),
            added_at: now_secs,
            source: source.to_string(),
            expires_at: now_secs + ttl_secs,
        }
    }

    /// An entry is dead from the instant `now` reaches `expires_at`.
    pub fn is_expired(&self, now_secs: i64) -> bool {
        self.expires_at <= now_secs
    }

    /// Parse a stored column value. Anything unreadable is treated as empty.
    pub fn parse_list(raw: Option<&str>) -> Vec<TermEntry> {
        match raw {
            None => Vec::new(),
            Some(s) if s.trim().is_empty() || s == crate::constants::LEARNED_TRIGGERS_EMPTY => {
                Vec::new()
            }
            Some(s) => serde_json::from_str(s).unwrap_or_default(),
        }
    }

    /// Serialize a list for storage.
    pub fn serialize_list(entries: &[TermEntry]) -> crate::errors::RecallResult<String> {
        Ok(serde_json::to_string(entries)?)
    }
}
