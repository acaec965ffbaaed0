use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::term_entry::TermEntry;
use super::tier::Tier;

/// Row id of a memory in the memory index.
pub type MemoryId = i64;

/// A stored memory as seen by the scoring core.
///
/// The record is owned by the storage layer. Scoring engines only mutate
/// `tier`, read `validation_count`, and rewrite `learned_triggers`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryRecord {
    /// Assigned by the store on insert; ignored by `create`.
    pub id: MemoryId,
    /// Project folder the memory belongs to.
    pub folder: String,
    pub title: String,
    pub content: String,
    pub tier: Tier,
    /// Positive validations recorded by the validation handlers.
    pub validation_count: u32,
    pub confidence: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Organic trigger phrases. Indexed lexically.
    pub trigger_phrases: Vec<String>,
    /// Learned trigger terms. Never indexed lexically.
    pub learned_triggers: Vec<TermEntry>,
}

impl MemoryRecord {
    /// A fresh memory: normal tier, zero validations, no learned triggers.
    pub fn new(folder: &str, title: &str, now: DateTime<Utc>) -> Self {
        Self {
            id: 0,
            folder: folder.to_string(),
            title: title.to_string(),
            content: String::new(),
            tier: Tier::Normal,
            validation_count: 0,
            confidence: 1.0,
            created_at: now,
            updated_at: now,
            trigger_phrases: Vec::new(),
            learned_triggers: Vec::new(),
        }
    }

    /// Learned triggers still alive at `now_secs`.
    pub fn live_learned_triggers(&self, now_secs: i64) -> impl Iterator<Item = &TermEntry> {
        self.learned_triggers
            .iter()
            .filter(move |e| !e.is_expired(now_secs))
    }
}
