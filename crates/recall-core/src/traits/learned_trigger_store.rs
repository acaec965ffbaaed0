use chrono::{DateTime, Utc};

use crate::errors::RecallResult;
use crate::memory::{MemoryId, TermEntry};
use crate::models::LearnedFeedbackAuditEntry;

/// What the learning engine needs to decide whether, and what, to learn.
#[derive(Debug, Clone)]
pub struct LearningTarget {
    pub memory_id: MemoryId,
    /// `None` when the stored timestamp is missing or unparseable.
    pub created_at: Option<DateTime<Utc>>,
    pub trigger_phrases: Vec<String>,
    pub learned_triggers: Vec<TermEntry>,
}

/// Read-modify-write callback for a memory's learned triggers.
///
/// Receives the current entries; returns `Some(new)` to write or `None` to
/// leave the row untouched.
pub type TriggerUpdate<'a> = dyn FnMut(&[TermEntry]) -> Option<Vec<TermEntry>> + 'a;

/// Persistence for learned triggers. Every write touches only the dedicated
/// learned-triggers column, never the lexical index.
pub trait ILearnedTriggerStore: Send + Sync {
    fn learning_target(&self, id: MemoryId) -> RecallResult<Option<LearningTarget>>;

    /// Ids and entries of every memory with a non-empty learned-triggers list.
    fn memories_with_learned_triggers(&self) -> RecallResult<Vec<(MemoryId, Vec<TermEntry>)>>;

    /// Run `update` against the current entries inside one transaction.
    /// Returns `Ok(true)` when a new list was written.
    /// Fails with `MemoryNotFound` when the memory does not exist.
    fn update_learned_triggers(&self, id: MemoryId, update: &mut TriggerUpdate<'_>)
        -> RecallResult<bool>;

    /// Empty every learned-triggers list in one transaction, returning what was removed.
    fn clear_learned_triggers(&self) -> RecallResult<Vec<(MemoryId, Vec<TermEntry>)>>;

    fn append_feedback_audit(&self, entry: &LearnedFeedbackAuditEntry) -> RecallResult<()>;

    /// Most recent first, optionally filtered to one memory.
    fn feedback_audit(
        &self,
        memory_id: Option<MemoryId>,
        limit: usize,
    ) -> RecallResult<Vec<LearnedFeedbackAuditEntry>>;

    /// Fail with `FtsIsolationViolation` if learned triggers reach the lexical index.
    fn verify_fts_isolation(&self) -> RecallResult<()>;
}
