//! In-memory ILearnedTriggerStore for engine and sweeper tests.

#![allow(dead_code)]

use std::sync::Mutex;

use chrono::{DateTime, Utc};

use recall_core::errors::{RecallError, RecallResult, StorageError};
use recall_core::memory::{MemoryId, TermEntry};
use recall_core::models::LearnedFeedbackAuditEntry;
use recall_core::traits::{ILearnedTriggerStore, LearningTarget, TriggerUpdate};

#[derive(Default)]
pub struct MockStore {
    pub targets: Mutex<Vec<LearningTarget>>,
    pub audit: Mutex<Vec<LearnedFeedbackAuditEntry>>,
    pub fail_reads: bool,
    pub fail_writes: bool,
    pub fail_audit: bool,
}

fn locked() -> RecallError {
    RecallError::StorageError(StorageError::SqliteError {
        message: "database is locked".into(),
    })
}

impl MockStore {
    pub fn with_memory(id: MemoryId, created_at: DateTime<Utc>) -> Self {
        let store = Self::default();
        store.add_memory(id, created_at, Vec::new());
        store
    }

    pub fn add_memory(&self, id: MemoryId, created_at: DateTime<Utc>, learned: Vec<TermEntry>) {
        self.targets.lock().unwrap().push(LearningTarget {
            memory_id: id,
            created_at: Some(created_at),
            trigger_phrases: Vec::new(),
            learned_triggers: learned,
        });
    }

    pub fn learned(&self, id: MemoryId) -> Vec<TermEntry> {
        self.targets
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.memory_id == id)
            .map(|t| t.learned_triggers.clone())
            .unwrap_or_default()
    }
}

impl ILearnedTriggerStore for MockStore {
    fn learning_target(&self, id: MemoryId) -> RecallResult<Option<LearningTarget>> {
        if self.fail_reads {
            return Err(locked());
        }
        Ok(self
            .targets
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.memory_id == id)
            .cloned())
    }

    fn memories_with_learned_triggers(&self) -> RecallResult<Vec<(MemoryId, Vec<TermEntry>)>> {
        if self.fail_reads {
            return Err(locked());
        }
        Ok(self
            .targets
            .lock()
            .unwrap()
            .iter()
            .filter(|t| !t.learned_triggers.is_empty())
            .map(|t| (t.memory_id, t.learned_triggers.clone()))
            .collect())
    }

    fn update_learned_triggers(
        &self,
        id: MemoryId,
        update: &mut TriggerUpdate<'_>,
    ) -> RecallResult<bool> {
        if self.fail_writes {
            return Err(locked());
        }
        let mut targets = self.targets.lock().unwrap();
        let target = targets
            .iter_mut()
            .find(|t| t.memory_id == id)
            .ok_or(RecallError::MemoryNotFound { id })?;
        match update(&target.learned_triggers) {
            Some(next) => {
                target.learned_triggers = next;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn clear_learned_triggers(&self) -> RecallResult<Vec<(MemoryId, Vec<TermEntry>)>> {
        if self.fail_writes {
            return Err(locked());
        }
        let mut cleared = Vec::new();
        for t in self.targets.lock().unwrap().iter_mut() {
            if !t.learned_triggers.is_empty() {
                cleared.push((t.memory_id, std::mem::take(&mut t.learned_triggers)));
            }
        }
        Ok(cleared)
    }

    fn append_feedback_audit(&self, entry: &LearnedFeedbackAuditEntry) -> RecallResult<()> {
        if self.fail_audit {
            return Err(locked());
        }
        self.audit.lock().unwrap().push(entry.clone());
        Ok(())
    }

    fn feedback_audit(
        &self,
        memory_id: Option<MemoryId>,
        limit: usize,
    ) -> RecallResult<Vec<LearnedFeedbackAuditEntry>> {
        if self.fail_reads {
            return Err(locked());
        }
        Ok(self
            .audit
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|e| memory_id.map_or(true, |id| e.memory_id == id))
            .take(limit)
            .cloned()
            .collect())
    }

    fn verify_fts_isolation(&self) -> RecallResult<()> {
        Ok(())
    }
}
