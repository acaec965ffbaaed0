//! LearningEngine: selection recording, learned-trigger merge, query matching,
//! TTL expiry, rollback, and the feedback audit.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, error, info, warn};

use recall_core::clock::{Clock, SystemClock};
use recall_core::config::LearningConfig;
use recall_core::errors::{RecallError, RecallResult};
use recall_core::memory::{MemoryId, TermEntry};
use recall_core::models::{FeedbackAction, LearnedFeedbackAuditEntry};
use recall_core::traits::ILearnedTriggerStore;

use crate::denylist::denylist;
use crate::extraction::extract_with_limits;
use crate::matching;
use crate::outcome::{LearnedTriggerMatch, SelectionOutcome, SelectionReason};

const EXPIRY_SOURCE: &str = "ttl_expiry";
const ROLLBACK_SOURCE: &str = "rollback";

/// Trigger learning engine.
///
/// Only `record_selection` and `query_learned_triggers` honour the feature
/// flag. Maintenance and rollback always run so a disabled deployment can
/// still be cleaned up.
pub struct LearningEngine {
    store: Arc<dyn ILearnedTriggerStore>,
    clock: Arc<dyn Clock>,
    config: LearningConfig,
}

impl LearningEngine {
    pub fn new(store: Arc<dyn ILearnedTriggerStore>, config: LearningConfig) -> Self {
        Self::with_clock(store, config, Arc::new(SystemClock))
    }

    pub fn with_clock(
        store: Arc<dyn ILearnedTriggerStore>,
        config: LearningConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            clock,
            config,
        }
    }

    pub fn config(&self) -> &LearningConfig {
        &self.config
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Always false. Selections are applied immediately; the reason code
    /// `shadow_period` is kept only for compatibility.
    pub fn is_in_shadow_period(&self) -> bool {
        false
    }

    /// Learn from a user picking `memory_id` at 1-based `result_rank`.
    pub fn record_selection(
        &self,
        query_id: &str,
        memory_id: MemoryId,
        query_terms: &[String],
        result_rank: u32,
    ) -> SelectionOutcome {
        if !self.config.enabled {
            return SelectionOutcome::rejected(SelectionReason::FeatureDisabled);
        }
        if result_rank <= self.config.top_n_exclusion {
            return SelectionOutcome::rejected(SelectionReason::Top3Exclusion);
        }

        let target = match self.store.learning_target(memory_id) {
            Ok(Some(t)) => t,
            Ok(None) => return SelectionOutcome::rejected(SelectionReason::MemoryNotFound),
            Err(e) => {
                error!(memory_id, error = %e, "selection lookup failed");
                return SelectionOutcome::rejected(SelectionReason::Error);
            }
        };

        // No readable creation time: the age gate cannot apply.
        if let Some(created_at) = target.created_at {
            let age_secs = self.clock.now_secs() - created_at.timestamp();
            if age_secs < self.config.min_memory_age_secs() {
                return SelectionOutcome::rejected(SelectionReason::MemoryTooNew);
            }
        }

        let terms = extract_with_limits(
            query_terms,
            &target.trigger_phrases,
            denylist(),
            self.config.min_term_length,
            self.config.max_terms_per_selection,
        );
        if terms.is_empty() {
            return SelectionOutcome::rejected(SelectionReason::NoLearnableTerms);
        }

        self.audit(memory_id, FeedbackAction::Add, terms.clone(), query_id);

        if self.is_in_shadow_period() {
            return SelectionOutcome {
                terms,
                applied: false,
                reason: Some(SelectionReason::ShadowPeriod),
            };
        }

        match self.apply_learned_triggers(memory_id, &terms, query_id) {
            Ok(added) => {
                debug!(memory_id, query_id, added = added.len(), "selection learned");
                SelectionOutcome::applied(terms)
            }
            Err(e) => {
                error!(memory_id, query_id, error = %e, "applying learned triggers failed");
                SelectionOutcome::rejected(SelectionReason::Error)
            }
        }
    }

    /// Merge `terms` into the memory's learned triggers in one store transaction.
    ///
    /// Expired entries are dropped first and do not count toward the cap.
    /// Terms already present are skipped. Once the memory holds
    /// `max_terms_per_memory` live entries the rest are discarded; nothing is
    /// evicted. Returns the entries actually added.
    pub fn apply_learned_triggers(
        &self,
        memory_id: MemoryId,
        terms: &[String],
        source: &str,
    ) -> RecallResult<Vec<TermEntry>> {
        let now = self.clock.now_secs();
        let ttl = self.config.term_ttl_secs();
        let cap = self.config.max_terms_per_memory;

        let mut added = Vec::new();
        let mut expired = Vec::new();
        self.store
            .update_learned_triggers(memory_id, &mut |current: &[TermEntry]| {
                added.clear();
                expired.clear();
                let (live, dead): (Vec<TermEntry>, Vec<TermEntry>) =
                    current.iter().cloned().partition(|e| !e.is_expired(now));
                expired.extend(dead.into_iter().map(|e| e.term));

                let mut known: HashSet<String> =
                    live.iter().map(|e| e.term.to_lowercase()).collect();
                for term in terms {
                    let term = term.trim().to_lowercase();
                    if term.is_empty() || known.contains(&term) {
                        continue;
                    }
                    if live.len() + added.len() >= cap {
                        break;
                    }
                    known.insert(term.clone());
                    added.push(TermEntry::new(&term, source, now, ttl));
                }

                if added.is_empty() && expired.is_empty() {
                    return None;
                }
                let mut next = live;
                next.extend(added.iter().cloned());
                Some(next)
            })?;

        if !expired.is_empty() {
            self.audit(memory_id, FeedbackAction::Expire, expired, EXPIRY_SOURCE);
        }
        Ok(added)
    }

    /// Memories whose live learned triggers overlap `query`, strongest first.
    pub fn query_learned_triggers(&self, query: &str) -> Vec<LearnedTriggerMatch> {
        if !self.config.enabled || self.is_in_shadow_period() {
            return Vec::new();
        }
        let terms = matching::query_terms(query, self.config.min_term_length);
        if terms.is_empty() {
            return Vec::new();
        }

        let rows = match self.store.memories_with_learned_triggers() {
            Ok(rows) => rows,
            Err(e) => {
                error!(error = %e, "learned trigger query failed");
                return Vec::new();
            }
        };

        let now = self.clock.now_secs();
        let mut matches: Vec<LearnedTriggerMatch> = rows
            .iter()
            .filter_map(|(id, entries)| {
                matching::match_memory(
                    *id,
                    entries,
                    &terms,
                    now,
                    self.config.learned_trigger_weight,
                )
            })
            .collect();
        matches.sort_by(|a, b| {
            b.weight
                .total_cmp(&a.weight)
                .then(a.memory_id.cmp(&b.memory_id))
        });
        matches
    }

    /// Drop expired learned terms everywhere. Returns the number of memories changed.
    pub fn expire_learned_terms(&self) -> usize {
        let rows = match self.store.memories_with_learned_triggers() {
            Ok(rows) => rows,
            Err(e) => {
                error!(error = %e, "learned term expiry scan failed");
                return 0;
            }
        };

        let now = self.clock.now_secs();
        let mut changed = 0;
        for (memory_id, _) in rows {
            let mut removed = Vec::new();
            let result = self
                .store
                .update_learned_triggers(memory_id, &mut |current: &[TermEntry]| {
                    removed.clear();
                    let (live, dead): (Vec<TermEntry>, Vec<TermEntry>) =
                        current.iter().cloned().partition(|e| !e.is_expired(now));
                    if dead.is_empty() {
                        return None;
                    }
                    removed.extend(dead.into_iter().map(|e| e.term));
                    Some(live)
                });

            match result {
                Ok(true) => {
                    changed += 1;
                    self.audit(memory_id, FeedbackAction::Expire, removed, EXPIRY_SOURCE);
                }
                Ok(false) => {}
                // Deleted between the scan and the update.
                Err(RecallError::MemoryNotFound { .. }) => {}
                Err(e) => error!(memory_id, error = %e, "learned term expiry failed"),
            }
        }

        if changed > 0 {
            info!(memories = changed, "expired learned terms");
        }
        changed
    }

    /// Remove every learned trigger from every memory. Returns the number of memories cleared.
    pub fn clear_all_learned_triggers(&self) -> usize {
        let cleared = match self.store.clear_learned_triggers() {
            Ok(cleared) => cleared,
            Err(e) => {
                error!(error = %e, "learned trigger rollback failed");
                return 0;
            }
        };

        for (memory_id, entries) in &cleared {
            let terms = entries.iter().map(|e| e.term.clone()).collect();
            self.audit(*memory_id, FeedbackAction::Clear, terms, ROLLBACK_SOURCE);
        }
        warn!(memories = cleared.len(), "cleared all learned triggers");
        cleared.len()
    }

    /// Audit entries, most recent first.
    pub fn get_audit_log(
        &self,
        memory_id: Option<MemoryId>,
        limit: usize,
    ) -> Vec<LearnedFeedbackAuditEntry> {
        match self.store.feedback_audit(memory_id, limit) {
            Ok(entries) => entries,
            Err(e) => {
                error!(error = %e, "reading learned feedback audit failed");
                Vec::new()
            }
        }
    }

    /// Fails if learned triggers can reach the lexical index.
    pub fn verify_isolation(&self) -> RecallResult<()> {
        self.store.verify_fts_isolation()
    }

    fn audit(&self, memory_id: MemoryId, action: FeedbackAction, terms: Vec<String>, source: &str) {
        let entry = LearnedFeedbackAuditEntry {
            memory_id,
            action,
            terms,
            source: source.to_string(),
            timestamp_ms: self.clock.now_ms(),
            shadow_mode: false,
        };
        if let Err(e) = self.store.append_feedback_audit(&entry) {
            warn!(memory_id, action = %action, error = %e, "feedback audit write failed");
        }
    }
}
