//! FeedbackStage: learned-trigger boost, then negative-feedback demotion.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, warn};

use recall_core::clock::{Clock, SystemClock};
use recall_core::memory::MemoryId;
use recall_core::models::NegativeFeedbackStats;
use recall_core::traits::INegativeFeedbackStore;
use recall_decay::NegativeFeedbackSignal;
use recall_learning::LearningEngine;

/// A search result entering or leaving the stage. Scores live in `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedResult {
    pub memory_id: MemoryId,
    pub score: f64,
}

impl RankedResult {
    pub fn new(memory_id: MemoryId, score: f64) -> Self {
        Self { memory_id, score }
    }
}

/// Adjusts fused scores with user feedback.
///
/// A learned-trigger match adds `learned_trigger_weight × match.weight`
/// (strongest match per memory) capped at 1.0. Negative feedback then
/// multiplies by the confidence multiplier. A failing data source is logged
/// and skipped.
///
/// Store calls are synchronous. Over the SQLite store, run the stage from sync
/// code or inside `spawn_blocking`, never directly on a tokio worker: the
/// writer connection uses `blocking_lock`.
pub struct FeedbackStage {
    learning: Arc<LearningEngine>,
    negative_store: Arc<dyn INegativeFeedbackStore>,
    signal: NegativeFeedbackSignal,
    clock: Arc<dyn Clock>,
}

impl FeedbackStage {
    pub fn new(
        learning: Arc<LearningEngine>,
        negative_store: Arc<dyn INegativeFeedbackStore>,
        signal: NegativeFeedbackSignal,
    ) -> Self {
        Self::with_clock(learning, negative_store, signal, Arc::new(SystemClock))
    }

    pub fn with_clock(
        learning: Arc<LearningEngine>,
        negative_store: Arc<dyn INegativeFeedbackStore>,
        signal: NegativeFeedbackSignal,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            learning,
            negative_store,
            signal,
            clock,
        }
    }

    /// Apply both signals and re-sort by adjusted score, highest first.
    pub fn apply(&self, mut results: Vec<RankedResult>, query: &str) -> Vec<RankedResult> {
        if results.is_empty() {
            return results;
        }

        let boosts = self.learned_boosts(query);
        let stats = self.negative_stats(&results);
        let now_ms = self.clock.now_ms();

        for result in &mut results {
            if let Some(boost) = boosts.get(&result.memory_id).filter(|b| **b > 0.0) {
                result.score = (result.score + boost).min(1.0);
            }
            if let Some(s) = stats.get(&result.memory_id).filter(|s| s.negative_count > 0) {
                result.score = self.signal.apply(result.score, s, now_ms);
            }
        }

        results.sort_by(|a, b| b.score.total_cmp(&a.score));
        debug!(
            results = results.len(),
            boosted = boosts.len(),
            demoted = stats.len(),
            "feedback signals applied"
        );
        results
    }

    fn learned_boosts(&self, query: &str) -> HashMap<MemoryId, f64> {
        let weight = self.learning.config().learned_trigger_weight;
        let mut boosts: HashMap<MemoryId, f64> = HashMap::new();
        for m in self.learning.query_learned_triggers(query) {
            let boost = weight * m.weight;
            boosts
                .entry(m.memory_id)
                .and_modify(|b| *b = b.max(boost))
                .or_insert(boost);
        }
        boosts
    }

    fn negative_stats(&self, results: &[RankedResult]) -> HashMap<MemoryId, NegativeFeedbackStats> {
        if !self.signal.is_enabled() {
            return HashMap::new();
        }
        let ids: Vec<MemoryId> = results.iter().map(|r| r.memory_id).collect();
        match self.negative_store.negative_feedback_stats(&ids) {
            Ok(stats) => stats,
            Err(e) => {
                warn!(error = %e, "negative feedback stats unavailable, skipping demotion");
                HashMap::new()
            }
        }
    }
}
