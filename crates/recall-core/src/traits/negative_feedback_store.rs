use std::collections::HashMap;

use crate::errors::RecallResult;
use crate::memory::MemoryId;
use crate::models::{NegativeFeedbackEvent, NegativeFeedbackStats};

/// Append-only store of "not useful" validations.
pub trait INegativeFeedbackStore: Send + Sync {
    fn record_negative_feedback(&self, event: &NegativeFeedbackEvent) -> RecallResult<()>;

    /// Batch aggregate for the given memories. Ids with no events are absent.
    fn negative_feedback_stats(
        &self,
        ids: &[MemoryId],
    ) -> RecallResult<HashMap<MemoryId, NegativeFeedbackStats>>;
}
