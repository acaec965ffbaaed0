use serde::{Deserialize, Serialize};

use crate::memory::MemoryId;

/// A single "not useful" validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NegativeFeedbackEvent {
    pub memory_id: MemoryId,
    pub created_at_ms: i64,
}

/// Negative events for one memory, aggregated on demand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NegativeFeedbackStats {
    pub negative_count: u32,
    pub last_negative_at_ms: Option<i64>,
}
