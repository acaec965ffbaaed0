use serde::{Deserialize, Serialize};

use crate::memory::{MemoryId, Tier};

/// One row of the append-only promotion log.
///
/// The rolling-window rate limit counts these rows by `promoted_at_ms`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromotionAuditEntry {
    pub memory_id: MemoryId,
    pub previous_tier: Tier,
    pub new_tier: Tier,
    pub validation_count: u32,
    pub promoted_at_ms: i64,
}
