use crate::errors::RecallResult;
use crate::memory::{MemoryId, Tier};
use crate::models::PromotionAuditEntry;

/// Tier and validation count of one memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierState {
    pub memory_id: MemoryId,
    pub tier: Tier,
    pub validation_count: u32,
}

/// Outcome of an atomic promotion write.
#[derive(Debug, Clone, PartialEq)]
pub enum PromotionWrite {
    /// Tier updated and audit row appended.
    Committed(PromotionAuditEntry),
    /// The window already holds `in_window` promotions; nothing written.
    RateLimited { in_window: u32 },
    /// The memory is gone or no longer at `previous_tier`; nothing written.
    TierChanged { current: Option<Tier> },
}

/// Persistence for the auto-promotion engine.
pub trait IPromotionStore: Send + Sync {
    fn tier_state(&self, id: MemoryId) -> RecallResult<Option<TierState>>;

    /// States of every memory currently at one of `tiers`.
    fn tier_states(&self, tiers: &[Tier]) -> RecallResult<Vec<TierState>>;

    /// In ONE transaction: count audit rows with `promoted_at_ms >= window_start_ms`;
    /// reject when the count has reached `max_in_window`; otherwise move the
    /// memory from `entry.previous_tier` to `entry.new_tier` and append `entry`.
    fn promote_within_window(
        &self,
        entry: &PromotionAuditEntry,
        window_start_ms: i64,
        max_in_window: u32,
    ) -> RecallResult<PromotionWrite>;

    /// Audit rows with `promoted_at_ms >= since_ms`.
    fn promotions_since(&self, since_ms: i64) -> RecallResult<u32>;

    /// Most recent audit rows first.
    fn recent_promotions(&self, limit: usize) -> RecallResult<Vec<PromotionAuditEntry>>;
}
