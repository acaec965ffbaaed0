//! PromotionEngine: eligibility checks, rate-limited execution, batch scan.

use std::sync::Arc;

use tracing::{error, info, warn};

use recall_core::clock::{Clock, SystemClock};
use recall_core::config::PromotionConfig;
use recall_core::errors::RecallResult;
use recall_core::memory::{MemoryId, Tier};
use recall_core::models::PromotionAuditEntry;
use recall_core::traits::{IPromotionStore, PromotionWrite, TierState};

use crate::reason::PromotionReason;
use crate::rules::{self, PromotionRule};

/// Outcome of a promotion check or execution.
///
/// For a check, `promoted` means "eligible". Tiers are `None` when the memory
/// could not be read.
#[derive(Debug, Clone, PartialEq)]
pub struct PromotionResult {
    pub memory_id: MemoryId,
    pub promoted: bool,
    pub previous_tier: Option<Tier>,
    /// Equal to `previous_tier` unless promoted.
    pub new_tier: Option<Tier>,
    pub validation_count: u32,
    pub reason: PromotionReason,
}

impl PromotionResult {
    fn unknown(memory_id: MemoryId, reason: PromotionReason) -> Self {
        Self {
            memory_id,
            promoted: false,
            previous_tier: None,
            new_tier: None,
            validation_count: 0,
            reason,
        }
    }

    fn unchanged(state: &TierState, reason: PromotionReason) -> Self {
        Self {
            memory_id: state.memory_id,
            promoted: false,
            previous_tier: Some(state.tier),
            new_tier: Some(state.tier),
            validation_count: state.validation_count,
            reason,
        }
    }

    /// Same memory and tiers, not promoted, with a new reason.
    fn blocked(self, reason: PromotionReason) -> Self {
        Self {
            promoted: false,
            new_tier: self.previous_tier,
            reason,
            ..self
        }
    }

    /// Reason as its machine-readable string.
    pub fn reason_code(&self) -> String {
        self.reason.to_string()
    }
}

/// Auto-promotion engine. Holds no locks; atomicity is the store's job.
///
/// Over the SQLite store, call from sync code or `spawn_blocking`, not
/// directly on a tokio worker.
pub struct PromotionEngine {
    store: Arc<dyn IPromotionStore>,
    clock: Arc<dyn Clock>,
    config: PromotionConfig,
    rules: Vec<PromotionRule>,
}

impl PromotionEngine {
    pub fn new(store: Arc<dyn IPromotionStore>, config: PromotionConfig) -> Self {
        Self::with_clock(store, config, Arc::new(SystemClock))
    }

    pub fn with_clock(
        store: Arc<dyn IPromotionStore>,
        config: PromotionConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let rules = rules::all_rules(&config);
        Self {
            store,
            clock,
            config,
            rules,
        }
    }

    pub fn config(&self) -> &PromotionConfig {
        &self.config
    }

    pub fn rules(&self) -> &[PromotionRule] {
        &self.rules
    }

    /// Read-only eligibility check. Never fails; storage errors become `reason: error`.
    pub fn check_eligibility(&self, memory_id: MemoryId) -> PromotionResult {
        match self.store.tier_state(memory_id) {
            Ok(Some(state)) => self.evaluate(&state),
            Ok(None) => PromotionResult::unknown(memory_id, PromotionReason::MemoryNotFound),
            Err(e) => {
                error!(memory_id, error = %e, "promotion eligibility check failed");
                PromotionResult::unknown(memory_id, PromotionReason::Error)
            }
        }
    }

    /// Evaluate a known tier state against the transition table.
    pub fn evaluate(&self, state: &TierState) -> PromotionResult {
        if !rules::is_promotable(state.tier) {
            return PromotionResult::unchanged(state, PromotionReason::TierNotPromotable(state.tier));
        }
        let Some(rule) = rules::find_rule(&self.rules, state.tier) else {
            return PromotionResult::unchanged(state, PromotionReason::NoPromotionPath(state.tier));
        };
        if state.validation_count < rule.threshold {
            return PromotionResult::unchanged(
                state,
                PromotionReason::BelowThreshold {
                    count: state.validation_count,
                    threshold: rule.threshold,
                },
            );
        }
        PromotionResult {
            memory_id: state.memory_id,
            promoted: true,
            previous_tier: Some(state.tier),
            new_tier: Some(rule.to),
            validation_count: state.validation_count,
            reason: PromotionReason::ThresholdMet {
                count: state.validation_count,
                threshold: rule.threshold,
            },
        }
    }

    /// Promote the memory if eligible and the rolling window has room.
    ///
    /// The window count, tier update, and audit append happen in one store
    /// transaction. Never fails; storage errors become `reason: error`.
    pub fn execute_promotion(&self, memory_id: MemoryId) -> PromotionResult {
        let check = self.check_eligibility(memory_id);
        if !check.promoted {
            return check;
        }
        let (Some(previous_tier), Some(new_tier)) = (check.previous_tier, check.new_tier) else {
            return check.blocked(PromotionReason::Error);
        };

        let now_ms = self.clock.now_ms();
        let entry = PromotionAuditEntry {
            memory_id,
            previous_tier,
            new_tier,
            validation_count: check.validation_count,
            promoted_at_ms: now_ms,
        };
        let window_start_ms = now_ms - self.config.window_ms();

        match self.store.promote_within_window(
            &entry,
            window_start_ms,
            self.config.max_promotions_per_window,
        ) {
            Ok(PromotionWrite::Committed(_)) => {
                info!(
                    memory_id,
                    from = %previous_tier,
                    to = %new_tier,
                    validations = check.validation_count,
                    "memory promoted"
                );
                check
            }
            Ok(PromotionWrite::RateLimited { in_window }) => {
                warn!(
                    memory_id,
                    in_window,
                    max = self.config.max_promotions_per_window,
                    window_hours = self.config.window_hours,
                    "promotion rate limited"
                );
                check.blocked(PromotionReason::WindowRateLimited {
                    max: self.config.max_promotions_per_window,
                    window_hours: self.config.window_hours,
                })
            }
            Ok(PromotionWrite::TierChanged { current }) => {
                warn!(memory_id, ?current, "tier changed before promotion could commit");
                check.blocked(PromotionReason::TierChangedConcurrently)
            }
            Err(e) => {
                error!(memory_id, error = %e, "promotion write failed");
                check.blocked(PromotionReason::Error)
            }
        }
    }

    /// Every memory currently eligible. Read-only; ignores the rate limit.
    pub fn scan_for_promotions(&self) -> Vec<PromotionResult> {
        match self.try_scan() {
            Ok(results) => results,
            Err(e) => {
                error!(error = %e, "promotion scan failed");
                Vec::new()
            }
        }
    }

    fn try_scan(&self) -> RecallResult<Vec<PromotionResult>> {
        let sources: Vec<Tier> = self.rules.iter().map(|r| r.from).collect();
        let states = self.store.tier_states(&sources)?;
        Ok(states
            .iter()
            .map(|s| self.evaluate(s))
            .filter(|r| r.promoted)
            .collect())
    }

    /// Most recent promotions first. Empty on storage failure.
    pub fn recent_promotions(&self, limit: usize) -> Vec<PromotionAuditEntry> {
        self.store.recent_promotions(limit).unwrap_or_else(|e| {
            error!(error = %e, "reading promotion audit failed");
            Vec::new()
        })
    }

    /// Promotions still counted against the current window.
    pub fn promotions_in_window(&self) -> RecallResult<u32> {
        let since = self.clock.now_ms() - self.config.window_ms();
        self.store.promotions_since(since)
    }
}
