use recall_core::config::NegativeFeedbackConfig;
use recall_core::models::NegativeFeedbackStats;

use crate::multiplier::{compute_breakdown, MultiplierBreakdown, BASE_MULTIPLIER};

/// Negative-feedback demotion with configured constants.
#[derive(Debug, Clone, Default)]
pub struct NegativeFeedbackSignal {
    config: NegativeFeedbackConfig,
}

impl NegativeFeedbackSignal {
    pub fn new(config: NegativeFeedbackConfig) -> Self {
        Self { config }
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    pub fn config(&self) -> &NegativeFeedbackConfig {
        &self.config
    }

    /// Multiplier for the aggregated stats of one memory. 1.0 when disabled.
    pub fn multiplier(&self, stats: &NegativeFeedbackStats, now_ms: i64) -> f64 {
        if !self.config.enabled {
            return BASE_MULTIPLIER;
        }
        self.breakdown(stats, now_ms).multiplier
    }

    /// `score × multiplier(stats)`.
    pub fn apply(&self, score: f64, stats: &NegativeFeedbackStats, now_ms: i64) -> f64 {
        score * self.multiplier(stats, now_ms)
    }

    /// Full breakdown, ignoring the enabled flag.
    pub fn breakdown(&self, stats: &NegativeFeedbackStats, now_ms: i64) -> MultiplierBreakdown {
        compute_breakdown(
            i64::from(stats.negative_count),
            stats.last_negative_at_ms,
            now_ms,
            self.config.penalty_per_negative,
            self.config.floor,
            self.config.recovery_half_life_ms(),
        )
    }
}
