use serde::{Deserialize, Serialize};

use super::defaults;
use crate::constants::MS_PER_DAY;
use crate::errors::{RecallError, RecallResult};

/// Negative-feedback confidence signal configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NegativeFeedbackConfig {
    /// When false the ranking stage skips the demotion entirely.
    pub enabled: bool,
    /// Penalty contributed by each negative validation.
    pub penalty_per_negative: f64,
    /// Lowest multiplier a memory can be pushed to.
    pub floor: f64,
    /// Days for the penalty to halve after the last negative validation.
    pub recovery_half_life_days: u32,
}

impl NegativeFeedbackConfig {
    /// Recovery half-life in milliseconds.
    pub fn recovery_half_life_ms(&self) -> i64 {
        i64::from(self.recovery_half_life_days) * MS_PER_DAY
    }

    /// Reject values that would make the multiplier meaningless.
    pub fn validate(&self) -> RecallResult<()> {
        if !(0.0..=1.0).contains(&self.floor) {
            return Err(RecallError::ConfigError(format!(
                "negative_feedback.floor must be between 0.0 and 1.0, got {}",
                self.floor
            )));
        }
        if !self.penalty_per_negative.is_finite() || self.penalty_per_negative < 0.0 {
            return Err(RecallError::ConfigError(format!(
                "negative_feedback.penalty_per_negative must be a finite value >= 0.0, got {}",
                self.penalty_per_negative
            )));
        }
        Ok(())
    }
}

impl Default for NegativeFeedbackConfig {
    fn default() -> Self {
        Self {
            enabled: defaults::DEFAULT_NEGATIVE_FEEDBACK_ENABLED,
            penalty_per_negative: defaults::DEFAULT_NEGATIVE_PENALTY_PER_VALIDATION,
            floor: defaults::DEFAULT_CONFIDENCE_MULTIPLIER_FLOOR,
            recovery_half_life_days: defaults::DEFAULT_RECOVERY_HALF_LIFE_DAYS,
        }
    }
}
