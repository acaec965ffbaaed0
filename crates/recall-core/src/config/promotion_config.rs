use serde::{Deserialize, Serialize};

use super::defaults;
use crate::constants::MS_PER_HOUR;

/// Auto-promotion thresholds and the global rolling-window rate limit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PromotionConfig {
    /// Positive validations required for normal → important.
    pub important_threshold: u32,
    /// Positive validations required for important → critical.
    pub critical_threshold: u32,
    /// Promotions allowed across all memories inside one window.
    pub max_promotions_per_window: u32,
    /// Rolling window length.
    pub window_hours: u32,
}

impl PromotionConfig {
    /// Window length in milliseconds.
    pub fn window_ms(&self) -> i64 {
        i64::from(self.window_hours) * MS_PER_HOUR
    }
}

impl Default for PromotionConfig {
    fn default() -> Self {
        Self {
            important_threshold: defaults::DEFAULT_PROMOTE_TO_IMPORTANT_THRESHOLD,
            critical_threshold: defaults::DEFAULT_PROMOTE_TO_CRITICAL_THRESHOLD,
            max_promotions_per_window: defaults::DEFAULT_MAX_PROMOTIONS_PER_WINDOW,
            window_hours: defaults::DEFAULT_PROMOTION_WINDOW_HOURS,
        }
    }
}
