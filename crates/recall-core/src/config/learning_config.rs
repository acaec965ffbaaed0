use serde::{Deserialize, Serialize};

use super::defaults;
use crate::constants::SECS_PER_DAY;

/// Trigger learning configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LearningConfig {
    /// Gates the whole learning loop: recording, applying, and matching.
    pub enabled: bool,
    /// Lifetime of a learned term.
    pub term_ttl_days: u32,
    /// New terms accepted from a single selection event.
    pub max_terms_per_selection: usize,
    /// Live learned terms allowed per memory. Extra candidates are dropped, not swapped in.
    pub max_terms_per_memory: usize,
    /// Selections ranked at or above this position teach nothing.
    pub top_n_exclusion: u32,
    /// Memories younger than this are not learned from.
    pub min_memory_age_hours: u32,
    /// Shortest learnable term, in characters.
    pub min_term_length: usize,
    /// Discount applied to learned-trigger matches relative to organic ones.
    pub learned_trigger_weight: f64,
    /// Interval between background expiry sweeps.
    pub sweep_interval_secs: u64,
}

impl LearningConfig {
    /// Term lifetime in seconds.
    pub fn term_ttl_secs(&self) -> i64 {
        i64::from(self.term_ttl_days) * SECS_PER_DAY
    }

    /// Minimum memory age in seconds.
    pub fn min_memory_age_secs(&self) -> i64 {
        i64::from(self.min_memory_age_hours) * 3600
    }
}

impl Default for LearningConfig {
    fn default() -> Self {
        Self {
            enabled: defaults::DEFAULT_LEARNING_ENABLED,
            term_ttl_days: defaults::DEFAULT_LEARNED_TERM_TTL_DAYS,
            max_terms_per_selection: defaults::DEFAULT_MAX_TERMS_PER_SELECTION,
            max_terms_per_memory: defaults::DEFAULT_MAX_TERMS_PER_MEMORY,
            top_n_exclusion: defaults::DEFAULT_TOP_N_EXCLUSION,
            min_memory_age_hours: defaults::DEFAULT_MIN_MEMORY_AGE_HOURS,
            min_term_length: defaults::DEFAULT_MIN_TERM_LENGTH,
            learned_trigger_weight: defaults::DEFAULT_LEARNED_TRIGGER_WEIGHT,
            sweep_interval_secs: defaults::DEFAULT_SWEEP_INTERVAL_SECS,
        }
    }
}
