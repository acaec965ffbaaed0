use serde::{Deserialize, Serialize};

use super::defaults;

/// Folder scoring configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FolderScoringConfig {
    /// Recency decay rate: 0.10 gives 0.5 at 10 days.
    pub decay_rate: f64,
    /// Memory count at which the activity score saturates.
    pub max_activity_memories: usize,
    /// Validation component until real folder-level feedback exists.
    pub validation_score: f64,
}

impl Default for FolderScoringConfig {
    fn default() -> Self {
        Self {
            decay_rate: defaults::DEFAULT_RECENCY_DECAY_RATE,
            max_activity_memories: defaults::DEFAULT_MAX_ACTIVITY_MEMORIES,
            validation_score: defaults::DEFAULT_VALIDATION_SCORE,
        }
    }
}
