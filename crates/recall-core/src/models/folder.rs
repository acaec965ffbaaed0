use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::memory::Tier;

/// The slice of a memory the folder scorer needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderMemory {
    pub folder: String,
    pub tier: Tier,
    /// Last update (falling back to creation). `None` when unparseable.
    pub updated_at: Option<DateTime<Utc>>,
}

impl FolderMemory {
    pub fn new(folder: &str, tier: Tier, updated_at: Option<DateTime<Utc>>) -> Self {
        Self {
            folder: folder.to_string(),
            tier,
            updated_at,
        }
    }
}

/// Derived ranking of one folder. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FolderScore {
    pub folder: String,
    /// Leaf name for display, suffixed with `(archived)` when applicable.
    pub simplified: String,
    pub count: usize,
    pub score: f64,
    pub recency_score: f64,
    pub importance_score: f64,
    pub activity_score: f64,
    pub validation_score: f64,
    pub last_activity: DateTime<Utc>,
    pub is_archived: bool,
    pub top_tier: Tier,
}
