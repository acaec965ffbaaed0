use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::RecallError;
use crate::memory::MemoryId;

/// What happened to a memory's learned triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackAction {
    Add,
    Expire,
    Clear,
}

impl FeedbackAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Expire => "expire",
            Self::Clear => "clear",
        }
    }
}

impl fmt::Display for FeedbackAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeedbackAction {
    type Err = RecallError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "add" => Ok(Self::Add),
            "expire" => Ok(Self::Expire),
            "clear" => Ok(Self::Clear),
            other => Err(RecallError::InvalidAuditAction {
                value: other.to_string(),
            }),
        }
    }
}

/// Append-only provenance record for the learning loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearnedFeedbackAuditEntry {
    pub memory_id: MemoryId,
    pub action: FeedbackAction,
    pub terms: Vec<String>,
    /// Query id for `add`, `ttl_expiry` for `expire`, `rollback` for `clear`.
    pub source: String,
    pub timestamp_ms: i64,
    /// Legacy column. Always false.
    pub shadow_mode: bool,
}
