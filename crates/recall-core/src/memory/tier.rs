use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::RecallError;

/// Importance tier of a memory.
///
/// `Deprecated < Temporary < Normal < Important < Critical`. `Constitutional`
/// sits outside that ladder: it never decays and is never auto-promoted, but it
/// sorts above `Critical` when picking a folder's top tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Deprecated,
    Temporary,
    #[default]
    Normal,
    Important,
    Critical,
    Constitutional,
}

impl Tier {
    /// All tiers, highest first.
    pub const ALL_DESCENDING: [Tier; 6] = [
        Tier::Constitutional,
        Tier::Critical,
        Tier::Important,
        Tier::Normal,
        Tier::Temporary,
        Tier::Deprecated,
    ];

    /// Lowercase storage/wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Deprecated => "deprecated",
            Self::Temporary => "temporary",
            Self::Normal => "normal",
            Self::Important => "important",
            Self::Critical => "critical",
            Self::Constitutional => "constitutional",
        }
    }

    /// Weight used when averaging a folder's importance.
    pub fn weight(self) -> f64 {
        match self {
            Self::Constitutional | Self::Critical => 1.0,
            Self::Important => 0.8,
            Self::Normal => 0.5,
            Self::Temporary => 0.3,
            Self::Deprecated => 0.1,
        }
    }

    /// Constitutional memories are exempt from recency decay.
    pub fn decays(self) -> bool {
        self != Self::Constitutional
    }

    fn rank(self) -> u8 {
        match self {
            Self::Deprecated => 0,
            Self::Temporary => 1,
            Self::Normal => 2,
            Self::Important => 3,
            Self::Critical => 4,
            Self::Constitutional => 5,
        }
    }
}

impl PartialOrd for Tier {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Tier {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tier {
    type Err = RecallError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "deprecated" => Ok(Self::Deprecated),
            "temporary" => Ok(Self::Temporary),
            "normal" => Ok(Self::Normal),
            "important" => Ok(Self::Important),
            "critical" => Ok(Self::Critical),
            "constitutional" => Ok(Self::Constitutional),
            other => Err(RecallError::InvalidTier {
                value: other.to_string(),
            }),
        }
    }
}
