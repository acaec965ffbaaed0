use std::fmt;

use recall_core::memory::Tier;

/// Why a promotion check or execution came out the way it did.
///
/// `Display` renders the machine-readable reason string callers match on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromotionReason {
    MemoryNotFound,
    TierNotPromotable(Tier),
    NoPromotionPath(Tier),
    BelowThreshold { count: u32, threshold: u32 },
    ThresholdMet { count: u32, threshold: u32 },
    WindowRateLimited { max: u32, window_hours: u32 },
    /// Another writer moved the tier between check and write.
    TierChangedConcurrently,
    Error,
}

impl PromotionReason {
    /// True only for `ThresholdMet`.
    pub fn is_eligible(&self) -> bool {
        matches!(self, Self::ThresholdMet { .. })
    }
}

impl fmt::Display for PromotionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MemoryNotFound => f.write_str("memory_not_found"),
            Self::TierNotPromotable(tier) => write!(f, "tier_not_promotable:{tier}"),
            Self::NoPromotionPath(tier) => write!(f, "no_promotion_path_for_tier:{tier}"),
            Self::BelowThreshold { count, threshold } => {
                write!(f, "below_threshold:{count}/{threshold}")
            }
            Self::ThresholdMet { count, threshold } => {
                write!(f, "threshold_met:{count}>={threshold}")
            }
            Self::WindowRateLimited { max, window_hours } => {
                write!(f, "promotion_window_rate_limited:{max}/{window_hours}h")
            }
            Self::TierChangedConcurrently => f.write_str("tier_changed_concurrently"),
            Self::Error => f.write_str("error"),
        }
    }
}
