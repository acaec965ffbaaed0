use recall_core::config::defaults;
use recall_core::constants::MS_PER_DAY;

/// Multiplier for a memory with no negative feedback.
pub const BASE_MULTIPLIER: f64 = 1.0;

/// Confidence multiplier from negative validations, using default constants.
///
/// ```text
/// rawPenalty = negativeCount × 0.1
/// recovery   = 2^(−elapsed / 30d)      (1.0 without a timestamp or for a future one)
/// multiplier = clamp(1.0 − rawPenalty × recovery, 0.3, 1.0)
/// ```
pub fn compute_confidence_multiplier(
    negative_count: i64,
    last_negative_at_ms: Option<i64>,
    now_ms: i64,
) -> f64 {
    compute_breakdown(
        negative_count,
        last_negative_at_ms,
        now_ms,
        defaults::DEFAULT_NEGATIVE_PENALTY_PER_VALIDATION,
        defaults::DEFAULT_CONFIDENCE_MULTIPLIER_FLOOR,
        i64::from(defaults::DEFAULT_RECOVERY_HALF_LIFE_DAYS) * MS_PER_DAY,
    )
    .multiplier
}

/// `score × compute_confidence_multiplier(..)`.
pub fn apply_negative_feedback(
    score: f64,
    negative_count: i64,
    last_negative_at_ms: Option<i64>,
    now_ms: i64,
) -> f64 {
    score * compute_confidence_multiplier(negative_count, last_negative_at_ms, now_ms)
}

/// Each step of the multiplier, for debugging and observability.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MultiplierBreakdown {
    pub raw_penalty: f64,
    /// Fraction of the raw penalty still in force, in (0, 1].
    pub recovery: f64,
    pub effective_penalty: f64,
    pub multiplier: f64,
}

/// Compute the multiplier with explicit constants.
///
/// A non-positive half-life disables recovery. A floor outside [0, 1] is
/// pulled into range; NaN counts as 0.
pub fn compute_breakdown(
    negative_count: i64,
    last_negative_at_ms: Option<i64>,
    now_ms: i64,
    penalty_per_negative: f64,
    floor: f64,
    half_life_ms: i64,
) -> MultiplierBreakdown {
    if negative_count <= 0 {
        return MultiplierBreakdown {
            raw_penalty: 0.0,
            recovery: 1.0,
            effective_penalty: 0.0,
            multiplier: BASE_MULTIPLIER,
        };
    }

    let raw_penalty = negative_count as f64 * penalty_per_negative;
    let recovery = match last_negative_at_ms {
        Some(last) if half_life_ms > 0 && now_ms >= last => {
            let elapsed = (now_ms - last) as f64;
            2f64.powf(-elapsed / half_life_ms as f64)
        }
        _ => 1.0,
    };
    let effective_penalty = raw_penalty * recovery;
    let floor = if floor.is_nan() {
        0.0
    } else {
        floor.clamp(0.0, BASE_MULTIPLIER)
    };
    let multiplier = (BASE_MULTIPLIER - effective_penalty)
        .max(floor)
        .min(BASE_MULTIPLIER);

    MultiplierBreakdown {
        raw_penalty,
        recovery,
        effective_penalty,
        multiplier,
    }
}
