// Single source of truth for all default values.

// --- Storage ---
pub const DEFAULT_DB_FILENAME: &str = "recall.db";
pub const DEFAULT_READ_POOL_SIZE: usize = 4;

// --- Trigger learning ---
/// Off until the deploying system opts in.
pub const DEFAULT_LEARNING_ENABLED: bool = false;
pub const DEFAULT_LEARNED_TERM_TTL_DAYS: u32 = 30;
pub const DEFAULT_MAX_TERMS_PER_SELECTION: usize = 3;
pub const DEFAULT_MAX_TERMS_PER_MEMORY: usize = 8;
pub const DEFAULT_TOP_N_EXCLUSION: u32 = 3;
pub const DEFAULT_MIN_MEMORY_AGE_HOURS: u32 = 72;
pub const DEFAULT_MIN_TERM_LENGTH: usize = 3;
pub const DEFAULT_LEARNED_TRIGGER_WEIGHT: f64 = 0.7;
pub const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 3600; // 1 hour

// --- Auto-promotion ---
pub const DEFAULT_PROMOTE_TO_IMPORTANT_THRESHOLD: u32 = 5;
pub const DEFAULT_PROMOTE_TO_CRITICAL_THRESHOLD: u32 = 10;
pub const DEFAULT_MAX_PROMOTIONS_PER_WINDOW: u32 = 3;
pub const DEFAULT_PROMOTION_WINDOW_HOURS: u32 = 8;

// --- Negative feedback ---
pub const DEFAULT_NEGATIVE_FEEDBACK_ENABLED: bool = true;
pub const DEFAULT_NEGATIVE_PENALTY_PER_VALIDATION: f64 = 0.1;
pub const DEFAULT_CONFIDENCE_MULTIPLIER_FLOOR: f64 = 0.3;
pub const DEFAULT_RECOVERY_HALF_LIFE_DAYS: u32 = 30;

// --- Folder scoring ---
pub const DEFAULT_RECENCY_DECAY_RATE: f64 = 0.10;
pub const DEFAULT_MAX_ACTIVITY_MEMORIES: usize = 5;
pub const DEFAULT_VALIDATION_SCORE: f64 = 0.5;
