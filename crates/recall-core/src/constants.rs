/// Recall system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Seconds in one day.
pub const SECS_PER_DAY: i64 = 86_400;

/// Milliseconds in one day.
pub const MS_PER_DAY: i64 = SECS_PER_DAY * 1000;

/// Milliseconds in one hour.
pub const MS_PER_HOUR: i64 = 3_600_000;

/// Name of the lexical (FTS5) index table. Learned triggers must never appear in it.
pub const LEXICAL_INDEX_TABLE: &str = "memory_fts";

/// Column holding learned triggers on the memory index.
pub const LEARNED_TRIGGERS_COLUMN: &str = "learned_triggers";

/// Serialized value of an empty learned-triggers column.
pub const LEARNED_TRIGGERS_EMPTY: &str = "[]";
