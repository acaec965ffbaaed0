//! Query modules, one per table family. Each function takes a borrowed
//! connection; the engine decides which connection and lock to use.

pub mod feedback_audit_ops;
pub mod learned_trigger_ops;
pub mod memory_ops;
pub mod negative_feedback_ops;
pub mod promotion_ops;

use chrono::{DateTime, TimeZone, Utc};

/// Largest number of bound parameters used in one `IN (...)` list.
pub(crate) const MAX_IN_PARAMS: usize = 500;

/// `?1, ?2, ... ?n`
pub(crate) fn placeholders(n: usize) -> String {
    (1..=n).map(|i| format!("?{i}")).collect::<Vec<_>>().join(", ")
}

/// Parse a stored RFC 3339 timestamp. `None` when unparseable.
pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Epoch milliseconds as a UTC timestamp, clamped to the epoch when out of range.
pub(crate) fn from_millis(ms: i64) -> DateTime<Utc> {
    Utc.timestamp_millis_opt(ms)
        .single()
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}
