//! Schema migrations, applied in order and recorded in `schema_version`.

pub mod v001_memory_index;
pub mod v002_fts5_index;
pub mod v003_learned_triggers;
pub mod v004_promotion_audit;
pub mod v005_feedback_audit;
pub mod v006_negative_feedback;

use rusqlite::{params, Connection};
use tracing::info;

use recall_core::errors::{RecallError, RecallResult, StorageError};

use crate::to_storage_err;

type MigrationFn = fn(&Connection) -> RecallResult<()>;

/// Every migration, in application order.
const MIGRATIONS: &[(u32, &str, MigrationFn)] = &[
    (1, "memory_index", v001_memory_index::migrate),
    (2, "fts5_index", v002_fts5_index::migrate),
    (3, "learned_triggers", v003_learned_triggers::migrate),
    (4, "promotion_audit", v004_promotion_audit::migrate),
    (5, "feedback_audit", v005_feedback_audit::migrate),
    (6, "negative_feedback", v006_negative_feedback::migrate),
];

/// Latest schema version this crate knows about.
pub const LATEST_VERSION: u32 = 6;

/// Apply every pending migration. Returns the number applied.
pub fn run_migrations(conn: &Connection) -> RecallResult<u32> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version     INTEGER PRIMARY KEY,
            applied_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    let current = current_version(conn)?;
    let mut applied = 0;

    for &(version, name, migrate) in MIGRATIONS.iter().filter(|(v, _, _)| *v > current) {
        crate::tx::immediate(conn, name, |tx| {
            migrate(tx).map_err(|e| {
                RecallError::StorageError(StorageError::MigrationFailed {
                    version,
                    reason: e.to_string(),
                })
            })?;
            tx.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![version],
            )
            .map_err(|e| to_storage_err(e.to_string()))?;
            Ok(())
        })?;
        info!(version, name, "applied migration");
        applied += 1;
    }

    Ok(applied)
}

/// Highest applied version, or 0 on a fresh database.
pub fn current_version(conn: &Connection) -> RecallResult<u32> {
    conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )
    .map_err(|e| to_storage_err(e.to_string()))
}
