//! # recall-storage
//!
//! SQLite reference store for the Recall scoring engines.
//!
//! - `memory_index` table with an FTS5 index over organic fields only
//! - dedicated `learned_triggers` column, never indexed lexically
//! - append-only promotion, learned-feedback, and negative-feedback tables
//! - every read-modify-write runs in one `BEGIN IMMEDIATE` transaction

pub mod engine;
pub mod isolation;
pub mod migrations;
pub mod pool;
pub mod queries;
pub mod tx;

pub use engine::StorageEngine;

use recall_core::errors::{RecallError, StorageError};

/// Wrap a SQLite failure message as a `RecallError`.
pub(crate) fn to_storage_err(message: String) -> RecallError {
    RecallError::StorageError(StorageError::SqliteError { message })
}
