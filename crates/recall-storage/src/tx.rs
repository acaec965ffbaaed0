//! Transaction helper shared by every read-modify-write query.

use rusqlite::{Connection, Transaction, TransactionBehavior};

use recall_core::errors::{RecallError, RecallResult, StorageError};

/// Run `f` inside a `BEGIN IMMEDIATE` transaction.
///
/// The write lock is taken up front so concurrent writers serialize on the
/// database instead of failing mid-way on a lock upgrade. Commits on `Ok`,
/// rolls back on `Err`.
pub fn immediate<T, F>(conn: &Connection, label: &str, f: F) -> RecallResult<T>
where
    F: FnOnce(&Connection) -> RecallResult<T>,
{
    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate).map_err(|e| {
        RecallError::StorageError(StorageError::TransactionFailed {
            reason: format!("{label} begin: {e}"),
        })
    })?;

    match f(&tx) {
        Ok(value) => {
            tx.commit().map_err(|e| {
                RecallError::StorageError(StorageError::TransactionFailed {
                    reason: format!("{label} commit: {e}"),
                })
            })?;
            Ok(value)
        }
        Err(e) => {
            let _ = tx.rollback();
            Err(e)
        }
    }
}
