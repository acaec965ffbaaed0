//! Connection pool managing read/write connections.

pub mod pragmas;
pub mod read_pool;
pub mod write_connection;

use std::path::{Path, PathBuf};

use recall_core::errors::RecallResult;

pub use read_pool::ReadPool;
pub use write_connection::WriteConnection;

/// Manages the single write connection and the read connection pool.
pub struct ConnectionPool {
    pub writer: WriteConnection,
    /// `None` in memory, where a separate connection would be a separate database.
    pub readers: Option<ReadPool>,
    pub db_path: Option<PathBuf>,
}

impl ConnectionPool {
    /// Open a connection pool for the given database file.
    ///
    /// The writer opens (and creates) the file first so readers never race
    /// an empty path.
    pub fn open(path: &Path, read_pool_size: usize) -> RecallResult<Self> {
        let writer = WriteConnection::open(path)?;
        let readers = ReadPool::open(path, read_pool_size)?;
        Ok(Self {
            writer,
            readers: Some(readers),
            db_path: Some(path.to_path_buf()),
        })
    }

    /// Open an in-memory connection pool (for testing). Reads share the writer.
    pub fn open_in_memory() -> RecallResult<Self> {
        let writer = WriteConnection::open_in_memory()?;
        Ok(Self {
            writer,
            readers: None,
            db_path: None,
        })
    }
}
