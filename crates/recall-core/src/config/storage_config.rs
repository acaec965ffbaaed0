use serde::{Deserialize, Serialize};

use super::defaults;

/// SQLite storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the database file.
    pub db_path: String,
    /// Number of read-only connections in the pool.
    pub read_pool_size: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: defaults::DEFAULT_DB_FILENAME.to_string(),
            read_pool_size: defaults::DEFAULT_READ_POOL_SIZE,
        }
    }
}
