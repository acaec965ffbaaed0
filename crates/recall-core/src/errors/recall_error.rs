use super::StorageError;

/// Top-level error for every Recall crate.
///
/// Engines convert most of these into safe default results at their public
/// boundary. `FtsIsolationViolation` is the exception: it always propagates.
#[derive(Debug, thiserror::Error)]
pub enum RecallError {
    #[error("memory not found: {id}")]
    MemoryNotFound { id: i64 },

    #[error("invalid importance tier: {value}")]
    InvalidTier { value: String },

    #[error("invalid audit action: {value}")]
    InvalidAuditAction { value: String },

    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("learned triggers leaked into the lexical index: {details}")]
    FtsIsolationViolation { details: String },
}

impl RecallError {
    /// True for the one error class that signals corrupted search semantics.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::FtsIsolationViolation { .. })
    }
}

pub type RecallResult<T> = Result<T, RecallError>;
