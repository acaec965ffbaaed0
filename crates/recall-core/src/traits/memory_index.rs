use crate::errors::RecallResult;
use crate::memory::{MemoryId, MemoryRecord};
use crate::models::FolderMemory;

/// The memory-index table as exposed by the persistence layer.
///
/// Creation and validation bookkeeping belong to external handlers; the
/// scoring engines only read through this trait.
pub trait IMemoryIndex: Send + Sync {
    /// Insert a memory and return its assigned id.
    fn create(&self, memory: &MemoryRecord) -> RecallResult<MemoryId>;
    fn get(&self, id: MemoryId) -> RecallResult<Option<MemoryRecord>>;
    /// Every memory, reduced to what folder scoring needs.
    fn list_folder_memories(&self) -> RecallResult<Vec<FolderMemory>>;
    /// Increment the positive validation count, returning the new value.
    fn record_positive_validation(&self, id: MemoryId) -> RecallResult<u32>;
    /// Lexical search over organic fields only (title, content, trigger phrases).
    fn search_lexical(&self, query: &str, limit: usize) -> RecallResult<Vec<MemoryId>>;
}
