//! StorageEngine: owns the ConnectionPool and implements every Recall
//! persistence trait over it.

use std::collections::HashMap;
use std::path::Path;

use rusqlite::Connection;

use recall_core::config::StorageConfig;
use recall_core::errors::RecallResult;
use recall_core::memory::{MemoryId, MemoryRecord, TermEntry, Tier};
use recall_core::models::{
    FolderMemory, LearnedFeedbackAuditEntry, NegativeFeedbackEvent, NegativeFeedbackStats,
    PromotionAuditEntry,
};
use recall_core::traits::{
    ILearnedTriggerStore, IMemoryIndex, INegativeFeedbackStore, IPromotionStore, LearningTarget,
    PromotionWrite, TierState, TriggerUpdate,
};

use crate::pool::ConnectionPool;
use crate::queries::{
    feedback_audit_ops, learned_trigger_ops, memory_ops, negative_feedback_ops, promotion_ops,
};
use crate::{isolation, migrations};

/// The SQLite reference store.
pub struct StorageEngine {
    pool: ConnectionPool,
}

impl StorageEngine {
    /// Open a storage engine backed by a file on disk.
    pub fn open(path: &Path) -> RecallResult<Self> {
        Self::open_with_readers(path, StorageConfig::default().read_pool_size)
    }

    /// Open using the path and pool size from config.
    pub fn from_config(config: &StorageConfig) -> RecallResult<Self> {
        Self::open_with_readers(Path::new(&config.db_path), config.read_pool_size)
    }

    fn open_with_readers(path: &Path, read_pool_size: usize) -> RecallResult<Self> {
        let pool = ConnectionPool::open(path, read_pool_size)?;
        let engine = Self { pool };
        engine.initialize()?;
        Ok(engine)
    }

    /// Open an in-memory storage engine (for testing).
    pub fn open_in_memory() -> RecallResult<Self> {
        let pool = ConnectionPool::open_in_memory()?;
        let engine = Self { pool };
        engine.initialize()?;
        Ok(engine)
    }

    /// Run pending migrations, then refuse to start if the lexical index
    /// can see learned triggers.
    fn initialize(&self) -> RecallResult<()> {
        self.with_writer(|conn| migrations::run_migrations(conn).map(|_| ()))?;
        self.with_writer(isolation::verify_fts_isolation)
    }

    /// Get a reference to the connection pool (for advanced operations).
    pub fn pool(&self) -> &ConnectionPool {
        &self.pool
    }

    /// Run a closure on the write connection.
    pub fn with_writer<F, T>(&self, f: F) -> RecallResult<T>
    where
        F: FnOnce(&Connection) -> RecallResult<T>,
    {
        self.pool.writer.with_conn_sync(f)
    }

    /// Execute a read-only query on the read pool, or on the writer in memory.
    pub fn with_reader<F, T>(&self, f: F) -> RecallResult<T>
    where
        F: FnOnce(&Connection) -> RecallResult<T>,
    {
        match &self.pool.readers {
            Some(readers) => readers.with_conn(f),
            None => self.pool.writer.with_conn_sync(f),
        }
    }

    /// Applied schema version.
    pub fn schema_version(&self) -> RecallResult<u32> {
        self.with_reader(migrations::current_version)
    }
}

impl IMemoryIndex for StorageEngine {
    fn create(&self, memory: &MemoryRecord) -> RecallResult<MemoryId> {
        self.with_writer(|conn| memory_ops::insert_memory(conn, memory))
    }

    fn get(&self, id: MemoryId) -> RecallResult<Option<MemoryRecord>> {
        self.with_reader(|conn| memory_ops::get_memory(conn, id))
    }

    fn list_folder_memories(&self) -> RecallResult<Vec<FolderMemory>> {
        self.with_reader(memory_ops::list_folder_memories)
    }

    fn record_positive_validation(&self, id: MemoryId) -> RecallResult<u32> {
        self.with_writer(|conn| {
            crate::tx::immediate(conn, "record_positive_validation", |tx| {
                memory_ops::increment_validation(tx, id)
            })
        })
    }

    fn search_lexical(&self, query: &str, limit: usize) -> RecallResult<Vec<MemoryId>> {
        self.with_reader(|conn| memory_ops::search_lexical(conn, query, limit))
    }
}

impl IPromotionStore for StorageEngine {
    fn tier_state(&self, id: MemoryId) -> RecallResult<Option<TierState>> {
        self.with_reader(|conn| promotion_ops::tier_state(conn, id))
    }

    fn tier_states(&self, tiers: &[Tier]) -> RecallResult<Vec<TierState>> {
        self.with_reader(|conn| promotion_ops::tier_states(conn, tiers))
    }

    fn promote_within_window(
        &self,
        entry: &PromotionAuditEntry,
        window_start_ms: i64,
        max_in_window: u32,
    ) -> RecallResult<PromotionWrite> {
        self.with_writer(|conn| {
            promotion_ops::promote_within_window(conn, entry, window_start_ms, max_in_window)
        })
    }

    fn promotions_since(&self, since_ms: i64) -> RecallResult<u32> {
        self.with_reader(|conn| promotion_ops::promotions_since(conn, since_ms))
    }

    fn recent_promotions(&self, limit: usize) -> RecallResult<Vec<PromotionAuditEntry>> {
        self.with_reader(|conn| promotion_ops::recent_promotions(conn, limit))
    }
}

impl ILearnedTriggerStore for StorageEngine {
    fn learning_target(&self, id: MemoryId) -> RecallResult<Option<LearningTarget>> {
        self.with_reader(|conn| learned_trigger_ops::learning_target(conn, id))
    }

    fn memories_with_learned_triggers(&self) -> RecallResult<Vec<(MemoryId, Vec<TermEntry>)>> {
        self.with_reader(learned_trigger_ops::memories_with_learned_triggers)
    }

    fn update_learned_triggers(
        &self,
        id: MemoryId,
        update: &mut TriggerUpdate<'_>,
    ) -> RecallResult<bool> {
        self.with_writer(|conn| learned_trigger_ops::update_learned_triggers(conn, id, update))
    }

    fn clear_learned_triggers(&self) -> RecallResult<Vec<(MemoryId, Vec<TermEntry>)>> {
        self.with_writer(learned_trigger_ops::clear_learned_triggers)
    }

    fn append_feedback_audit(&self, entry: &LearnedFeedbackAuditEntry) -> RecallResult<()> {
        self.with_writer(|conn| feedback_audit_ops::append(conn, entry))
    }

    fn feedback_audit(
        &self,
        memory_id: Option<MemoryId>,
        limit: usize,
    ) -> RecallResult<Vec<LearnedFeedbackAuditEntry>> {
        self.with_reader(|conn| feedback_audit_ops::query(conn, memory_id, limit))
    }

    fn verify_fts_isolation(&self) -> RecallResult<()> {
        self.with_reader(isolation::verify_fts_isolation)
    }
}

impl INegativeFeedbackStore for StorageEngine {
    fn record_negative_feedback(&self, event: &NegativeFeedbackEvent) -> RecallResult<()> {
        self.with_writer(|conn| negative_feedback_ops::insert_event(conn, event))
    }

    fn negative_feedback_stats(
        &self,
        ids: &[MemoryId],
    ) -> RecallResult<HashMap<MemoryId, NegativeFeedbackStats>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        self.with_reader(|conn| negative_feedback_ops::stats_for(conn, ids))
    }
}
