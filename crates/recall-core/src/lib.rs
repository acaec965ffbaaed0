//! # recall-core
//!
//! Foundation crate for the Recall feedback-scoring system.
//! Defines the memory model, tiers, audit records, errors, config, clock,
//! and the persistence traits every engine is written against.

pub mod clock;
pub mod config;
pub mod constants;
pub mod errors;
pub mod memory;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::RecallConfig;
pub use errors::{RecallError, RecallResult};
pub use memory::{MemoryId, MemoryRecord, TermEntry, Tier};
