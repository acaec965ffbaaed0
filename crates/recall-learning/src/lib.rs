//! # recall-learning
//!
//! Learns retrieval vocabulary from which results users pick, without ever
//! touching the lexical index.
//!
//! Safeguards: dedicated column, 30-day TTL, denylist plus organic-trigger
//! exclusion, 3-per-selection and 8-per-memory caps without eviction, top-3
//! exclusion, 72-hour minimum memory age, config feature flag, full rollback,
//! append-only audit. The historical shadow period is a documented no-op.

pub mod denylist;
pub mod engine;
pub mod extraction;
pub mod matching;
pub mod outcome;
pub mod sweeper;

pub use denylist::{denylist, denylist_size, is_on_denylist};
pub use engine::LearningEngine;
pub use extraction::extract_learnable_terms;
pub use outcome::{LearnedTriggerMatch, SelectionOutcome, SelectionReason};
pub use sweeper::ExpirySweeper;
