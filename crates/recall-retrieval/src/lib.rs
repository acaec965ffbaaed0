//! # recall-retrieval
//!
//! The feedback-signals stage of the search pipeline. Runs after fusion and
//! before final ranking.

pub mod feedback_stage;

pub use feedback_stage::{FeedbackStage, RankedResult};
