//! # recall-promotion
//!
//! Promotes memories up the tier ladder once they collect enough positive
//! validations: normal→important at 5, important→critical at 10.
//! Every other tier is terminal. Execution is globally rate limited by
//! counting audit rows inside a rolling window.

pub mod engine;
pub mod reason;
pub mod rules;

pub use engine::{PromotionEngine, PromotionResult};
pub use reason::PromotionReason;
pub use rules::{PromotionRule, NON_PROMOTABLE_TIERS};
