//! # recall-decay
//!
//! Negative-feedback confidence signal.
//! Each "not useful" validation subtracts a fixed penalty from a 1.0 multiplier;
//! the penalty halves every recovery half-life since the most recent negative,
//! and the result never drops below the floor.

pub mod multiplier;
pub mod signal;

pub use multiplier::{
    apply_negative_feedback, compute_breakdown, compute_confidence_multiplier,
    MultiplierBreakdown,
};
pub use signal::NegativeFeedbackSignal;
