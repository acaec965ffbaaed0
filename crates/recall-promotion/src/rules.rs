//! Upward-only promotion paths.
//!
//! normal→important (≥5 validations), important→critical (≥10).
//! critical, constitutional, temporary, and deprecated never auto-promote.

use recall_core::config::PromotionConfig;
use recall_core::memory::Tier;

/// Tiers with no outgoing transition.
pub const NON_PROMOTABLE_TIERS: [Tier; 4] = [
    Tier::Critical,
    Tier::Constitutional,
    Tier::Temporary,
    Tier::Deprecated,
];

/// One edge of the promotion state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromotionRule {
    pub from: Tier,
    pub to: Tier,
    /// Positive validations required.
    pub threshold: u32,
}

/// The promotion paths for the configured thresholds.
pub fn all_rules(config: &PromotionConfig) -> Vec<PromotionRule> {
    vec![
        PromotionRule {
            from: Tier::Normal,
            to: Tier::Important,
            threshold: config.important_threshold,
        },
        PromotionRule {
            from: Tier::Important,
            to: Tier::Critical,
            threshold: config.critical_threshold,
        },
    ]
}

pub fn is_promotable(tier: Tier) -> bool {
    !NON_PROMOTABLE_TIERS.contains(&tier)
}

/// The rule leaving `tier`, if any.
pub fn find_rule(rules: &[PromotionRule], tier: Tier) -> Option<PromotionRule> {
    rules.iter().find(|r| r.from == tier).copied()
}
