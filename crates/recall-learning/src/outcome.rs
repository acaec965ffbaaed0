use std::fmt;

use recall_core::memory::MemoryId;

/// Why a selection taught nothing (or failed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectionReason {
    FeatureDisabled,
    Top3Exclusion,
    MemoryNotFound,
    MemoryTooNew,
    NoLearnableTerms,
    /// Reserved. The shadow period is disabled and never produces this.
    ShadowPeriod,
    Error,
}

impl SelectionReason {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FeatureDisabled => "feature_disabled",
            Self::Top3Exclusion => "top_3_exclusion",
            Self::MemoryNotFound => "memory_not_found",
            Self::MemoryTooNew => "memory_too_new",
            Self::NoLearnableTerms => "no_learnable_terms",
            Self::ShadowPeriod => "shadow_period",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for SelectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of [`LearningEngine::record_selection`](crate::LearningEngine::record_selection).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionOutcome {
    /// Terms extracted from the query. Empty when a gate rejected the event.
    pub terms: Vec<String>,
    pub applied: bool,
    pub reason: Option<SelectionReason>,
}

impl SelectionOutcome {
    pub(crate) fn rejected(reason: SelectionReason) -> Self {
        Self {
            terms: Vec::new(),
            applied: false,
            reason: Some(reason),
        }
    }

    pub(crate) fn applied(terms: Vec<String>) -> Self {
        Self {
            terms,
            applied: true,
            reason: None,
        }
    }

    pub fn reason_code(&self) -> Option<&'static str> {
        self.reason.map(SelectionReason::as_str)
    }
}

/// A memory whose live learned triggers overlap a query.
#[derive(Debug, Clone, PartialEq)]
pub struct LearnedTriggerMatch {
    pub memory_id: MemoryId,
    pub matched_terms: Vec<String>,
    /// `learned_trigger_weight × matched / query_terms`. Not clamped: several
    /// entries hit by one query term can push it past the configured weight.
    pub weight: f64,
}
