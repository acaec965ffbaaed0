mod learned_trigger_store;
mod memory_index;
mod negative_feedback_store;
mod promotion_store;

pub use learned_trigger_store::{ILearnedTriggerStore, LearningTarget, TriggerUpdate};
pub use memory_index::IMemoryIndex;
pub use negative_feedback_store::INegativeFeedbackStore;
pub use promotion_store::{IPromotionStore, PromotionWrite, TierState};
