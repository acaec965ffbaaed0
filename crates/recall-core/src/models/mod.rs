mod feedback_audit;
mod folder;
mod negative_feedback;
mod promotion_audit;

pub use feedback_audit::{FeedbackAction, LearnedFeedbackAuditEntry};
pub use folder::{FolderMemory, FolderScore};
pub use negative_feedback::{NegativeFeedbackEvent, NegativeFeedbackStats};
pub use promotion_audit::PromotionAuditEntry;
