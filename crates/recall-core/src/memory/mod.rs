pub mod record;
pub mod term_entry;
pub mod tier;

pub use record::{MemoryId, MemoryRecord};
pub use term_entry::TermEntry;
pub use tier::Tier;
