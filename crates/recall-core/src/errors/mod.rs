mod recall_error;
mod storage_error;

pub use recall_error::{RecallError, RecallResult};
pub use storage_error::StorageError;
