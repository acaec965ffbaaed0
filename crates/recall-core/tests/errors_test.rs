use recall_core::errors::*;

#[test]
fn memory_not_found_carries_id() {
    let err = RecallError::MemoryNotFound { id: 42 };
    assert!(err.to_string().contains("42"));
    assert!(!err.is_fatal());
}

#[test]
fn storage_error_converts_to_recall_error() {
    let storage_err = StorageError::SqliteError {
        message: "database is locked".into(),
    };
    let err: RecallError = storage_err.into();
    assert!(matches!(err, RecallError::StorageError(_)));
    assert!(err.to_string().contains("database is locked"));
}

#[test]
fn fts_isolation_violation_is_fatal() {
    let err = RecallError::FtsIsolationViolation {
        details: "memory_fts declares learned_triggers".into(),
    };
    assert!(err.is_fatal());
    assert!(err.to_string().contains("memory_fts"));
}

#[test]
fn serde_json_error_converts() {
    let json_err = serde_json::from_str::<Vec<String>>("{").unwrap_err();
    let err: RecallError = json_err.into();
    assert!(matches!(err, RecallError::SerializationError(_)));
}
