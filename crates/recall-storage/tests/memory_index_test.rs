//! Memory index CRUD, folder listing, validation counts, lexical search.

use chrono::{Duration, TimeZone, Utc};

use recall_core::errors::RecallError;
use recall_core::memory::{MemoryRecord, TermEntry, Tier};
use recall_core::traits::IMemoryIndex;
use recall_storage::StorageEngine;

fn make_memory(folder: &str, title: &str, content: &str) -> MemoryRecord {
    let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
    let mut m = MemoryRecord::new(folder, title, now);
    m.content = content.to_string();
    m.trigger_phrases = vec!["deploy pipeline".to_string()];
    m
}

#[test]
fn create_and_get_roundtrip() {
    let storage = StorageEngine::open_in_memory().unwrap();
    let mut memory = make_memory("specs/042-auth", "Token refresh", "Rotate tokens hourly");
    memory.tier = Tier::Important;
    memory.validation_count = 4;

    let id = storage.create(&memory).unwrap();
    let fetched = storage.get(id).unwrap().unwrap();

    assert_eq!(fetched.id, id);
    assert_eq!(fetched.folder, "specs/042-auth");
    assert_eq!(fetched.title, "Token refresh");
    assert_eq!(fetched.content, "Rotate tokens hourly");
    assert_eq!(fetched.tier, Tier::Important);
    assert_eq!(fetched.validation_count, 4);
    assert_eq!(fetched.created_at, memory.created_at);
    assert_eq!(fetched.trigger_phrases, vec!["deploy pipeline"]);
    assert!(fetched.learned_triggers.is_empty());
}

#[test]
fn get_missing_returns_none() {
    let storage = StorageEngine::open_in_memory().unwrap();
    assert!(storage.get(9999).unwrap().is_none());
}

#[test]
fn ids_are_assigned_in_order() {
    let storage = StorageEngine::open_in_memory().unwrap();
    let a = storage.create(&make_memory("f", "a", "")).unwrap();
    let b = storage.create(&make_memory("f", "b", "")).unwrap();
    assert!(b > a);
}

#[test]
fn positive_validation_increments() {
    let storage = StorageEngine::open_in_memory().unwrap();
    let id = storage.create(&make_memory("f", "t", "")).unwrap();
    assert_eq!(storage.record_positive_validation(id).unwrap(), 1);
    assert_eq!(storage.record_positive_validation(id).unwrap(), 2);
    assert_eq!(storage.get(id).unwrap().unwrap().validation_count, 2);
}

#[test]
fn positive_validation_of_missing_memory_fails() {
    let storage = StorageEngine::open_in_memory().unwrap();
    let err = storage.record_positive_validation(77).unwrap_err();
    assert!(matches!(err, RecallError::MemoryNotFound { id: 77 }));
}

#[test]
fn folder_listing_carries_tier_and_update_time() {
    let storage = StorageEngine::open_in_memory().unwrap();
    let mut old = make_memory("specs/a", "old", "");
    old.updated_at = old.created_at + Duration::days(2);
    old.tier = Tier::Critical;
    storage.create(&old).unwrap();
    storage.create(&make_memory("specs/b", "new", "")).unwrap();

    let mut listed = storage.list_folder_memories().unwrap();
    listed.sort_by(|a, b| a.folder.cmp(&b.folder));
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].folder, "specs/a");
    assert_eq!(listed[0].tier, Tier::Critical);
    assert_eq!(listed[0].updated_at, Some(old.updated_at));
    assert_eq!(listed[1].tier, Tier::Normal);
}

#[test]
fn lexical_search_matches_organic_fields() {
    let storage = StorageEngine::open_in_memory().unwrap();
    let by_title = storage
        .create(&make_memory("f", "Kubernetes rollout", "nothing"))
        .unwrap();
    let by_content = storage
        .create(&make_memory("f", "notes", "the kubernetes cluster"))
        .unwrap();
    storage.create(&make_memory("f", "unrelated", "bread")).unwrap();

    let mut hits = storage.search_lexical("kubernetes", 10).unwrap();
    hits.sort();
    assert_eq!(hits, vec![by_title, by_content]);

    let by_phrase = storage.search_lexical("pipeline", 10).unwrap();
    assert_eq!(by_phrase.len(), 3);
}

#[test]
fn lexical_search_never_sees_learned_triggers() {
    let storage = StorageEngine::open_in_memory().unwrap();
    let mut memory = make_memory("f", "plain title", "plain body");
    memory.learned_triggers = vec![TermEntry::new("zeppelin", "q-1", 0, i64::MAX / 2)];
    let id = storage.create(&memory).unwrap();

    assert_eq!(storage.get(id).unwrap().unwrap().learned_triggers.len(), 1);
    assert!(storage.search_lexical("zeppelin", 10).unwrap().is_empty());
}

#[test]
fn lexical_search_tolerates_query_syntax() {
    let storage = StorageEngine::open_in_memory().unwrap();
    storage.create(&make_memory("f", "quote \"me\"", "")).unwrap();
    let hits = storage.search_lexical("AND NOT quote\"me", 10).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(storage.search_lexical("NOT quote", 10).unwrap().len(), 1);
    assert!(storage.search_lexical("   ", 10).unwrap().is_empty());
}

#[test]
fn schema_is_at_latest_version() {
    let storage = StorageEngine::open_in_memory().unwrap();
    assert_eq!(
        storage.schema_version().unwrap(),
        recall_storage::migrations::LATEST_VERSION
    );
}
