//! Tier reads and the windowed, compare-and-set promotion write.

use chrono::Utc;

use recall_core::memory::{MemoryRecord, Tier};
use recall_core::models::PromotionAuditEntry;
use recall_core::traits::{IMemoryIndex, IPromotionStore, PromotionWrite};
use recall_storage::StorageEngine;

const HOUR_MS: i64 = 3_600_000;

fn seed(storage: &StorageEngine, tier: Tier, validations: u32) -> i64 {
    let mut m = MemoryRecord::new("specs/x", "m", Utc::now());
    m.tier = tier;
    m.validation_count = validations;
    storage.create(&m).unwrap()
}

fn entry(id: i64, from: Tier, to: Tier, at_ms: i64) -> PromotionAuditEntry {
    PromotionAuditEntry {
        memory_id: id,
        previous_tier: from,
        new_tier: to,
        validation_count: 5,
        promoted_at_ms: at_ms,
    }
}

#[test]
fn tier_state_reads_tier_and_count() {
    let storage = StorageEngine::open_in_memory().unwrap();
    let id = seed(&storage, Tier::Important, 7);
    let state = storage.tier_state(id).unwrap().unwrap();
    assert_eq!(state.tier, Tier::Important);
    assert_eq!(state.validation_count, 7);
    assert!(storage.tier_state(id + 100).unwrap().is_none());
}

#[test]
fn tier_states_filters_by_tier() {
    let storage = StorageEngine::open_in_memory().unwrap();
    let n = seed(&storage, Tier::Normal, 1);
    let i = seed(&storage, Tier::Important, 2);
    seed(&storage, Tier::Constitutional, 3);

    let states = storage
        .tier_states(&[Tier::Normal, Tier::Important])
        .unwrap();
    let ids: Vec<_> = states.iter().map(|s| s.memory_id).collect();
    assert_eq!(ids, vec![n, i]);
    assert!(storage.tier_states(&[]).unwrap().is_empty());
}

#[test]
fn committed_promotion_updates_tier_and_audit() {
    let storage = StorageEngine::open_in_memory().unwrap();
    let id = seed(&storage, Tier::Normal, 5);
    let e = entry(id, Tier::Normal, Tier::Important, 10 * HOUR_MS);

    let write = storage.promote_within_window(&e, 2 * HOUR_MS, 3).unwrap();
    assert_eq!(write, PromotionWrite::Committed(e.clone()));
    assert_eq!(storage.tier_state(id).unwrap().unwrap().tier, Tier::Important);
    assert_eq!(storage.recent_promotions(10).unwrap(), vec![e]);
    assert_eq!(storage.promotions_since(0).unwrap(), 1);
}

#[test]
fn full_window_rejects_without_writing() {
    let storage = StorageEngine::open_in_memory().unwrap();
    let now = 100 * HOUR_MS;
    for _ in 0..3 {
        let id = seed(&storage, Tier::Normal, 5);
        let write = storage
            .promote_within_window(&entry(id, Tier::Normal, Tier::Important, now), now - 8 * HOUR_MS, 3)
            .unwrap();
        assert!(matches!(write, PromotionWrite::Committed(_)));
    }

    let fourth = seed(&storage, Tier::Normal, 5);
    let write = storage
        .promote_within_window(&entry(fourth, Tier::Normal, Tier::Important, now), now - 8 * HOUR_MS, 3)
        .unwrap();
    assert_eq!(write, PromotionWrite::RateLimited { in_window: 3 });
    assert_eq!(storage.tier_state(fourth).unwrap().unwrap().tier, Tier::Normal);
    assert_eq!(storage.recent_promotions(10).unwrap().len(), 3);
}

#[test]
fn window_ages_out_old_promotions() {
    let storage = StorageEngine::open_in_memory().unwrap();
    let first = 10 * HOUR_MS;
    for _ in 0..3 {
        let id = seed(&storage, Tier::Normal, 5);
        storage
            .promote_within_window(&entry(id, Tier::Normal, Tier::Important, first), first - 8 * HOUR_MS, 3)
            .unwrap();
    }

    let later = first + 8 * HOUR_MS + 1;
    assert_eq!(storage.promotions_since(later - 8 * HOUR_MS).unwrap(), 0);
    let id = seed(&storage, Tier::Normal, 5);
    let write = storage
        .promote_within_window(&entry(id, Tier::Normal, Tier::Important, later), later - 8 * HOUR_MS, 3)
        .unwrap();
    assert!(matches!(write, PromotionWrite::Committed(_)));
}

#[test]
fn stale_previous_tier_is_not_overwritten() {
    let storage = StorageEngine::open_in_memory().unwrap();
    let id = seed(&storage, Tier::Critical, 12);
    let write = storage
        .promote_within_window(&entry(id, Tier::Normal, Tier::Important, HOUR_MS), 0, 3)
        .unwrap();
    assert_eq!(
        write,
        PromotionWrite::TierChanged {
            current: Some(Tier::Critical)
        }
    );
    assert!(storage.recent_promotions(10).unwrap().is_empty());
}

#[test]
fn missing_memory_reports_no_current_tier() {
    let storage = StorageEngine::open_in_memory().unwrap();
    let write = storage
        .promote_within_window(&entry(404, Tier::Normal, Tier::Important, HOUR_MS), 0, 3)
        .unwrap();
    assert_eq!(write, PromotionWrite::TierChanged { current: None });
}

#[test]
fn recent_promotions_are_newest_first_and_limited() {
    let storage = StorageEngine::open_in_memory().unwrap();
    for i in 0..4 {
        let id = seed(&storage, Tier::Normal, 5);
        storage
            .promote_within_window(&entry(id, Tier::Normal, Tier::Important, i * HOUR_MS), 0, 10)
            .unwrap();
    }
    let recent = storage.recent_promotions(2).unwrap();
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].promoted_at_ms, 3 * HOUR_MS);
    assert_eq!(recent[1].promoted_at_ms, 2 * HOUR_MS);
}
