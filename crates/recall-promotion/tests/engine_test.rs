//! PromotionEngine against an in-process mock store.

use std::sync::{Arc, Mutex};

use chrono::{Duration, TimeZone, Utc};

use recall_core::clock::{Clock, ManualClock};
use recall_core::config::PromotionConfig;
use recall_core::errors::{RecallError, RecallResult, StorageError};
use recall_core::memory::{MemoryId, Tier};
use recall_core::models::PromotionAuditEntry;
use recall_core::traits::{IPromotionStore, PromotionWrite, TierState};
use recall_promotion::{PromotionEngine, PromotionReason};

#[derive(Default)]
struct MockStore {
    states: Mutex<Vec<TierState>>,
    audit: Mutex<Vec<PromotionAuditEntry>>,
    fail: bool,
}

impl MockStore {
    fn with(states: Vec<(MemoryId, Tier, u32)>) -> Self {
        Self {
            states: Mutex::new(
                states
                    .into_iter()
                    .map(|(memory_id, tier, validation_count)| TierState {
                        memory_id,
                        tier,
                        validation_count,
                    })
                    .collect(),
            ),
            ..Default::default()
        }
    }

    fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    fn check(&self) -> RecallResult<()> {
        if self.fail {
            Err(RecallError::StorageError(StorageError::SqliteError {
                message: "database is locked".into(),
            }))
        } else {
            Ok(())
        }
    }

    fn tier_of(&self, id: MemoryId) -> Option<Tier> {
        self.states
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.memory_id == id)
            .map(|s| s.tier)
    }
}

impl IPromotionStore for MockStore {
    fn tier_state(&self, id: MemoryId) -> RecallResult<Option<TierState>> {
        self.check()?;
        Ok(self
            .states
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.memory_id == id)
            .copied())
    }

    fn tier_states(&self, tiers: &[Tier]) -> RecallResult<Vec<TierState>> {
        self.check()?;
        Ok(self
            .states
            .lock()
            .unwrap()
            .iter()
            .filter(|s| tiers.contains(&s.tier))
            .copied()
            .collect())
    }

    fn promote_within_window(
        &self,
        entry: &PromotionAuditEntry,
        window_start_ms: i64,
        max_in_window: u32,
    ) -> RecallResult<PromotionWrite> {
        self.check()?;
        let mut audit = self.audit.lock().unwrap();
        let in_window = audit
            .iter()
            .filter(|a| a.promoted_at_ms >= window_start_ms)
            .count() as u32;
        if in_window >= max_in_window {
            return Ok(PromotionWrite::RateLimited { in_window });
        }
        let mut states = self.states.lock().unwrap();
        match states.iter_mut().find(|s| s.memory_id == entry.memory_id) {
            Some(s) if s.tier == entry.previous_tier => s.tier = entry.new_tier,
            other => {
                return Ok(PromotionWrite::TierChanged {
                    current: other.map(|s| s.tier),
                })
            }
        }
        audit.push(entry.clone());
        Ok(PromotionWrite::Committed(entry.clone()))
    }

    fn promotions_since(&self, since_ms: i64) -> RecallResult<u32> {
        self.check()?;
        Ok(self
            .audit
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.promoted_at_ms >= since_ms)
            .count() as u32)
    }

    fn recent_promotions(&self, limit: usize) -> RecallResult<Vec<PromotionAuditEntry>> {
        self.check()?;
        let mut audit = self.audit.lock().unwrap().clone();
        audit.reverse();
        audit.truncate(limit);
        Ok(audit)
    }
}

fn engine(store: Arc<MockStore>) -> (PromotionEngine, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2026, 5, 1, 9, 0, 0).unwrap(),
    ));
    let engine = PromotionEngine::with_clock(store, PromotionConfig::default(), clock.clone());
    (engine, clock)
}

#[test]
fn missing_memory_is_not_found() {
    let (engine, _) = engine(Arc::new(MockStore::default()));
    let result = engine.check_eligibility(42);
    assert!(!result.promoted);
    assert_eq!(result.reason, PromotionReason::MemoryNotFound);
    assert_eq!(result.reason_code(), "memory_not_found");
    assert_eq!(result.previous_tier, None);
    assert_eq!(result.validation_count, 0);
}

#[test]
fn below_threshold_reports_progress() {
    let (engine, _) = engine(Arc::new(MockStore::with(vec![(1, Tier::Normal, 3)])));
    let result = engine.check_eligibility(1);
    assert!(!result.promoted);
    assert_eq!(result.reason_code(), "below_threshold:3/5");
    assert_eq!(result.new_tier, Some(Tier::Normal));
}

#[test]
fn threshold_met_is_eligible() {
    let (engine, _) = engine(Arc::new(MockStore::with(vec![
        (1, Tier::Normal, 5),
        (2, Tier::Important, 12),
    ])));
    let normal = engine.check_eligibility(1);
    assert!(normal.promoted);
    assert_eq!(normal.new_tier, Some(Tier::Important));
    assert_eq!(normal.reason_code(), "threshold_met:5>=5");

    let important = engine.check_eligibility(2);
    assert_eq!(important.new_tier, Some(Tier::Critical));
    assert_eq!(important.reason_code(), "threshold_met:12>=10");
}

#[test]
fn terminal_tiers_are_not_promotable() {
    let (engine, _) = engine(Arc::new(MockStore::with(vec![
        (1, Tier::Critical, 100),
        (2, Tier::Constitutional, 100),
        (3, Tier::Temporary, 100),
        (4, Tier::Deprecated, 100),
    ])));
    for (id, name) in [(1, "critical"), (2, "constitutional"), (3, "temporary"), (4, "deprecated")] {
        let result = engine.execute_promotion(id);
        assert!(!result.promoted);
        assert_eq!(result.reason_code(), format!("tier_not_promotable:{name}"));
        assert_eq!(result.previous_tier, result.new_tier);
    }
}

#[test]
fn check_does_not_mutate() {
    let store = Arc::new(MockStore::with(vec![(1, Tier::Normal, 9)]));
    let (engine, _) = engine(store.clone());
    assert!(engine.check_eligibility(1).promoted);
    assert_eq!(store.tier_of(1), Some(Tier::Normal));
    assert!(engine.recent_promotions(10).is_empty());
}

#[test]
fn execute_promotes_and_audits() {
    let store = Arc::new(MockStore::with(vec![(1, Tier::Normal, 5)]));
    let (engine, clock) = engine(store.clone());
    let result = engine.execute_promotion(1);

    assert!(result.promoted);
    assert_eq!(result.previous_tier, Some(Tier::Normal));
    assert_eq!(result.new_tier, Some(Tier::Important));
    assert_eq!(store.tier_of(1), Some(Tier::Important));

    let audit = engine.recent_promotions(10);
    assert_eq!(audit.len(), 1);
    assert_eq!(audit[0].promoted_at_ms, clock.now_ms());
    assert_eq!(audit[0].validation_count, 5);
}

#[test]
fn fourth_promotion_in_window_is_rate_limited() {
    let store = Arc::new(MockStore::with(
        (1..=4).map(|id| (id, Tier::Normal, 6)).collect(),
    ));
    let (engine, clock) = engine(store.clone());

    for id in 1..=3 {
        assert!(engine.execute_promotion(id).promoted);
        clock.advance(Duration::minutes(30));
    }
    let limited = engine.execute_promotion(4);
    assert!(!limited.promoted);
    assert_eq!(limited.reason_code(), "promotion_window_rate_limited:3/8h");
    assert_eq!(limited.new_tier, Some(Tier::Normal));
    assert_eq!(store.tier_of(4), Some(Tier::Normal));
    assert_eq!(engine.promotions_in_window().unwrap(), 3);
}

#[test]
fn promotion_succeeds_once_window_ages_out() {
    let store = Arc::new(MockStore::with(
        (1..=4).map(|id| (id, Tier::Normal, 6)).collect(),
    ));
    let (engine, clock) = engine(store.clone());
    for id in 1..=3 {
        assert!(engine.execute_promotion(id).promoted);
    }
    assert!(!engine.execute_promotion(4).promoted);

    clock.advance(Duration::hours(8) + Duration::milliseconds(1));
    assert_eq!(engine.promotions_in_window().unwrap(), 0);
    assert!(engine.execute_promotion(4).promoted);
    assert_eq!(store.tier_of(4), Some(Tier::Important));
}

#[test]
fn configured_window_is_honored() {
    let store = Arc::new(MockStore::with(vec![(1, Tier::Normal, 6), (2, Tier::Normal, 6)]));
    let clock = Arc::new(ManualClock::starting_now());
    let engine = PromotionEngine::with_clock(
        store,
        PromotionConfig {
            max_promotions_per_window: 1,
            window_hours: 2,
            ..Default::default()
        },
        clock.clone(),
    );
    assert!(engine.execute_promotion(1).promoted);
    assert_eq!(
        engine.execute_promotion(2).reason_code(),
        "promotion_window_rate_limited:1/2h"
    );
    clock.advance(Duration::hours(2) + Duration::seconds(1));
    assert!(engine.execute_promotion(2).promoted);
}

#[test]
fn promoting_twice_climbs_one_step_at_a_time() {
    let store = Arc::new(MockStore::with(vec![(1, Tier::Normal, 11)]));
    let (engine, _) = engine(store.clone());
    assert_eq!(engine.execute_promotion(1).new_tier, Some(Tier::Important));
    assert_eq!(engine.execute_promotion(1).new_tier, Some(Tier::Critical));
    assert_eq!(
        engine.execute_promotion(1).reason_code(),
        "tier_not_promotable:critical"
    );
}

#[test]
fn scan_lists_only_eligible_memories() {
    let (engine, _) = engine(Arc::new(MockStore::with(vec![
        (1, Tier::Normal, 5),
        (2, Tier::Normal, 4),
        (3, Tier::Important, 10),
        (4, Tier::Important, 9),
        (5, Tier::Critical, 50),
    ])));
    let ids: Vec<_> = engine.scan_for_promotions().iter().map(|r| r.memory_id).collect();
    assert_eq!(ids, vec![1, 3]);
}

#[test]
fn scan_ignores_rate_limit() {
    let store = Arc::new(MockStore::with(
        (1..=5).map(|id| (id, Tier::Normal, 5)).collect(),
    ));
    let (engine, _) = engine(store);
    for id in 1..=3 {
        engine.execute_promotion(id);
    }
    assert_eq!(engine.scan_for_promotions().len(), 2);
    assert!(!engine.execute_promotion(4).promoted);
    assert_eq!(engine.scan_for_promotions().len(), 2);
}

#[test]
fn storage_failure_becomes_error_reason() {
    let (engine, _) = engine(Arc::new(MockStore::failing()));
    let check = engine.check_eligibility(1);
    assert!(!check.promoted);
    assert_eq!(check.reason_code(), "error");
    assert_eq!(engine.execute_promotion(1).reason, PromotionReason::Error);
    assert!(engine.scan_for_promotions().is_empty());
    assert!(engine.recent_promotions(5).is_empty());
}
