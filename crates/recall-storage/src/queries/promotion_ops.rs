//! Tier reads, the windowed promotion write, and the promotion audit log.

use rusqlite::{params, params_from_iter, Connection, OptionalExtension};

use recall_core::errors::RecallResult;
use recall_core::memory::{MemoryId, Tier};
use recall_core::models::PromotionAuditEntry;
use recall_core::traits::{PromotionWrite, TierState};

use super::{from_millis, placeholders};
use crate::to_storage_err;

pub fn tier_state(conn: &Connection, id: MemoryId) -> RecallResult<Option<TierState>> {
    let raw = conn
        .query_row(
            "SELECT importance_tier, validation_count FROM memory_index WHERE id = ?1",
            params![id],
            |row| Ok((row.get::<_, String>(0)?, row.get::<_, u32>(1)?)),
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;
    raw.map(|(tier, validation_count)| {
        Ok(TierState {
            memory_id: id,
            tier: tier.parse()?,
            validation_count,
        })
    })
    .transpose()
}

/// Every memory at one of `tiers`, in id order.
pub fn tier_states(conn: &Connection, tiers: &[Tier]) -> RecallResult<Vec<TierState>> {
    if tiers.is_empty() {
        return Ok(Vec::new());
    }
    let sql = format!(
        "SELECT id, importance_tier, validation_count FROM memory_index
         WHERE importance_tier IN ({}) ORDER BY id",
        placeholders(tiers.len())
    );
    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params_from_iter(tiers.iter().map(|t| t.as_str())), |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, u32>(2)?,
            ))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut out = Vec::new();
    for row in rows {
        let (memory_id, tier, validation_count) = row.map_err(|e| to_storage_err(e.to_string()))?;
        out.push(TierState {
            memory_id,
            tier: tier.parse()?,
            validation_count,
        });
    }
    Ok(out)
}

/// Count, check, update, and append inside one immediate transaction.
///
/// The tier update is a compare-and-set on `previous_tier`, so a concurrent
/// promotion of the same memory writes nothing.
pub fn promote_within_window(
    conn: &Connection,
    entry: &PromotionAuditEntry,
    window_start_ms: i64,
    max_in_window: u32,
) -> RecallResult<PromotionWrite> {
    crate::tx::immediate(conn, "promote_within_window", |tx| {
        let in_window = promotions_since(tx, window_start_ms)?;
        if in_window >= max_in_window {
            return Ok(PromotionWrite::RateLimited { in_window });
        }

        let changed = tx
            .execute(
                "UPDATE memory_index SET importance_tier = ?1, updated_at = ?2
                 WHERE id = ?3 AND importance_tier = ?4",
                params![
                    entry.new_tier.as_str(),
                    from_millis(entry.promoted_at_ms).to_rfc3339(),
                    entry.memory_id,
                    entry.previous_tier.as_str(),
                ],
            )
            .map_err(|e| to_storage_err(e.to_string()))?;
        if changed == 0 {
            let current = tier_state(tx, entry.memory_id)?.map(|s| s.tier);
            return Ok(PromotionWrite::TierChanged { current });
        }

        tx.execute(
            "INSERT INTO memory_promotion_audit
                (memory_id, previous_tier, new_tier, validation_count, promoted_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                entry.memory_id,
                entry.previous_tier.as_str(),
                entry.new_tier.as_str(),
                entry.validation_count,
                entry.promoted_at_ms,
            ],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

        Ok(PromotionWrite::Committed(entry.clone()))
    })
}

pub fn promotions_since(conn: &Connection, since_ms: i64) -> RecallResult<u32> {
    conn.query_row(
        "SELECT COUNT(*) FROM memory_promotion_audit WHERE promoted_at >= ?1",
        params![since_ms],
        |row| row.get(0),
    )
    .map_err(|e| to_storage_err(e.to_string()))
}

/// Newest first.
pub fn recent_promotions(conn: &Connection, limit: usize) -> RecallResult<Vec<PromotionAuditEntry>> {
    let mut stmt = conn
        .prepare(
            "SELECT memory_id, previous_tier, new_tier, validation_count, promoted_at
             FROM memory_promotion_audit
             ORDER BY promoted_at DESC, id DESC
             LIMIT ?1",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![limit as i64], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, u32>(3)?,
                row.get::<_, i64>(4)?,
            ))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut out = Vec::new();
    for row in rows {
        let (memory_id, previous, new, validation_count, promoted_at_ms) =
            row.map_err(|e| to_storage_err(e.to_string()))?;
        out.push(PromotionAuditEntry {
            memory_id,
            previous_tier: previous.parse()?,
            new_tier: new.parse()?,
            validation_count,
            promoted_at_ms,
        });
    }
    Ok(out)
}
