//! Composite folder scores.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use regex::{Regex, RegexBuilder};
use tracing::warn;

use recall_core::config::FolderScoringConfig;
use recall_core::constants::MS_PER_DAY;
use recall_core::memory::Tier;
use recall_core::models::{FolderMemory, FolderScore};

const RECENCY_WEIGHT: f64 = 0.40;
const IMPORTANCE_WEIGHT: f64 = 0.30;
const ACTIVITY_WEIGHT: f64 = 0.20;
const VALIDATION_WEIGHT: f64 = 0.10;

/// Recency for an unparseable timestamp.
const UNKNOWN_RECENCY: f64 = 0.5;

/// Options for [`compute_folder_scores`].
#[derive(Debug, Clone, Default)]
pub struct FolderScoreOptions {
    /// Extra case-insensitive regexes; matching folders are skipped.
    pub exclude_patterns: Vec<String>,
    pub include_archived: bool,
    /// Keep at most this many folders. `None` or 0 keeps all.
    pub limit: Option<usize>,
}

/// Component scores for one folder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SingleFolderScore {
    pub score: f64,
    pub recency_score: f64,
    pub importance_score: f64,
    pub activity_score: f64,
    pub validation_score: f64,
}

/// Folder scoring with a configurable decay rate and activity saturation.
#[derive(Debug, Clone, Default)]
pub struct FolderScorer {
    config: FolderScoringConfig,
}

impl FolderScorer {
    pub fn new(config: FolderScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FolderScoringConfig {
        &self.config
    }

    /// `1 / (1 + days × decay_rate)`. Constitutional is always 1.0, a missing
    /// timestamp 0.5, a future one 1.0.
    pub fn recency_score(
        &self,
        timestamp: Option<DateTime<Utc>>,
        tier: Tier,
        now: DateTime<Utc>,
    ) -> f64 {
        if !tier.decays() {
            return 1.0;
        }
        let Some(ts) = timestamp else {
            return UNKNOWN_RECENCY;
        };
        let days = (now - ts).num_milliseconds() as f64 / MS_PER_DAY as f64;
        if days < 0.0 {
            return 1.0;
        }
        1.0 / (1.0 + days * self.config.decay_rate)
    }

    pub fn single_folder_score(
        &self,
        folder: &str,
        memories: &[&FolderMemory],
        now: DateTime<Utc>,
    ) -> SingleFolderScore {
        let validation_score = self.config.validation_score;
        if memories.is_empty() {
            return SingleFolderScore {
                score: 0.0,
                recency_score: 0.0,
                importance_score: 0.0,
                activity_score: 0.0,
                validation_score,
            };
        }

        let recency_score = memories
            .iter()
            .map(|m| self.recency_score(m.updated_at, m.tier, now))
            .fold(f64::NEG_INFINITY, f64::max);

        let saturation = self.config.max_activity_memories.max(1) as f64;
        let activity_score = (memories.len() as f64 / saturation).min(1.0);

        let importance_score =
            memories.iter().map(|m| m.tier.weight()).sum::<f64>() / memories.len() as f64;

        let raw = RECENCY_WEIGHT * recency_score
            + IMPORTANCE_WEIGHT * importance_score
            + ACTIVITY_WEIGHT * activity_score
            + VALIDATION_WEIGHT * validation_score;

        SingleFolderScore {
            score: raw * crate::archive::archive_multiplier(folder),
            recency_score,
            importance_score,
            activity_score,
            validation_score,
        }
    }

    /// Group by folder, score, filter, sort descending, truncate.
    pub fn folder_scores(
        &self,
        memories: &[FolderMemory],
        options: &FolderScoreOptions,
        now: DateTime<Utc>,
    ) -> Vec<FolderScore> {
        if memories.is_empty() {
            return Vec::new();
        }
        let excludes = compile_excludes(&options.exclude_patterns);

        // Folders in first-seen order so equal scores keep input order.
        let mut order: Vec<&str> = Vec::new();
        let mut groups: HashMap<&str, Vec<&FolderMemory>> = HashMap::new();
        for memory in memories {
            let folder = if memory.folder.is_empty() {
                "unknown"
            } else {
                memory.folder.as_str()
            };
            groups
                .entry(folder)
                .or_insert_with(|| {
                    order.push(folder);
                    Vec::new()
                })
                .push(memory);
        }

        let mut scores: Vec<FolderScore> = order
            .into_iter()
            .filter_map(|folder| {
                let archived = crate::archive::is_archived(folder);
                if archived && !options.include_archived {
                    return None;
                }
                if excludes.iter().any(|re| re.is_match(folder)) {
                    return None;
                }
                let group = groups.get(folder)?;
                let parts = self.single_folder_score(folder, group, now);
                Some(FolderScore {
                    folder: folder.to_string(),
                    simplified: crate::archive::simplify_folder_path(folder),
                    count: group.len(),
                    score: parts.score,
                    recency_score: parts.recency_score,
                    importance_score: parts.importance_score,
                    activity_score: parts.activity_score,
                    validation_score: parts.validation_score,
                    last_activity: find_last_activity(group, now),
                    is_archived: archived,
                    top_tier: find_top_tier(group),
                })
            })
            .collect();

        scores.sort_by(|a, b| b.score.total_cmp(&a.score));
        if let Some(limit) = options.limit.filter(|l| *l > 0) {
            scores.truncate(limit);
        }
        scores
    }
}

fn compile_excludes(patterns: &[String]) -> Vec<Regex> {
    patterns
        .iter()
        .filter_map(|p| match RegexBuilder::new(p).case_insensitive(true).build() {
            Ok(re) => Some(re),
            Err(e) => {
                warn!(pattern = %p, error = %e, "ignoring invalid folder exclude pattern");
                None
            }
        })
        .collect()
}

/// Recency with the default decay rate.
pub fn compute_recency_score(
    timestamp: Option<DateTime<Utc>>,
    tier: Tier,
    now: DateTime<Utc>,
) -> f64 {
    FolderScorer::default().recency_score(timestamp, tier, now)
}

/// Score one folder's memories with default settings.
pub fn compute_single_folder_score(
    folder: &str,
    memories: &[&FolderMemory],
    now: DateTime<Utc>,
) -> SingleFolderScore {
    FolderScorer::default().single_folder_score(folder, memories, now)
}

/// Score every folder with default settings.
pub fn compute_folder_scores(
    memories: &[FolderMemory],
    options: &FolderScoreOptions,
    now: DateTime<Utc>,
) -> Vec<FolderScore> {
    FolderScorer::default().folder_scores(memories, options, now)
}

/// Highest tier present, constitutional first. Normal for an empty slice.
pub fn find_top_tier(memories: &[&FolderMemory]) -> Tier {
    memories.iter().map(|m| m.tier).max().unwrap_or(Tier::Normal)
}

/// Latest known timestamp, or `now` when none is known.
pub fn find_last_activity(memories: &[&FolderMemory], now: DateTime<Utc>) -> DateTime<Utc> {
    memories
        .iter()
        .filter_map(|m| m.updated_at)
        .max()
        .unwrap_or(now)
}
