//! # recall-folders
//!
//! Ranks project folders so "resume recent work" lands on the right one.
//!
//! score = (0.40 × recency + 0.30 × importance + 0.20 × activity + 0.10 × validation)
//!         × archive multiplier
//!
//! Scores are not rounded.

pub mod archive;
pub mod scorer;

pub use archive::{archive_multiplier, is_archived, simplify_folder_path};
pub use scorer::{
    compute_folder_scores, compute_recency_score, compute_single_folder_score, find_last_activity,
    find_top_tier, FolderScoreOptions, FolderScorer, SingleFolderScore,
};
