//! Configuration for every Recall subsystem.
//!
//! Each section deserializes with `#[serde(default)]`, so a partial (or empty)
//! TOML document yields a fully-populated config.

pub mod defaults;
mod folder_scoring_config;
mod learning_config;
mod negative_feedback_config;
mod promotion_config;
mod storage_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{RecallError, RecallResult};

pub use folder_scoring_config::FolderScoringConfig;
pub use learning_config::LearningConfig;
pub use negative_feedback_config::NegativeFeedbackConfig;
pub use promotion_config::PromotionConfig;
pub use storage_config::StorageConfig;

/// Root configuration, injected into each engine's constructor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RecallConfig {
    pub storage: StorageConfig,
    pub learning: LearningConfig,
    pub promotion: PromotionConfig,
    pub negative_feedback: NegativeFeedbackConfig,
    pub folder_scoring: FolderScoringConfig,
}

impl RecallConfig {
    /// Parse and validate a TOML document. Missing sections and fields take
    /// their defaults.
    pub fn from_toml(source: &str) -> RecallResult<Self> {
        let config: Self =
            toml::from_str(source).map_err(|e| RecallError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field ranges that serde cannot express.
    pub fn validate(&self) -> RecallResult<()> {
        self.negative_feedback.validate()
    }

    /// Read and parse a TOML file.
    pub fn load(path: &Path) -> RecallResult<Self> {
        let source = std::fs::read_to_string(path).map_err(|e| {
            RecallError::ConfigError(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_toml(&source)
    }

    /// Serialize back to TOML.
    pub fn to_toml(&self) -> RecallResult<String> {
        toml::to_string(self).map_err(|e| RecallError::ConfigError(e.to_string()))
    }
}
