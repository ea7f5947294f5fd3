use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

use crate::error::{EngineError, Result};

/// Duplicate detection pass.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum DetectionStrategy {
    Exact,
    Semantic,
    Structural,
    Template,
}

impl DetectionStrategy {
    pub const ALL: [DetectionStrategy; 4] = [
        DetectionStrategy::Exact,
        DetectionStrategy::Semantic,
        DetectionStrategy::Structural,
        DetectionStrategy::Template,
    ];
}

/// Engine configuration surface.
///
/// Every constructor that takes a config calls [`EngineConfig::validate`],
/// so out-of-range values are rejected before any script is processed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    pub strategies: BTreeSet<DetectionStrategy>,
    pub similarity_threshold: f64,
    pub structural_threshold: f64,
    pub auto_fix: bool,
    pub auto_variant: bool,
    pub enforce_uniqueness: bool,
    pub uniqueness_threshold: f64,
    pub max_rewrite_attempts: u32,
    pub add_randomness: bool,
    pub rewrite_timeout_ms: u64,
    /// Pair passes go parallel at or above this many segments.
    pub parallel_min_segments: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            strategies: DetectionStrategy::ALL.into_iter().collect(),
            similarity_threshold: 0.7,
            structural_threshold: 0.7,
            auto_fix: false,
            auto_variant: false,
            enforce_uniqueness: true,
            uniqueness_threshold: 0.3,
            max_rewrite_attempts: 3,
            add_randomness: false,
            rewrite_timeout_ms: 30_000,
            parallel_min_segments: 64,
        }
    }
}

impl EngineConfig {
    /// Parse from JSON. Missing keys take their defaults; decoding failures
    /// (e.g. a negative attempt count) surface as configuration errors.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| EngineError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let config = Self::from_json(&raw)?;
        debug!(path = %path.display(), "engine config loaded");
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        check_unit("similarityThreshold", self.similarity_threshold)?;
        check_unit("structuralThreshold", self.structural_threshold)?;
        check_unit("uniquenessThreshold", self.uniqueness_threshold)?;
        if self.rewrite_timeout_ms == 0 {
            return Err(EngineError::InvalidConfig(
                "rewriteTimeoutMs must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    pub fn is_enabled(&self, strategy: DetectionStrategy) -> bool {
        self.strategies.contains(&strategy)
    }

    pub fn rewrite_timeout(&self) -> Duration {
        Duration::from_millis(self.rewrite_timeout_ms)
    }

    pub fn with_strategies(mut self, strategies: &[DetectionStrategy]) -> Self {
        self.strategies = strategies.iter().copied().collect();
        self
    }
}

/// Reject values outside [0, 1] (NaN included).
pub fn check_unit(name: &str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(EngineError::InvalidConfig(format!(
            "{name} must be within [0, 1], got {value}"
        )))
    }
}
