//! Duplicate detector: orchestrates the four detection passes.

use crate::normalize::{normalize, normalized_chars};
use crate::similarity::{chars_similarity, jaccard};
use crate::structure::{structural_features, StructuralTag};
use crate::templates::{self, TEMPLATE_SIMILARITY};
use oe_core::config::{check_unit, DetectionStrategy, EngineConfig};
use oe_core::types::{DuplicateKind, DuplicateResult, SegmentRef};
use oe_core::{Result, Script, Segment};
use rayon::prelude::*;
use std::collections::{BTreeSet, HashMap, HashSet};
use tracing::{debug, info};

/// Detector settings.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectorConfig {
    pub strategies: BTreeSet<DetectionStrategy>,
    pub similarity_threshold: f64,
    pub structural_threshold: f64,
    pub parallel_min_segments: usize,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self::from(&EngineConfig::default())
    }
}

impl From<&EngineConfig> for DetectorConfig {
    fn from(c: &EngineConfig) -> Self {
        Self {
            strategies: c.strategies.clone(),
            similarity_threshold: c.similarity_threshold,
            structural_threshold: c.structural_threshold,
            parallel_min_segments: c.parallel_min_segments,
        }
    }
}

/// Suggestion for a semantic hit, graded by similarity band.
pub fn semantic_suggestion(similarity: f64) -> &'static str {
    if similarity >= 0.9 {
        "rewrite completely"
    } else if similarity >= 0.8 {
        "major rewrite"
    } else {
        "adjust phrasing"
    }
}

pub const STRUCTURAL_SUGGESTION: &str = "vary sentence pattern";
pub const EXACT_SUGGESTION: &str = "remove or rewrite the repeated segment";

/// The duplicate detector.
#[derive(Debug, Clone)]
pub struct DuplicateDetector {
    config: DetectorConfig,
}

impl DuplicateDetector {
    pub fn new(config: DetectorConfig) -> Result<Self> {
        check_unit("similarityThreshold", config.similarity_threshold)?;
        check_unit("structuralThreshold", config.structural_threshold)?;
        Ok(Self { config })
    }

    pub fn from_engine_config(config: &EngineConfig) -> Result<Self> {
        config.validate()?;
        Self::new(DetectorConfig::from(config))
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Run every enabled pass, then merge, collapse and sort.
    pub fn detect(&self, script: &Script) -> Vec<DuplicateResult> {
        let mut all = Vec::new();
        for strategy in &self.config.strategies {
            let found = match strategy {
                DetectionStrategy::Exact => self.detect_exact_duplicates(script),
                DetectionStrategy::Semantic => self.detect_semantic_duplicates(script),
                DetectionStrategy::Structural => self.detect_structural_duplicates(script),
                DetectionStrategy::Template => self.detect_template_content(script),
            };
            debug!(
                ?strategy,
                hits = found.len(),
                script_id = %script.id,
                "detection pass finished"
            );
            all.extend(found);
        }
        let merged = post_process(all);
        info!(
            script_id = %script.id,
            segments = script.len(),
            findings = merged.len(),
            "duplicate detection complete"
        );
        merged
    }

    /// Later segments whose normalized content equals an earlier one.
    pub fn detect_exact_duplicates(&self, script: &Script) -> Vec<DuplicateResult> {
        let mut first_seen: HashMap<String, &Segment> = HashMap::new();
        let mut results = Vec::new();
        for segment in &script.segments {
            let key = normalize(&segment.content);
            if key.is_empty() {
                continue;
            }
            match first_seen.get(&key) {
                Some(first) => results.push(DuplicateResult::new(
                    DuplicateKind::Exact,
                    SegmentRef::whole(first),
                    SegmentRef::whole(segment),
                    1.0,
                    EXACT_SUGGESTION,
                )),
                None => {
                    first_seen.insert(key, segment);
                }
            }
        }
        results
    }

    /// Pairs whose edit similarity reaches the similarity threshold.
    pub fn detect_semantic_duplicates(&self, script: &Script) -> Vec<DuplicateResult> {
        let normalized: Vec<Vec<char>> = script
            .segments
            .iter()
            .map(|s| normalized_chars(&s.content))
            .collect();
        let threshold = self.config.similarity_threshold;

        self.scan_pairs(script.len(), |i, j| {
            if normalized[i].is_empty() || normalized[j].is_empty() {
                return None;
            }
            let sim = chars_similarity(&normalized[i], &normalized[j]);
            (sim >= threshold).then_some(sim)
        })
        .into_iter()
        .map(|(i, j, sim)| {
            DuplicateResult::new(
                DuplicateKind::Similar,
                SegmentRef::whole(&script.segments[i]),
                SegmentRef::whole(&script.segments[j]),
                sim,
                semantic_suggestion(sim),
            )
        })
        .collect()
    }

    /// Pairs whose structural tag sets overlap at or above the structural threshold.
    pub fn detect_structural_duplicates(&self, script: &Script) -> Vec<DuplicateResult> {
        let features: Vec<BTreeSet<StructuralTag>> = script
            .segments
            .iter()
            .map(|s| structural_features(&s.content))
            .collect();
        let threshold = self.config.structural_threshold;

        self.scan_pairs(script.len(), |i, j| {
            let sim = jaccard(&features[i], &features[j]);
            (sim > 0.0 && sim >= threshold).then_some(sim)
        })
        .into_iter()
        .map(|(i, j, sim)| {
            DuplicateResult::new(
                DuplicateKind::Similar,
                SegmentRef::whole(&script.segments[i]),
                SegmentRef::whole(&script.segments[j]),
                sim,
                STRUCTURAL_SUGGESTION,
            )
        })
        .collect()
    }

    /// One finding per template phrase occurrence.
    pub fn detect_template_content(&self, script: &Script) -> Vec<DuplicateResult> {
        let mut results = Vec::new();
        for segment in &script.segments {
            for hit in templates::find_templates(&segment.content) {
                let source = SegmentRef {
                    segment_id: format!("template:{}", hit.category),
                    snippet: hit.phrase.to_string(),
                    start: segment.start,
                    offset: 0,
                };
                results.push(
                    DuplicateResult::new(
                        DuplicateKind::Template,
                        source,
                        SegmentRef::at(segment, hit.phrase, hit.offset),
                        TEMPLATE_SIMILARITY,
                        templates::suggestion(hit.category),
                    )
                    .with_category(hit.category),
                );
            }
        }
        results
    }

    /// Score every unordered pair `i < j`, keeping the ones `score` accepts.
    /// Rows are spread over the rayon pool for large scripts.
    fn scan_pairs<F>(&self, n: usize, score: F) -> Vec<(usize, usize, f64)>
    where
        F: Fn(usize, usize) -> Option<f64> + Sync,
    {
        if n < 2 {
            return Vec::new();
        }
        let row = |i: usize| {
            ((i + 1)..n)
                .filter_map(|j| score(i, j).map(|sim| (i, j, sim)))
                .collect::<Vec<_>>()
        };
        if n >= self.config.parallel_min_segments {
            (0..n).into_par_iter().flat_map_iter(row).collect()
        } else {
            (0..n).flat_map(row).collect()
        }
    }
}

impl Default for DuplicateDetector {
    fn default() -> Self {
        Self { config: DetectorConfig::default() }
    }
}

/// Sort by similarity (descending, stable), keep the first finding of each
/// unordered (source, target) pair and drop self-pairs.
pub fn post_process(mut results: Vec<DuplicateResult>) -> Vec<DuplicateResult> {
    results.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
    let mut seen = HashSet::new();
    results.retain(|r| !r.is_self_pair() && seen.insert(r.pair_key()));
    results
}
