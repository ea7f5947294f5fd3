//! Duplicate detection for narration scripts.
//!
//! Building blocks, leaves first:
//! 1. Normalizer: case folding, whitespace/punctuation stripping
//! 2. Metrics: edit-distance similarity, structural-feature similarity
//! 3. Templates: curated stock phrases per rhetorical category
//! 4. Detector: exact, semantic, structural and template passes

pub mod detector;
pub mod normalize;
pub mod similarity;
pub mod structure;
pub mod templates;

pub use detector::{post_process, DetectorConfig, DuplicateDetector};
pub use normalize::normalize;
pub use similarity::{edit_similarity, jaccard, levenshtein};
pub use structure::{structural_features, structural_similarity, StructuralTag};

#[cfg(test)]
mod tests;
