//! Variant rewrite engine.
//!
//! Eight named presets, each an ordered pipeline of stochastic rewrite
//! strategies. Randomness comes from the engine's own source so rewrites
//! can be made reproducible with a seed.

pub mod config;
pub mod engine;
pub mod selector;
pub mod strategies;
pub mod types;

pub use config::{variant_profile, PROFILES};
pub use engine::VariantEngine;
pub use selector::{intensity_for_similarity, select_by_intensity, VariantSelector};
pub use types::{DedupVariant, Rewrite, Strategy, VariantProfile};
