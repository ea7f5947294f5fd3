use crate::config::variant_profile;
use crate::selector::{intensity_for_similarity, select_by_intensity, VariantSelector};
use crate::strategies::apply_strategy;
use crate::types::{DedupVariant, Rewrite};
use oe_core::Script;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Applies variant pipelines and owns the session's selection state.
pub struct VariantEngine<R: Rng = StdRng> {
    rng: R,
    selector: VariantSelector,
}

impl VariantEngine<StdRng> {
    /// Engine seeded from OS entropy.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Reproducible engine.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for VariantEngine<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> VariantEngine<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng, selector: VariantSelector::new() }
    }

    /// Run the variant's strategy pipeline in order.
    pub fn apply_variant(&mut self, text: &str, variant: DedupVariant) -> String {
        let profile = variant_profile(variant);
        let mut out = text.to_string();
        for &strategy in &profile.strategies {
            out = apply_strategy(strategy, &out, profile, &mut self.rng);
        }
        debug!(variant = %variant, changed = out != text, "variant applied");
        out
    }

    pub fn select_random(&mut self, excluding: &[DedupVariant]) -> DedupVariant {
        self.selector.select_random(&mut self.rng, excluding)
    }

    pub fn select_by_intensity(&self, target: f64) -> DedupVariant {
        select_by_intensity(target)
    }

    /// Stronger rewrites for more similar text.
    pub fn smart_rewrite(&mut self, text: &str, similarity: f64) -> Rewrite {
        let variant = select_by_intensity(intensity_for_similarity(similarity));
        Rewrite { text: self.apply_variant(text, variant), variant }
    }

    /// Apply a variant to every segment. Ids and timing are kept.
    pub fn rewrite_script(&mut self, script: &Script, variant: DedupVariant) -> Script {
        let segments = script
            .segments
            .iter()
            .map(|seg| seg.with_content(self.apply_variant(&seg.content, variant)))
            .collect();
        script.with_segments(segments)
    }

    /// The engine's random source, for passes that should share its seed.
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    pub fn used_variants(&self) -> Vec<DedupVariant> {
        self.selector.used()
    }

    pub fn reset_session(&mut self) {
        self.selector.reset();
    }
}
