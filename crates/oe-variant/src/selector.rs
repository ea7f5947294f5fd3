//! Variant selection policies.

use crate::config::PROFILES;
use crate::types::DedupVariant;
use rand::seq::SliceRandom;
use rand::Rng;

/// Round-robin-without-repeat selection state. One per engine.
#[derive(Debug, Clone)]
pub struct VariantSelector {
    unused: Vec<DedupVariant>,
}

impl Default for VariantSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl VariantSelector {
    pub fn new() -> Self {
        Self { unused: DedupVariant::ALL.to_vec() }
    }

    /// Pick uniformly among variants not yet used in this cycle, skipping
    /// `excluding`. Starts a new cycle when nothing eligible remains.
    pub fn select_random<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        excluding: &[DedupVariant],
    ) -> DedupVariant {
        let mut candidates: Vec<DedupVariant> =
            self.unused.iter().copied().filter(|v| !excluding.contains(v)).collect();
        if candidates.is_empty() {
            self.reset();
            candidates = self.unused.iter().copied().filter(|v| !excluding.contains(v)).collect();
        }
        if candidates.is_empty() {
            candidates = DedupVariant::ALL.to_vec();
        }
        let picked = *candidates.choose(rng).unwrap_or(&DedupVariant::Balanced);
        self.unused.retain(|v| *v != picked);
        picked
    }

    /// Variants already handed out in the current cycle.
    pub fn used(&self) -> Vec<DedupVariant> {
        DedupVariant::ALL.iter().copied().filter(|v| !self.unused.contains(v)).collect()
    }

    pub fn reset(&mut self) {
        self.unused = DedupVariant::ALL.to_vec();
    }
}

/// Variant whose intensity is closest to `target`; ties go to the earlier
/// variant in enumeration order.
pub fn select_by_intensity(target: f64) -> DedupVariant {
    let mut best = PROFILES[0].variant;
    let mut best_dist = f64::INFINITY;
    for profile in PROFILES.iter() {
        let dist = (profile.intensity - target).abs();
        if dist < best_dist {
            best = profile.variant;
            best_dist = dist;
        }
    }
    best
}

/// Target intensity for a measured similarity.
pub fn intensity_for_similarity(similarity: f64) -> f64 {
    if similarity >= 0.8 {
        1.0
    } else if similarity >= 0.6 {
        0.8
    } else if similarity >= 0.4 {
        0.5
    } else {
        0.2
    }
}
