//! End-to-end pipeline.

use crate::randomness::add_randomness;
use crate::report::{auto_fix, generate_originality_report};
use crate::rewriter::Rewriter;
use crate::uniqueness::{
    ensure_uniqueness, RetryPolicy, UniquenessCheckResult, UniquenessChecker, UniquenessStatus,
};
use oe_core::{EngineConfig, OriginalityReport, Result, Script};
use oe_detector::DuplicateDetector;
use oe_fingerprint::{FingerprintStore, HistoryBackend, MemoryBackend};
use oe_variant::VariantEngine;
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

/// Result of [`OriginalityEngine::process`].
#[derive(Debug, Clone, Serialize)]
pub struct ProcessOutcome {
    pub script: Script,
    pub report: OriginalityReport,
    /// Present when uniqueness enforcement ran.
    pub uniqueness: Option<UniquenessStatus>,
}

/// Detector, fingerprint history and variant engine behind one config.
pub struct OriginalityEngine {
    config: EngineConfig,
    detector: DuplicateDetector,
    checker: UniquenessChecker,
    variants: Mutex<VariantEngine>,
}

impl OriginalityEngine {
    pub fn new(config: EngineConfig, backend: Arc<dyn HistoryBackend>) -> Result<Self> {
        config.validate()?;
        let detector = DuplicateDetector::from_engine_config(&config)?;
        let store = FingerprintStore::new(backend, config.uniqueness_threshold)?;
        Ok(Self {
            config,
            detector,
            checker: UniquenessChecker::new(Arc::new(store)),
            variants: Mutex::new(VariantEngine::new()),
        })
    }

    /// Engine with a fresh in-memory history.
    pub fn in_memory(config: EngineConfig) -> Result<Self> {
        Self::new(config, Arc::new(MemoryBackend::new()))
    }

    /// Replace the variant engine, e.g. with a seeded one.
    pub fn with_variant_engine(mut self, engine: VariantEngine) -> Self {
        self.variants = Mutex::new(engine);
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn detector(&self) -> &DuplicateDetector {
        &self.detector
    }

    pub fn checker(&self) -> &UniquenessChecker {
        &self.checker
    }

    pub fn check_uniqueness(&self, script: &Script) -> UniquenessCheckResult {
        self.checker.check(script)
    }

    /// Detect and report without touching history.
    pub fn analyze(&self, script: &Script) -> OriginalityReport {
        generate_originality_report(script, self.detector.detect(script))
    }

    /// Randomize, detect, optionally auto-fix, report, then optionally
    /// enforce uniqueness against history.
    pub async fn process(
        &self,
        script: &Script,
        rewriter: &dyn Rewriter,
    ) -> Result<ProcessOutcome> {
        let mut working = if self.config.add_randomness {
            let mut variants = self.variants.lock();
            add_randomness(script, variants.rng_mut())
        } else {
            script.clone()
        };

        let mut duplicates = self.detector.detect(&working);
        if self.config.auto_fix && !duplicates.is_empty() {
            working = {
                let mut variants = self.variants.lock();
                auto_fix(&working, &duplicates, &mut *variants, self.config.auto_variant)
            };
            duplicates = self.detector.detect(&working);
        }
        let mut report = generate_originality_report(&working, duplicates);

        let uniqueness = if self.config.enforce_uniqueness {
            let policy = RetryPolicy::from(&self.config);
            let outcome = ensure_uniqueness(&self.checker, &working, rewriter, policy).await?;
            if outcome.status.attempts > 0 {
                report = self.analyze(&outcome.script);
            }
            working = outcome.script;
            Some(outcome.status)
        } else {
            None
        };

        info!(
            script_id = %working.id,
            score = report.score,
            duplicates = report.duplicates.len(),
            unique = ?uniqueness.as_ref().map(|u| u.is_unique),
            "script processed"
        );
        Ok(ProcessOutcome { script: working, report, uniqueness })
    }
}
