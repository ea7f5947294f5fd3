//! The rewrite collaborator used by the uniqueness loop.

use async_trait::async_trait;
use oe_core::Script;
use oe_variant::{DedupVariant, VariantEngine};
use parking_lot::Mutex;
use std::future::Future;
use tracing::debug;

/// Produces a new candidate for a script that was judged too similar to
/// history. Implementations may suspend (e.g. call a remote generator).
#[async_trait]
pub trait Rewriter: Send + Sync {
    async fn rewrite(&self, script: &Script) -> anyhow::Result<Script>;

    /// Rewrite knowing how similar the script was to its closest match.
    async fn rewrite_similar(&self, script: &Script, similarity: f64) -> anyhow::Result<Script> {
        let _ = similarity;
        self.rewrite(script).await
    }
}

/// Adapts an async closure into a [`Rewriter`].
pub struct FnRewriter<F> {
    f: F,
}

impl<F, Fut> FnRewriter<F>
where
    F: Fn(Script) -> Fut + Send + Sync,
    Fut: Future<Output = anyhow::Result<Script>> + Send + 'static,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

#[async_trait]
impl<F, Fut> Rewriter for FnRewriter<F>
where
    F: Fn(Script) -> Fut + Send + Sync,
    Fut: Future<Output = anyhow::Result<Script>> + Send + 'static,
{
    async fn rewrite(&self, script: &Script) -> anyhow::Result<Script> {
        (self.f)(script.clone()).await
    }
}

/// How [`VariantRewriter`] chooses a variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewriteMode {
    /// Intensity follows the measured similarity.
    Smart,
    /// Next unused variant of the session.
    Random,
}

/// Local rewriter backed by the variant engine.
pub struct VariantRewriter {
    engine: Mutex<VariantEngine>,
    mode: RewriteMode,
}

impl VariantRewriter {
    pub fn new(engine: VariantEngine, mode: RewriteMode) -> Self {
        Self { engine: Mutex::new(engine), mode }
    }

    pub fn smart(engine: VariantEngine) -> Self {
        Self::new(engine, RewriteMode::Smart)
    }

    pub fn random(engine: VariantEngine) -> Self {
        Self::new(engine, RewriteMode::Random)
    }

    fn rewrite_with(&self, script: &Script, similarity: f64) -> Script {
        let mut engine = self.engine.lock();
        let variant = match self.mode {
            RewriteMode::Smart => {
                engine.select_by_intensity(oe_variant::intensity_for_similarity(similarity))
            }
            RewriteMode::Random => engine.select_random(&[]),
        };
        debug!(script_id = %script.id, variant = %variant, similarity, "rewriting script");
        engine.rewrite_script(script, variant)
    }

    /// Variants handed out so far in this rewriter's session.
    pub fn used_variants(&self) -> Vec<DedupVariant> {
        self.engine.lock().used_variants()
    }
}

#[async_trait]
impl Rewriter for VariantRewriter {
    async fn rewrite(&self, script: &Script) -> anyhow::Result<Script> {
        Ok(self.rewrite_with(script, 1.0))
    }

    async fn rewrite_similar(&self, script: &Script, similarity: f64) -> anyhow::Result<Script> {
        Ok(self.rewrite_with(script, similarity))
    }
}
