//! Uniqueness orchestration and the end-to-end originality pipeline.
//!
//! Ties the duplicate detector, fingerprint history and variant engine
//! together: a script is optionally perturbed, scanned for duplicates,
//! auto-fixed, scored, and finally rewritten until it no longer resembles
//! anything in history (or the retry budget runs out).

pub mod engine;
pub mod randomness;
pub mod report;
pub mod rewriter;
pub mod uniqueness;

pub use engine::{OriginalityEngine, ProcessOutcome};
pub use randomness::add_randomness;
pub use report::{auto_fix, generate_originality_report};
pub use rewriter::{FnRewriter, RewriteMode, Rewriter, VariantRewriter};
pub use uniqueness::{
    ensure_uniqueness, EnsureOutcome, RetryPolicy, UniquenessCheckResult, UniquenessChecker,
    UniquenessStatus,
};
