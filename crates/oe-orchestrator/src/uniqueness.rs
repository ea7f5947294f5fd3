//! Uniqueness check against fingerprint history and the bounded rewrite loop.

use crate::rewriter::Rewriter;
use oe_core::{EngineConfig, EngineError, Result, Script};
use oe_fingerprint::{fingerprint, ContentFingerprint, FingerprintMatch, FingerprintStore};
use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

const MAX_LISTED_KEYWORDS: usize = 5;

/// Outcome of comparing one script with history.
#[derive(Debug, Clone, Serialize)]
pub struct UniquenessCheckResult {
    pub is_unique: bool,
    /// Similarity to the closest match, 0 when unique.
    pub similarity: f64,
    pub fingerprint: ContentFingerprint,
    pub matched: Option<FingerprintMatch>,
    pub differences: Vec<String>,
    pub suggestions: Vec<String>,
}

/// Uniqueness status after the rewrite loop.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UniquenessStatus {
    pub is_unique: bool,
    /// Rewrites invoked, including one that failed or timed out.
    pub attempts: u32,
    pub similarity: f64,
    /// Why the loop stopped early, if it did.
    pub aborted: Option<String>,
}

#[derive(Debug, Clone)]
pub struct EnsureOutcome {
    pub script: Script,
    pub status: UniquenessStatus,
}

/// Retry bounds for [`ensure_uniqueness`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub timeout: Duration,
}

impl From<&EngineConfig> for RetryPolicy {
    fn from(config: &EngineConfig) -> Self {
        Self { max_attempts: config.max_rewrite_attempts, timeout: config.rewrite_timeout() }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from(&EngineConfig::default())
    }
}

/// Compares scripts with a fingerprint store.
#[derive(Clone)]
pub struct UniquenessChecker {
    store: Arc<FingerprintStore>,
}

impl UniquenessChecker {
    pub fn new(store: Arc<FingerprintStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &FingerprintStore {
        &self.store
    }

    /// Query only; history is not modified.
    pub fn check(&self, script: &Script) -> UniquenessCheckResult {
        let fp = fingerprint(script);
        let matched = self.store.query_best(&fp);
        build_result(fp, matched)
    }

    /// Query and register the script when it is unique, as one step.
    pub fn check_and_register(&self, script: &Script) -> Result<UniquenessCheckResult> {
        let fp = fingerprint(script);
        let matched = self.store.check_and_register(&fp)?;
        Ok(build_result(fp, matched))
    }
}

fn build_result(
    fp: ContentFingerprint,
    matched: Option<FingerprintMatch>,
) -> UniquenessCheckResult {
    let (similarity, differences, suggestions) = match &matched {
        Some(m) => (m.similarity, differences(&fp, &m.fingerprint), suggestions(m.similarity)),
        None => (0.0, Vec::new(), Vec::new()),
    };
    UniquenessCheckResult {
        is_unique: matched.is_none(),
        similarity,
        fingerprint: fp,
        matched,
        differences,
        suggestions,
    }
}

/// Human-readable contrast between a candidate and its closest match.
pub fn differences(candidate: &ContentFingerprint, matched: &ContentFingerprint) -> Vec<String> {
    let ours: BTreeSet<&str> = candidate.keywords.iter().map(String::as_str).collect();
    let theirs: BTreeSet<&str> = matched.keywords.iter().map(String::as_str).collect();
    let mut out = Vec::new();

    let added: Vec<&str> =
        candidate.keywords.iter().map(String::as_str).filter(|k| !theirs.contains(k)).collect();
    if !added.is_empty() {
        out.push(format!("new keywords: {}", list(&added)));
    }
    let missing: Vec<&str> =
        matched.keywords.iter().map(String::as_str).filter(|k| !ours.contains(k)).collect();
    if !missing.is_empty() {
        out.push(format!("keywords not reused: {}", list(&missing)));
    }

    let (a, b) = (candidate.segment_count(), matched.segment_count());
    if a != b {
        out.push(format!("segment count differs: {a} vs {b}"));
    } else if candidate.structural_signature == matched.structural_signature {
        out.push("identical segment structure".to_string());
    } else {
        out.push("same segment count, different segment shapes".to_string());
    }
    out
}

fn list(items: &[&str]) -> String {
    items.iter().take(MAX_LISTED_KEYWORDS).copied().collect::<Vec<_>>().join(", ")
}

/// Advice graded by how close the match is.
pub fn suggestions(similarity: f64) -> Vec<String> {
    let advice: &[&str] = if similarity >= 0.8 {
        &[
            "Content is nearly identical to a previous script; rewrite it fully",
            "Pick a different angle or opening for the topic",
        ]
    } else if similarity >= 0.6 {
        &[
            "Large overlap with a previous script; restructure the segments",
            "Change perspective and replace recurring keywords",
        ]
    } else {
        &["Partial overlap with a previous script; vary the wording of shared passages"]
    };
    advice.iter().map(|s| s.to_string()).collect()
}

/// Check, rewrite, re-check until the script is unique or attempts run out.
///
/// Performs at most `max_attempts + 1` checks. A failed or timed-out
/// rewrite ends the loop with the last script and `is_unique = false`;
/// only store errors are returned as `Err`. Store access may do blocking
/// file I/O, so each check runs on tokio's blocking pool.
pub async fn ensure_uniqueness(
    checker: &UniquenessChecker,
    script: &Script,
    rewriter: &dyn Rewriter,
    policy: RetryPolicy,
) -> Result<EnsureOutcome> {
    let mut current = script.clone();
    let mut attempts = 0u32;
    loop {
        let check = check_blocking(checker, &current).await?;
        if check.is_unique {
            info!(script_id = %current.id, attempts, "script is unique");
            let status =
                UniquenessStatus { is_unique: true, attempts, similarity: 0.0, aborted: None };
            return Ok(EnsureOutcome { script: current, status });
        }
        if attempts >= policy.max_attempts {
            warn!(
                script_id = %current.id,
                attempts,
                similarity = check.similarity,
                "rewrite attempts exhausted"
            );
            let status = UniquenessStatus {
                is_unique: false,
                attempts,
                similarity: check.similarity,
                aborted: None,
            };
            return Ok(EnsureOutcome { script: current, status });
        }
        attempts += 1;
        let rewrite = rewriter.rewrite_similar(&current, check.similarity);
        let error = match tokio::time::timeout(policy.timeout, rewrite).await {
            Ok(Ok(next)) => {
                current = next;
                continue;
            }
            Ok(Err(e)) => EngineError::Rewrite(e.to_string()),
            Err(_) => EngineError::RewriteTimeout(policy.timeout),
        };
        warn!(script_id = %current.id, attempts, error = %error, "uniqueness loop aborted");
        let status = UniquenessStatus {
            is_unique: false,
            attempts,
            similarity: check.similarity,
            aborted: Some(error.to_string()),
        };
        return Ok(EnsureOutcome { script: current, status });
    }
}

async fn check_blocking(
    checker: &UniquenessChecker,
    script: &Script,
) -> Result<UniquenessCheckResult> {
    let checker = checker.clone();
    let script = script.clone();
    tokio::task::spawn_blocking(move || checker.check_and_register(&script))
        .await
        .map_err(|e| EngineError::Storage(format!("uniqueness check task failed: {e}")))?
}
