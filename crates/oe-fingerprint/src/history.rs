//! Fingerprint history: register and query previously accepted scripts.

use crate::fingerprint::{similarity, ContentFingerprint};
use crate::store::{HistoryBackend, MemoryBackend, Records};
use oe_core::config::check_unit;
use oe_core::Result;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Default similarity above which a history entry counts as a match.
pub const DEFAULT_MATCH_THRESHOLD: f64 = 0.3;

/// Best history entry for a queried fingerprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FingerprintMatch {
    pub fingerprint: ContentFingerprint,
    pub similarity: f64,
}

/// Append-only fingerprint history over a pluggable backend.
///
/// Every load/compare/append/save sequence runs under one lock, so
/// concurrent callers sharing a store never lose each other's appends.
pub struct FingerprintStore {
    backend: Arc<dyn HistoryBackend>,
    threshold: f64,
    lock: Mutex<()>,
}

impl FingerprintStore {
    pub fn new(backend: Arc<dyn HistoryBackend>, threshold: f64) -> Result<Self> {
        check_unit("uniquenessThreshold", threshold)?;
        Ok(Self { backend, threshold, lock: Mutex::new(()) })
    }

    /// In-memory store with the default threshold.
    pub fn in_memory() -> Self {
        Self {
            backend: Arc::new(MemoryBackend::new()),
            threshold: DEFAULT_MATCH_THRESHOLD,
            lock: Mutex::new(()),
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Append a fingerprint. Returns `false` when the id is already known.
    pub fn register(&self, fingerprint: &ContentFingerprint) -> Result<bool> {
        let _guard = self.lock.lock();
        let mut history = self.load();
        self.append(&mut history, fingerprint)
    }

    /// Highest-similarity entry strictly above the threshold.
    pub fn query_best(&self, fingerprint: &ContentFingerprint) -> Option<FingerprintMatch> {
        let _guard = self.lock.lock();
        let history = self.load();
        self.best_match(&history, fingerprint)
    }

    /// Query and, when nothing matches, register, in one step.
    pub fn check_and_register(
        &self,
        fingerprint: &ContentFingerprint,
    ) -> Result<Option<FingerprintMatch>> {
        let _guard = self.lock.lock();
        let mut history = self.load();
        if let Some(found) = self.best_match(&history, fingerprint) {
            return Ok(Some(found));
        }
        self.append(&mut history, fingerprint)?;
        Ok(None)
    }

    /// All entries, oldest first.
    pub fn history(&self) -> Vec<ContentFingerprint> {
        let _guard = self.lock.lock();
        ordered(&self.load()).into_iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        let _guard = self.lock.lock();
        self.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every registered fingerprint.
    pub fn clear(&self) -> Result<()> {
        let _guard = self.lock.lock();
        self.backend.save_all(&Records::new())?;
        info!("fingerprint history cleared");
        Ok(())
    }

    fn append(
        &self,
        history: &mut BTreeMap<String, ContentFingerprint>,
        fingerprint: &ContentFingerprint,
    ) -> Result<bool> {
        if history.contains_key(&fingerprint.id) {
            debug!(id = %fingerprint.id, "fingerprint already registered");
            return Ok(false);
        }
        history.insert(fingerprint.id.clone(), fingerprint.clone());
        self.save(history)?;
        info!(
            id = %fingerprint.id,
            script_id = %fingerprint.script_id,
            total = history.len(),
            "fingerprint registered"
        );
        Ok(true)
    }

    fn best_match(
        &self,
        history: &BTreeMap<String, ContentFingerprint>,
        fingerprint: &ContentFingerprint,
    ) -> Option<FingerprintMatch> {
        let mut best: Option<FingerprintMatch> = None;
        for entry in ordered(history) {
            if entry.id == fingerprint.id {
                continue;
            }
            let sim = similarity(fingerprint, entry);
            if sim <= self.threshold {
                continue;
            }
            if best.as_ref().map_or(true, |b| sim > b.similarity) {
                best = Some(FingerprintMatch { fingerprint: entry.clone(), similarity: sim });
            }
        }
        best
    }

    /// Decode the backend's records. Unreadable history or undecodable
    /// entries are dropped with a warning.
    fn load(&self) -> BTreeMap<String, ContentFingerprint> {
        let records = match self.backend.load_all() {
            Ok(r) => r,
            Err(e) => {
                warn!(error = %e, "fingerprint history unreadable, continuing with empty history");
                return BTreeMap::new();
            }
        };
        let mut history = BTreeMap::new();
        for (key, value) in records {
            match serde_json::from_value::<ContentFingerprint>(value) {
                Ok(fp) => {
                    history.insert(fp.id.clone(), fp);
                }
                Err(e) => warn!(key = %key, error = %e, "discarding corrupt fingerprint record"),
            }
        }
        history
    }

    fn save(&self, history: &BTreeMap<String, ContentFingerprint>) -> Result<()> {
        let mut records = Records::new();
        for (id, fp) in history {
            records.insert(id.clone(), serde_json::to_value(fp)?);
        }
        self.backend.save_all(&records)
    }
}

fn ordered(history: &BTreeMap<String, ContentFingerprint>) -> Vec<&ContentFingerprint> {
    let mut entries: Vec<&ContentFingerprint> = history.values().collect();
    entries.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
    entries
}
