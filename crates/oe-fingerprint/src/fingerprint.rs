//! Content fingerprints: hash plus keywords and structural signature.

use crate::keywords::{extract_keywords, TOP_KEYWORDS};
use chrono::{DateTime, Utc};
use oe_core::types::clamp_unit;
use oe_core::{Script, Segment};
use oe_detector::normalize;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

/// Separator between per-segment descriptors in a structural signature.
pub const SIGNATURE_SEPARATOR: char = '|';

const KEYWORD_WEIGHT: f64 = 0.6;
const STRUCTURE_WEIGHT: f64 = 0.4;

const SENTENCE_TERMINATORS: &[char] = &['。', '！', '？', '.', '!', '?', '…'];

/// Compact signature of one script. Never mutated once registered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentFingerprint {
    pub id: String,
    pub script_id: String,
    /// Hex BLAKE3 digest of the normalized full content.
    pub hash: String,
    pub keywords: Vec<String>,
    pub structural_signature: String,
    pub created_at: DateTime<Utc>,
}

impl ContentFingerprint {
    /// Per-segment descriptors, in order.
    pub fn signature_parts(&self) -> Vec<&str> {
        if self.structural_signature.is_empty() {
            return Vec::new();
        }
        self.structural_signature.split(SIGNATURE_SEPARATOR).collect()
    }

    pub fn segment_count(&self) -> usize {
        self.signature_parts().len()
    }
}

/// Fingerprint a script.
pub fn fingerprint(script: &Script) -> ContentFingerprint {
    let content = script.content();
    ContentFingerprint {
        id: format!("fp_{}", Uuid::new_v4().simple()),
        script_id: script.id.clone(),
        hash: content_hash(&content),
        keywords: extract_keywords(&content, TOP_KEYWORDS),
        structural_signature: structural_signature(&script.segments),
        created_at: Utc::now(),
    }
}

/// Deterministic hash of the normalized text.
pub fn content_hash(content: &str) -> String {
    blake3::hash(normalize(content).as_bytes()).to_hex().to_string()
}

/// `type:charLength:sentenceCount` per segment, joined by `|`.
pub fn structural_signature(segments: &[Segment]) -> String {
    segments
        .iter()
        .map(|s| format!("{}:{}:{}", s.segment_type, s.char_len(), sentence_count(&s.content)))
        .collect::<Vec<_>>()
        .join(&SIGNATURE_SEPARATOR.to_string())
}

/// Runs of sentence terminators, plus a trailing unterminated sentence.
pub fn sentence_count(text: &str) -> usize {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0;
    }
    let mut count = 0;
    let mut in_terminator = false;
    for c in trimmed.chars() {
        let is_term = SENTENCE_TERMINATORS.contains(&c);
        if is_term && !in_terminator {
            count += 1;
        }
        in_terminator = is_term;
    }
    if !in_terminator {
        count += 1;
    }
    count
}

/// Fingerprint similarity: 1.0 on equal hashes, otherwise
/// `0.6 * keyword jaccard + 0.4 * structural match ratio`.
pub fn similarity(a: &ContentFingerprint, b: &ContentFingerprint) -> f64 {
    if a.hash == b.hash {
        return 1.0;
    }
    let ka: BTreeSet<&str> = a.keywords.iter().map(String::as_str).collect();
    let kb: BTreeSet<&str> = b.keywords.iter().map(String::as_str).collect();
    let keyword_sim = oe_detector::jaccard(&ka, &kb);
    clamp_unit(KEYWORD_WEIGHT * keyword_sim + STRUCTURE_WEIGHT * structural_match_ratio(a, b))
}

/// Share of positions with identical segment descriptors. Scripts with a
/// different segment count never match structurally.
pub fn structural_match_ratio(a: &ContentFingerprint, b: &ContentFingerprint) -> f64 {
    let pa = a.signature_parts();
    let pb = b.signature_parts();
    if pa.len() != pb.len() || pa.is_empty() {
        return 0.0;
    }
    let matches = pa.iter().zip(&pb).filter(|(x, y)| x == y).count();
    matches as f64 / pa.len() as f64
}
