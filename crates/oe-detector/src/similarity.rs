//! Similarity metrics: edit distance and set overlap.

use crate::normalize::normalized_chars;
use oe_core::types::clamp_unit;
use std::collections::BTreeSet;

/// Levenshtein distance over char sequences, two-row DP.
pub fn levenshtein(a: &[char], b: &[char]) -> usize {
    if a.is_empty() { return b.len(); }
    if b.is_empty() { return a.len(); }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = if ca == cb { 0 } else { 1 };
            curr[j + 1] = (prev[j] + cost)
                .min(prev[j + 1] + 1)
                .min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

/// `1 - lev / max_len` on normalized text.
///
/// Both empty after normalization gives 1.0, exactly one empty gives 0.0.
pub fn edit_similarity(a: &str, b: &str) -> f64 {
    let a = normalized_chars(a);
    let b = normalized_chars(b);
    chars_similarity(&a, &b)
}

/// [`edit_similarity`] on already-normalized char vectors.
pub fn chars_similarity(a: &[char], b: &[char]) -> f64 {
    if a.is_empty() && b.is_empty() { return 1.0; }
    if a.is_empty() || b.is_empty() { return 0.0; }
    let max_len = a.len().max(b.len());
    let dist = levenshtein(a, b);
    clamp_unit(1.0 - dist as f64 / max_len as f64)
}

/// Jaccard similarity; two empty sets are treated as sharing nothing.
pub fn jaccard<T: Ord>(a: &BTreeSet<T>, b: &BTreeSet<T>) -> f64 {
    if a.is_empty() || b.is_empty() { return 0.0; }
    let intersection = a.intersection(b).count();
    let union = a.union(b).count();
    if union == 0 { 0.0 } else { clamp_unit(intersection as f64 / union as f64) }
}
