//! Individual rewrite steps.
//!
//! Every step takes the random source explicitly: whether it fires and which
//! alternate it picks are both drawn from `rng`, so a seeded source gives a
//! reproducible rewrite.

use crate::config::{
    PhraseTable, COLLOQUIAL_REGISTER, FILLERS, FLOURISHES, FORMAL_REGISTER, LEAD_INS, PERSPECTIVE,
    SENTENCE_PATTERNS, SYNONYMS, TRANSITIONS,
};
use crate::types::{DedupVariant, Strategy, VariantProfile};
use rand::seq::SliceRandom;
use rand::Rng;
use regex::Captures;

const TERMINATORS: &[char] = &['。', '！', '？', '.', '!', '?'];

/// Run one strategy. Returns the input unchanged when the step does not fire.
pub fn apply_strategy<R: Rng + ?Sized>(
    strategy: Strategy,
    text: &str,
    profile: &VariantProfile,
    rng: &mut R,
) -> String {
    if text.is_empty() || !rng.gen_bool(profile.intensity.clamp(0.0, 1.0)) {
        return text.to_string();
    }
    match strategy {
        Strategy::SynonymReplacement => substitute(text, &SYNONYMS, profile.synonym_ratio, rng),
        Strategy::TransitionSwap => substitute(text, &TRANSITIONS, 1.0, rng),
        Strategy::PerspectiveShift => substitute(text, &PERSPECTIVE, 0.5, rng),
        Strategy::RegisterShift => {
            let table =
                if profile.variant.is_formal() { &FORMAL_REGISTER } else { &COLLOQUIAL_REGISTER };
            substitute(text, table, 0.7, rng)
        }
        Strategy::SentencePattern => sentence_pattern(text, rng),
        Strategy::ParagraphReorder if profile.restructuring => reorder_paragraphs(text, rng),
        Strategy::ParagraphReorder => text.to_string(),
        Strategy::RhetoricalEmbellishment => embellish(text, profile, rng),
    }
}

/// Replace each table hit with a random alternate, with probability `ratio`.
pub fn substitute<R: Rng + ?Sized>(
    text: &str,
    table: &PhraseTable,
    ratio: f64,
    rng: &mut R,
) -> String {
    let ratio = ratio.clamp(0.0, 1.0);
    table
        .pattern
        .replace_all(text, |caps: &Captures| {
            let found = &caps[0];
            if !rng.gen_bool(ratio) {
                return found.to_string();
            }
            match table.alternates(found).choose(rng) {
                Some(alt) => alt.to_string(),
                None => found.to_string(),
            }
        })
        .into_owned()
}

/// Rewrite clauses with one randomly chosen applicable pattern rule.
pub fn sentence_pattern<R: Rng + ?Sized>(text: &str, rng: &mut R) -> String {
    let applicable: Vec<_> =
        SENTENCE_PATTERNS.iter().filter(|r| r.pattern.is_match(text)).collect();
    let Some(rule) = applicable.choose(rng) else {
        return text.to_string();
    };
    rule.pattern
        .replace_all(text, |caps: &Captures| {
            let template = rule.templates.choose(rng).copied().unwrap_or("$0");
            let mut out = String::new();
            caps.expand(template, &mut out);
            out
        })
        .into_owned()
}

/// Shuffle interior paragraphs; the first and last keep their place.
///
/// Paragraphs are blank-line separated; single-line breaks are used when the
/// text has no blank lines. Blank pieces (leading or trailing separators,
/// runs of separators) stay where they are and never count as the first or
/// last paragraph.
pub fn reorder_paragraphs<R: Rng + ?Sized>(text: &str, rng: &mut R) -> String {
    let sep = if text.contains("\n\n") { "\n\n" } else { "\n" };
    let mut paragraphs: Vec<&str> = text.split(sep).collect();
    let filled: Vec<usize> = paragraphs
        .iter()
        .enumerate()
        .filter(|(_, p)| !p.trim().is_empty())
        .map(|(i, _)| i)
        .collect();
    if filled.len() < 4 {
        return text.to_string();
    }
    let interior = &filled[1..filled.len() - 1];
    let mut moved: Vec<&str> = interior.iter().map(|&i| paragraphs[i]).collect();
    moved.shuffle(rng);
    for (&slot, paragraph) in interior.iter().zip(moved) {
        paragraphs[slot] = paragraph;
    }
    paragraphs.join(sep)
}

fn sentence_starts(text: &str) -> Vec<usize> {
    let mut starts = vec![0];
    for (i, c) in text.char_indices() {
        if TERMINATORS.contains(&c) {
            let next = i + c.len_utf8();
            if next < text.len() {
                starts.push(next);
            }
        }
    }
    starts
}

/// Expansion adds a lead-in (and a figurative tail for poetic text);
/// contraction drops fillers.
pub fn embellish<R: Rng + ?Sized>(text: &str, profile: &VariantProfile, rng: &mut R) -> String {
    let mut out = text.to_string();
    if profile.expansion {
        let starts = sentence_starts(&out);
        if let (Some(&at), Some(lead)) = (starts.choose(rng), LEAD_INS.choose(rng)) {
            out.insert_str(at, lead);
        }
        if profile.variant == DedupVariant::Poetic {
            if let Some(tail) = FLOURISHES.choose(rng) {
                out = append_before_terminator(&out, tail);
            }
        }
    }
    if profile.contraction {
        for filler in FILLERS {
            if out.contains(filler) && rng.gen_bool(0.5) {
                out = out.replace(filler, "");
            }
        }
    }
    out
}

fn append_before_terminator(text: &str, tail: &str) -> String {
    let trimmed = text.trim_end();
    match trimmed.char_indices().last() {
        Some((i, c)) if TERMINATORS.contains(&c) => {
            format!("{}{}{}{}", &trimmed[..i], tail, c, &text[trimmed.len()..])
        }
        _ => format!("{trimmed}{tail}{}", &text[trimmed.len()..]),
    }
}
