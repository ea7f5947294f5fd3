//! Pre-processing pass that perturbs a script before detection.

use oe_core::script::new_segment_id;
use oe_core::Script;
use rand::seq::SliceRandom;
use rand::Rng;
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Interchangeable phrases. A hit from a group is swapped for another
/// member of the same group.
const PHRASE_GROUPS: &[(&str, &[&str])] = &[
    ("opening", &["大家好", "哈喽各位", "各位朋友好", "欢迎各位"]),
    ("transition", &["接下来", "紧接着", "下面", "随后"]),
    ("emphasis", &["非常重要", "尤其关键", "格外要紧", "特别值得注意"]),
    ("conclusion", &["总而言之", "总的来说", "综上所述", "归根结底"]),
];

static GROUPS: LazyLock<Vec<(Regex, &'static [&'static str])>> = LazyLock::new(|| {
    PHRASE_GROUPS
        .iter()
        .map(|(_, members)| {
            let alternation =
                members.iter().map(|m| regex::escape(m)).collect::<Vec<_>>().join("|");
            (Regex::new(&alternation).unwrap(), *members)
        })
        .collect()
});

/// Swap group phrases for alternates.
pub fn vary_phrases<R: Rng + ?Sized>(text: &str, rng: &mut R) -> String {
    let mut out = text.to_string();
    for (pattern, members) in GROUPS.iter() {
        out = pattern
            .replace_all(&out, |caps: &Captures| {
                let found = &caps[0];
                let others: Vec<&str> = members.iter().copied().filter(|m| *m != found).collect();
                others.choose(rng).copied().unwrap_or(found).to_string()
            })
            .into_owned();
    }
    out
}

/// Vary phrasing in every segment, then shuffle the interior segments.
///
/// With two or more segments the first and last stay in place. Shuffled
/// segments get fresh ids and are laid back to back from the original
/// start of the interior, each keeping its own duration.
pub fn add_randomness<R: Rng + ?Sized>(script: &Script, rng: &mut R) -> Script {
    let mut segments: Vec<_> = script
        .segments
        .iter()
        .map(|seg| seg.with_content(vary_phrases(&seg.content, rng)))
        .collect();

    let n = segments.len();
    if n >= 3 {
        let last = n - 1;
        let mut cursor = segments[1].start;
        segments[1..last].shuffle(rng);
        for seg in &mut segments[1..last] {
            let duration = seg.duration();
            *seg = seg.with_id(new_segment_id()).with_timing(cursor, cursor + duration);
            cursor += duration;
        }
    }
    script.with_segments(segments)
}
