//! Structural features: sentence skeletons and discourse connectives.

use crate::similarity::jaccard;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// Closed tag vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructuralTag {
    /// X是Y
    TopicIs,
    /// X让Y
    TopicMakes,
    /// X可以Y
    TopicCan,
    /// X有Y
    TopicHas,
    /// X在Y
    TopicAt,
    Causal,
    Contrastive,
    Additive,
    Conditional,
}

impl StructuralTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            StructuralTag::TopicIs => "topic_is",
            StructuralTag::TopicMakes => "topic_makes",
            StructuralTag::TopicCan => "topic_can",
            StructuralTag::TopicHas => "topic_has",
            StructuralTag::TopicAt => "topic_at",
            StructuralTag::Causal => "causal",
            StructuralTag::Contrastive => "contrastive",
            StructuralTag::Additive => "additive",
            StructuralTag::Conditional => "conditional",
        }
    }
}

/// Clause chars: anything but whitespace and sentence/clause punctuation.
const CLAUSE: &str = "[^\\s\u{FF0C}\u{3002}\u{FF01}\u{FF1F}\u{FF1B}\u{3001},.!?;]";

fn topic(marker: &str) -> Regex {
    let pattern = format!("{CLAUSE}+{}{CLAUSE}+", regex::escape(marker));
    Regex::new(&pattern).expect("static topic pattern")
}

fn connective(words: &[&str]) -> Regex {
    let alternation = words
        .iter()
        .map(|w| {
            if w.is_ascii() {
                format!(r"\b{}\b", regex::escape(w))
            } else {
                regex::escape(w)
            }
        })
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!("(?i)(?:{alternation})")).expect("static connective pattern")
}

static PATTERNS: LazyLock<Vec<(StructuralTag, Regex)>> = LazyLock::new(|| {
    vec![
        (StructuralTag::TopicIs, topic("\u{662F}")),
        (StructuralTag::TopicMakes, topic("\u{8BA9}")),
        (StructuralTag::TopicCan, topic("\u{53EF}\u{4EE5}")),
        (StructuralTag::TopicHas, topic("\u{6709}")),
        (StructuralTag::TopicAt, topic("\u{5728}")),
        (StructuralTag::Causal, connective(&[
            "\u{56E0}\u{4E3A}", "\u{6240}\u{4EE5}", "\u{56E0}\u{6B64}", "\u{7531}\u{4E8E}",
            "\u{4E8E}\u{662F}", "\u{56E0}\u{800C}",
            "because", "therefore", "so that", "as a result",
        ])),
        (StructuralTag::Contrastive, connective(&[
            "\u{4F46}\u{662F}", "\u{53EF}\u{662F}", "\u{7136}\u{800C}", "\u{4E0D}\u{8FC7}",
            "\u{5374}",
            "but", "however", "although", "yet",
        ])),
        (StructuralTag::Additive, connective(&[
            "\u{800C}\u{4E14}", "\u{5E76}\u{4E14}", "\u{6B64}\u{5916}", "\u{53E6}\u{5916}",
            "\u{540C}\u{65F6}", "\u{8FD8}\u{6709}",
            "moreover", "furthermore", "in addition", "also",
        ])),
        (StructuralTag::Conditional, connective(&[
            "\u{5982}\u{679C}", "\u{5047}\u{5982}", "\u{53EA}\u{8981}", "\u{9664}\u{975E}",
            "\u{8981}\u{662F}", "\u{4E00}\u{65E6}",
            "if", "unless", "as long as",
        ])),
    ]
});

/// Tags present in `text`.
pub fn structural_features(text: &str) -> BTreeSet<StructuralTag> {
    PATTERNS
        .iter()
        .filter(|(_, re)| re.is_match(text))
        .map(|(tag, _)| *tag)
        .collect()
}

/// Jaccard similarity of the two tag sets.
pub fn structural_similarity(a: &str, b: &str) -> f64 {
    jaccard(&structural_features(a), &structural_features(b))
}
