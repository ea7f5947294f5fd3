use serde::{Deserialize, Serialize};
use std::fmt;

/// Named rewrite preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DedupVariant {
    Conservative,
    Balanced,
    Aggressive,
    Creative,
    Academic,
    Casual,
    Poetic,
    Technical,
}

impl DedupVariant {
    /// Enumeration order; also the tie-break order for intensity selection.
    pub const ALL: [DedupVariant; 8] = [
        DedupVariant::Conservative,
        DedupVariant::Balanced,
        DedupVariant::Aggressive,
        DedupVariant::Creative,
        DedupVariant::Academic,
        DedupVariant::Casual,
        DedupVariant::Poetic,
        DedupVariant::Technical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DedupVariant::Conservative => "conservative",
            DedupVariant::Balanced => "balanced",
            DedupVariant::Aggressive => "aggressive",
            DedupVariant::Creative => "creative",
            DedupVariant::Academic => "academic",
            DedupVariant::Casual => "casual",
            DedupVariant::Poetic => "poetic",
            DedupVariant::Technical => "technical",
        }
    }

    /// Variants that push text toward a written register.
    pub fn is_formal(&self) -> bool {
        matches!(
            self,
            DedupVariant::Academic | DedupVariant::Technical | DedupVariant::Conservative
        )
    }
}

impl fmt::Display for DedupVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single rewrite step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Strategy {
    SynonymReplacement,
    SentencePattern,
    ParagraphReorder,
    PerspectiveShift,
    TransitionSwap,
    RegisterShift,
    RhetoricalEmbellishment,
}

/// Strategy pipeline and knobs of a variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantProfile {
    pub variant: DedupVariant,
    pub intensity: f64,
    pub strategies: Vec<Strategy>,
    pub restructuring: bool,
    pub expansion: bool,
    pub contraction: bool,
    pub synonym_ratio: f64,
}

/// Output of a rewrite together with the variant that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Rewrite {
    pub text: String,
    pub variant: DedupVariant,
}
