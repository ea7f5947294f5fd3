use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::script::Segment;

/// Snippets carried in findings are cut to this many chars.
pub const SNIPPET_CHARS: usize = 50;

/// Finding kind.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DuplicateKind {
    Exact,
    Similar,
    Template,
}

/// Rhetorical category of a template phrase.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum TemplateCategory {
    Intro,
    Transition,
    Conclusion,
    Emphasis,
    Subjective,
}

impl TemplateCategory {
    pub const ALL: [TemplateCategory; 5] = [
        TemplateCategory::Intro,
        TemplateCategory::Transition,
        TemplateCategory::Conclusion,
        TemplateCategory::Emphasis,
        TemplateCategory::Subjective,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateCategory::Intro => "intro",
            TemplateCategory::Transition => "transition",
            TemplateCategory::Conclusion => "conclusion",
            TemplateCategory::Emphasis => "emphasis",
            TemplateCategory::Subjective => "subjective",
        }
    }
}

impl fmt::Display for TemplateCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reference to (part of) a segment inside a finding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentRef {
    pub segment_id: String,
    pub snippet: String,
    pub start: f64,
    /// Char offset of `snippet` inside the segment; 0 for whole-segment refs.
    #[serde(default)]
    pub offset: usize,
}

impl SegmentRef {
    pub fn whole(segment: &Segment) -> Self {
        Self {
            segment_id: segment.id.clone(),
            snippet: snippet(&segment.content),
            start: segment.start,
            offset: 0,
        }
    }

    pub fn at(segment: &Segment, snippet_text: &str, offset: usize) -> Self {
        Self {
            segment_id: segment.id.clone(),
            snippet: snippet(snippet_text),
            start: segment.start,
            offset,
        }
    }

    /// Identity used when collapsing symmetric findings.
    pub fn key(&self) -> (&str, usize) {
        (self.segment_id.as_str(), self.offset)
    }
}

/// Cut text to at most `SNIPPET_CHARS` chars without splitting a char.
pub fn snippet(text: &str) -> String {
    match text.char_indices().nth(SNIPPET_CHARS) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

/// One duplicate / template finding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuplicateResult {
    pub id: String,
    pub kind: DuplicateKind,
    pub source: SegmentRef,
    pub target: SegmentRef,
    pub similarity: f64,
    pub suggestion: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<TemplateCategory>,
}

impl DuplicateResult {
    pub fn new(
        kind: DuplicateKind,
        source: SegmentRef,
        target: SegmentRef,
        similarity: f64,
        suggestion: impl Into<String>,
    ) -> Self {
        Self {
            id: format!("dup_{}", Uuid::new_v4().simple()),
            kind,
            source,
            target,
            similarity: clamp_unit(similarity),
            suggestion: suggestion.into(),
            category: None,
        }
    }

    pub fn with_category(mut self, category: TemplateCategory) -> Self {
        self.category = Some(category);
        self
    }

    /// Order-independent key of the (source, target) pair.
    pub fn pair_key(&self) -> ((String, usize), (String, usize)) {
        let a = (self.source.segment_id.clone(), self.source.offset);
        let b = (self.target.segment_id.clone(), self.target.offset);
        if a <= b { (a, b) } else { (b, a) }
    }

    pub fn is_self_pair(&self) -> bool {
        self.source.key() == self.target.key()
    }
}

/// Originality score plus findings and advice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OriginalityReport {
    pub score: f64,
    pub duplicates: Vec<DuplicateResult>,
    pub suggestions: Vec<String>,
}

/// Clamp to [0, 1]; NaN maps to 0.
pub fn clamp_unit(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}
