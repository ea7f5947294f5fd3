use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

/// Segment type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SegmentType {
    Narration,
    Dialogue,
    Description,
}

impl SegmentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SegmentType::Narration => "narration",
            SegmentType::Dialogue => "dialogue",
            SegmentType::Description => "description",
        }
    }
}

impl fmt::Display for SegmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One timed, typed unit of script text.
///
/// Segments are values: the engine never edits one in place, it derives a
/// new segment with `with_content` / `with_id` / `with_timing`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub id: String,
    pub start: f64,
    pub end: f64,
    pub content: String,
    #[serde(rename = "type")]
    pub segment_type: SegmentType,
}

impl Segment {
    pub fn new(content: impl Into<String>, segment_type: SegmentType) -> Self {
        Self {
            id: new_segment_id(),
            start: 0.0,
            end: 0.0,
            content: content.into(),
            segment_type,
        }
    }

    pub fn narration(content: impl Into<String>) -> Self {
        Self::new(content, SegmentType::Narration)
    }

    pub fn with_content(&self, content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..self.clone()
        }
    }

    pub fn with_id(&self, id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..self.clone()
        }
    }

    pub fn with_timing(&self, start: f64, end: f64) -> Self {
        Self {
            start,
            end,
            ..self.clone()
        }
    }

    pub fn duration(&self) -> f64 {
        (self.end - self.start).max(0.0)
    }

    /// Number of Unicode scalar values in the content.
    pub fn char_len(&self) -> usize {
        self.content.chars().count()
    }
}

/// Fresh segment id.
pub fn new_segment_id() -> String {
    format!("seg_{}", Uuid::new_v4().simple())
}

/// A narration script: the unit of input and output for every engine operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Script {
    pub id: String,
    pub title: String,
    pub segments: Vec<Segment>,
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Script {
    pub fn new(title: impl Into<String>, segments: Vec<Segment>) -> Self {
        let now = Utc::now();
        Self {
            id: format!("script_{}", Uuid::new_v4().simple()),
            title: title.into(),
            segments,
            metadata: HashMap::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Build a script from plain texts, laying segments out back to back
    /// with `seconds_per_segment` each.
    pub fn from_texts<S: AsRef<str>>(
        title: impl Into<String>,
        texts: &[S],
        seconds_per_segment: f64,
    ) -> Self {
        let segments = texts
            .iter()
            .enumerate()
            .map(|(i, t)| {
                let start = i as f64 * seconds_per_segment;
                Segment::narration(t.as_ref()).with_timing(start, start + seconds_per_segment)
            })
            .collect();
        Self::new(title, segments)
    }

    /// Concatenated segment contents, one segment per line.
    pub fn content(&self) -> String {
        self.segments
            .iter()
            .map(|s| s.content.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Same script identity with a new segment list.
    pub fn with_segments(&self, segments: Vec<Segment>) -> Self {
        Self {
            id: self.id.clone(),
            title: self.title.clone(),
            segments,
            metadata: self.metadata.clone(),
            created_at: self.created_at,
            updated_at: Utc::now(),
        }
    }

    pub fn segment(&self, id: &str) -> Option<&Segment> {
        self.segments.iter().find(|s| s.id == id)
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn duration(&self) -> f64 {
        match (self.segments.first(), self.segments.last()) {
            (Some(first), Some(last)) => (last.end - first.start).max(0.0),
            _ => 0.0,
        }
    }
}
