//! Shared data model, configuration and error type for the originality engine.

pub mod config;
pub mod error;
pub mod script;
pub mod types;

pub use config::{DetectionStrategy, EngineConfig};
pub use error::{EngineError, Result};
pub use script::{Script, Segment, SegmentType};
pub use types::{
    DuplicateKind, DuplicateResult, OriginalityReport, SegmentRef, TemplateCategory,
};
