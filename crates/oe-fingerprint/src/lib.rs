//! Script fingerprinting and fingerprint history.
//!
//! A fingerprint summarizes a script as a BLAKE3 hash of its normalized
//! content, its top keywords and an ordered structural signature. The
//! history store keeps every accepted fingerprint behind a pluggable
//! backend (memory or JSON file) and answers "closest previous script".

pub mod fingerprint;
pub mod history;
pub mod keywords;
pub mod store;

pub use fingerprint::{fingerprint, similarity, ContentFingerprint};
pub use history::{FingerprintMatch, FingerprintStore, DEFAULT_MATCH_THRESHOLD};
pub use store::{FileBackend, HistoryBackend, MemoryBackend, Records};
