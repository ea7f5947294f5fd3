//! History backends: in-memory and file-based persistent store.
//!
//! A backend only moves records; their shape belongs to the fingerprint
//! store, which encodes each fingerprint as one JSON value keyed by id.

mod file;
mod memory;

pub use file::FileBackend;
pub use memory::MemoryBackend;

use oe_core::Result;
use std::collections::BTreeMap;

/// Stored records keyed by fingerprint id.
pub type Records = BTreeMap<String, serde_json::Value>;

/// Durable key-value medium for fingerprint history.
pub trait HistoryBackend: Send + Sync {
    fn load_all(&self) -> Result<Records>;
    fn save_all(&self, records: &Records) -> Result<()>;
}
