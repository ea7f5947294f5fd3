use super::{HistoryBackend, Records};
use oe_core::Result;
use parking_lot::RwLock;

/// In-memory history backend.
pub struct MemoryBackend {
    data: RwLock<Records>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self { data: RwLock::new(Records::new()) }
    }

    /// Seed with raw records, e.g. ones written by an older release.
    pub fn with_records(records: Records) -> Self {
        Self { data: RwLock::new(records) }
    }

    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryBackend {
    fn default() -> Self { Self::new() }
}

impl HistoryBackend for MemoryBackend {
    fn load_all(&self) -> Result<Records> {
        Ok(self.data.read().clone())
    }

    fn save_all(&self, records: &Records) -> Result<()> {
        *self.data.write() = records.clone();
        Ok(())
    }
}
