//! Local filesystem storage implementation.
//!
//! Records are written as a pretty-printed UTF-8 JSON array. Writes go
//! through a temp file and a rename, so an interrupted write never leaves a
//! truncated metadata file behind.

use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::models::ItemRecord;
use crate::storage::RecordStore;
use crate::utils::fs::write_atomic;

/// JSON file storage backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRecordStore;

impl JsonRecordStore {
    pub fn new() -> Self {
        Self
    }
}

impl RecordStore for JsonRecordStore {
    fn write_records(&self, path: &Path, records: &[ItemRecord]) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(records)?;
        write_atomic(path, &bytes)?;
        log::debug!("Wrote {} records to {}", records.len(), path.display());
        Ok(())
    }

    fn load_records(&self, path: &Path) -> Result<Vec<ItemRecord>> {
        let bytes = fs::read(path)?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}
