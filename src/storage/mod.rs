//! Storage abstractions for record persistence.
//!
//! The harvest writes its full record set once, at the end of a run:
//!
//! ```text
//! movie_info.json     # [{title, comment, poster_url, poster_filename}, ...]
//! movie_posters/      # downloaded assets, doubles as the download cache
//! poster_wall.jpg     # composite built from movie_posters/
//! ```

pub mod local;

use std::path::Path;

use crate::error::Result;
use crate::models::ItemRecord;

// Re-export for convenience
pub use local::JsonRecordStore;

/// Trait for record storage backends.
pub trait RecordStore: Send + Sync {
    /// Replace the record set stored at `path` with `records`.
    fn write_records(&self, path: &Path, records: &[ItemRecord]) -> Result<()>;

    /// Load the record set stored at `path`.
    fn load_records(&self, path: &Path) -> Result<Vec<ItemRecord>>;
}
