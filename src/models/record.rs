//! Collection record data structure.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Title used when an entry carries no readable title.
pub const UNKNOWN_TITLE: &str = "Unknown Title";

/// One collection entry extracted from a listing page.
///
/// Serialized with the field names of the metadata file:
/// `title`, `comment`, `poster_url`, `poster_filename`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ItemRecord {
    /// Entry title, never empty
    pub title: String,

    /// Free-text note left by the collection owner
    #[serde(rename = "comment", default)]
    pub note: Option<String>,

    /// Poster image reference
    #[serde(rename = "poster_url", default)]
    pub asset_url: Option<String>,

    /// Downloaded poster location, set once the asset is resolved
    #[serde(rename = "poster_filename", default)]
    pub local_asset_path: Option<PathBuf>,
}

impl ItemRecord {
    /// Create a record with no resolved asset.
    pub fn new(title: impl Into<String>, note: Option<String>, asset_url: Option<String>) -> Self {
        let title = title.into();
        Self {
            title: if title.trim().is_empty() {
                UNKNOWN_TITLE.to_string()
            } else {
                title
            },
            note,
            asset_url,
            local_asset_path: None,
        }
    }

    /// Record the downloaded asset location.
    pub fn resolve_asset(&mut self, path: &Path) {
        self.local_asset_path = Some(path.to_path_buf());
    }

    pub fn has_asset(&self) -> bool {
        self.local_asset_path.is_some()
    }
}

/// Ordered records of one run, in discovery order across pages.
pub type HarvestResult = Vec<ItemRecord>;
