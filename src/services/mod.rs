//! Service layer for the harvester.
//!
//! This module contains the business logic for:
//! - Listing page fetching (`ListingPageFetcher`)
//! - Record extraction (`RecordExtractor`)
//! - Asset downloads (`AssetCache`)
//! - Poster wall composition (`GridCompositor`)

mod assets;
#[cfg(feature = "wall")]
mod compositor;
mod extractor;
mod fetcher;

#[cfg(test)]
pub(crate) mod testing;

pub use assets::{AssetCache, AssetOutcome};
#[cfg(feature = "wall")]
pub use compositor::GridCompositor;
pub use extractor::RecordExtractor;
pub use fetcher::ListingPageFetcher;
