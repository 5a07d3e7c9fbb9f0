// src/models/mod.rs

//! Domain models for the harvester.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod grid;
mod harvest;
mod query;
mod record;
mod selectors;

// Re-export all public types
pub use config::{
    AssetNaming, Config, HarvestConfig, HttpConfig, PathsConfig, SUBJECT_PLACEHOLDER, WallConfig,
};
pub use grid::GridSpec;
pub use harvest::{HarvestJob, HarvestOutcome, StopReason};
pub use query::{PageQuery, listing_params};
pub use record::{HarvestResult, ItemRecord, UNKNOWN_TITLE};
pub use selectors::ListingSelectors;
