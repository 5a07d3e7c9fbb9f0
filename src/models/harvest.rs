//! Harvest run input and report.

use std::path::PathBuf;

use chrono::{DateTime, Utc};

use crate::models::HarvestResult;

/// Parameters of one harvest run.
#[derive(Debug, Clone)]
pub struct HarvestJob {
    pub subject_id: String,
    pub page_size: u32,
    pub max_pages: u32,
    pub asset_dir: PathBuf,
    pub output_path: PathBuf,
}

/// Why page iteration ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// Page `page` yielded no records
    Exhausted { page: u32 },
    /// `max_pages` pages were fetched
    MaxPages,
    /// An error ended the loop while working on `page`
    Failed { page: u32, message: String },
}

/// Report of a harvest run.
#[derive(Debug, Clone)]
pub struct HarvestOutcome {
    pub records: HarvestResult,
    pub pages_fetched: u32,
    pub assets_downloaded: usize,
    pub assets_cached: usize,
    pub asset_failures: usize,
    pub stop_reason: StopReason,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl HarvestOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self.stop_reason, StopReason::Failed { .. })
    }

    /// Records that ended up with a local poster.
    pub fn with_assets(&self) -> usize {
        self.records.iter().filter(|r| r.has_asset()).count()
    }
}
