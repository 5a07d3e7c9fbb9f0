// src/pipeline/harvest.rs

//! Collection harvesting pipeline.
//!
//! Pages are fetched one at a time from offset 0. Iteration ends on the
//! first page that yields no records, after `max_pages` pages, or on the
//! first error. Whatever was accumulated is persisted exactly once at the
//! end, in all three cases.

use std::path::Path;
use std::sync::Arc;

use chrono::Utc;

use crate::error::Result;
use crate::models::{
    Config, HarvestJob, HarvestOutcome, HarvestResult, ItemRecord, PageQuery, StopReason,
};
use crate::services::{AssetCache, ListingPageFetcher, RecordExtractor};
use crate::storage::{JsonRecordStore, RecordStore};
use crate::utils::{self, FixedDelay, ReqwestTransport, Transport};

/// Counters and records gathered while iterating pages.
#[derive(Debug, Default)]
struct Progress {
    records: HarvestResult,
    page: u32,
    pages_fetched: u32,
    assets_downloaded: usize,
    assets_cached: usize,
    asset_failures: usize,
}

/// Drives fetch -> extract -> download -> accumulate -> persist.
pub struct HarvestPipeline {
    fetcher: ListingPageFetcher,
    extractor: RecordExtractor,
    assets: AssetCache,
    store: Box<dyn RecordStore>,
}

impl HarvestPipeline {
    pub fn new(
        fetcher: ListingPageFetcher,
        extractor: RecordExtractor,
        assets: AssetCache,
        store: Box<dyn RecordStore>,
    ) -> Self {
        Self {
            fetcher,
            extractor,
            assets,
            store,
        }
    }

    /// Build the production pipeline: `reqwest` transport, fixed delay,
    /// JSON record store.
    pub fn from_config(config: &Config) -> Result<Self> {
        let transport: Arc<dyn Transport> = Arc::new(ReqwestTransport::new(&config.http)?);
        let fetcher = ListingPageFetcher::new(
            Arc::clone(&transport),
            Box::new(FixedDelay::from_millis(config.harvest.request_delay_ms)),
            config.harvest.listing_url.clone(),
        );
        let extractor = RecordExtractor::new(&config.selectors)?;
        let assets = AssetCache::new(transport, config.harvest.asset_naming);

        Ok(Self::new(
            fetcher,
            extractor,
            assets,
            Box::new(JsonRecordStore::new()),
        ))
    }

    /// Run a full harvest and persist the result to `job.output_path`.
    ///
    /// Errors during page iteration end the loop and are reported in
    /// [`HarvestOutcome::stop_reason`]; only a failure to persist the
    /// records is returned as `Err`.
    pub fn run(&self, job: &HarvestJob) -> Result<HarvestOutcome> {
        let start_time = Utc::now();
        let mut progress = Progress::default();

        let stop_reason = match self.harvest_pages(job, &mut progress) {
            Ok(reason) => reason,
            Err(e) => {
                log::error!("Harvest stopped at page {}: {}", progress.page + 1, e);
                StopReason::Failed {
                    page: progress.page,
                    message: e.to_string(),
                }
            }
        };

        if let Err(e) = self.store.write_records(&job.output_path, &progress.records) {
            log::error!(
                "Failed to save {} records to {}: {}",
                progress.records.len(),
                job.output_path.display(),
                e
            );
            return Err(e);
        }

        Ok(HarvestOutcome {
            records: progress.records,
            pages_fetched: progress.pages_fetched,
            assets_downloaded: progress.assets_downloaded,
            assets_cached: progress.assets_cached,
            asset_failures: progress.asset_failures,
            stop_reason,
            start_time,
            end_time: Utc::now(),
        })
    }

    fn harvest_pages(&self, job: &HarvestJob, progress: &mut Progress) -> Result<StopReason> {
        let extractor = self
            .extractor
            .clone()
            .with_base_url(self.fetcher.listing_url(&job.subject_id));

        for page in 0..job.max_pages {
            progress.page = page;
            let query = PageQuery::for_page(&job.subject_id, page, job.page_size)?;

            let markup = self.fetcher.fetch(&query)?;
            progress.pages_fetched += 1;

            let mut records = extractor.extract(&markup);
            if records.is_empty() {
                log::info!("Page {} is empty, listing exhausted", page + 1);
                return Ok(StopReason::Exhausted { page });
            }

            log::info!("Scraping page {}, found {} records", page + 1, records.len());

            for record in &mut records {
                self.resolve_asset(record, &job.asset_dir, progress);
            }
            progress.records.extend(records);
        }

        Ok(StopReason::MaxPages)
    }

    /// Download the record's poster, degrading the record on failure.
    fn resolve_asset(&self, record: &mut ItemRecord, asset_dir: &Path, progress: &mut Progress) {
        let Some(url) = record.asset_url.clone() else {
            return;
        };

        match self.assets.fetch_if_absent(&url, asset_dir) {
            Ok(outcome) => {
                if outcome.is_cached() {
                    progress.assets_cached += 1;
                } else {
                    progress.assets_downloaded += 1;
                    log::info!("Downloaded poster for: {}", record.title);
                }
                record.resolve_asset(outcome.path());
            }
            Err(e) => {
                progress.asset_failures += 1;
                log::warn!("Failed to download poster for {}: {}", record.title, e);
            }
        }
    }
}

/// Run the harvest described by `job` with production collaborators.
pub fn run_harvest(config: &Config, job: &HarvestJob) -> Result<HarvestOutcome> {
    utils::log::header(&format!("Harvesting collection of {}", job.subject_id));

    let pipeline = HarvestPipeline::from_config(config)?;
    let outcome = pipeline.run(job)?;

    let stop = match &outcome.stop_reason {
        StopReason::Exhausted { page } => format!("listing exhausted at page {}", page + 1),
        StopReason::MaxPages => format!("page limit ({}) reached", job.max_pages),
        StopReason::Failed { page, message } => {
            format!("failed at page {}: {}", page + 1, message)
        }
    };
    let elapsed = outcome.end_time - outcome.start_time;

    utils::log::summary(
        "Harvest",
        &[
            ("Records", outcome.records.len().to_string()),
            ("With poster", outcome.with_assets().to_string()),
            ("Pages fetched", outcome.pages_fetched.to_string()),
            ("Posters downloaded", outcome.assets_downloaded.to_string()),
            ("Posters cached", outcome.assets_cached.to_string()),
            ("Poster failures", outcome.asset_failures.to_string()),
            ("Stopped", stop),
            ("Elapsed", format!("{}s", elapsed.num_seconds())),
            ("Metadata", job.output_path.display().to_string()),
            ("Posters", job.asset_dir.display().to_string()),
        ],
    );

    Ok(outcome)
}
