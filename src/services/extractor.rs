// src/services/extractor.rs

//! Listing record extractor.
//!
//! Extraction is entry-local and best-effort: each field of an entry is an
//! independent lookup, and a field that cannot be found degrades that field
//! only. An entry never fails as a whole, and a page without entries yields
//! an empty list.

use scraper::{ElementRef, Html, Selector};

use crate::error::{AppError, Result};
use crate::models::{ItemRecord, ListingSelectors, UNKNOWN_TITLE};
use crate::utils::url::resolve;

/// Parses listing markup into [`ItemRecord`]s using precompiled selectors.
#[derive(Debug, Clone)]
pub struct RecordExtractor {
    item: Selector,
    title: Selector,
    note: Selector,
    image: Selector,
    image_attr: String,
    base_url: Option<String>,
}

impl RecordExtractor {
    /// Compile the selectors. Fails on an invalid selector.
    pub fn new(selectors: &ListingSelectors) -> Result<Self> {
        Ok(Self {
            item: parse_selector(&selectors.item)?,
            title: parse_selector(&selectors.title)?,
            note: parse_selector(&selectors.note)?,
            image: parse_selector(&selectors.image)?,
            image_attr: selectors.image_attr.clone(),
            base_url: None,
        })
    }

    /// Resolve relative image references against `base_url`.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Extract all entries of one listing page, in document order.
    pub fn extract(&self, raw_markup: &[u8]) -> Vec<ItemRecord> {
        let html = String::from_utf8_lossy(raw_markup);
        let document = Html::parse_document(&html);

        document
            .select(&self.item)
            .map(|entry| self.extract_entry(&entry))
            .collect()
    }

    fn extract_entry(&self, entry: &ElementRef) -> ItemRecord {
        let title = self
            .select_text(entry, &self.title)
            .unwrap_or_else(|| UNKNOWN_TITLE.to_string());
        let note = self.select_text(entry, &self.note);
        let asset_url = entry
            .select(&self.image)
            .next()
            .and_then(|img| img.value().attr(&self.image_attr))
            .map(str::trim)
            .filter(|src| !src.is_empty())
            .map(|src| match &self.base_url {
                Some(base) => resolve(base, src),
                None => src.to_string(),
            });

        ItemRecord::new(title, note, asset_url)
    }

    /// Whitespace-normalized text of the first match, `None` if absent or blank.
    fn select_text(&self, entry: &ElementRef, selector: &Selector) -> Option<String> {
        let element = entry.select(selector).next()?;
        let text = normalize_whitespace(&element.text().collect::<String>());
        if text.is_empty() { None } else { Some(text) }
    }
}

fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}

fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
