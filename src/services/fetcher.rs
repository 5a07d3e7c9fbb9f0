// src/services/fetcher.rs

//! Listing page fetcher.
//!
//! Fetches one page of a collection listing per call, pacing every request
//! through the injected [`Throttle`].

use std::sync::Arc;

use crate::error::Result;
use crate::models::{PageQuery, SUBJECT_PLACEHOLDER, listing_params};
use crate::utils::{Throttle, Transport};

/// Rate-limited fetcher for listing pages.
pub struct ListingPageFetcher {
    transport: Arc<dyn Transport>,
    throttle: Box<dyn Throttle>,
    url_template: String,
}

impl ListingPageFetcher {
    /// `url_template` must contain `{subject}`.
    pub fn new(
        transport: Arc<dyn Transport>,
        throttle: Box<dyn Throttle>,
        url_template: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            throttle,
            url_template: url_template.into(),
        }
    }

    /// Listing URL for `subject_id`.
    pub fn listing_url(&self, subject_id: &str) -> String {
        self.url_template.replace(SUBJECT_PLACEHOLDER, subject_id)
    }

    /// Fetch the raw markup of the page starting at `offset`.
    ///
    /// Waits on the throttle first; transport failures are returned as-is,
    /// without retry.
    pub fn fetch_page(&self, subject_id: &str, offset: u32) -> Result<Vec<u8>> {
        self.request(subject_id, &listing_params(offset))
    }

    /// Fetch the page described by `query`.
    pub fn fetch(&self, query: &PageQuery) -> Result<Vec<u8>> {
        self.request(&query.subject_id, &query.params())
    }

    fn request(&self, subject_id: &str, params: &[(&str, String)]) -> Result<Vec<u8>> {
        let url = self.listing_url(subject_id);
        self.throttle.wait();

        log::debug!("GET {} {:?}", url, params);
        self.transport.get(&url, params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::services::testing::{CountingThrottle, MockTransport};

    const TEMPLATE: &str = "https://movies.example.com/people/{subject}/collect";

    #[test]
    fn test_fetch_page_builds_url_and_offset() {
        let transport = Arc::new(MockTransport::new().with_page(30, "<p>page</p>"));
        let fetcher = ListingPageFetcher::new(
            transport.clone(),
            Box::new(CountingThrottle::default()),
            TEMPLATE,
        );

        let body = fetcher.fetch_page("42", 30).unwrap();

        assert_eq!(body, b"<p>page</p>");
        assert_eq!(
            transport.requests(),
            vec!["https://movies.example.com/people/42/collect?start=30".to_string()]
        );
    }

    #[test]
    fn test_throttle_runs_before_every_fetch() {
        let throttle = CountingThrottle::default();
        let fetcher = ListingPageFetcher::new(
            Arc::new(MockTransport::new()),
            Box::new(throttle.clone()),
            TEMPLATE,
        );

        fetcher.fetch(&PageQuery::for_page("42", 0, 15).unwrap()).unwrap();
        assert_eq!(throttle.count(), 1);
        fetcher.fetch(&PageQuery::for_page("42", 1, 15).unwrap()).unwrap();
        assert_eq!(throttle.count(), 2);
    }

    #[test]
    fn test_transport_failure_propagates() {
        let throttle = CountingThrottle::default();
        let fetcher = ListingPageFetcher::new(
            Arc::new(MockTransport::new().with_failing_page(0)),
            Box::new(throttle.clone()),
            TEMPLATE,
        );

        let err = fetcher.fetch_page("42", 0).unwrap_err();
        assert!(matches!(err, AppError::Fetch { .. }));
        assert_eq!(throttle.count(), 1);
    }
}
