//! In-memory collaborators shared by the service and pipeline tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::utils::{Throttle, Transport};

/// Canned transport: listing pages keyed by `start` offset, assets by URL.
#[derive(Default)]
pub struct MockTransport {
    pages: HashMap<u32, String>,
    failing_pages: Vec<u32>,
    assets: HashMap<String, Vec<u8>>,
    requests: Mutex<Vec<String>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, offset: u32, html: impl Into<String>) -> Self {
        self.pages.insert(offset, html.into());
        self
    }

    pub fn with_failing_page(mut self, offset: u32) -> Self {
        self.failing_pages.push(offset);
        self
    }

    pub fn with_asset(mut self, url: &str, bytes: &[u8]) -> Self {
        self.assets.insert(url.to_string(), bytes.to_vec());
        self
    }

    /// Every request seen, as `url` or `url?start=N` for listing requests.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn page_requests(&self) -> usize {
        self.requests().iter().filter(|r| r.contains("?start=")).count()
    }

    pub fn asset_requests(&self, url: &str) -> usize {
        self.requests().iter().filter(|r| *r == url).count()
    }
}

impl Transport for MockTransport {
    fn get(&self, url: &str, params: &[(&str, String)]) -> Result<Vec<u8>> {
        let start = params
            .iter()
            .find(|(key, _)| *key == "start")
            .and_then(|(_, value)| value.parse::<u32>().ok());

        match start {
            Some(offset) => {
                self.requests
                    .lock()
                    .unwrap()
                    .push(format!("{url}?start={offset}"));
                if self.failing_pages.contains(&offset) {
                    return Err(AppError::fetch(url, "HTTP status 503 Service Unavailable"));
                }
                // Unknown offsets behave like an exhausted listing
                Ok(self
                    .pages
                    .get(&offset)
                    .cloned()
                    .unwrap_or_else(|| "<html><body></body></html>".to_string())
                    .into_bytes())
            }
            None => {
                self.requests.lock().unwrap().push(url.to_string());
                self.assets
                    .get(url)
                    .cloned()
                    .ok_or_else(|| AppError::fetch(url, "HTTP status 404 Not Found"))
            }
        }
    }
}

/// Throttle that only counts how often it was consulted.
#[derive(Clone, Default)]
pub struct CountingThrottle {
    waits: Arc<AtomicUsize>,
}

impl CountingThrottle {
    pub fn count(&self) -> usize {
        self.waits.load(Ordering::SeqCst)
    }
}

impl Throttle for CountingThrottle {
    fn wait(&self) {
        self.waits.fetch_add(1, Ordering::SeqCst);
    }
}

/// Listing markup with one entry per `(title, note, poster)` triple.
pub fn listing_html(entries: &[(Option<&str>, Option<&str>, Option<&str>)]) -> String {
    let mut body = String::new();
    for (title, note, poster) in entries {
        body.push_str(r#"<div class="item comment-item">"#);
        if let Some(poster) = poster {
            body.push_str(&format!(
                r#"<div class="pic"><a href="/subject/"><img alt="" src="{poster}"></a></div>"#
            ));
        }
        body.push_str(r#"<div class="info"><ul>"#);
        if let Some(title) = title {
            body.push_str(&format!(
                r#"<li class="title"><a href="/subject/"><em>{title}</em></a></li>"#
            ));
        }
        if let Some(note) = note {
            body.push_str(&format!(r#"<li><span class="comment">{note}</span></li>"#));
        }
        body.push_str("</ul></div></div>");
    }
    format!(r#"<html><body><div class="grid-view">{body}</div></body></html>"#)
}
