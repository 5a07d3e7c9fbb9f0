// src/models/selectors.rs

//! CSS selectors for scraping a collection listing page.

use serde::{Deserialize, Serialize};

/// CSS selectors for scraping a collection listing page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingSelectors {
    /// Selector for each entry in the listing
    #[serde(default = "default_item")]
    pub item: String,

    /// Selector for the title element within an entry
    #[serde(default = "default_title")]
    pub title: String,

    /// Selector for the free-text note within an entry
    #[serde(default = "default_note")]
    pub note: String,

    /// Selector for the poster image within an entry
    #[serde(default = "default_image")]
    pub image: String,

    /// HTML attribute holding the image reference (usually "src")
    #[serde(default = "default_image_attr")]
    pub image_attr: String,
}

fn default_item() -> String {
    ".item.comment-item".to_string()
}

fn default_title() -> String {
    ".title em".to_string()
}

fn default_note() -> String {
    ".comment".to_string()
}

fn default_image() -> String {
    ".pic img".to_string()
}

fn default_image_attr() -> String {
    "src".to_string()
}

impl Default for ListingSelectors {
    fn default() -> Self {
        Self {
            item: default_item(),
            title: default_title(),
            note: default_note(),
            image: default_image(),
            image_attr: default_image_attr(),
        }
    }
}
