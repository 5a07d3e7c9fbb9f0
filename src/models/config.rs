//! Application configuration structures.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::{HarvestJob, ListingSelectors};

/// Placeholder the listing URL template must contain.
pub const SUBJECT_PLACEHOLDER: &str = "{subject}";

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Listing iteration and politeness settings
    #[serde(default)]
    pub harvest: HarvestConfig,

    /// HTTP client and session settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Output locations
    #[serde(default)]
    pub paths: PathsConfig,

    /// CSS selectors for listing entries
    #[serde(default)]
    pub selectors: ListingSelectors,

    /// Poster wall composition settings
    #[serde(default)]
    pub wall: WallConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.harvest.subject_id.trim().is_empty() {
            return Err(AppError::validation("harvest.subject_id is empty"));
        }
        if self.harvest.page_size == 0 {
            return Err(AppError::validation("harvest.page_size must be > 0"));
        }
        if self.harvest.max_pages == 0 {
            return Err(AppError::validation("harvest.max_pages must be > 0"));
        }
        if !self.harvest.listing_url.contains(SUBJECT_PLACEHOLDER) {
            return Err(AppError::validation(format!(
                "harvest.listing_url must contain {SUBJECT_PLACEHOLDER}"
            )));
        }
        if self.http.user_agent.trim().is_empty() {
            return Err(AppError::validation("http.user_agent is empty"));
        }
        if self.http.timeout_secs == 0 {
            return Err(AppError::validation("http.timeout_secs must be > 0"));
        }
        if self.wall.extensions.is_empty() {
            return Err(AppError::validation("wall.extensions is empty"));
        }
        Ok(())
    }

    /// Build the harvest job described by this configuration.
    pub fn harvest_job(&self) -> HarvestJob {
        HarvestJob {
            subject_id: self.harvest.subject_id.clone(),
            page_size: self.harvest.page_size,
            max_pages: self.harvest.max_pages,
            asset_dir: self.paths.asset_dir.clone(),
            output_path: self.paths.output_file.clone(),
        }
    }
}

/// How local asset filenames are derived from their URL.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetNaming {
    /// Final URL path segment as-is
    #[default]
    Segment,
    /// Short URL hash prefixed to the final path segment
    Hashed,
}

/// Listing iteration settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarvestConfig {
    /// Collection owner identifier
    #[serde(default)]
    pub subject_id: String,

    /// Entries per listing page (offset step)
    #[serde(default = "defaults::page_size")]
    pub page_size: u32,

    /// Upper bound on fetched pages
    #[serde(default = "defaults::max_pages")]
    pub max_pages: u32,

    /// Delay before every listing request in milliseconds
    #[serde(default = "defaults::request_delay")]
    pub request_delay_ms: u64,

    /// Listing URL template, `{subject}` is replaced by the subject id
    #[serde(default = "defaults::listing_url")]
    pub listing_url: String,

    /// Asset filename strategy
    #[serde(default)]
    pub asset_naming: AssetNaming,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            subject_id: String::new(),
            page_size: defaults::page_size(),
            max_pages: defaults::max_pages(),
            request_delay_ms: defaults::request_delay(),
            listing_url: defaults::listing_url(),
            asset_naming: AssetNaming::default(),
        }
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Raw session cookie string (`name=value; name2=value2`)
    #[serde(default)]
    pub cookie: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            cookie: String::new(),
        }
    }
}

/// Output locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory receiving downloaded posters
    #[serde(default = "defaults::asset_dir")]
    pub asset_dir: PathBuf,

    /// Metadata JSON file
    #[serde(default = "defaults::output_file")]
    pub output_file: PathBuf,

    /// Composite poster wall image
    #[serde(default = "defaults::wall_file")]
    pub wall_file: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            asset_dir: defaults::asset_dir(),
            output_file: defaults::output_file(),
            wall_file: defaults::wall_file(),
        }
    }
}

/// Poster wall settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WallConfig {
    /// File extensions picked up from the asset directory
    #[serde(default = "defaults::extensions")]
    pub extensions: Vec<String>,

    /// RGB fill for empty cells
    #[serde(default)]
    pub background: [u8; 3],
}

impl Default for WallConfig {
    fn default() -> Self {
        Self {
            extensions: defaults::extensions(),
            background: [0, 0, 0],
        }
    }
}

mod defaults {
    use std::path::PathBuf;

    pub fn page_size() -> u32 {
        15
    }
    pub fn max_pages() -> u32 {
        10
    }
    pub fn request_delay() -> u64 {
        1000
    }
    pub fn listing_url() -> String {
        "https://movie.douban.com/people/{subject}/collect".into()
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
         (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36"
            .into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn asset_dir() -> PathBuf {
        PathBuf::from("movie_posters")
    }
    pub fn output_file() -> PathBuf {
        PathBuf::from("movie_info.json")
    }
    pub fn wall_file() -> PathBuf {
        PathBuf::from("poster_wall.jpg")
    }
    pub fn extensions() -> Vec<String> {
        vec!["jpg".into()]
    }
}
