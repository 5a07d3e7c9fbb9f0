// src/services/assets.rs

//! Idempotent, file-backed asset downloads.
//!
//! A file already present at the derived path is a cache hit and is returned
//! without touching the network, which is what makes re-running a harvest
//! against the same directory cheap. Downloads land in a temp file next to
//! the target and are renamed into place, so the directory never holds a
//! partial asset.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::models::AssetNaming;
use crate::utils::Transport;
use crate::utils::fs::{ensure_dir, write_atomic};
use crate::utils::url::asset_filename;

/// How an asset request was satisfied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetOutcome {
    /// Fetched from the network and written to disk
    Downloaded(PathBuf),
    /// Already on disk, no request made
    Cached(PathBuf),
}

impl AssetOutcome {
    pub fn path(&self) -> &Path {
        match self {
            Self::Downloaded(path) | Self::Cached(path) => path,
        }
    }

    pub fn into_path(self) -> PathBuf {
        match self {
            Self::Downloaded(path) | Self::Cached(path) => path,
        }
    }

    pub fn is_cached(&self) -> bool {
        matches!(self, Self::Cached(_))
    }
}

/// Downloads assets into a directory, skipping files that already exist.
pub struct AssetCache {
    transport: Arc<dyn Transport>,
    naming: AssetNaming,
}

impl AssetCache {
    pub fn new(transport: Arc<dyn Transport>, naming: AssetNaming) -> Self {
        Self { transport, naming }
    }

    /// Local path `url` maps to under `dest_dir`.
    pub fn target_path(&self, url: &str, dest_dir: &Path) -> PathBuf {
        dest_dir.join(asset_filename(url, self.naming))
    }

    /// Download `url` into `dest_dir` unless a regular file already sits at the target.
    ///
    /// Every failure is reported as [`AppError::Download`].
    pub fn fetch_if_absent(&self, url: &str, dest_dir: &Path) -> Result<AssetOutcome> {
        ensure_dir(dest_dir).map_err(|e| AppError::download(url, e))?;

        let target = self.target_path(url, dest_dir);
        if target.is_file() {
            log::debug!("Cache hit for {} at {}", url, target.display());
            return Ok(AssetOutcome::Cached(target));
        }

        let bytes = self
            .transport
            .get(url, &[])
            .map_err(|e| AppError::download(url, e))?;
        write_atomic(&target, &bytes).map_err(|e| AppError::download(url, e))?;

        log::debug!("Downloaded {} ({} bytes)", url, bytes.len());
        Ok(AssetOutcome::Downloaded(target))
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::services::testing::MockTransport;

    const URL: &str = "http://x/a.jpg";

    fn cache(transport: &Arc<MockTransport>, naming: AssetNaming) -> AssetCache {
        AssetCache::new(transport.clone(), naming)
    }

    #[test]
    fn test_second_call_is_cache_hit() {
        let dir = tempfile::tempdir().unwrap();
        let transport = Arc::new(MockTransport::new().with_asset(URL, b"jpeg"));
        let cache = cache(&transport, AssetNaming::Segment);

        let first = cache.fetch_if_absent(URL, dir.path()).unwrap();
        let second = cache.fetch_if_absent(URL, dir.path()).unwrap();

        assert!(!first.is_cached());
        assert!(second.is_cached());
        assert_eq!(first.path(), second.path());
        assert_eq!(first.path(), dir.path().join("a.jpg"));
        assert_eq!(transport.asset_requests(URL), 1);
        assert_eq!(fs::read(first.path()).unwrap(), b"jpeg");
    }

    #[test]
    fn test_directory_at_target_is_not_a_cache_hit() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("a.jpg")).unwrap();
        let transport = Arc::new(MockTransport::new().with_asset(URL, b"jpeg"));

        let result = cache(&transport, AssetNaming::Segment).fetch_if_absent(URL, dir.path());

        assert!(!matches!(result, Ok(AssetOutcome::Cached(_))));
        assert_eq!(transport.asset_requests(URL), 1);
        assert!(dir.path().join("a.jpg").is_dir());
    }

    #[test]
    fn test_existing_file_skips_network() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.jpg"), b"old").unwrap();
        let transport = Arc::new(MockTransport::new());

        let outcome = cache(&transport, AssetNaming::Segment)
            .fetch_if_absent(URL, dir.path())
            .unwrap();

        assert!(outcome.is_cached());
        assert!(transport.requests().is_empty());
        assert_eq!(fs::read(outcome.path()).unwrap(), b"old");
    }

    #[test]
    fn test_creates_missing_destination() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("deep/posters");
        let transport = Arc::new(MockTransport::new().with_asset(URL, b"jpeg"));

        let outcome = cache(&transport, AssetNaming::Segment)
            .fetch_if_absent(URL, &dest)
            .unwrap();

        assert_eq!(outcome.into_path(), dest.join("a.jpg"));
    }

    #[test]
    fn test_failed_fetch_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let transport = Arc::new(MockTransport::new());

        let err = cache(&transport, AssetNaming::Segment)
            .fetch_if_absent("http://x/missing.jpg", dir.path())
            .unwrap_err();

        assert!(matches!(err, AppError::Download { ref url, .. } if url == "http://x/missing.jpg"));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_hashed_naming_keeps_shared_segments_apart() {
        let dir = tempfile::tempdir().unwrap();
        let transport = Arc::new(
            MockTransport::new()
                .with_asset("http://x/one/p.jpg", b"one")
                .with_asset("http://y/two/p.jpg", b"two"),
        );
        let cache = cache(&transport, AssetNaming::Hashed);

        let one = cache.fetch_if_absent("http://x/one/p.jpg", dir.path()).unwrap();
        let two = cache.fetch_if_absent("http://y/two/p.jpg", dir.path()).unwrap();

        assert_ne!(one.path(), two.path());
        assert_eq!(fs::read(one.path()).unwrap(), b"one");
        assert_eq!(fs::read(two.path()).unwrap(), b"two");
    }
}
