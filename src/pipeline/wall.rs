// src/pipeline/wall.rs

//! Poster wall pipeline.
//!
//! Reads back whatever images are currently in the asset directory, so the
//! wall reflects the directory rather than any particular harvest run.

use std::path::Path;

use crate::error::Result;
use crate::models::{GridSpec, WallConfig};
use crate::services::GridCompositor;
use crate::utils;
use crate::utils::fs::list_files_with_extensions;

/// Compose every matching image in `asset_dir` into `output`.
pub fn run_wall(wall: &WallConfig, asset_dir: &Path, output: &Path) -> Result<GridSpec> {
    utils::log::header("Building poster wall");

    let images = list_files_with_extensions(asset_dir, &wall.extensions)?;
    if images.is_empty() {
        log::warn!(
            "No {} files found in {}",
            wall.extensions.join("/"),
            asset_dir.display()
        );
    }

    let grid = GridCompositor::new(wall.background).compose_to_file(&images, output)?;

    utils::log::summary(
        "Poster wall",
        &[
            ("Images", images.len().to_string()),
            ("Grid", format!("{} x {}", grid.columns, grid.rows)),
            ("Cell", format!("{} x {} px", grid.cell_width, grid.cell_height)),
            ("Saved to", output.display().to_string()),
        ],
    );

    Ok(grid)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use image::{Rgb, RgbImage};

    use super::*;
    use crate::error::AppError;

    #[test]
    fn test_run_wall_uses_matching_files_only() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["a.jpg", "b.jpg", "c.jpg"] {
            RgbImage::from_pixel(6, 9, Rgb([50, 60, 70]))
                .save(dir.path().join(name))
                .unwrap();
        }
        RgbImage::from_pixel(6, 9, Rgb([1, 2, 3]))
            .save(dir.path().join("skip.png"))
            .unwrap();
        let output = dir.path().join("wall.jpg");

        let grid = run_wall(&WallConfig::default(), dir.path(), &output).unwrap();

        assert_eq!((grid.columns, grid.rows), (1, 4));
        assert_eq!(image::image_dimensions(&output).unwrap(), (6, 36));
    }

    #[test]
    fn test_run_wall_on_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("notes.txt"), b"nothing").unwrap();
        let output = dir.path().join("wall.jpg");

        let err = run_wall(&WallConfig::default(), dir.path(), &output).unwrap_err();

        assert!(matches!(err, AppError::EmptyInput));
        assert!(!output.exists());
    }
}
