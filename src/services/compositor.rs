// src/services/compositor.rs

//! Poster wall compositor.
//!
//! Cell size comes from the first image; the remaining images are assumed
//! to share it and are painted unscaled at their grid position.

use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage, imageops};

use crate::error::{AppError, Result};
use crate::models::GridSpec;

/// Paints same-size images into a near-square grid.
#[derive(Debug, Clone, Copy)]
pub struct GridCompositor {
    background: Rgb<u8>,
}

impl Default for GridCompositor {
    fn default() -> Self {
        Self::new([0, 0, 0])
    }
}

impl GridCompositor {
    pub fn new(background: [u8; 3]) -> Self {
        Self {
            background: Rgb(background),
        }
    }

    /// Grid layout for `image_paths`, reading only the first image.
    pub fn plan(&self, image_paths: &[PathBuf]) -> Result<GridSpec> {
        let first = image_paths.first().ok_or(AppError::EmptyInput)?;
        let (width, height) = image::image_dimensions(first)?;
        GridSpec::for_count(image_paths.len(), width, height)
    }

    /// Compose all images into one raster in row-major order.
    pub fn compose_grid(&self, image_paths: &[PathBuf]) -> Result<RgbImage> {
        self.compose(image_paths).map(|(_, canvas)| canvas)
    }

    fn compose(&self, image_paths: &[PathBuf]) -> Result<(GridSpec, RgbImage)> {
        let grid = self.plan(image_paths)?;
        let (width, height) = grid.canvas_size();
        log::debug!(
            "Composing {} images into {}x{} grid ({}x{} px)",
            image_paths.len(),
            grid.columns,
            grid.rows,
            width,
            height
        );

        let mut canvas = RgbImage::from_pixel(width, height, self.background);
        for (index, path) in image_paths.iter().enumerate() {
            let tile = image::open(path)?.to_rgb8();
            let (x, y) = grid.position(index);
            imageops::replace(&mut canvas, &tile, i64::from(x), i64::from(y));
        }
        Ok((grid, canvas))
    }

    /// Compose `image_paths` and save the result to `output`.
    ///
    /// Nothing is written when composition fails.
    pub fn compose_to_file(&self, image_paths: &[PathBuf], output: &Path) -> Result<GridSpec> {
        let (grid, canvas) = self.compose(image_paths)?;
        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        canvas.save(output)?;
        Ok(grid)
    }
}
