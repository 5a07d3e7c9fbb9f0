// src/models/grid.rs

//! Poster wall grid geometry.
//!
//! The shape follows a near-square rule: `columns = floor(sqrt(n))` and
//! `rows = floor(n / columns) + 1`. The extra row means the last row is
//! frequently partial (or entirely empty when `n` is a perfect square);
//! uncovered cells keep the background fill.

use crate::error::{AppError, Result};

/// Grid layout for a poster wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSpec {
    pub columns: u32,
    pub rows: u32,
    pub cell_width: u32,
    pub cell_height: u32,
}

impl GridSpec {
    /// Derive the grid for `count` images of `cell_width` x `cell_height`.
    pub fn for_count(count: usize, cell_width: u32, cell_height: u32) -> Result<Self> {
        let (columns, rows) = Self::shape(count)?;
        if cell_width == 0 || cell_height == 0 {
            return Err(AppError::validation(format!(
                "grid cell size must be positive, got {cell_width}x{cell_height}"
            )));
        }
        Ok(Self {
            columns,
            rows,
            cell_width,
            cell_height,
        })
    }

    /// `(columns, rows)` for `count` images.
    pub fn shape(count: usize) -> Result<(u32, u32)> {
        if count == 0 {
            return Err(AppError::EmptyInput);
        }
        let columns = isqrt(count).max(1);
        let rows = count / columns + 1;
        Ok((columns as u32, rows as u32))
    }

    pub fn cell_count(&self) -> u32 {
        self.columns * self.rows
    }

    /// Composite canvas size in pixels.
    pub fn canvas_size(&self) -> (u32, u32) {
        (
            self.columns * self.cell_width,
            self.rows * self.cell_height,
        )
    }

    /// Top-left pixel of the `index`-th image in row-major order.
    pub fn position(&self, index: usize) -> (u32, u32) {
        let index = index as u32;
        let col = index % self.columns;
        let row = index / self.columns;
        (col * self.cell_width, row * self.cell_height)
    }
}

/// Integer square root, exact for every `usize`.
fn isqrt(n: usize) -> usize {
    let mut root = (n as f64).sqrt() as usize;
    while root * root > n {
        root -= 1;
    }
    while (root + 1) * (root + 1) <= n {
        root += 1;
    }
    root
}
