//! Grid composition: place a batch of images into a uniform row-major grid.

use image::imageops;
use tracing::debug;

use crate::{ImageProcessorError, PixelBuffer, Result};

/// Upper bound on the composed canvas allocation, in bytes (16 GiB).
pub const MAX_CANVAS_BYTES: u64 = 1 << 34;

/// Bytes per canvas pixel: four 16-bit channels.
const BYTES_PER_PIXEL: u64 = 8;

/// Effective column count for a batch of `count` images.
///
/// Non-positive requests and single-image batches collapse to one column.
pub fn effective_columns(columns: i32, count: usize) -> u32 {
    if columns <= 0 || count == 1 {
        1
    } else {
        columns as u32
    }
}

/// Cell and canvas geometry derived from a batch.
///
/// Every cell is as wide as the widest image and as tall as the tallest, so
/// every image fits its cell without scaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    pub columns: u32,
    pub rows: u32,
    pub cell_width: u32,
    pub cell_height: u32,
}

impl GridLayout {
    /// Compute the layout for a batch of images.
    pub fn new(images: &[PixelBuffer], columns: i32) -> Result<Self> {
        let dims: Vec<(u32, u32)> = images.iter().map(|img| img.dimensions()).collect();
        Self::from_dimensions(&dims, columns)
    }

    /// Compute the layout from `(width, height)` pairs.
    pub fn from_dimensions(dims: &[(u32, u32)], columns: i32) -> Result<Self> {
        if dims.is_empty() {
            return Err(ImageProcessorError::EmptyBatch);
        }

        let columns = effective_columns(columns, dims.len());
        let cell_width = dims.iter().map(|&(w, _)| w).max().unwrap_or(0);
        let cell_height = dims.iter().map(|&(_, h)| h).max().unwrap_or(0);
        let rows = dims.len().div_ceil(columns as usize);

        let width = u64::from(cell_width) * u64::from(columns);
        let height = u64::from(cell_height) * rows as u64;
        let bytes = width
            .checked_mul(height)
            .and_then(|pixels| pixels.checked_mul(BYTES_PER_PIXEL));
        let fits = width <= u64::from(u32::MAX)
            && height <= u64::from(u32::MAX)
            && bytes.is_some_and(|bytes| bytes <= MAX_CANVAS_BYTES && bytes <= isize::MAX as u64);
        if !fits {
            return Err(ImageProcessorError::CanvasTooLarge { width, height });
        }

        Ok(Self {
            columns,
            rows: rows as u32,
            cell_width,
            cell_height,
        })
    }

    pub fn canvas_width(&self) -> u32 {
        self.cell_width * self.columns
    }

    pub fn canvas_height(&self) -> u32 {
        self.cell_height * self.rows
    }

    /// Top-left corner of the cell holding the `index`-th image.
    pub fn cell_origin(&self, index: usize) -> (u32, u32) {
        let columns = self.columns as usize;
        let col = (index % columns) as u32;
        let row = (index / columns) as u32;
        (col * self.cell_width, row * self.cell_height)
    }
}

/// Compose `images` into a single canvas with `columns` images per row.
///
/// Images are copied top-left aligned into their cell without blending;
/// uncovered cell area stays fully transparent black.
pub fn compose_grid(images: &[PixelBuffer], columns: i32) -> Result<PixelBuffer> {
    let layout = GridLayout::new(images, columns)?;
    let mut canvas = PixelBuffer::new(layout.canvas_width(), layout.canvas_height());

    debug!(
        count = images.len(),
        columns = layout.columns,
        rows = layout.rows,
        cell_width = layout.cell_width,
        cell_height = layout.cell_height,
        "Composing grid"
    );

    for (index, img) in images.iter().enumerate() {
        let (x, y) = layout.cell_origin(index);
        imageops::replace(&mut canvas, img, i64::from(x), i64::from(y));
    }

    Ok(canvas)
}
