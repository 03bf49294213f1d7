//! Row-wise border detection.
//!
//! Every row is reduced to a single ratio of "impure" (content-like) to
//! "pure" (border-like) pixels. The ratios are then scanned with a
//! run-length counter so that a boundary is only declared once `run_length`
//! consecutive rows agree, which absorbs anti-aliased edges and stray
//! pixels bleeding into an otherwise uniform border.
//!
//! Only rows are scanned; the cropped image always keeps its full width.

use image::{Rgba, imageops};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::PixelBuffer;

/// Default purity-ratio threshold (`impure / pure`).
pub const DEFAULT_THRESHOLD: f64 = 1.0;

/// Default number of consecutive rows needed to declare a boundary.
pub const DEFAULT_RUN_LENGTH: usize = 15;

/// Per-pixel test deciding whether a pixel looks like border background.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PurityMode {
    /// Red, green and blue are exactly equal (black, white, any gray).
    #[default]
    Gray,
    /// Red, green and blue are all zero.
    Black,
}

impl PurityMode {
    /// Whether `pixel` counts as border background. Alpha is ignored.
    pub fn is_pure(self, pixel: &Rgba<u16>) -> bool {
        let [r, g, b, _] = pixel.0;
        match self {
            Self::Gray => r == g && g == b,
            Self::Black => u32::from(r) + u32::from(g) + u32::from(b) == 0,
        }
    }
}

/// Which boundaries the scanner looks for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanMode {
    /// Find where content starts, then keep going down until the border resumes.
    #[default]
    Forward,
    /// Find the first content run from the top and, independently, the last
    /// content run from the bottom.
    Bidirectional,
}

/// Tunables for a single detector invocation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectorOptions {
    pub purity: PurityMode,
    pub scan: ScanMode,
    /// Rows with a ratio above this are content-like, below it border-like.
    pub threshold: f64,
    /// Consecutive agreeing rows required before a boundary is declared.
    pub run_length: usize,
}

impl Default for DetectorOptions {
    fn default() -> Self {
        Self {
            purity: PurityMode::default(),
            scan: ScanMode::default(),
            threshold: DEFAULT_THRESHOLD,
            run_length: DEFAULT_RUN_LENGTH,
        }
    }
}

/// Half-open row interval `[begin, end)` kept from the source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropRegion {
    pub begin: u32,
    pub end: u32,
}

impl CropRegion {
    /// The identity crop for an image of the given height.
    pub fn full(height: u32) -> Self {
        Self {
            begin: 0,
            end: height,
        }
    }

    pub fn height(&self) -> u32 {
        self.end - self.begin
    }

    /// Whether this region keeps every row of an image of `height` rows.
    pub fn is_full(&self, height: u32) -> bool {
        self.begin == 0 && self.end == height
    }
}

/// Ratio of impure to pure pixels.
///
/// A row without a single pure pixel is certainly content, so a zero
/// denominator yields `f64::INFINITY` instead of dividing.
pub fn purity_ratio(impure: u32, pure: u32) -> f64 {
    if pure == 0 {
        f64::INFINITY
    } else {
        f64::from(impure) / f64::from(pure)
    }
}

/// Compute one purity ratio per row, top to bottom.
pub fn row_signal(img: &PixelBuffer, purity: PurityMode) -> Vec<f64> {
    img.rows()
        .map(|row| {
            let (mut pure, mut impure) = (0u32, 0u32);
            for pixel in row {
                if purity.is_pure(pixel) {
                    pure += 1;
                } else {
                    impure += 1;
                }
            }
            purity_ratio(impure, pure)
        })
        .collect()
}

/// Return the row index at which `run_length` consecutive rows satisfy `hit`,
/// visiting rows in the iterator's order.
fn find_run<I, F>(rows: I, run_length: usize, hit: F) -> Option<usize>
where
    I: Iterator<Item = (usize, f64)>,
    F: Fn(f64) -> bool,
{
    let mut counter = 0usize;
    for (idx, ratio) in rows {
        if hit(ratio) {
            counter += 1;
        } else {
            counter = 0;
        }
        if counter >= run_length {
            return Some(idx);
        }
    }
    None
}

/// Locate the content rows of an image `height` rows tall from its row signal.
///
/// Falls back to the full extent whenever the detected interval would be
/// empty or inverted. `height` is passed separately because a zero-width
/// image has rows but no signal.
pub fn find_crop_region(signal: &[f64], height: u32, options: &DetectorOptions) -> CropRegion {
    let full = CropRegion::full(height);
    let height = isize::try_from(height).unwrap_or(isize::MAX);
    let run = options.run_length.max(1);
    let threshold = options.threshold;
    let rows = || signal.iter().copied().enumerate();
    let is_content = |ratio: f64| ratio > threshold;
    let is_border = |ratio: f64| ratio < threshold;

    let begin = find_run(rows(), run, is_content)
        .map_or(0, |idx| idx as isize - run as isize)
        .max(0);

    let end = match options.scan {
        ScanMode::Forward => find_run(rows().skip(begin as usize), run, is_border)
            .map_or(height, |idx| idx as isize - run as isize),
        ScanMode::Bidirectional => find_run(rows().rev(), run, is_content)
            .map_or(height, |idx| (idx + 1 + run) as isize)
            .min(height),
    };

    if end <= begin {
        return full;
    }
    CropRegion {
        begin: begin as u32,
        end: end as u32,
    }
}

/// Remove leading/trailing border rows from `img`.
///
/// Returns the cropped copy together with the region that was kept.
pub fn crop_borders(img: &PixelBuffer, options: &DetectorOptions) -> (PixelBuffer, CropRegion) {
    let (width, height) = img.dimensions();
    let signal = row_signal(img, options.purity);
    let region = find_crop_region(&signal, height, options);

    debug!(
        width,
        height,
        begin = region.begin,
        end = region.end,
        scan = ?options.scan,
        purity = ?options.purity,
        "Detected border rows"
    );

    if region.is_full(height) {
        return (img.clone(), region);
    }
    let cropped = imageops::crop_imm(img, 0, region.begin, width, region.height()).to_image();
    (cropped, region)
}

/// Crop every image of a batch in parallel, preserving input order.
pub fn crop_batch(
    images: &[PixelBuffer],
    options: &DetectorOptions,
) -> Vec<(PixelBuffer, CropRegion)> {
    images
        .par_iter()
        .map(|img| crop_borders(img, options))
        .collect()
}
