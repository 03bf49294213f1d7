//! Border cropping and grid composition for batches of scanned images.
//!
//! Provides row-wise border detection (uniform scanner bezels, letterboxing,
//! solid padding), sequence labeling, and row-major grid composition.

pub mod border;
pub mod compose;
mod glyphs;
pub mod label;

// Re-exports for convenience
pub use border::{
    CropRegion, DetectorOptions, PurityMode, ScanMode, crop_batch, crop_borders,
    find_crop_region, row_signal,
};
pub use compose::{GridLayout, compose_grid, effective_columns};
pub use label::{LabelFace, LabelStyle, draw_label, label_sequence, sequence_label};

/// Decoded pixel buffer shared by every stage: 16-bit RGBA, alpha untouched.
pub type PixelBuffer = image::ImageBuffer<image::Rgba<u16>, Vec<u16>>;

/// Errors that can occur while composing a batch.
#[derive(Debug, thiserror::Error)]
pub enum ImageProcessorError {
    #[error("Cannot compose an empty batch")]
    EmptyBatch,

    #[error("Canvas too large: {width}x{height} exceeds the canvas size limit")]
    CanvasTooLarge { width: u64, height: u64 },

    #[error("Invalid font data: {0}")]
    InvalidFont(String),
}

/// Result type alias for image-processor operations.
pub type Result<T> = std::result::Result<T, ImageProcessorError>;
