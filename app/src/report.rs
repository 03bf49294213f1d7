//! Optional JSON report describing what was cropped and where it went.

use std::path::{Path, PathBuf};

use image_processor::{CropRegion, DetectorOptions};
use serde::Serialize;

use crate::error::AppError;

/// Per-image entry of a [`CropReport`].
#[derive(Debug, Clone, Serialize)]
pub struct ReportEntry {
    pub index: usize,
    pub path: PathBuf,
    pub source_width: u32,
    pub source_height: u32,
    pub crop: CropRegion,
    /// Top-left corner of the image's cell in the canvas.
    pub cell: (u32, u32),
}

#[derive(Debug, Clone, Serialize)]
pub struct CropReport {
    pub output: PathBuf,
    pub columns: u32,
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub detector: DetectorOptions,
    pub images: Vec<ReportEntry>,
}

impl CropReport {
    /// Write the report as pretty-printed JSON.
    pub fn write(&self, path: &Path) -> Result<(), AppError> {
        let report_err = |source| AppError::Report {
            path: path.to_path_buf(),
            source,
        };
        let json = serde_json::to_string_pretty(self).map_err(|e| report_err(e.into()))?;
        std::fs::write(path, json).map_err(report_err)
    }
}
