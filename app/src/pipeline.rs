//! The batch run: discover, decode + crop in parallel, label, compose, write.

use std::path::PathBuf;

use image_processor::{
    GridLayout, LabelFace, LabelStyle, PixelBuffer, compose_grid, crop_batch,
    label::DEFAULT_LABEL_FONT_SIZE, label_sequence,
};
use rayon::prelude::*;
use tracing::info;

use crate::config::Config;
use crate::discovery;
use crate::error::AppError;
use crate::io;
use crate::report::{CropReport, ReportEntry};

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub images: usize,
    pub columns: u32,
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub output: PathBuf,
}

/// Build the label style for this run, or `None` when labels are disabled.
fn label_style(config: &Config) -> Result<Option<LabelStyle>, AppError> {
    if !config.label {
        return Ok(None);
    }
    let Some(path) = &config.label_font else {
        return Ok(Some(LabelStyle::default()));
    };

    let data = std::fs::read(path).map_err(|source| AppError::FontRead {
        path: path.clone(),
        source,
    })?;
    let face = LabelFace::from_font_bytes(data, DEFAULT_LABEL_FONT_SIZE).map_err(|source| {
        AppError::Font {
            path: path.clone(),
            source,
        }
    })?;
    Ok(Some(LabelStyle {
        face,
        ..LabelStyle::default()
    }))
}

/// Run one batch end to end. Any failure aborts the whole batch.
pub fn run(config: &Config) -> Result<RunSummary, AppError> {
    let inputs =
        discovery::discover_inputs(config.input_list.as_deref(), config.input_dir.as_deref())?;
    info!(count = inputs.len(), "Resolved input images");

    // Fail on a bad font before spending time on decoding.
    let style = label_style(config)?;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads.unwrap_or(0))
        .build()?;

    let (sources, cropped) = pool.install(|| -> Result<_, AppError> {
        let sources = inputs
            .par_iter()
            .map(|path| io::load_image(path))
            .collect::<Result<Vec<PixelBuffer>, AppError>>()?;
        let cropped = crop_batch(&sources, &config.detector);
        Ok((sources, cropped))
    })?;

    let source_dims: Vec<(u32, u32)> = sources.iter().map(|img| img.dimensions()).collect();
    drop(sources);

    let (mut tiles, regions): (Vec<PixelBuffer>, Vec<_>) = cropped.into_iter().unzip();
    for ((path, tile), region) in inputs.iter().zip(&tiles).zip(&regions) {
        info!(
            path = %path.display(),
            begin = region.begin,
            end = region.end,
            width = tile.width(),
            height = tile.height(),
            "Cropped borders"
        );
    }

    if let Some(style) = &style {
        label_sequence(&mut tiles, style);
    }

    let layout = GridLayout::new(&tiles, config.columns)?;
    let canvas = compose_grid(&tiles, config.columns)?;
    io::save_png(&canvas, &config.output)?;

    if let Some(report_path) = &config.report {
        let images = inputs
            .iter()
            .zip(&source_dims)
            .zip(&regions)
            .enumerate()
            .map(|(index, ((path, &(w, h)), &crop))| ReportEntry {
                index,
                path: path.clone(),
                source_width: w,
                source_height: h,
                crop,
                cell: layout.cell_origin(index),
            })
            .collect();
        CropReport {
            output: config.output.clone(),
            columns: layout.columns,
            canvas_width: canvas.width(),
            canvas_height: canvas.height(),
            detector: config.detector,
            images,
        }
        .write(report_path)?;
        info!(path = %report_path.display(), "Wrote crop report");
    }

    Ok(RunSummary {
        images: tiles.len(),
        columns: layout.columns,
        canvas_width: canvas.width(),
        canvas_height: canvas.height(),
        output: config.output.clone(),
    })
}
