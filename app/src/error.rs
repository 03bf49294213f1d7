use std::path::PathBuf;

use image_processor::ImageProcessorError;
use thiserror::Error;

/// Errors that abort a cropgrid run. None of them are retried.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("No input images found (use --input or --input-dir)")]
    NoInputs,

    #[error("Input directory not found: {0}")]
    InputNotFound(PathBuf),

    #[error("Failed to walk {path}: {source}")]
    DirectoryWalk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to write {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to read label font {path}: {source}")]
    FontRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to load label font {path}: {source}")]
    Font {
        path: PathBuf,
        #[source]
        source: ImageProcessorError,
    },

    #[error("Failed to write report {path}: {source}")]
    Report {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to configure thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error(transparent)]
    Processor(#[from] ImageProcessorError),
}
