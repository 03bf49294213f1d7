//! Decoding inputs into the common 16-bit representation and encoding the canvas.

use std::path::Path;

use image::{ImageFormat, ImageReader};
use image_processor::PixelBuffer;
use tracing::info;

use crate::error::AppError;

/// Decode any supported raster file into 16-bit RGBA.
///
/// The container format is sniffed from the file contents, so a
/// misnamed extension still decodes.
pub fn load_image(path: &Path) -> Result<PixelBuffer, AppError> {
    let open_err = |source| AppError::Open {
        path: path.to_path_buf(),
        source,
    };
    let reader = ImageReader::open(path)
        .map_err(open_err)?
        .with_guessed_format()
        .map_err(open_err)?;
    let format = reader.format();

    let img = reader.decode().map_err(|source| AppError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    info!(
        path = %path.display(),
        format = ?format,
        width = img.width(),
        height = img.height(),
        "Read image file"
    );
    Ok(img.to_rgba16())
}

/// Encode `img` as PNG at `path`, replacing any existing file.
pub fn save_png(img: &PixelBuffer, path: &Path) -> Result<(), AppError> {
    img.save_with_format(path, ImageFormat::Png)
        .map_err(|source| AppError::Encode {
            path: path.to_path_buf(),
            source,
        })?;
    info!(
        path = %path.display(),
        width = img.width(),
        height = img.height(),
        "Wrote output image"
    );
    Ok(())
}
