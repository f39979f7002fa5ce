//! PNG encoding for downloads and clipboard copies.

use image::codecs::png::PngEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use std::io::Cursor;

use super::{validate, EncodeError};
use crate::compose::RasterResult;

/// Encode a raster to lossless RGBA PNG bytes.
///
/// # Errors
///
/// Returns `EncodeError::InvalidDimensions` for an empty raster and
/// `EncodeError::EncodingFailed` if the codec rejects the data.
pub fn encode_png(raster: &RasterResult) -> Result<Vec<u8>, EncodeError> {
    validate(raster)?;

    let mut buffer = Cursor::new(Vec::new());
    PngEncoder::new(&mut buffer)
        .write_image(
            raster.pixels(),
            raster.width(),
            raster.height(),
            ExtendedColorType::Rgba8,
        )
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}
