//! JPEG encoding for downloads.
//!
//! Uses the `image` crate's baseline JPEG encoder. JPEG has no alpha
//! channel, so the raster's alpha is dropped; rasters are opaque anyway.

use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use std::io::Cursor;

use super::{validate, EncodeError};
use crate::compose::RasterResult;

/// Quality used for downloads, matching a browser canvas' default JPEG quality.
pub const DEFAULT_JPEG_QUALITY: u8 = 92;

/// Encode a raster to JPEG bytes.
///
/// # Arguments
///
/// * `raster` - The composited frame
/// * `quality` - JPEG quality (1-100, where 100 is highest quality); clamped
///
/// # Errors
///
/// Returns `EncodeError::InvalidDimensions` for an empty raster and
/// `EncodeError::EncodingFailed` if the codec rejects the data.
pub fn encode_jpeg(raster: &RasterResult, quality: u8) -> Result<Vec<u8>, EncodeError> {
    validate(raster)?;

    let quality = quality.clamp(1, 100);
    let rgb = raster.to_rgb_bytes();

    let mut buffer = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut buffer, quality)
        .write_image(&rgb, raster.width(), raster.height(), ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}
