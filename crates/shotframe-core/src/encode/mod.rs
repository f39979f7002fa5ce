//! Raster encoding for export.
//!
//! - PNG: lossless, keeps alpha, used for downloads and every clipboard copy
//! - JPEG: lossy, drops alpha, quality 92 by default
//!
//! Both encoders are synchronous and deterministic.

mod jpeg;
mod png;

pub use jpeg::{encode_jpeg, DEFAULT_JPEG_QUALITY};
pub use png::encode_png;

use thiserror::Error;

use crate::compose::RasterResult;
use crate::style::ExportFormat;

/// Errors that can occur while encoding a raster.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 4), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The codec failed
    #[error("Image encoding failed: {0}")]
    EncodingFailed(String),
}

/// Encode `raster` in `format`, using the default quality for JPEG.
pub fn encode(raster: &RasterResult, format: ExportFormat) -> Result<Vec<u8>, EncodeError> {
    match format {
        ExportFormat::Png => encode_png(raster),
        ExportFormat::Jpeg => encode_jpeg(raster, DEFAULT_JPEG_QUALITY),
    }
}

fn validate(raster: &RasterResult) -> Result<(), EncodeError> {
    let (width, height) = (raster.width(), raster.height());
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected = (width as usize) * (height as usize) * 4;
    if raster.pixels().len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: raster.pixels().len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_dispatches_on_format() {
        let raster = RasterResult::new(8, 8, vec![255u8; 256]);

        let png = encode(&raster, ExportFormat::Png).unwrap();
        assert_eq!(&png[1..4], b"PNG");

        let jpeg = encode(&raster, ExportFormat::Jpeg).unwrap();
        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_encode_error_display() {
        let err = EncodeError::InvalidDimensions {
            width: 0,
            height: 3,
        };
        assert_eq!(
            err.to_string(),
            "Invalid dimensions: width (0) and height (3) must be non-zero"
        );
    }
}
