//! Core types for source image decoding.

use image::RgbaImage;
use thiserror::Error;

/// Error types for source image decoding.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The file format is not recognized or supported.
    #[error("Invalid or unsupported image format")]
    InvalidFormat,

    /// The image file is corrupted or incomplete.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),

    /// The decoded image has no pixels.
    #[error("Image has zero width or height")]
    EmptyImage,

    /// Pixel data length doesn't match the declared dimensions.
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 4), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },
}

/// EXIF orientation values (1-8).
/// See: https://exiftool.org/TagNames/EXIF.html
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Orientation {
    /// Normal (no transformation needed).
    #[default]
    Normal = 1,
    /// Horizontal flip.
    FlipHorizontal = 2,
    /// Rotate 180 degrees.
    Rotate180 = 3,
    /// Vertical flip.
    FlipVertical = 4,
    /// Transpose (flip horizontal + rotate 270 CW).
    Transpose = 5,
    /// Rotate 90 degrees clockwise.
    Rotate90CW = 6,
    /// Transverse (flip horizontal + rotate 90 CW).
    Transverse = 7,
    /// Rotate 270 degrees clockwise (90 CCW).
    Rotate270CW = 8,
}

impl From<u32> for Orientation {
    fn from(value: u32) -> Self {
        match value {
            2 => Orientation::FlipHorizontal,
            3 => Orientation::Rotate180,
            4 => Orientation::FlipVertical,
            5 => Orientation::Transpose,
            6 => Orientation::Rotate90CW,
            7 => Orientation::Transverse,
            8 => Orientation::Rotate270CW,
            _ => Orientation::Normal,
        }
    }
}

/// An immutable decoded bitmap, the only image input of a render.
///
/// Pixels are straight (non-premultiplied) RGBA8 in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceImage {
    image: RgbaImage,
}

impl SourceImage {
    /// Wrap an already-decoded RGBA buffer.
    ///
    /// # Errors
    ///
    /// Returns `DecodeError::EmptyImage` for zero dimensions and
    /// `DecodeError::InvalidPixelData` when `pixels` is not `width * height * 4` long.
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, DecodeError> {
        if width == 0 || height == 0 {
            return Err(DecodeError::EmptyImage);
        }
        let expected = (width as usize) * (height as usize) * 4;
        if pixels.len() != expected {
            return Err(DecodeError::InvalidPixelData {
                expected,
                actual: pixels.len(),
            });
        }
        RgbaImage::from_raw(width, height, pixels)
            .map(|image| Self { image })
            .ok_or(DecodeError::InvalidPixelData {
                expected,
                actual: 0,
            })
    }

    /// Wrap an `image::RgbaImage`.
    pub fn from_rgba_image(image: RgbaImage) -> Result<Self, DecodeError> {
        if image.width() == 0 || image.height() == 0 {
            return Err(DecodeError::EmptyImage);
        }
        Ok(Self { image })
    }

    /// Intrinsic width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Intrinsic height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Raw RGBA bytes.
    pub fn pixels(&self) -> &[u8] {
        self.image.as_raw()
    }

    pub(crate) fn as_rgba_image(&self) -> &RgbaImage {
        &self.image
    }
}
