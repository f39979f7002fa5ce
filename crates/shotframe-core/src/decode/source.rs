//! Decoding of user-supplied image files into a [`SourceImage`].

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageReader};

use super::{DecodeError, Orientation, SourceImage};

impl SourceImage {
    /// Decode an image file, applying its EXIF orientation the way a browser does.
    ///
    /// Any format enabled in the `image` dependency is accepted (PNG, JPEG,
    /// GIF, WebP, BMP); the format is guessed from the content.
    ///
    /// # Errors
    ///
    /// Returns `DecodeError::InvalidFormat` if the format cannot be recognized,
    /// `DecodeError::CorruptedFile` if decoding fails part way and
    /// `DecodeError::EmptyImage` for a zero-sized image.
    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        let orientation = extract_orientation(bytes);

        let reader = ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;
        if reader.format().is_none() {
            return Err(DecodeError::InvalidFormat);
        }

        let img = reader
            .decode()
            .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

        log::debug!(
            "decoded source image {}x{} (orientation {:?})",
            img.width(),
            img.height(),
            orientation
        );

        SourceImage::from_rgba_image(apply_orientation(img, orientation).into_rgba8())
    }
}

/// Read the EXIF orientation tag, defaulting to `Normal` when absent.
pub fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);
    match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(Orientation::from)
            .unwrap_or_default(),
        Err(_) => Orientation::Normal,
    }
}

fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}
