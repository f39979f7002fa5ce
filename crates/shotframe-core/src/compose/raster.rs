//! The flattened output of one render.

use image::RgbaImage;

/// A composited frame: row-major RGBA8 pixels plus dimensions.
///
/// Produced by [`render`](super::render) and never mutated afterwards. Every
/// pixel is opaque because the backdrop covers the whole canvas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterResult {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl RasterResult {
    pub(crate) fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            (width as usize) * (height as usize) * 4,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// RGBA bytes, 4 per pixel.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// The RGBA value at `(x, y)`, or `None` outside the raster.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y as usize) * (self.width as usize) + x as usize) * 4;
        let px = &self.pixels[idx..idx + 4];
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Pixels without the alpha channel, 3 bytes per pixel.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        self.pixels
            .chunks_exact(4)
            .flat_map(|px| [px[0], px[1], px[2]])
            .collect()
    }

    /// Copy into an `image::RgbaImage` for further processing.
    pub fn to_rgba_image(&self) -> Option<RgbaImage> {
        RgbaImage::from_raw(self.width, self.height, self.pixels.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_lookup() {
        let mut pixels = vec![0u8; 3 * 2 * 4];
        let idx = (3 + 2) * 4;
        pixels[idx..idx + 4].copy_from_slice(&[1, 2, 3, 255]);
        let raster = RasterResult::new(3, 2, pixels);

        assert_eq!(raster.pixel(2, 1), Some([1, 2, 3, 255]));
        assert_eq!(raster.pixel(3, 0), None);
        assert_eq!(raster.pixel(0, 2), None);
    }

    #[test]
    fn test_to_rgb_bytes_drops_alpha() {
        let raster = RasterResult::new(2, 1, vec![10, 20, 30, 255, 40, 50, 60, 255]);
        assert_eq!(raster.to_rgb_bytes(), vec![10, 20, 30, 40, 50, 60]);
    }

    #[test]
    fn test_to_rgba_image() {
        let raster = RasterResult::new(2, 2, vec![9u8; 16]);
        let img = raster.to_rgba_image().unwrap();
        assert_eq!(img.dimensions(), (2, 2));
        assert_eq!(img.get_pixel(1, 1).0, [9, 9, 9, 9]);
    }
}
