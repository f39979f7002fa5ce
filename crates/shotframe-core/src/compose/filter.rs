//! Color filters for the placed image.
//!
//! Each filter is the 100%-strength (or 150% where noted) form of the
//! matching CSS filter function, evaluated in sRGB:
//!
//! | Filter       | Transform                                   |
//! |--------------|---------------------------------------------|
//! | `grayscale`  | every channel = Rec.709 luminance           |
//! | `sepia`      | standard sepia matrix                       |
//! | `brightness` | `c * 1.5`                                   |
//! | `contrast`   | `(c - 0.5) * 1.5 + 0.5`                     |
//! | `invert`     | `1 - c`                                     |
//!
//! Alpha is never touched.

use crate::style::Filter;

const BRIGHTNESS_FACTOR: f32 = 1.5;
const CONTRAST_FACTOR: f32 = 1.5;

/// Apply `filter` to RGBA pixel data in place.
///
/// # Arguments
/// * `pixels` - RGBA pixel data (4 bytes per pixel, row-major order)
/// * `filter` - The filter to apply; `Filter::None` leaves the buffer untouched
pub fn apply_filter(pixels: &mut [u8], filter: Filter) {
    if filter == Filter::None {
        return;
    }

    for chunk in pixels.chunks_exact_mut(4) {
        let r = chunk[0] as f32 / 255.0;
        let g = chunk[1] as f32 / 255.0;
        let b = chunk[2] as f32 / 255.0;

        let (r, g, b) = filter_pixel(r, g, b, filter);

        chunk[0] = to_u8(r);
        chunk[1] = to_u8(g);
        chunk[2] = to_u8(b);
    }
}

#[inline]
fn to_u8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Filter a single pixel with channels in 0.0..=1.0. Results may leave that range.
#[inline]
pub fn filter_pixel(r: f32, g: f32, b: f32, filter: Filter) -> (f32, f32, f32) {
    match filter {
        Filter::None => (r, g, b),
        Filter::Grayscale => {
            let y = 0.2126 * r + 0.7152 * g + 0.0722 * b;
            (y, y, y)
        }
        Filter::Sepia => (
            0.393 * r + 0.769 * g + 0.189 * b,
            0.349 * r + 0.686 * g + 0.168 * b,
            0.272 * r + 0.534 * g + 0.131 * b,
        ),
        Filter::Brightness => (
            r * BRIGHTNESS_FACTOR,
            g * BRIGHTNESS_FACTOR,
            b * BRIGHTNESS_FACTOR,
        ),
        Filter::Contrast => {
            let c = |v: f32| (v - 0.5) * CONTRAST_FACTOR + 0.5;
            (c(r), c(g), c(b))
        }
        Filter::Invert => (1.0 - r, 1.0 - g, 1.0 - b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(pixel: [u8; 4], filter: Filter) -> [u8; 4] {
        let mut px = pixel;
        apply_filter(&mut px, filter);
        px
    }

    #[test]
    fn test_none_is_identity() {
        let mut pixels: Vec<u8> = (0..=255u8).collect();
        let original = pixels.clone();
        apply_filter(&mut pixels, Filter::None);
        assert_eq!(pixels, original);
    }

    #[test]
    fn test_grayscale_equalizes_channels() {
        let out = apply([200, 40, 90, 255], Filter::Grayscale);
        assert_eq!(out[0], out[1]);
        assert_eq!(out[1], out[2]);
        assert_eq!(out[3], 255);
        // 0.2126*200 + 0.7152*40 + 0.0722*90 = 77.6
        assert_eq!(out[0], 78);
    }

    #[test]
    fn test_sepia_white_is_clipped_warm() {
        let out = apply([255, 255, 255, 255], Filter::Sepia);
        assert_eq!(out[0], 255);
        assert_eq!(out[1], 255);
        // 0.272 + 0.534 + 0.131 = 0.937
        assert_eq!(out[2], 239);
    }

    #[test]
    fn test_brightness_scales_and_clips() {
        assert_eq!(apply([100, 20, 200, 128], Filter::Brightness), [150, 30, 255, 128]);
    }

    #[test]
    fn test_contrast_spreads_from_midpoint() {
        let out = apply([64, 128, 192, 255], Filter::Contrast);
        assert!(out[0] < 64);
        assert!((out[1] as i32 - 128).abs() <= 1);
        assert!(out[2] > 192);
    }

    #[test]
    fn test_invert() {
        assert_eq!(apply([0, 128, 255, 77], Filter::Invert), [255, 127, 0, 77]);
    }

    #[test]
    fn test_alpha_untouched_by_every_filter() {
        for filter in [
            Filter::Grayscale,
            Filter::Sepia,
            Filter::Brightness,
            Filter::Contrast,
            Filter::Invert,
        ] {
            assert_eq!(apply([10, 20, 30, 42], filter)[3], 42, "{:?}", filter);
        }
    }
}
