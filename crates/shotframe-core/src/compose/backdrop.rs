//! Backdrop gradients.
//!
//! Each gradient kind maps a pixel center to a position `t` in 0.0..=1.0
//! along the gradient; the color is a straight sRGB interpolation between
//! `color_a` (t = 0) and `color_b` (t = 1).
//!
//! - **Linear**: corner to corner, "to bottom right". The 50% line runs
//!   through the top-right and bottom-left corners, which reduces to
//!   `t = (x / w + y / h) / 2`.
//! - **Radial**: centered ellipse sized to the farthest corner, so the radii
//!   are `w/2 * sqrt(2)` and `h/2 * sqrt(2)`.
//! - **Angular**: a vertical linear gradient, top to bottom.

use std::f32::consts::SQRT_2;

use crate::style::{Gradient, GradientKind, Rgb};

/// Gradient position of the pixel center `(u, v)` on a `width` x `height` canvas.
#[inline]
pub fn gradient_position(kind: GradientKind, u: f32, v: f32, width: f32, height: f32) -> f32 {
    let t = match kind {
        GradientKind::Linear => 0.5 * (u / width + v / height),
        GradientKind::Radial => {
            let dx = (u - width / 2.0) / (width / 2.0 * SQRT_2);
            let dy = (v - height / 2.0) / (height / 2.0 * SQRT_2);
            (dx * dx + dy * dy).sqrt()
        }
        GradientKind::Angular => v / height,
    };
    t.clamp(0.0, 1.0)
}

#[inline]
fn mix(a: Rgb, b: Rgb, t: f32) -> [u8; 4] {
    let lerp = |x: u8, y: u8| {
        let x = x as f32;
        let y = y as f32;
        (x + (y - x) * t).round().clamp(0.0, 255.0) as u8
    };
    [lerp(a.r, b.r), lerp(a.g, b.g), lerp(a.b, b.b), 255]
}

/// Paint the backdrop into a fresh opaque RGBA buffer.
pub fn paint_backdrop(gradient: &Gradient, width: u32, height: u32) -> Vec<u8> {
    let a = gradient.color_a.to_rgb();
    let b = gradient.color_b.to_rgb();
    let (w, h) = (width as f32, height as f32);

    let mut pixels = vec![0u8; (width as usize) * (height as usize) * 4];
    for (idx, chunk) in pixels.chunks_exact_mut(4).enumerate() {
        let x = (idx % width as usize) as f32;
        let y = (idx / width as usize) as f32;
        let t = gradient_position(gradient.kind, x + 0.5, y + 0.5, w, h);
        chunk.copy_from_slice(&mix(a, b, t));
    }
    pixels
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::ColorToken;

    fn gradient(kind: GradientKind) -> Gradient {
        Gradient {
            kind,
            color_a: ColorToken::hex(0, 0, 0),
            color_b: ColorToken::hex(200, 100, 255),
        }
    }

    fn pixel(pixels: &[u8], width: u32, x: u32, y: u32) -> [u8; 4] {
        let idx = ((y * width + x) * 4) as usize;
        [pixels[idx], pixels[idx + 1], pixels[idx + 2], pixels[idx + 3]]
    }

    #[test]
    fn test_linear_corners() {
        let px = paint_backdrop(&gradient(GradientKind::Linear), 100, 60);

        let top_left = pixel(&px, 100, 0, 0);
        let bottom_right = pixel(&px, 100, 99, 59);
        assert!(top_left[0] <= 3, "top-left should be color A, got {:?}", top_left);
        assert!(bottom_right[0] >= 197, "bottom-right should be color B, got {:?}", bottom_right);

        // Off-diagonal corners sit on the 50% line.
        let top_right = pixel(&px, 100, 99, 0);
        let bottom_left = pixel(&px, 100, 0, 59);
        assert!((top_right[0] as i32 - 100).abs() <= 3);
        assert!((bottom_left[0] as i32 - 100).abs() <= 3);
    }

    #[test]
    fn test_radial_center_and_corner() {
        let px = paint_backdrop(&gradient(GradientKind::Radial), 101, 101);
        assert_eq!(pixel(&px, 101, 50, 50), [0, 0, 0, 255]);

        // Corner is at normalized distance just under 1.
        let corner = pixel(&px, 101, 0, 0);
        assert!(corner[0] > 190, "corner should approach color B, got {:?}", corner);
    }

    #[test]
    fn test_angular_is_vertical() {
        let px = paint_backdrop(&gradient(GradientKind::Angular), 50, 40);
        for y in [0, 20, 39] {
            let left = pixel(&px, 50, 0, y);
            let right = pixel(&px, 50, 49, y);
            assert_eq!(left, right, "row {} should be uniform", y);
        }
        assert!(pixel(&px, 50, 0, 0)[0] < pixel(&px, 50, 0, 39)[0]);
    }

    #[test]
    fn test_backdrop_is_opaque() {
        let px = paint_backdrop(&gradient(GradientKind::Radial), 17, 9);
        assert!(px.chunks_exact(4).all(|c| c[3] == 255));
    }

    #[test]
    fn test_gradient_position_is_clamped() {
        for kind in [GradientKind::Linear, GradientKind::Radial, GradientKind::Angular] {
            for (u, v) in [(-10.0, -10.0), (500.0, 500.0), (50.0, 50.0)] {
                let t = gradient_position(kind, u, v, 100.0, 100.0);
                assert!((0.0..=1.0).contains(&t));
            }
        }
    }
}
