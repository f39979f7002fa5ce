//! Rounded-rectangle coverage.

use super::placement::PixelRect;

/// A rounded rectangle in output pixel space.
///
/// Radii larger than half of the shorter side are reduced so the corners
/// never overlap, matching how CSS resolves `border-radius`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundedRect {
    center_x: f32,
    center_y: f32,
    half_w: f32,
    half_h: f32,
    radius: f32,
}

impl RoundedRect {
    pub fn new(rect: &PixelRect, radius: u32) -> Self {
        let half_w = rect.width as f32 / 2.0;
        let half_h = rect.height as f32 / 2.0;
        Self {
            center_x: rect.x as f32 + half_w,
            center_y: rect.y as f32 + half_h,
            half_w,
            half_h,
            radius: (radius as f32).min(half_w).min(half_h),
        }
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Signed distance from `(x, y)` to the outline; negative inside.
    #[inline]
    pub fn signed_distance(&self, x: f32, y: f32) -> f32 {
        let qx = (x - self.center_x).abs() - (self.half_w - self.radius);
        let qy = (y - self.center_y).abs() - (self.half_h - self.radius);
        let outside = (qx.max(0.0).powi(2) + qy.max(0.0).powi(2)).sqrt();
        let inside = qx.max(qy).min(0.0);
        outside + inside - self.radius
    }

    /// Fraction of the pixel at `(px, py)` covered by the shape, from 0.0 to 1.0.
    ///
    /// Approximated from the signed distance at the pixel center, which gives
    /// a one-pixel anti-aliased edge.
    #[inline]
    pub fn coverage(&self, px: i64, py: i64) -> f32 {
        let d = self.signed_distance(px as f32 + 0.5, py as f32 + 0.5);
        (0.5 - d).clamp(0.0, 1.0)
    }
}
