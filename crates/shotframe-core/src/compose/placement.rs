//! Where the image frame and the image land on the canvas.
//!
//! The frame is `size_percent`% of the placement area in both dimensions and
//! centered in it. The image is scaled so its width equals the frame width,
//! keeps its natural aspect ratio, and is centered in the frame. The frame
//! clips whatever of the image falls outside it.

use super::CanvasConfig;

/// An axis-aligned rectangle in whole output pixels. May extend past the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub fn new(x: i64, y: i64, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Snap a fractional rectangle to pixel edges by rounding each edge.
    fn snapped(x: f64, y: f64, width: f64, height: f64) -> Self {
        let left = x.round() as i64;
        let top = y.round() as i64;
        let right = (x + width).round() as i64;
        let bottom = (y + height).round() as i64;
        Self::new(
            left,
            top,
            (right - left).max(1) as u32,
            (bottom - top).max(1) as u32,
        )
    }

    pub fn right(&self) -> i64 {
        self.x + i64::from(self.width)
    }

    pub fn bottom(&self) -> i64 {
        self.y + i64::from(self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Overlap of two rectangles; empty when they do not intersect.
    pub fn intersect(&self, other: &PixelRect) -> PixelRect {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right <= left || bottom <= top {
            return PixelRect::new(left, top, 0, 0);
        }
        PixelRect::new(left, top, (right - left) as u32, (bottom - top) as u32)
    }

    /// Grow by `margin` pixels on every side.
    pub fn inflate(&self, margin: u32) -> PixelRect {
        let m = i64::from(margin);
        PixelRect::new(
            self.x - m,
            self.y - m,
            self.width.saturating_add(margin.saturating_mul(2)),
            self.height.saturating_add(margin.saturating_mul(2)),
        )
    }
}

/// Result of laying out an image of a given size on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Clipping box sized by `size_percent`.
    pub frame: PixelRect,
    /// The scaled image, centered on the frame.
    pub image: PixelRect,
}

impl Placement {
    /// Lay out an image of `source_width` x `source_height` pixels.
    pub fn compute(
        canvas: &CanvasConfig,
        source_width: u32,
        source_height: u32,
        size_percent: u32,
    ) -> Self {
        let area = canvas.placement_area();
        let scale = f64::from(size_percent) / 100.0;

        let area_x = area.x as f64;
        let area_y = area.y as f64;
        let area_w = f64::from(area.width);
        let area_h = f64::from(area.height);

        let frame_w = area_w * scale;
        let frame_h = area_h * scale;
        let frame = PixelRect::snapped(
            area_x + (area_w - frame_w) / 2.0,
            area_y + (area_h - frame_h) / 2.0,
            frame_w,
            frame_h,
        );

        let aspect = f64::from(source_height.max(1)) / f64::from(source_width.max(1));
        let image_w = frame.width;
        let image_h = ((f64::from(image_w) * aspect).round() as u32).max(1);
        let center_y = frame.y as f64 + f64::from(frame.height) / 2.0;
        let image = PixelRect::new(
            frame.x,
            (center_y - f64::from(image_h) / 2.0).round() as i64,
            image_w,
            image_h,
        );

        Self { frame, image }
    }
}
