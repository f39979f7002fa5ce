//! The compositor: `(source image, style, canvas) -> RasterResult`.
//!
//! ## Layer Order (back to front)
//! 1. Backdrop gradient over the whole canvas
//! 2. Placement of the image inside its `size_percent` frame
//! 3. Horizontal/vertical flip of the placed image
//! 4. Rounded-corner clip of the image
//! 5. Drop shadow behind the rounded image
//! 6. Color filter on the image pixels
//!
//! The shadow and the image are both clipped to the frame. Rendering is a
//! pure function: nothing outside the arguments participates, so identical
//! inputs give byte-identical rasters.

mod backdrop;
mod filter;
mod placement;
mod raster;
mod shadow;
mod shape;

pub use backdrop::{gradient_position, paint_backdrop};
pub use filter::{apply_filter, filter_pixel};
pub use placement::{PixelRect, Placement};
pub use raster::RasterResult;
pub use shadow::{blur_extent, blur_mask, sigma_for_blur};
pub use shape::RoundedRect;

use image::imageops::{self, FilterType};
use image::RgbaImage;
use serde::{Deserialize, Serialize};

use crate::decode::SourceImage;
use crate::style::StyleState;

/// Default canvas width, used until the host reports its container width.
pub const DEFAULT_CANVAS_WIDTH: u32 = 800;
/// Fixed reference height of the compositing area.
pub const DEFAULT_CANVAS_HEIGHT: u32 = 600;
/// Inset of the placement area inside the backdrop (2rem at 16px).
pub const DEFAULT_CANVAS_PADDING: u32 = 32;

/// Opacity of the drop shadow.
const SHADOW_ALPHA: f32 = 0.5;

/// Dimensions of the output surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasConfig {
    width: u32,
    height: u32,
    padding: u32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_CANVAS_WIDTH,
            height: DEFAULT_CANVAS_HEIGHT,
            padding: DEFAULT_CANVAS_PADDING,
        }
    }
}

impl CanvasConfig {
    /// A canvas of `width` x `height` pixels with no padding. Zero sizes become 1.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
            padding: 0,
        }
    }

    /// A canvas at the fixed reference height, as wide as the display container.
    pub fn for_container_width(width: u32) -> Self {
        Self::new(width, DEFAULT_CANVAS_HEIGHT).with_padding(DEFAULT_CANVAS_PADDING)
    }

    /// Set the padding, reduced so the placement area keeps at least one pixel.
    pub fn with_padding(mut self, padding: u32) -> Self {
        let max_padding = (self.width.min(self.height) - 1) / 2;
        self.padding = padding.min(max_padding);
        self
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn padding(&self) -> u32 {
        self.padding
    }

    /// The whole canvas as a rectangle.
    pub fn bounds(&self) -> PixelRect {
        PixelRect::new(0, 0, self.width, self.height)
    }

    /// The backdrop inset by the padding; the frame is sized relative to this.
    pub fn placement_area(&self) -> PixelRect {
        PixelRect::new(
            i64::from(self.padding),
            i64::from(self.padding),
            self.width.saturating_sub(2 * self.padding).max(1),
            self.height.saturating_sub(2 * self.padding).max(1),
        )
    }
}

/// Composite `source` on a styled backdrop.
///
/// A missing source yields the backdrop alone; this never fails.
pub fn render(
    source: Option<&SourceImage>,
    style: &StyleState,
    canvas: &CanvasConfig,
) -> RasterResult {
    let (width, height) = (canvas.width(), canvas.height());
    let mut pixels = paint_backdrop(style.gradient(), width, height);

    if let Some(source) = source {
        composite_image(&mut pixels, source, style, canvas);
    }

    log::debug!(
        "rendered {}x{} frame (source: {}, size: {}%, shadow: {}, radius: {}, filter: {})",
        width,
        height,
        source.is_some(),
        style.size_percent(),
        style.shadow_blur(),
        style.corner_radius(),
        style.filter()
    );

    RasterResult::new(width, height, pixels)
}

/// One axis of the source region that covers a window of the scaled image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct AxisWindow {
    src_start: u32,
    src_len: u32,
    /// Length of the source region once scaled.
    scaled_len: u32,
    /// Where the window starts inside the scaled region.
    offset: u32,
}

/// Map the window `[start, start + len)` of an axis scaled from `src` to
/// `full` pixels back to a source span, padded so the resampling filter sees
/// the same neighbors it would on the whole image.
fn axis_window(start: u32, len: u32, full: u32, src: u32) -> AxisWindow {
    if start == 0 && len == full {
        return AxisWindow {
            src_start: 0,
            src_len: src,
            scaled_len: full,
            offset: 0,
        };
    }

    let scale = f64::from(src) / f64::from(full);
    let pad = scale.ceil().max(1.0);
    let s0 = ((f64::from(start) * scale).floor() - pad).max(0.0);
    let s1 = ((f64::from(start + len) * scale).ceil() + pad).min(f64::from(src));
    let d0 = ((s0 / scale).round() as u32).min(start);
    let d1 = ((s1 / scale).round() as u32).max(start + len).min(full);

    AxisWindow {
        src_start: s0 as u32,
        src_len: (s1 - s0) as u32,
        scaled_len: d1 - d0,
        offset: start - d0,
    }
}

/// Scale, flip and filter the part of the source that lands on `visible`.
///
/// `image` is where the whole scaled source sits on the canvas and `visible`
/// the sub-rectangle of it that is actually drawn. Only the source pixels
/// behind `visible` are resampled, so a huge `image` costs no more than the
/// canvas it is clipped to. The returned layer is `visible`-sized.
pub fn prepare_image_layer(
    source: &SourceImage,
    style: &StyleState,
    image: &PixelRect,
    visible: &PixelRect,
) -> RgbaImage {
    let visible = visible.intersect(image);
    if visible.is_empty() {
        return RgbaImage::new(0, 0);
    }

    let left = (visible.x - image.x) as u32;
    let top = (visible.y - image.y) as u32;
    // Flips mirror which part of the unflipped image ends up visible.
    let ux = if style.flip_horizontal() {
        image.width - left - visible.width
    } else {
        left
    };
    let uy = if style.flip_vertical() {
        image.height - top - visible.height
    } else {
        top
    };

    let src = source.as_rgba_image();
    let wx = axis_window(ux, visible.width, image.width, src.width());
    let wy = axis_window(uy, visible.height, image.height, src.height());

    let region = imageops::crop_imm(src, wx.src_start, wy.src_start, wx.src_len, wy.src_len)
        .to_image();
    let scaled = if region.dimensions() == (wx.scaled_len, wy.scaled_len) {
        region
    } else {
        imageops::resize(&region, wx.scaled_len, wy.scaled_len, FilterType::Triangle)
    };
    let mut layer = if scaled.dimensions() == (visible.width, visible.height) {
        scaled
    } else {
        imageops::crop_imm(&scaled, wx.offset, wy.offset, visible.width, visible.height).to_image()
    };

    if style.flip_horizontal() {
        imageops::flip_horizontal_in_place(&mut layer);
    }
    if style.flip_vertical() {
        imageops::flip_vertical_in_place(&mut layer);
    }

    apply_filter(&mut layer, style.filter());
    layer
}

fn composite_image(
    canvas_pixels: &mut [u8],
    source: &SourceImage,
    style: &StyleState,
    canvas: &CanvasConfig,
) {
    let placement =
        Placement::compute(canvas, source.width(), source.height(), style.size_percent());
    let clip = placement.frame.intersect(&canvas.bounds());
    if clip.is_empty() {
        return;
    }

    let shape = RoundedRect::new(&placement.image, style.corner_radius());
    let stride = canvas.width() as usize;

    if style.shadow_blur() > 0 {
        paint_shadow(
            canvas_pixels,
            stride,
            &placement.image,
            &shape,
            &clip,
            style.shadow_blur(),
        );
    }

    let visible = placement.image.intersect(&clip);
    if visible.is_empty() {
        return;
    }
    let layer = prepare_image_layer(source, style, &placement.image, &visible);

    for y in visible.y..visible.bottom() {
        for x in visible.x..visible.right() {
            let coverage = shape.coverage(x, y);
            if coverage <= 0.0 {
                continue;
            }
            let lx = (x - visible.x) as u32;
            let ly = (y - visible.y) as u32;
            let src = layer.get_pixel(lx, ly).0;
            let alpha = coverage * (src[3] as f32 / 255.0);

            let idx = (y as usize * stride + x as usize) * 4;
            blend_over(&mut canvas_pixels[idx..idx + 4], [src[0], src[1], src[2]], alpha);
        }
    }
}

/// Darken the canvas around `shape` inside `clip`.
///
/// The blurred mask only covers `clip` plus the blur reach, which is all the
/// blur can carry into `clip`; the rest of a large image is never rasterized.
fn paint_shadow(
    canvas_pixels: &mut [u8],
    stride: usize,
    image_rect: &PixelRect,
    shape: &RoundedRect,
    clip: &PixelRect,
    blur: u32,
) {
    let extent = blur_extent(blur);
    let region = clip.inflate(extent).intersect(&image_rect.inflate(extent));
    if region.is_empty() {
        return;
    }
    let (rw, rh) = (region.width, region.height);

    let mut mask = vec![0.0f32; (rw as usize) * (rh as usize)];
    for ry in 0..rh {
        for rx in 0..rw {
            mask[(ry * rw + rx) as usize] =
                shape.coverage(region.x + i64::from(rx), region.y + i64::from(ry));
        }
    }
    blur_mask(&mut mask, rw, rh, sigma_for_blur(blur));

    let visible = region.intersect(clip);
    for y in visible.y..visible.bottom() {
        for x in visible.x..visible.right() {
            // The shadow only shows outside the shape it is cast by.
            let outside = 1.0 - shape.coverage(x, y);
            if outside <= 0.0 {
                continue;
            }
            let m = mask[((y - region.y) as usize) * rw as usize + (x - region.x) as usize];
            let alpha = SHADOW_ALPHA * m * outside;
            if alpha <= 0.0 {
                continue;
            }
            let idx = (y as usize * stride + x as usize) * 4;
            blend_over(&mut canvas_pixels[idx..idx + 4], [0, 0, 0], alpha);
        }
    }
}

/// Source-over blend of an RGB color at `alpha` onto an opaque RGBA pixel.
#[inline]
fn blend_over(dst: &mut [u8], src: [u8; 3], alpha: f32) {
    let alpha = alpha.clamp(0.0, 1.0);
    for c in 0..3 {
        let d = dst[c] as f32;
        let s = src[c] as f32;
        dst[c] = (s * alpha + d * (1.0 - alpha)).round().clamp(0.0, 255.0) as u8;
    }
    dst[3] = 255;
}
