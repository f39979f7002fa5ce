//! The `JsSession` class.
//!
//! Wraps a core [`Session`]. Setters take the same raw values the page's
//! controls produce (slider numbers, select option strings); numbers are
//! clamped, unknown option strings are rejected.

use serde::Deserialize;
use shotframe_core::compose::{CanvasConfig, DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_PADDING};
use shotframe_core::export::ExportOutcome;
use shotframe_core::style::{ColorToken, ExportFormat, Filter, GradientKind};
use shotframe_core::{Session, StyleState};
use wasm_bindgen::prelude::*;

use crate::clipboard::CallbackClipboard;
use crate::console_warn;
use crate::types::{JsDownload, JsRaster};

/// Canvas options passed from TypeScript as a plain object.
///
/// Only `width` is required; the rest fall back to the reference layout.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CanvasOptions {
    width: u32,
    #[serde(default = "default_height")]
    height: u32,
    #[serde(default = "default_padding")]
    padding: u32,
}

fn default_height() -> u32 {
    DEFAULT_CANVAS_HEIGHT
}

fn default_padding() -> u32 {
    DEFAULT_CANVAS_PADDING
}

impl From<CanvasOptions> for CanvasConfig {
    fn from(options: CanvasOptions) -> Self {
        CanvasConfig::new(options.width, options.height).with_padding(options.padding)
    }
}

fn parse<T: std::str::FromStr>(value: &str) -> Result<T, String>
where
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|e: T::Err| e.to_string())
}

#[wasm_bindgen]
pub struct JsSession {
    inner: Session,
}

#[wasm_bindgen]
impl JsSession {
    /// Create a session for a display container `container_width` pixels wide.
    #[wasm_bindgen(constructor)]
    pub fn new(container_width: u32) -> Self {
        Self {
            inner: Session::with_canvas(CanvasConfig::for_container_width(container_width)),
        }
    }

    /// Call when the display container is resized.
    #[wasm_bindgen(js_name = setContainerWidth)]
    pub fn set_container_width(&mut self, width: u32) {
        self.inner.resize_canvas(CanvasConfig::for_container_width(width));
    }

    /// Set the canvas from `{ width, height?, padding? }`.
    #[wasm_bindgen(js_name = setCanvas)]
    pub fn set_canvas(&mut self, options: JsValue) -> Result<(), JsValue> {
        let options: CanvasOptions = serde_wasm_bindgen::from_value(options)
            .map_err(|e| JsValue::from_str(&format!("Invalid canvas options: {}", e)))?;
        self.inner.resize_canvas(options.into());
        Ok(())
    }

    /// Decode and load an image file. The previous image stays loaded on error.
    #[wasm_bindgen(js_name = loadImage)]
    pub fn load_image(&mut self, bytes: &[u8]) -> Result<(), JsValue> {
        self.inner.load_image(bytes).map_err(|e| {
            let message = format!("Could not load image: {}", e);
            console_warn(&message);
            JsValue::from_str(&message)
        })
    }

    #[wasm_bindgen(js_name = clearImage)]
    pub fn clear_image(&mut self) {
        self.inner.clear_image();
    }

    #[wasm_bindgen(getter, js_name = hasImage)]
    pub fn has_image(&self) -> bool {
        self.inner.has_image()
    }

    /// Increments on every change that affects the preview.
    #[wasm_bindgen(getter)]
    pub fn revision(&self) -> f64 {
        self.inner.revision() as f64
    }

    /// The current style as a plain object.
    pub fn style(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.inner.style())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Replace the style from a plain object. Missing fields take defaults.
    #[wasm_bindgen(js_name = setStyle)]
    pub fn set_style(&mut self, style: JsValue) -> Result<(), JsValue> {
        let style: StyleState = serde_wasm_bindgen::from_value(style)
            .map_err(|e| JsValue::from_str(&format!("Invalid style: {}", e)))?;
        self.inner.set_style(style);
        Ok(())
    }

    /// `"linear"`, `"radial"` or `"angular"`.
    #[wasm_bindgen(js_name = setGradientKind)]
    pub fn set_gradient_kind(&mut self, kind: &str) -> Result<(), JsValue> {
        let kind: GradientKind = parse(kind).map_err(|e| JsValue::from_str(&e))?;
        self.inner.set_gradient_kind(kind);
        Ok(())
    }

    /// Colors as `#rrggbb`, `#rgb` or `hsl(h, s%, l%)`.
    #[wasm_bindgen(js_name = setGradientColors)]
    pub fn set_gradient_colors(&mut self, color_a: &str, color_b: &str) -> Result<(), JsValue> {
        let a: ColorToken = parse(color_a).map_err(|e| JsValue::from_str(&e))?;
        let b: ColorToken = parse(color_b).map_err(|e| JsValue::from_str(&e))?;
        self.inner.set_gradient_colors(a, b);
        Ok(())
    }

    #[wasm_bindgen(js_name = setSize)]
    pub fn set_size(&mut self, percent: f64) {
        self.inner.set_size_percent(percent.round() as i64);
    }

    #[wasm_bindgen(js_name = setShadow)]
    pub fn set_shadow(&mut self, blur: f64) {
        self.inner.set_shadow_blur(blur.round() as i64);
    }

    #[wasm_bindgen(js_name = setRoundness)]
    pub fn set_roundness(&mut self, radius: f64) {
        self.inner.set_corner_radius(radius.round() as i64);
    }

    /// `"none"`, `"grayscale"`, `"sepia"`, `"brightness"`, `"contrast"` or `"invert"`.
    #[wasm_bindgen(js_name = setFilter)]
    pub fn set_filter(&mut self, filter: &str) -> Result<(), JsValue> {
        let filter: Filter = parse(filter).map_err(|e| JsValue::from_str(&e))?;
        self.inner.set_filter(filter);
        Ok(())
    }

    #[wasm_bindgen(js_name = flipHorizontal)]
    pub fn flip_horizontal(&mut self) {
        self.inner.toggle_flip_horizontal();
    }

    #[wasm_bindgen(js_name = flipVertical)]
    pub fn flip_vertical(&mut self) {
        self.inner.toggle_flip_vertical();
    }

    /// `"png"` or `"jpeg"`.
    #[wasm_bindgen(js_name = setExportFormat)]
    pub fn set_export_format(&mut self, format: &str) -> Result<(), JsValue> {
        let format: ExportFormat = parse(format).map_err(|e| JsValue::from_str(&e))?;
        self.inner.set_export_format(format);
        Ok(())
    }

    /// Pick two new random backdrop colors; the gradient kind is kept.
    pub fn randomize(&mut self) {
        self.inner.randomize();
    }

    /// The current frame. Re-rendered only if something changed.
    pub fn preview(&mut self) -> JsRaster {
        JsRaster::from(self.inner.preview())
    }

    /// RGBA bytes of the current frame.
    #[wasm_bindgen(js_name = previewPixels)]
    pub fn preview_pixels(&mut self) -> Vec<u8> {
        self.inner.preview().pixels().to_vec()
    }

    /// Encode the frame in the export format. `undefined` when no image is loaded.
    pub fn download(&self) -> Result<Option<JsDownload>, JsValue> {
        match self.inner.prepare_download() {
            Ok(download) => Ok(download.map(JsDownload::from)),
            Err(e) => {
                let message = format!("Export failed. {}", e);
                console_warn(&message);
                Err(JsValue::from_str(&message))
            }
        }
    }

    /// Encode the frame as PNG and pass it to `callback(bytes, mime)`.
    ///
    /// Returns `false` when no image is loaded and the callback was not called.
    pub fn copy(&self, callback: js_sys::Function) -> Result<bool, JsValue> {
        let mut sink = CallbackClipboard::new(callback);
        match self.inner.copy(&mut sink) {
            Ok(ExportOutcome::Delivered { .. }) => Ok(true),
            Ok(ExportOutcome::NothingToExport) => Ok(false),
            Err(e) => {
                let message = e.notification();
                console_warn(&message);
                Err(JsValue::from_str(&message))
            }
        }
    }
}

impl JsSession {
    /// The wrapped core session.
    pub fn session(&self) -> &Session {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_container_width() {
        let session = JsSession::new(640);
        let canvas = session.session().canvas();
        assert_eq!(canvas.width(), 640);
        assert_eq!(canvas.height(), DEFAULT_CANVAS_HEIGHT);
    }

    #[test]
    fn test_slider_values_are_rounded_and_clamped() {
        let mut session = JsSession::new(400);
        session.set_size(54.6);
        session.set_shadow(250.0);
        session.set_roundness(-3.0);

        let style = session.session().style();
        assert_eq!(style.size_percent(), 55);
        assert_eq!(style.shadow_blur(), 100);
        assert_eq!(style.corner_radius(), 0);
    }

    #[test]
    fn test_flips_toggle() {
        let mut session = JsSession::new(400);
        session.flip_horizontal();
        session.flip_vertical();
        session.flip_vertical();

        let style = session.session().style();
        assert!(style.flip_horizontal());
        assert!(!style.flip_vertical());
    }

    #[test]
    fn test_preview_matches_canvas() {
        let mut session = JsSession::new(300);
        let preview = session.preview();
        assert_eq!(preview.width(), 300);
        assert_eq!(preview.height(), DEFAULT_CANVAS_HEIGHT);
        assert_eq!(session.preview_pixels().len(), 300 * 600 * 4);
    }

    #[test]
    fn test_revision_advances() {
        let mut session = JsSession::new(300);
        let before = session.revision();
        session.randomize();
        assert!(session.revision() > before);
    }

    #[test]
    fn test_container_resize() {
        let mut session = JsSession::new(300);
        session.set_container_width(500);
        assert_eq!(session.session().canvas().width(), 500);
    }

    #[test]
    fn test_parse_helpers() {
        assert_eq!(parse::<Filter>("sepia"), Ok(Filter::Sepia));
        assert_eq!(parse::<ExportFormat>("jpg"), Ok(ExportFormat::Jpeg));
        assert!(parse::<GradientKind>("conic").is_err());
        assert!(parse::<ColorToken>("#69c4cf").is_ok());
    }

    #[test]
    fn test_canvas_options_defaults() {
        let options = CanvasOptions {
            width: 1000,
            height: default_height(),
            padding: default_padding(),
        };
        let canvas = CanvasConfig::from(options);
        assert_eq!(canvas.width(), 1000);
        assert_eq!(canvas.height(), DEFAULT_CANVAS_HEIGHT);
        assert_eq!(canvas.padding(), DEFAULT_CANVAS_PADDING);
    }

    #[test]
    fn test_download_without_image_is_none() {
        let session = JsSession::new(300);
        assert!(session.session().prepare_download().unwrap().is_none());
    }
}
