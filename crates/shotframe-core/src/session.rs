//! An editing session: the loaded image, the current style and the preview.
//!
//! The session is the single writer of [`StyleState`]. Every mutation bumps
//! a revision counter and marks the preview dirty; [`Session::preview`]
//! re-renders only when something changed since the last read. Exports
//! always render afresh and never touch the cached preview.

use crate::compose::{render, CanvasConfig, RasterResult};
use crate::decode::{DecodeError, SourceImage};
use crate::encode::EncodeError;
use crate::export::{self, ClipboardSink, Download, ExportError, ExportOutcome, FileSink};
use crate::style::{ColorToken, ExportFormat, Filter, GradientKind, StyleState};

#[derive(Debug, Default)]
pub struct Session {
    source: Option<SourceImage>,
    style: StyleState,
    canvas: CanvasConfig,
    preview: Option<RasterResult>,
    revision: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_canvas(canvas: CanvasConfig) -> Self {
        Self {
            canvas,
            ..Self::default()
        }
    }

    fn invalidate(&mut self) {
        self.preview = None;
        self.revision = self.revision.wrapping_add(1);
    }

    /// Incremented on every change that can affect the rendered frame.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// True when the next [`Session::preview`] call will re-render.
    pub fn is_dirty(&self) -> bool {
        self.preview.is_none()
    }

    pub fn source(&self) -> Option<&SourceImage> {
        self.source.as_ref()
    }

    pub fn has_image(&self) -> bool {
        self.source.is_some()
    }

    /// Replace the loaded image.
    pub fn set_image(&mut self, source: SourceImage) {
        self.source = Some(source);
        self.invalidate();
    }

    /// Decode `bytes` and load the result. On error the previous image stays loaded.
    pub fn load_image(&mut self, bytes: &[u8]) -> Result<(), DecodeError> {
        let source = SourceImage::decode(bytes)?;
        log::info!("loaded {}x{} image", source.width(), source.height());
        self.set_image(source);
        Ok(())
    }

    pub fn clear_image(&mut self) {
        if self.source.take().is_some() {
            self.invalidate();
        }
    }

    pub fn canvas(&self) -> &CanvasConfig {
        &self.canvas
    }

    /// Change the output surface, e.g. when the display container is resized.
    pub fn resize_canvas(&mut self, canvas: CanvasConfig) {
        if canvas != self.canvas {
            self.canvas = canvas;
            self.invalidate();
        }
    }

    pub fn style(&self) -> &StyleState {
        &self.style
    }

    /// Replace the whole style. Values are clamped on the way in.
    pub fn set_style(&mut self, style: StyleState) {
        let style = style.clamped();
        if style != self.style {
            self.style = style;
            self.invalidate();
        }
    }

    /// Apply `edit` to a copy of the style and swap the copy in.
    pub fn update<F: FnOnce(&mut StyleState)>(&mut self, edit: F) {
        let mut next = self.style.clone();
        edit(&mut next);
        self.set_style(next);
    }

    pub fn set_gradient_kind(&mut self, kind: GradientKind) {
        self.update(|s| s.set_gradient_kind(kind));
    }

    pub fn set_gradient_colors(&mut self, color_a: ColorToken, color_b: ColorToken) {
        self.update(|s| s.set_gradient_colors(color_a, color_b));
    }

    pub fn set_size_percent(&mut self, value: i64) {
        self.update(|s| s.set_size_percent(value));
    }

    pub fn set_shadow_blur(&mut self, value: i64) {
        self.update(|s| s.set_shadow_blur(value));
    }

    pub fn set_corner_radius(&mut self, value: i64) {
        self.update(|s| s.set_corner_radius(value));
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.update(|s| s.set_filter(filter));
    }

    pub fn toggle_flip_horizontal(&mut self) {
        self.update(StyleState::toggle_flip_horizontal);
    }

    pub fn toggle_flip_vertical(&mut self) {
        self.update(StyleState::toggle_flip_vertical);
    }

    /// Changing the export format does not alter the preview, so it keeps the cache.
    pub fn set_export_format(&mut self, format: ExportFormat) {
        self.style.set_export_format(format);
    }

    pub fn randomize(&mut self) {
        self.update(StyleState::randomize);
    }

    /// The current frame, re-rendered if anything changed since the last call.
    pub fn preview(&mut self) -> &RasterResult {
        let preview = self.preview.take().unwrap_or_else(|| {
            log::debug!("recomputing preview (revision {})", self.revision);
            render(self.source.as_ref(), &self.style, &self.canvas)
        });
        self.preview.insert(preview)
    }

    /// Encode the current frame for download without delivering it.
    pub fn prepare_download(&self) -> Result<Option<Download>, EncodeError> {
        export::prepare_download(self.source.as_ref(), &self.style, &self.canvas)
    }

    /// Deliver `image.<format>` to `sink`.
    pub fn download<S: FileSink + ?Sized>(
        &self,
        sink: &mut S,
    ) -> Result<ExportOutcome, ExportError> {
        export::download(self.source.as_ref(), &self.style, &self.canvas, sink)
    }

    /// Place the current frame on `sink` as PNG.
    pub fn copy<S: ClipboardSink + ?Sized>(
        &self,
        sink: &mut S,
    ) -> Result<ExportOutcome, ExportError> {
        export::copy_to_clipboard(self.source.as_ref(), &self.style, &self.canvas, sink)
    }
}
