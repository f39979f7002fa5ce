//! Shotframe Core - Screenshot framing library
//!
//! This crate turns an uploaded screenshot and a style description into a
//! framed composite: gradient backdrop, rounded corners, drop shadow, color
//! filter and flips. It also encodes the result and delivers it through
//! file and clipboard sinks.

pub mod compose;
pub mod decode;
pub mod encode;
pub mod export;
pub mod session;
pub mod style;

pub use compose::{render, CanvasConfig, RasterResult};
pub use decode::{DecodeError, SourceImage};
pub use encode::EncodeError;
pub use export::{ClipboardSink, ExportError, ExportOutcome, FileSink};
pub use session::Session;
pub use style::{ColorToken, ExportFormat, Filter, GradientKind, StyleState};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_style_renders_backdrop_only() {
        let style = StyleState::default();
        let canvas = CanvasConfig::default();
        let raster = render(None, &style, &canvas);

        assert_eq!(raster.width(), 800);
        assert_eq!(raster.height(), 600);
        assert!(raster.pixels().chunks_exact(4).all(|px| px[3] == 255));
    }

    #[test]
    fn test_session_download_round_trip() {
        let mut session = Session::with_canvas(CanvasConfig::new(120, 90));
        let source = SourceImage::from_rgba(30, 20, vec![90u8; 30 * 20 * 4]).unwrap();
        session.set_image(source);
        session.set_corner_radius(8);
        session.set_shadow_blur(12);

        let mut sink = export::MemorySink::new();
        let outcome = session.download(&mut sink).unwrap();
        assert!(matches!(outcome, ExportOutcome::Delivered { mime: "image/png", .. }));

        let bytes = &sink.last().unwrap().bytes;
        let decoded = image::load_from_memory(bytes).unwrap();
        assert_eq!(decoded.width(), 120);
        assert_eq!(decoded.height(), 90);
    }
}
