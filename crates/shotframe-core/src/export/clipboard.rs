//! Operating-system clipboard sink backed by `arboard`.

use std::borrow::Cow;

use super::{ClipboardSink, SinkError};

/// Places copied images on the system clipboard.
///
/// `arboard` takes raw RGBA pixels, so the PNG entry is decoded first.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl SystemClipboard {
    pub fn new() -> Self {
        Self
    }
}

impl ClipboardSink for SystemClipboard {
    fn write_image(&mut self, bytes: &[u8], mime: &str) -> Result<(), SinkError> {
        if mime != "image/png" {
            return Err(SinkError::UnsupportedMime(mime.to_string()));
        }

        let rgba = image::load_from_memory_with_format(bytes, image::ImageFormat::Png)
            .map_err(|e| SinkError::Failed(e.to_string()))?
            .into_rgba8();

        let mut clipboard = arboard::Clipboard::new()
            .map_err(|e| SinkError::Unavailable(format!("Clipboard ({})", e)))?;
        let data = arboard::ImageData {
            width: rgba.width() as usize,
            height: rgba.height() as usize,
            bytes: Cow::Borrowed(rgba.as_raw()),
        };
        clipboard
            .set_image(data)
            .map_err(|e| SinkError::Failed(e.to_string()))
    }
}
