//! Export and copy adapters.
//!
//! Both adapters render a fresh frame from the same inputs as the preview,
//! encode it, and hand the bytes to a sink:
//!
//! - **Download**: encoded in the style's export format, delivered as
//!   `image.<format>` to a [`FileSink`]
//! - **Copy**: always PNG, delivered as one `image/png` entry to a
//!   [`ClipboardSink`]
//!
//! Without a source image nothing is rendered or delivered and the adapters
//! return [`ExportOutcome::NothingToExport`]. Failures come back as
//! [`ExportError`]; they never affect the style or the loaded image.

#[cfg(feature = "system-clipboard")]
mod clipboard;
mod sink;

#[cfg(feature = "system-clipboard")]
pub use clipboard::SystemClipboard;
pub use sink::{ClipboardSink, Delivery, DirectorySink, FileSink, MemorySink, SinkError};

use thiserror::Error;

use crate::compose::{render, CanvasConfig};
use crate::decode::SourceImage;
use crate::encode::{self, EncodeError};
use crate::style::{ExportFormat, StyleState};

/// MIME type of every clipboard entry.
pub const CLIPBOARD_MIME: &str = "image/png";

/// Errors surfaced to the user as a non-fatal notification.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Could not encode image: {0}")]
    Encode(#[from] EncodeError),

    #[error("Could not deliver image: {0}")]
    Sink(#[from] SinkError),
}

impl ExportError {
    /// Short message suitable for a toast or status line.
    pub fn notification(&self) -> String {
        match self {
            ExportError::Encode(_) => format!("Export failed. {}", self),
            ExportError::Sink(SinkError::Unavailable(what)) => {
                format!("{} is not available in this environment.", what)
            }
            ExportError::Sink(_) => format!("Export failed. {}", self),
        }
    }
}

/// What an adapter did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// Bytes were handed to the sink.
    Delivered {
        /// File name for downloads, `None` for clipboard copies.
        file_name: Option<String>,
        mime: &'static str,
        size: usize,
    },
    /// No source image was loaded; the sink was not called.
    NothingToExport,
}

/// An encoded download, ready to hand to a host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub file_name: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

/// Render and encode a download without delivering it.
///
/// Returns `Ok(None)` when no source image is loaded.
pub fn prepare_download(
    source: Option<&SourceImage>,
    style: &StyleState,
    canvas: &CanvasConfig,
) -> Result<Option<Download>, EncodeError> {
    let Some(source) = source else {
        return Ok(None);
    };

    let format = style.export_format();
    let raster = render(Some(source), style, canvas);
    let bytes = encode::encode(&raster, format)?;
    Ok(Some(Download {
        file_name: format.file_name(),
        mime: format.mime_type(),
        bytes,
    }))
}

/// Render, encode and deliver a download to `sink`.
pub fn download<S: FileSink + ?Sized>(
    source: Option<&SourceImage>,
    style: &StyleState,
    canvas: &CanvasConfig,
    sink: &mut S,
) -> Result<ExportOutcome, ExportError> {
    let Some(file) = prepare_download(source, style, canvas)? else {
        log::warn!("download requested with no image loaded");
        return Ok(ExportOutcome::NothingToExport);
    };

    sink.save_file(&file.file_name, file.mime, &file.bytes)
        .inspect_err(|e| log::warn!("download of {} failed: {}", file.file_name, e))?;

    log::info!("downloaded {} ({} bytes)", file.file_name, file.bytes.len());
    Ok(ExportOutcome::Delivered {
        size: file.bytes.len(),
        file_name: Some(file.file_name),
        mime: file.mime,
    })
}

/// Render, encode as PNG and place the result on `sink`.
///
/// The export format in `style` is ignored; clipboard images are always PNG.
pub fn copy_to_clipboard<S: ClipboardSink + ?Sized>(
    source: Option<&SourceImage>,
    style: &StyleState,
    canvas: &CanvasConfig,
    sink: &mut S,
) -> Result<ExportOutcome, ExportError> {
    let Some(source) = source else {
        log::warn!("copy requested with no image loaded");
        return Ok(ExportOutcome::NothingToExport);
    };

    let raster = render(Some(source), style, canvas);
    let bytes = encode::encode(&raster, ExportFormat::Png)?;

    sink.write_image(&bytes, CLIPBOARD_MIME)
        .inspect_err(|e| log::warn!("clipboard copy failed: {}", e))?;

    log::info!("copied {}x{} image to clipboard", raster.width(), raster.height());
    Ok(ExportOutcome::Delivered {
        file_name: None,
        mime: CLIPBOARD_MIME,
        size: bytes.len(),
    })
}
