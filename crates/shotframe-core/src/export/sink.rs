//! Capability interfaces for the places exports end up, plus stock implementations.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// A sink refused or failed to take a delivery.
#[derive(Debug, Error)]
pub enum SinkError {
    /// The hosting environment offers no such capability (e.g. no clipboard).
    #[error("{0} is not available")]
    Unavailable(String),

    /// The payload type is not accepted by this sink.
    #[error("Unsupported content type: {0}")]
    UnsupportedMime(String),

    /// Writing to disk failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The sink failed for another reason.
    #[error("{0}")]
    Failed(String),
}

/// Receives downloaded files.
pub trait FileSink {
    /// Deliver `bytes` as a file called `file_name` of type `mime`.
    fn save_file(&mut self, file_name: &str, mime: &str, bytes: &[u8]) -> Result<(), SinkError>;
}

/// Receives clipboard image entries.
pub trait ClipboardSink {
    /// Replace the clipboard contents with a single image entry.
    fn write_image(&mut self, bytes: &[u8], mime: &str) -> Result<(), SinkError>;
}

/// One payload captured by [`MemorySink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    /// File name; `None` for clipboard entries.
    pub file_name: Option<String>,
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// Keeps every delivery in memory. Usable as both a file and a clipboard sink.
#[derive(Debug, Default)]
pub struct MemorySink {
    deliveries: Vec<Delivery>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn deliveries(&self) -> &[Delivery] {
        &self.deliveries
    }

    /// The most recent delivery, if any.
    pub fn last(&self) -> Option<&Delivery> {
        self.deliveries.last()
    }

    pub fn take(&mut self) -> Vec<Delivery> {
        std::mem::take(&mut self.deliveries)
    }
}

impl FileSink for MemorySink {
    fn save_file(&mut self, file_name: &str, mime: &str, bytes: &[u8]) -> Result<(), SinkError> {
        self.deliveries.push(Delivery {
            file_name: Some(file_name.to_string()),
            mime: mime.to_string(),
            bytes: bytes.to_vec(),
        });
        Ok(())
    }
}

impl ClipboardSink for MemorySink {
    fn write_image(&mut self, bytes: &[u8], mime: &str) -> Result<(), SinkError> {
        // A clipboard holds a single entry.
        self.deliveries.retain(|d| d.file_name.is_some());
        self.deliveries.push(Delivery {
            file_name: None,
            mime: mime.to_string(),
            bytes: bytes.to_vec(),
        });
        Ok(())
    }
}

/// Writes downloads into a directory, overwriting files of the same name.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl FileSink for DirectorySink {
    fn save_file(&mut self, file_name: &str, _mime: &str, bytes: &[u8]) -> Result<(), SinkError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(file_name);
        fs::write(&path, bytes)?;
        log::debug!("wrote {} bytes to {}", bytes.len(), path.display());
        Ok(())
    }
}
