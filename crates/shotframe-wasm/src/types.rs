//! WASM-compatible wrapper types for render output and downloads.

use shotframe_core::export::Download;
use shotframe_core::RasterResult;
use wasm_bindgen::prelude::*;

/// A rendered frame for JavaScript.
///
/// Pixels are RGBA, 4 bytes per pixel, row-major; they can be wrapped in a
/// `Uint8ClampedArray` and passed straight to `ImageData`.
#[wasm_bindgen]
pub struct JsRaster {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsRaster {
    /// Get the frame width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the frame height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the number of bytes in the pixel buffer (width * height * 4)
    #[wasm_bindgen(getter, js_name = byteLength)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns RGBA pixel data as Uint8Array.
    ///
    /// Note: This creates a copy of the pixel data.
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }
}

impl From<&RasterResult> for JsRaster {
    fn from(raster: &RasterResult) -> Self {
        Self {
            width: raster.width(),
            height: raster.height(),
            pixels: raster.pixels().to_vec(),
        }
    }
}

/// An encoded file ready to be saved by the page.
#[wasm_bindgen]
pub struct JsDownload {
    file_name: String,
    mime: String,
    bytes: Vec<u8>,
}

#[wasm_bindgen]
impl JsDownload {
    /// Suggested file name, `image.png` or `image.jpeg`
    #[wasm_bindgen(getter, js_name = fileName)]
    pub fn file_name(&self) -> String {
        self.file_name.clone()
    }

    /// MIME type for the `Blob`
    #[wasm_bindgen(getter)]
    pub fn mime(&self) -> String {
        self.mime.clone()
    }

    /// Encoded file contents as Uint8Array (copied)
    pub fn bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }
}

impl From<Download> for JsDownload {
    fn from(download: Download) -> Self {
        Self {
            file_name: download.file_name,
            mime: download.mime.to_string(),
            bytes: download.bytes,
        }
    }
}
