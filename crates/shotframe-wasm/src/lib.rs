//! Shotframe WASM - WebAssembly bindings for Shotframe
//!
//! This crate exposes a shotframe-core [`Session`](shotframe_core::Session) to
//! JavaScript/TypeScript so a web page can drive the compositor.
//!
//! # Module Structure
//!
//! - `session` - The `JsSession` class: style setters, image loading, preview, export
//! - `clipboard` - Clipboard sink that hands PNG bytes to a JS callback
//! - `types` - WASM-compatible wrapper types for render output and downloads
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsSession } from '@shotframe/wasm';
//!
//! await init();
//!
//! const session = new JsSession(container.clientWidth);
//! session.loadImage(new Uint8Array(await file.arrayBuffer()));
//! session.setShadow(40);
//!
//! const preview = session.preview();
//! ctx.putImageData(
//!   new ImageData(new Uint8ClampedArray(preview.pixels()), preview.width, preview.height),
//!   0,
//!   0,
//! );
//!
//! const download = session.download();
//! if (download) {
//!   const url = URL.createObjectURL(new Blob([download.bytes()], { type: download.mime }));
//!   const link = document.createElement('a');
//!   Object.assign(link, { href: url, download: download.fileName }).click();
//! }
//! ```

use wasm_bindgen::prelude::*;

mod clipboard;
mod session;
mod types;

pub use clipboard::CallbackClipboard;
pub use session::JsSession;
pub use types::{JsDownload, JsRaster};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    // Future: Set up panic hook for better error messages in browser console
    // when console_error_panic_hook feature is added
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Report a failure to the browser console.
pub(crate) fn console_warn(message: &str) {
    web_sys::console::warn_1(&JsValue::from_str(message));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
