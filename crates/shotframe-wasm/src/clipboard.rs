//! Clipboard sink backed by a JavaScript callback.
//!
//! The browser clipboard API is asynchronous and needs a user gesture, so the
//! page owns it. The callback receives `(bytes: Uint8Array, mime: string)`
//! and is expected to write a single `ClipboardItem`. A thrown exception is
//! reported as a sink failure.

use js_sys::{Function, Uint8Array};
use shotframe_core::export::{ClipboardSink, SinkError};
use wasm_bindgen::prelude::*;

pub struct CallbackClipboard {
    callback: Function,
}

impl CallbackClipboard {
    pub fn new(callback: Function) -> Self {
        Self { callback }
    }
}

impl ClipboardSink for CallbackClipboard {
    fn write_image(&mut self, bytes: &[u8], mime: &str) -> Result<(), SinkError> {
        let array = Uint8Array::from(bytes);
        self.callback
            .call2(&JsValue::NULL, &array.into(), &JsValue::from_str(mime))
            .map(|_| ())
            .map_err(|e| {
                let message = e
                    .as_string()
                    .unwrap_or_else(|| "clipboard callback threw".to_string());
                SinkError::Failed(message)
            })
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_callback_receives_bytes_and_mime() {
        let captured = js_sys::Array::new();
        let push = Function::new_with_args("bytes, mime", "this.push(bytes.length, mime);");
        let bound = push.bind(&captured);

        let mut sink = CallbackClipboard::new(bound);
        sink.write_image(&[1, 2, 3], "image/png").unwrap();

        assert_eq!(captured.get(0).as_f64(), Some(3.0));
        assert_eq!(captured.get(1).as_string().as_deref(), Some("image/png"));
    }

    #[wasm_bindgen_test]
    fn test_throwing_callback_is_sink_failure() {
        let throwing = Function::new_with_args("bytes, mime", "throw 'denied';");
        let mut sink = CallbackClipboard::new(throwing);

        let err = sink.write_image(&[1], "image/png").unwrap_err();
        assert!(matches!(err, SinkError::Failed(ref m) if m == "denied"));
    }
}
