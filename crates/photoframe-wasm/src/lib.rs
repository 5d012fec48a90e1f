//! Photoframe WASM - WebAssembly bindings for the photo frame editor
//!
//! This crate exposes the photoframe-core placement engine to the browser.
//!
//! # Module Structure
//!
//! - `editor` - The interactive frame editor (`JsFrameEditor`)
//! - `types` - WASM-compatible wrapper types for image data
//! - `decode` - Photo and frame decoding bindings (JPEG, PNG)
//! - `encode` - PNG export bindings
//! - `logging` - Routes core log records to the browser console
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsFrameEditor } from '@photoframe/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const editor = new JsFrameEditor();
//! editor.set_canvas_size(320, 320);
//! editor.load_photo(new Uint8Array(await file.arrayBuffer()));
//! ```

use std::fmt::Display;

use wasm_bindgen::prelude::*;

mod decode;
mod editor;
mod encode;
mod logging;
mod types;

// Re-export public types
pub use decode::{decode_image, image_orientation};
pub use editor::JsFrameEditor;
pub use encode::{encode_png, encode_png_from_bitmap};
pub use logging::set_log_level;
pub use types::JsBitmap;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    logging::install(log::LevelFilter::Info);
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Wrap any error message in a JavaScript `Error`.
pub(crate) fn to_js_error<E: Display>(err: E) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}
