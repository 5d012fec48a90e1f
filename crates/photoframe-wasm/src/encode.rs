//! Image encoding WASM bindings.
//!
//! # Functions
//!
//! - [`encode_png`] - Encode RGBA pixel data to PNG bytes
//! - [`encode_png_from_bitmap`] - Encode a JsBitmap to PNG bytes
//!
//! # Example
//!
//! ```typescript
//! import { encode_png } from '@photoframe/wasm';
//!
//! const png = encode_png(imageData.data, imageData.width, imageData.height);
//! const blob = new Blob([png], { type: 'image/png' });
//! ```

use crate::types::JsBitmap;
use photoframe_core::encode;
use wasm_bindgen::prelude::*;

/// Encode RGBA pixel data to PNG bytes.
///
/// # Errors
///
/// Returns an error if:
/// - The pixel data length doesn't match width * height * 4
/// - Width or height is zero
/// - Encoding fails internally
#[wasm_bindgen]
pub fn encode_png(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, JsValue> {
    encode::encode_png(pixels, width, height).map_err(crate::to_js_error)
}

/// Encode a JsBitmap to PNG bytes.
#[wasm_bindgen]
pub fn encode_png_from_bitmap(image: &JsBitmap) -> Result<Vec<u8>, JsValue> {
    image.bitmap().encode_png().map_err(crate::to_js_error)
}
