//! Image decoding WASM bindings.
//!
//! # Functions
//!
//! - [`decode_image`] - Decode a JPEG or PNG to RGBA, upright per EXIF
//! - [`image_orientation`] - Read the EXIF orientation tag (1-8)
//!
//! # Example
//!
//! ```typescript
//! import { decode_image } from '@photoframe/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const photo = decode_image(bytes);
//! console.log(`Decoded ${photo.width}x${photo.height}`);
//! ```

use crate::types::JsBitmap;
use photoframe_core::decode;
use wasm_bindgen::prelude::*;

/// Decode a JPEG or PNG image from bytes.
///
/// EXIF orientation is applied so photos taken in portrait come out upright.
///
/// # Errors
///
/// Returns an error if the format is not recognized or the data is corrupted.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsBitmap, JsValue> {
    decode::decode_image(bytes)
        .map(JsBitmap::from_bitmap)
        .map_err(crate::to_js_error)
}

/// EXIF orientation tag of an encoded image, 1 when absent.
#[wasm_bindgen]
pub fn image_orientation(bytes: &[u8]) -> u8 {
    decode::get_orientation(bytes) as u8
}


/// WASM-specific tests that require JsValue.
///
/// Run with `wasm-pack test`.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_decode_image_invalid() {
        assert!(decode_image(&[0, 1, 2, 3]).is_err());
    }

    #[wasm_bindgen_test]
    fn test_decode_image_empty() {
        assert!(decode_image(&[]).is_err());
    }

    #[wasm_bindgen_test]
    fn test_decode_png() {
        let png = photoframe_core::encode_png(&[255u8; 3 * 2 * 4], 3, 2).unwrap();
        let img = decode_image(&png).unwrap();
        assert_eq!(img.width(), 3);
        assert_eq!(img.height(), 2);
    }
}
