//! WASM-compatible wrapper types for image data.
//!
//! [`JsBitmap`] wraps the core RGBA [`Bitmap`] used for the photo, the frame
//! overlay and the composed export.

use photoframe_core::decode::Bitmap;
use wasm_bindgen::prelude::*;

/// An RGBA raster for JavaScript.
///
/// # Memory Management
///
/// The pixel data stays in WASM memory. Calling `pixels()` copies it into a
/// JavaScript `Uint8Array`, which can be wrapped in an `ImageData` for
/// drawing on a canvas.
#[wasm_bindgen]
pub struct JsBitmap {
    inner: Bitmap,
}

#[wasm_bindgen]
impl JsBitmap {
    /// Create a bitmap from dimensions and RGBA pixel data (4 bytes per pixel).
    ///
    /// # Errors
    ///
    /// Returns an error if the buffer length is not `width * height * 4`.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<JsBitmap, JsValue> {
        check_length(width, height, pixels.len()).map_err(crate::to_js_error)?;
        Ok(JsBitmap {
            inner: Bitmap::new(width, height, pixels),
        })
    }

    /// Get the image width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Number of bytes in the pixel buffer (width * height * 4)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.pixels.len()
    }

    /// Returns RGBA pixel data as a Uint8Array copy.
    pub fn pixels(&self) -> Vec<u8> {
        self.inner.pixels.clone()
    }

    /// Explicitly free WASM memory.
    ///
    /// Optional; wasm-bindgen's finalizer releases it otherwise.
    pub fn free(self) {}
}

impl JsBitmap {
    pub(crate) fn from_bitmap(inner: Bitmap) -> Self {
        Self { inner }
    }

    pub(crate) fn bitmap(&self) -> &Bitmap {
        &self.inner
    }
}

/// Buffer length check shared by every entry point that accepts raw pixels.
pub(crate) fn check_length(width: u32, height: u32, actual: usize) -> Result<(), String> {
    let expected = (width as usize) * (height as usize) * 4;
    if actual == expected {
        Ok(())
    } else {
        Err(format!(
            "Pixel buffer has {} bytes, expected {} for {}x{} RGBA",
            actual, expected, width, height
        ))
    }
}
