//! Rasters and errors shared by decoding, composition and encoding.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a photo or frame could not be decoded.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The bytes match no enabled image format.
    #[error("Unrecognized image format")]
    InvalidFormat,

    /// The format was recognized but the data could not be read.
    #[error("Could not read image data: {0}")]
    CorruptedFile(String),
}

/// How the camera was held, from the EXIF orientation tag.
///
/// Rotations are the clockwise turn needed to show the photo upright.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Orientation {
    #[default]
    Normal = 1,
    FlipHorizontal = 2,
    Rotate180 = 3,
    FlipVertical = 4,
    Transpose = 5,
    Rotate90CW = 6,
    Transverse = 7,
    Rotate270CW = 8,
}

impl From<u32> for Orientation {
    /// Out-of-range tag values read as [`Orientation::Normal`].
    fn from(tag: u32) -> Self {
        use Orientation::*;
        [
            FlipHorizontal,
            Rotate180,
            FlipVertical,
            Transpose,
            Rotate90CW,
            Transverse,
            Rotate270CW,
        ]
        .into_iter()
        .find(|o| *o as u32 == tag)
        .unwrap_or(Normal)
    }
}

/// Straight-alpha RGBA8 raster, rows top to bottom.
///
/// Holds the decoded photo, the frame overlay and the composed export.
#[derive(Debug, Clone, PartialEq)]
pub struct Bitmap {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl Bitmap {
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(pixels.len(), (width as usize) * (height as usize) * 4);
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Solid `rgba` raster, e.g. the export background.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let count = (width as usize) * (height as usize);
        Self {
            width,
            height,
            pixels: rgba.repeat(count),
        }
    }

    pub fn from_rgba_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            pixels: img.into_raw(),
        }
    }

    /// `None` when the buffer is shorter than the dimensions require.
    pub fn to_rgba_image(&self) -> Option<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.pixels.clone())
    }

    /// Pixel at `(x, y)`; panics when out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let idx = ((y as usize) * (self.width as usize) + x as usize) * 4;
        let mut px = [0u8; 4];
        px.copy_from_slice(&self.pixels[idx..idx + 4]);
        px
    }

    /// No pixels to sample.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }
}
