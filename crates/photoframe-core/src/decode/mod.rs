//! Decoding of the user's photo and the frame overlay.
//!
//! This module provides functionality for:
//! - Decoding any enabled raster format (JPEG, PNG) to RGBA
//! - Applying EXIF orientation so phone photos come out upright
//!
//! # Examples
//!
//! ```ignore
//! use photoframe_core::decode::decode_image;
//!
//! let bytes = std::fs::read("photo.jpg").unwrap();
//! let photo = decode_image(&bytes).unwrap();
//! println!("Decoded {}x{} photo", photo.width, photo.height);
//! ```

mod photo;
mod types;

pub use photo::{decode_frame, decode_image, get_orientation};
pub use types::{Bitmap, DecodeError, Orientation};
