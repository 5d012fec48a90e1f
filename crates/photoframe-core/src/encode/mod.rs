//! Image encoding for the export download.
//!
//! # Examples
//!
//! ```ignore
//! use photoframe_core::encode::encode_png;
//!
//! let pixels = vec![255u8; 640 * 640 * 4]; // White frame
//! let png = encode_png(&pixels, 640, 640).unwrap();
//! println!("Encoded {} bytes", png.len());
//! ```

mod png;

pub use png::{encode_png, EncodeError};
