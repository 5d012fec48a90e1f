//! Editor configuration.
//!
//! All fields have defaults matching the shipped frame, so hosts only pass
//! what they want to change. Field names are camelCase on the wire so the
//! same object can come straight from JavaScript.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Logical width of the exported raster.
pub const EXPORT_WIDTH: u32 = 640;
/// Logical height of the exported raster.
pub const EXPORT_HEIGHT: u32 = 640;
/// Maximum distance in canvas pixels for an edge to snap to a guide.
pub const GUIDELINE_OFFSET: f64 = 5.0;

/// Errors produced by [`EditorConfig::validate`].
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// Export raster would be empty.
    #[error("Invalid export size: width ({width}) and height ({height}) must be non-zero")]
    InvalidExportSize { width: u32, height: u32 },

    /// Snap tolerance must be a positive, finite number of pixels.
    #[error("Invalid snap tolerance: {0}")]
    InvalidTolerance(f64),

    /// Minimum photo size must be finite and non-negative.
    #[error("Invalid minimum photo size: {0}")]
    InvalidMinSize(f64),
}

/// Appearance of the dashed snap guide lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GuideStyle {
    /// Stroke color as RGB.
    pub stroke: [u8; 3],
    pub stroke_width: f64,
    /// Dash pattern: on length, off length.
    pub dash: [f64; 2],
    /// Half-length of each line; long enough to cross any canvas.
    pub extent: f64,
}

impl Default for GuideStyle {
    fn default() -> Self {
        Self {
            stroke: [0, 161, 255],
            stroke_width: 1.0,
            dash: [4.0, 6.0],
            extent: 6000.0,
        }
    }
}

impl GuideStyle {
    /// CSS color string for the stroke, e.g. `rgb(0, 161, 255)`.
    pub fn css_stroke(&self) -> String {
        let [r, g, b] = self.stroke;
        format!("rgb({}, {}, {})", r, g, b)
    }
}

/// Editor-wide settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    pub export_width: u32,
    pub export_height: u32,
    pub snap_tolerance: f64,
    /// Background fill as RGBA.
    pub background: [u8; 4],
    pub guide_style: GuideStyle,
    /// Smallest rendered photo edge allowed when resizing from a handle.
    pub min_photo_size: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            export_width: EXPORT_WIDTH,
            export_height: EXPORT_HEIGHT,
            snap_tolerance: GUIDELINE_OFFSET,
            background: [255, 255, 255, 255],
            guide_style: GuideStyle::default(),
            min_photo_size: 10.0,
        }
    }
}

impl EditorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check that every field is usable.
    ///
    /// # Errors
    ///
    /// Returns the first invalid field found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.export_width == 0 || self.export_height == 0 {
            return Err(ConfigError::InvalidExportSize {
                width: self.export_width,
                height: self.export_height,
            });
        }
        if !self.snap_tolerance.is_finite() || self.snap_tolerance <= 0.0 {
            return Err(ConfigError::InvalidTolerance(self.snap_tolerance));
        }
        if !self.min_photo_size.is_finite() || self.min_photo_size < 0.0 {
            return Err(ConfigError::InvalidMinSize(self.min_photo_size));
        }
        Ok(())
    }

    /// Width divided by height of the export raster.
    pub fn aspect_ratio(&self) -> f64 {
        self.export_width as f64 / self.export_height as f64
    }
}
