//! Photo placement transforms and the display-to-export coordinate transfer.
//!
//! The editable canvas runs at whatever size the host measured, while the
//! export always renders at a fixed logical resolution. The two are tied by a
//! single scale ratio:
//!
//! ```text
//! ratio           = display_canvas_width / export_width
//! export.position = photo.position / ratio
//! export.size     = photo.size / ratio
//! export.scale    = photo.scale
//! export.rotation = photo.rotation
//! ```
//!
//! Rotation is in degrees, clockwise on screen, about the node's position
//! (its unrotated top-left corner).

use serde::{Deserialize, Serialize};

use crate::geometry::{BoundingBox, Point, Size};

/// Measured size of the interactive canvas container.
pub type CanvasSize = Size;

/// Live, user-manipulable placement of the photo on the display canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhotoTransform {
    /// Absolute position of the node origin.
    pub position: Point,
    /// Scale factors `(sx, sy)`; gestures keep them equal.
    pub scale: Point,
    /// Rotation in degrees.
    pub rotation: f64,
    /// Unscaled node size.
    pub size: Size,
}

impl Default for PhotoTransform {
    fn default() -> Self {
        Self {
            position: Point::ZERO,
            scale: Point::new(1.0, 1.0),
            rotation: 0.0,
            size: Size::default(),
        }
    }
}

impl PhotoTransform {
    /// Size after scaling, before rotation.
    pub fn rendered_size(&self) -> Size {
        Size::new(self.size.width * self.scale.x, self.size.height * self.scale.y)
    }

    /// Corners in absolute coordinates: top-left, top-right, bottom-right, bottom-left.
    pub fn corners(&self) -> [Point; 4] {
        let s = self.rendered_size();
        [
            Point::new(0.0, 0.0),
            Point::new(s.width, 0.0),
            Point::new(s.width, s.height),
            Point::new(0.0, s.height),
        ]
        .map(|local| self.position + local.rotate(self.rotation))
    }

    /// Center of the rendered photo in absolute coordinates.
    pub fn center(&self) -> Point {
        let s = self.rendered_size();
        self.position + Point::new(s.width / 2.0, s.height / 2.0).rotate(self.rotation)
    }

    /// Axis-aligned box around the rendered photo.
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_points(&self.corners())
    }

    /// Whether `point` lies on the rendered photo, rotation included.
    pub fn contains(&self, point: Point) -> bool {
        let local = (point - self.position).rotate(-self.rotation);
        let s = self.rendered_size();
        let within = |v: f64, extent: f64| v >= extent.min(0.0) && v <= extent.max(0.0);
        within(local.x, s.width) && within(local.y, s.height)
    }

    /// Move the node so that its center lands on `center`.
    pub fn with_center(mut self, center: Point) -> Self {
        let offset = self.center() - self.position;
        self.position = center - offset;
        self
    }
}

/// Photo placement in the fixed export resolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExportTransform {
    pub position: Point,
    pub scale: Point,
    pub rotation: f64,
    pub size: Size,
}

impl ExportTransform {
    /// Map back to display coordinates for a given ratio.
    pub fn to_display(&self, ratio: f64) -> PhotoTransform {
        PhotoTransform {
            position: self.position * ratio,
            scale: self.scale,
            rotation: self.rotation,
            size: Size::new(self.size.width * ratio, self.size.height * ratio),
        }
    }
}

/// Ratio between display canvas width and export width.
///
/// Falls back to `1.0` when no canvas has been measured yet, so display and
/// export coordinates are treated as identical.
pub fn scale_ratio(canvas: Option<CanvasSize>, export_width: u32) -> f64 {
    match canvas {
        Some(size) if size.width > 0.0 && export_width > 0 => size.width / export_width as f64,
        _ => 1.0,
    }
}

/// Derive the export transform from the live photo transform.
///
/// Position and size are divided by `ratio` on both axes; scale and rotation
/// are copied. A non-positive or non-finite ratio is treated as `1.0`.
pub fn sync_export_transform(photo: &PhotoTransform, ratio: f64) -> ExportTransform {
    let ratio = if ratio.is_finite() && ratio > 0.0 {
        ratio
    } else {
        1.0
    };
    ExportTransform {
        position: photo.position / ratio,
        scale: photo.scale,
        rotation: photo.rotation,
        size: Size::new(photo.size.width / ratio, photo.size.height / ratio),
    }
}

/// Size a freshly loaded image to the canvas, preserving aspect ratio.
///
/// Landscape and square images take the canvas width; portrait images take
/// the canvas height. Degenerate image dimensions yield an empty size.
pub fn fit_image_size(image: Size, canvas: CanvasSize) -> Size {
    if image.is_empty() {
        return Size::default();
    }

    let ratio = image.width / image.height;
    if ratio >= 1.0 {
        let scale = canvas.width / image.width;
        Size::new(canvas.width, image.height * scale)
    } else {
        let scale = canvas.height / image.height;
        Size::new(image.width * scale, canvas.height)
    }
}

/// Initial transform for an image: fitted with [`fit_image_size`] and centered.
pub fn initial_transform(image: Size, canvas: CanvasSize) -> PhotoTransform {
    let size = fit_image_size(image, canvas);
    PhotoTransform {
        position: Point::new(
            (canvas.width - size.width) / 2.0,
            (canvas.height - size.height) / 2.0,
        ),
        size,
        ..PhotoTransform::default()
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
