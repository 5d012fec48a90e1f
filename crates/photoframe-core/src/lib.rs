//! Photoframe Core - Placement engine for the photo frame editor
//!
//! This crate holds everything the editor computes: fitting a freshly loaded
//! photo to the canvas, edge snapping while dragging, pinch-to-zoom, corner
//! and rotation handles, the display-to-export coordinate transfer and the
//! final export composition.

pub mod compose;
pub mod config;
pub mod decode;
pub mod encode;
pub mod geometry;
pub mod gesture;
pub mod handles;
pub mod scene;
pub mod snap;
pub mod transform;

pub use compose::compose_export;
pub use config::{ConfigError, EditorConfig, GuideStyle, EXPORT_HEIGHT, EXPORT_WIDTH, GUIDELINE_OFFSET};
pub use decode::{decode_frame, decode_image, Bitmap, DecodeError};
pub use encode::{encode_png, EncodeError};
pub use geometry::{BoundingBox, Point, Size};
pub use gesture::{GestureController, GestureState, TouchMove};
pub use handles::{Anchor, HandleLayout};
pub use scene::{HitTarget, SceneComposer, SceneSnapshot};
pub use snap::{compute_guides, GuideLine, ResolvedGuide};
pub use transform::{
    scale_ratio, sync_export_transform, CanvasSize, ExportTransform, PhotoTransform,
};
