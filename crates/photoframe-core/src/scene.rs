//! The editable scene and its hidden export twin.
//!
//! [`SceneComposer`] owns everything the editor mutates: the measured canvas
//! size, the loaded photo's transform, the selection flag, the single-pointer
//! drag session, the pinch gesture and the guide overlays. The host draws
//! from [`SceneComposer::snapshot`] and never mutates the transform itself.
//!
//! # Export synchronisation
//!
//! The export transform is re-derived from the photo transform at fixed
//! points only: image load, canvas resize, drag end, handle transform end and
//! touch end. In between it may lag behind the live transform.

use serde::{Deserialize, Serialize};

use crate::compose::compose_export;
use crate::config::{ConfigError, EditorConfig};
use crate::decode::Bitmap;
use crate::geometry::{Point, Size};
use crate::gesture::{GestureController, TouchMove};
use crate::handles::{self, Anchor, HandleLayout};
use crate::snap::{apply_guides, compute_guides, guide_line, GuideLine};
use crate::transform::{
    initial_transform, scale_ratio, sync_export_transform, CanvasSize, ExportTransform,
    PhotoTransform,
};

/// What a pointer landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HitTarget {
    Photo,
    Frame,
}

/// The frame overlay as the host should draw it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameOverlay {
    pub size: Size,
    /// Bumped on every canvas resize; the host re-rasterises its cached frame when it changes.
    pub revision: u64,
}

/// Everything the host needs to draw one frame of the editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneSnapshot {
    pub stage: Option<Size>,
    pub background: [u8; 4],
    pub frame: Option<FrameOverlay>,
    pub photo: Option<PhotoTransform>,
    pub selected: bool,
    pub handles: Option<HandleLayout>,
    pub guides: Vec<GuideLine>,
    pub export: Option<ExportTransform>,
}

#[derive(Debug, Clone, Copy)]
struct LoadedPhoto {
    /// Pixel size of the decoded image.
    image_size: Size,
    transform: PhotoTransform,
}

#[derive(Debug, Clone, Copy)]
struct DragSession {
    /// Pointer minus photo position at drag start.
    grab: Point,
}

/// Editable scene state for one frame editor.
#[derive(Debug, Clone)]
pub struct SceneComposer {
    config: EditorConfig,
    canvas: Option<CanvasSize>,
    frame_revision: u64,
    photo: Option<LoadedPhoto>,
    export: Option<ExportTransform>,
    selected: bool,
    drag: Option<DragSession>,
    gesture: GestureController,
    guides: Vec<GuideLine>,
}

impl Default for SceneComposer {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl SceneComposer {
    /// Create a scene without checking `config`.
    ///
    /// The caller must pass a config that [`EditorConfig::validate`] accepts;
    /// a zero export size makes the stage and scale ratio meaningless. Use
    /// [`try_new`](Self::try_new) for untrusted input.
    pub fn new(config: EditorConfig) -> Self {
        Self {
            config,
            canvas: None,
            frame_revision: 0,
            photo: None,
            export: None,
            selected: true,
            drag: None,
            gesture: GestureController::new(),
            guides: Vec::new(),
        }
    }

    /// Create a scene after validating `config`.
    ///
    /// # Errors
    ///
    /// Returns the first invalid config field.
    pub fn try_new(config: EditorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config))
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    // ------------------------------------------------------------------
    // Canvas and image
    // ------------------------------------------------------------------

    /// Record a new container measurement and re-lay out the photo.
    ///
    /// The photo's fitted size and centered position are recomputed; its
    /// scale and rotation are kept. An empty size is treated as "not measured".
    pub fn set_canvas_size(&mut self, size: CanvasSize) {
        self.canvas = (!size.is_empty()).then_some(size);
        self.frame_revision += 1;
        log::debug!(
            "canvas resized to {}x{} (revision {})",
            size.width,
            size.height,
            self.frame_revision
        );

        if let Some(photo) = self.photo.as_mut() {
            let fitted = match self.canvas {
                Some(canvas) => initial_transform(photo.image_size, canvas),
                None => PhotoTransform::default(),
            };
            photo.transform.position = fitted.position;
            photo.transform.size = fitted.size;
        }
        self.sync_export();
    }

    pub fn canvas_size(&self) -> Option<CanvasSize> {
        self.canvas
    }

    /// Display width divided by export width.
    pub fn scale_ratio(&self) -> f64 {
        scale_ratio(self.canvas, self.config.export_width)
    }

    /// Stage size: canvas width by width over the export aspect ratio.
    pub fn stage_size(&self) -> Option<Size> {
        self.canvas
            .map(|c| Size::new(c.width, c.width / self.config.aspect_ratio()))
    }

    /// Load a new image, replacing any previous photo wholesale.
    pub fn load_image(&mut self, width: u32, height: u32) {
        let image_size = Size::new(width as f64, height as f64);
        let transform = match self.canvas {
            Some(canvas) => initial_transform(image_size, canvas),
            None => PhotoTransform::default(),
        };
        log::debug!("image loaded: {}x{}", width, height);

        self.photo = Some(LoadedPhoto {
            image_size,
            transform,
        });
        self.drag = None;
        self.gesture.touch_end();
        self.guides.clear();
        self.sync_export();
    }

    /// Remove the photo, e.g. while a new file is being converted.
    pub fn clear_image(&mut self) {
        self.photo = None;
        self.export = None;
        self.drag = None;
        self.gesture.touch_end();
        self.guides.clear();
    }

    pub fn has_photo(&self) -> bool {
        self.photo.is_some()
    }

    pub fn photo_transform(&self) -> Option<&PhotoTransform> {
        self.photo.as_ref().map(|p| &p.transform)
    }

    /// Replace the live transform, e.g. from a host-side transformer.
    ///
    /// Call [`transform_end`](Self::transform_end) when the interaction finishes.
    pub fn set_photo_transform(&mut self, transform: PhotoTransform) {
        if let Some(photo) = self.photo.as_mut() {
            photo.transform = transform;
        }
    }

    pub fn export_transform(&self) -> Option<&ExportTransform> {
        self.export.as_ref()
    }

    fn sync_export(&mut self) {
        let ratio = self.scale_ratio();
        self.export = self
            .photo
            .as_ref()
            .map(|p| sync_export_transform(&p.transform, ratio));
    }

    /// Photo transform, only when a canvas has been measured.
    fn active_photo_mut(&mut self) -> Option<&mut PhotoTransform> {
        self.canvas?;
        self.photo.as_mut().map(|p| &mut p.transform)
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Handles are shown only for a loaded, selected photo.
    pub fn handles_visible(&self) -> bool {
        self.selected && self.photo.is_some()
    }

    /// Photo if its rotated rectangle contains `point`, otherwise the frame.
    pub fn hit_test(&self, point: Point) -> Option<HitTarget> {
        self.canvas?;
        match &self.photo {
            Some(p) if p.transform.contains(point) => Some(HitTarget::Photo),
            _ => Some(HitTarget::Frame),
        }
    }

    /// Pointer pressed anywhere on the stage: the frame deselects.
    pub fn pointer_down(&mut self, point: Point) -> Option<HitTarget> {
        let target = self.hit_test(point);
        if target == Some(HitTarget::Frame) {
            self.selected = false;
        }
        target
    }

    /// Click or tap: the photo selects.
    pub fn click(&mut self, point: Point) -> Option<HitTarget> {
        let target = self.hit_test(point);
        if target == Some(HitTarget::Photo) {
            self.selected = true;
        }
        target
    }

    // ------------------------------------------------------------------
    // Single-pointer drag
    // ------------------------------------------------------------------

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Begin dragging if `pointer` is on the photo. Starting a drag selects.
    pub fn drag_start(&mut self, pointer: Point) -> bool {
        if self.hit_test(pointer) != Some(HitTarget::Photo) {
            return false;
        }
        let Some(photo) = self.photo.as_ref() else {
            return false;
        };

        self.drag = Some(DragSession {
            grab: pointer - photo.transform.position,
        });
        self.selected = true;
        log::debug!("drag started at ({:.1}, {:.1})", pointer.x, pointer.y);
        true
    }

    /// Move the dragged photo under the pointer and snap it to the canvas edges.
    ///
    /// Returns the guide overlays to draw for this tick.
    pub fn drag_move(&mut self, pointer: Point) -> &[GuideLine] {
        self.guides = self.drag_to(pointer);
        &self.guides
    }

    fn drag_to(&mut self, pointer: Point) -> Vec<GuideLine> {
        let Some(drag) = self.drag else {
            return Vec::new();
        };
        let canvas = self.canvas;
        let tolerance = self.config.snap_tolerance;
        let Some(transform) = self.active_photo_mut() else {
            return Vec::new();
        };

        transform.position = pointer - drag.grab;
        let resolved = compute_guides(
            canvas,
            &transform.bounding_box(),
            transform.position,
            tolerance,
        );
        if !resolved.is_empty() {
            transform.position = apply_guides(transform.position, &resolved);
            log::trace!("snapped to {:?}", resolved);
        }

        let style = &self.config.guide_style;
        resolved.iter().map(|g| guide_line(g, style)).collect()
    }

    /// Finish the drag: clear guides and resynchronise the export.
    pub fn drag_end(&mut self) {
        self.guides.clear();
        if self.drag.take().is_some() {
            log::debug!("drag ended");
            self.sync_export();
        }
    }

    pub fn guides(&self) -> &[GuideLine] {
        &self.guides
    }

    // ------------------------------------------------------------------
    // Touch
    // ------------------------------------------------------------------

    /// Handle a touch-move event with touches in client coordinates.
    ///
    /// Two or more touches take over from any single-pointer drag.
    pub fn touch_move(&mut self, touches: &[Point]) -> TouchMove {
        if touches.len() < 2 || self.canvas.is_none() || self.photo.is_none() {
            return TouchMove::Ignored;
        }

        if self.drag.is_some() {
            log::debug!("two-finger gesture cancelled the drag");
            self.drag_end();
        }

        match self.photo.as_mut() {
            Some(photo) => self.gesture.touch_move(touches, &mut photo.transform),
            None => TouchMove::Ignored,
        }
    }

    /// Touch sequence ended: reset the gesture and resynchronise the export.
    pub fn touch_end(&mut self) {
        self.gesture.touch_end();
        self.sync_export();
    }

    pub fn gesture(&self) -> &GestureController {
        &self.gesture
    }

    // ------------------------------------------------------------------
    // Handles
    // ------------------------------------------------------------------

    pub fn handle_layout(&self) -> Option<HandleLayout> {
        if !self.handles_visible() {
            return None;
        }
        self.photo_transform().map(handles::handle_layout)
    }

    /// Resize from a corner handle. Ignored unless the handles are visible.
    pub fn resize_from_handle(&mut self, anchor: Anchor, pointer: Point) {
        if !self.handles_visible() {
            return;
        }
        let min_size = self.config.min_photo_size;
        if let Some(t) = self.active_photo_mut() {
            *t = handles::resize_from_corner(t, anchor, pointer, min_size);
        }
    }

    /// Rotate from the rotation handle. Ignored unless the handles are visible.
    pub fn rotate_from_handle(&mut self, pointer: Point) {
        if !self.handles_visible() {
            return;
        }
        if let Some(t) = self.active_photo_mut() {
            *t = handles::rotate_about_center(t, pointer);
        }
    }

    /// Handle interaction finished.
    pub fn transform_end(&mut self) {
        self.sync_export();
    }

    // ------------------------------------------------------------------
    // Output
    // ------------------------------------------------------------------

    pub fn snapshot(&self) -> SceneSnapshot {
        let stage = self.stage_size();
        SceneSnapshot {
            stage,
            background: self.config.background,
            frame: self.canvas.map(|c| FrameOverlay {
                size: Size::new(c.width, c.width),
                revision: self.frame_revision,
            }),
            photo: self.photo_transform().copied(),
            selected: self.selected,
            handles: self.handle_layout(),
            guides: self.guides.clone(),
            export: self.export,
        }
    }

    /// Render the export raster from the last synchronised export transform.
    pub fn compose(&self, photo: Option<&Bitmap>, frame: Option<&Bitmap>) -> Bitmap {
        compose_export(photo.zip(self.export.as_ref()), frame, &self.config)
    }
}
