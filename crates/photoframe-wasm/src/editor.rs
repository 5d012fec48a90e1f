//! Frame editor WASM bindings.
//!
//! [`JsFrameEditor`] owns the scene plus the decoded photo and frame rasters.
//! JavaScript forwards pointer and touch events in stage coordinates, draws
//! from `snapshot()` and calls `export_png()` to download the result.
//!
//! # Example
//!
//! ```typescript
//! import { JsFrameEditor } from '@photoframe/wasm';
//!
//! const editor = new JsFrameEditor({ snapTolerance: 5 });
//! editor.set_canvas_size(container.clientWidth, container.clientHeight);
//! editor.set_frame(new Uint8Array(await frameFile.arrayBuffer()));
//! editor.load_photo(new Uint8Array(await photoFile.arrayBuffer()));
//!
//! stage.on('dragmove', (e) => { guides = editor.drag_move(e.x, e.y); });
//! stage.on('dragend', () => editor.drag_end());
//!
//! const png = editor.export_png();
//! ```

use photoframe_core::decode::{self, Bitmap, DecodeError};
use photoframe_core::gesture::TouchMove;
use photoframe_core::handles::Anchor;
use photoframe_core::scene::{HitTarget, SceneComposer};
use photoframe_core::{EditorConfig, Point, Size};
use wasm_bindgen::prelude::*;

use crate::types::JsBitmap;

/// Interactive frame editor for JavaScript.
#[wasm_bindgen]
pub struct JsFrameEditor {
    scene: SceneComposer,
    photo: Option<Bitmap>,
    frame: Option<Bitmap>,
}

#[wasm_bindgen]
impl JsFrameEditor {
    /// Create an editor.
    ///
    /// `config` is an optional object with any of `exportWidth`,
    /// `exportHeight`, `snapTolerance`, `background`, `guideStyle` and
    /// `minPhotoSize`; missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the object cannot be read or a value is invalid.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<JsFrameEditor, JsValue> {
        let config: EditorConfig = if config.is_undefined() || config.is_null() {
            EditorConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config).map_err(crate::to_js_error)?
        };
        let scene = SceneComposer::try_new(config).map_err(crate::to_js_error)?;
        Ok(Self::from_scene(scene))
    }

    /// Record the measured container size.
    pub fn set_canvas_size(&mut self, width: f64, height: f64) {
        self.scene.set_canvas_size(Size::new(width, height));
    }

    /// Display width divided by export width.
    #[wasm_bindgen(getter)]
    pub fn scale_ratio(&self) -> f64 {
        self.scene.scale_ratio()
    }

    /// Decode and load a photo, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes cannot be decoded. The previous photo
    /// is kept in that case.
    pub fn load_photo(&mut self, bytes: &[u8]) -> Result<(), JsValue> {
        self.read_photo(bytes).map_err(crate::to_js_error)
    }

    /// Load an already decoded photo.
    pub fn load_photo_bitmap(&mut self, image: &JsBitmap) {
        self.set_photo(image.bitmap().clone());
    }

    /// Remove the photo while a new file is being prepared.
    pub fn clear_photo(&mut self) {
        self.photo = None;
        self.scene.clear_image();
    }

    /// Decode and set the frame overlay. EXIF orientation is not applied.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes cannot be decoded.
    pub fn set_frame(&mut self, bytes: &[u8]) -> Result<(), JsValue> {
        self.read_frame(bytes).map_err(crate::to_js_error)
    }

    /// Set an already decoded frame overlay.
    pub fn set_frame_bitmap(&mut self, image: &JsBitmap) {
        self.frame = Some(image.bitmap().clone());
    }

    #[wasm_bindgen(getter)]
    pub fn has_photo(&self) -> bool {
        self.scene.has_photo()
    }

    #[wasm_bindgen(getter)]
    pub fn selected(&self) -> bool {
        self.scene.is_selected()
    }

    /// Pointer pressed: returns `"photo"`, `"frame"` or `undefined`.
    pub fn pointer_down(&mut self, x: f64, y: f64) -> Option<String> {
        self.scene.pointer_down(Point::new(x, y)).map(hit_name)
    }

    /// Click or tap: returns `"photo"`, `"frame"` or `undefined`.
    pub fn click(&mut self, x: f64, y: f64) -> Option<String> {
        self.scene.click(Point::new(x, y)).map(hit_name)
    }

    pub fn drag_start(&mut self, x: f64, y: f64) -> bool {
        self.scene.drag_start(Point::new(x, y))
    }

    /// Move the drag and return the guide lines to draw.
    pub fn drag_move(&mut self, x: f64, y: f64) -> Result<JsValue, JsValue> {
        let guides = self.scene.drag_move(Point::new(x, y));
        serde_wasm_bindgen::to_value(guides).map_err(crate::to_js_error)
    }

    pub fn drag_end(&mut self) {
        self.scene.drag_end();
    }

    /// Touch move with client coordinates flattened as `[x1, y1, x2, y2, ...]`.
    ///
    /// Returns `"ignored"`, `"baseline"` or `"transformed"`.
    pub fn touch_move(&mut self, coords: &[f64]) -> String {
        let touches = touches_from_flat(coords);
        touch_move_name(self.scene.touch_move(&touches)).to_string()
    }

    pub fn touch_end(&mut self) {
        self.scene.touch_end();
    }

    /// Drag a corner handle (`"top-left"`, `"top-right"`, `"bottom-left"`,
    /// `"bottom-right"`) to `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown anchor name.
    pub fn resize_from_handle(&mut self, anchor: &str, x: f64, y: f64) -> Result<(), JsValue> {
        let anchor: Anchor = anchor.parse().map_err(crate::to_js_error)?;
        self.scene.resize_from_handle(anchor, Point::new(x, y));
        Ok(())
    }

    pub fn rotate_from_handle(&mut self, x: f64, y: f64) {
        self.scene.rotate_from_handle(Point::new(x, y));
    }

    pub fn transform_end(&mut self) {
        self.scene.transform_end();
    }

    /// Everything needed to draw the editor, as a plain object.
    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.scene.snapshot()).map_err(crate::to_js_error)
    }

    /// The last synchronised export transform, or `undefined`.
    pub fn export_transform(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.scene.export_transform()).map_err(crate::to_js_error)
    }

    /// Compose the export raster.
    pub fn export_bitmap(&self) -> JsBitmap {
        JsBitmap::from_bitmap(self.compose())
    }

    /// Compose the export raster and encode it as PNG.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails.
    pub fn export_png(&self) -> Result<Vec<u8>, JsValue> {
        self.compose().encode_png().map_err(crate::to_js_error)
    }
}

impl JsFrameEditor {
    fn from_scene(scene: SceneComposer) -> Self {
        Self {
            scene,
            photo: None,
            frame: None,
        }
    }

    fn read_photo(&mut self, bytes: &[u8]) -> Result<(), DecodeError> {
        let bitmap = decode::decode_image(bytes)?;
        self.set_photo(bitmap);
        Ok(())
    }

    fn read_frame(&mut self, bytes: &[u8]) -> Result<(), DecodeError> {
        self.frame = Some(decode::decode_frame(bytes)?);
        Ok(())
    }

    fn set_photo(&mut self, bitmap: Bitmap) {
        self.scene.load_image(bitmap.width, bitmap.height);
        self.photo = Some(bitmap);
    }

    fn compose(&self) -> Bitmap {
        self.scene.compose(self.photo.as_ref(), self.frame.as_ref())
    }
}

fn hit_name(target: HitTarget) -> String {
    match target {
        HitTarget::Photo => "photo",
        HitTarget::Frame => "frame",
    }
    .to_string()
}

fn touch_move_name(result: TouchMove) -> &'static str {
    match result {
        TouchMove::Ignored => "ignored",
        TouchMove::Baseline => "baseline",
        TouchMove::Transformed => "transformed",
    }
}

/// Pair up `[x1, y1, x2, y2, ...]`; a trailing odd value is dropped.
fn touches_from_flat(coords: &[f64]) -> Vec<Point> {
    coords
        .chunks_exact(2)
        .map(|c| Point::new(c[0], c[1]))
        .collect()
}


/// WASM-specific tests that require JsValue.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_new_with_defaults() {
        let editor = JsFrameEditor::new(JsValue::UNDEFINED).unwrap();
        assert_eq!(editor.scale_ratio(), 1.0);
    }

    #[wasm_bindgen_test]
    fn test_new_rejects_zero_export() {
        let config = serde_wasm_bindgen::to_value(&EditorConfig {
            export_width: 0,
            ..EditorConfig::default()
        })
        .unwrap();
        assert!(JsFrameEditor::new(config).is_err());
    }

    #[wasm_bindgen_test]
    fn test_unknown_anchor_errors() {
        let mut editor = JsFrameEditor::new(JsValue::NULL).unwrap();
        assert!(editor.resize_from_handle("middle", 0.0, 0.0).is_err());
        assert!(editor.resize_from_handle("top-left", 0.0, 0.0).is_ok());
    }

    #[wasm_bindgen_test]
    fn test_export_png() {
        let editor = JsFrameEditor::new(JsValue::UNDEFINED).unwrap();
        let png = editor.export_png().unwrap();
        assert_eq!(&png[1..4], b"PNG");
    }
}
