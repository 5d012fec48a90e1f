//! Export composition.
//!
//! Renders the hidden export scene into a fixed-size raster, bottom to top:
//! 1. Background fill
//! 2. The photo, placed by its [`ExportTransform`]
//! 3. The frame overlay, stretched to the full raster
//!
//! # Algorithm
//!
//! The photo is drawn by inverse mapping: for each output pixel center we
//! undo the node's translation, rotation and scale to find the point in the
//! node's local space, then sample the source bitmap there with bilinear
//! interpolation. Only pixels inside the photo's bounding box are visited.
//!
//! ```text
//! local = rotate(dst - position, -rotation) / scale
//! src   = local * (bitmap_size / node_size) - 0.5
//! ```

use crate::config::EditorConfig;
use crate::decode::Bitmap;
use crate::geometry::{Point, Size};
use crate::transform::{ExportTransform, PhotoTransform};

/// Compose the export raster.
///
/// A missing photo or frame skips that layer.
pub fn compose_export(
    photo: Option<(&Bitmap, &ExportTransform)>,
    frame: Option<&Bitmap>,
    config: &EditorConfig,
) -> Bitmap {
    let (width, height) = (config.export_width, config.export_height);
    let mut canvas = Bitmap::filled(width, height, config.background);

    if let Some((bitmap, transform)) = photo {
        draw_photo(&mut canvas, bitmap, transform);
    }

    if let Some(frame) = frame {
        draw_overlay(&mut canvas, frame);
    }

    log::debug!(
        "composed {}x{} export (photo: {}, frame: {})",
        width,
        height,
        photo.is_some(),
        frame.is_some()
    );
    canvas
}

/// Draw `bitmap` stretched to the node described by `transform`.
fn draw_photo(canvas: &mut Bitmap, bitmap: &Bitmap, transform: &ExportTransform) {
    let size = transform.size;
    let scale = transform.scale;
    if bitmap.is_empty() || size.is_empty() || scale.x == 0.0 || scale.y == 0.0 {
        return;
    }

    // Reuse the display-side corner math; export units are already final
    let node = PhotoTransform {
        position: transform.position,
        scale,
        rotation: transform.rotation,
        size,
    };
    let bb = node.bounding_box();
    let x_start = bb.x.floor().max(0.0) as u32;
    let y_start = bb.y.floor().max(0.0) as u32;
    let x_end = ((bb.x + bb.width).ceil().max(0.0) as u32).min(canvas.width);
    let y_end = ((bb.y + bb.height).ceil().max(0.0) as u32).min(canvas.height);

    let to_src = Size::new(
        bitmap.width as f64 / size.width,
        bitmap.height as f64 / size.height,
    );

    for y in y_start..y_end {
        for x in x_start..x_end {
            let dst = Point::new(x as f64 + 0.5, y as f64 + 0.5);
            let local = (dst - transform.position).rotate(-transform.rotation);
            let u = local.x / scale.x;
            let v = local.y / scale.y;
            if u < 0.0 || u >= size.width || v < 0.0 || v >= size.height {
                continue;
            }

            let pixel = sample_bilinear(bitmap, u * to_src.width - 0.5, v * to_src.height - 0.5);
            blend_over(canvas, x, y, pixel);
        }
    }
}

/// Draw `overlay` over the whole canvas, resizing it first if needed.
fn draw_overlay(canvas: &mut Bitmap, overlay: &Bitmap) {
    if overlay.is_empty() {
        return;
    }

    let resized;
    let overlay = if overlay.width == canvas.width && overlay.height == canvas.height {
        overlay
    } else {
        let Some(img) = overlay.to_rgba_image() else {
            log::warn!("frame overlay buffer does not match its dimensions; skipped");
            return;
        };
        resized = Bitmap::from_rgba_image(image::imageops::resize(
            &img,
            canvas.width,
            canvas.height,
            image::imageops::FilterType::Triangle,
        ));
        &resized
    };

    for y in 0..canvas.height {
        for x in 0..canvas.width {
            blend_over(canvas, x, y, overlay.pixel(x, y));
        }
    }
}

/// Get a pixel as [f64; 4] from a bitmap at the given coordinates.
#[inline]
fn get_pixel_f64(image: &Bitmap, px: u32, py: u32) -> [f64; 4] {
    image.pixel(px, py).map(f64::from)
}

/// Sample a pixel using bilinear interpolation.
///
/// Coordinates are clamped to the bitmap so edges extend instead of fading
/// to black.
fn sample_bilinear(image: &Bitmap, x: f64, y: f64) -> [u8; 4] {
    let max_x = (image.width - 1) as f64;
    let max_y = (image.height - 1) as f64;
    let x = x.clamp(0.0, max_x);
    let y = y.clamp(0.0, max_y);

    let x0 = x.floor() as u32;
    let y0 = y.floor() as u32;
    let x1 = (x0 + 1).min(image.width - 1);
    let y1 = (y0 + 1).min(image.height - 1);

    // Fractional distances
    let fx = x - x0 as f64;
    let fy = y - y0 as f64;

    let p00 = get_pixel_f64(image, x0, y0);
    let p10 = get_pixel_f64(image, x1, y0);
    let p01 = get_pixel_f64(image, x0, y1);
    let p11 = get_pixel_f64(image, x1, y1);

    let mut result = [0u8; 4];
    for i in 0..4 {
        let v = p00[i] * (1.0 - fx) * (1.0 - fy)
            + p10[i] * fx * (1.0 - fy)
            + p01[i] * (1.0 - fx) * fy
            + p11[i] * fx * fy;
        result[i] = v.clamp(0.0, 255.0).round() as u8;
    }

    result
}

/// Source-over blend of `src` onto the canvas pixel at `(x, y)`.
#[inline]
fn blend_over(canvas: &mut Bitmap, x: u32, y: u32, src: [u8; 4]) {
    let idx = ((y as usize) * (canvas.width as usize) + x as usize) * 4;
    let sa = src[3] as f64 / 255.0;
    if sa <= 0.0 {
        return;
    }

    let dst = &mut canvas.pixels[idx..idx + 4];
    if sa >= 1.0 {
        dst.copy_from_slice(&src);
        return;
    }

    let da = dst[3] as f64 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    for i in 0..3 {
        let c = (src[i] as f64 * sa + dst[i] as f64 * da * (1.0 - sa)) / out_a;
        dst[i] = c.clamp(0.0, 255.0).round() as u8;
    }
    dst[3] = (out_a * 255.0).clamp(0.0, 255.0).round() as u8;
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: [u8; 4] = [255, 255, 255, 255];
    const RED: [u8; 4] = [255, 0, 0, 255];
    const BLUE: [u8; 4] = [0, 0, 255, 255];

    fn small_config() -> EditorConfig {
        let mut config = EditorConfig::new();
        config.export_width = 16;
        config.export_height = 16;
        config
    }

    fn transform(x: f64, y: f64, w: f64, h: f64) -> ExportTransform {
        ExportTransform {
            position: Point::new(x, y),
            scale: Point::new(1.0, 1.0),
            rotation: 0.0,
            size: Size::new(w, h),
        }
    }

    /// Opaque frame with a transparent square hole in the middle.
    fn frame_with_hole(side: u32, border: u32) -> Bitmap {
        let mut frame = Bitmap::filled(side, side, BLUE);
        for y in border..side - border {
            for x in border..side - border {
                let idx = ((y * side + x) * 4) as usize;
                frame.pixels[idx + 3] = 0;
            }
        }
        frame
    }

    #[test]
    fn test_background_only() {
        let out = compose_export(None, None, &small_config());
        assert_eq!((out.width, out.height), (16, 16));
        assert!(out.pixels.chunks(4).all(|p| p == WHITE));
    }

    #[test]
    fn test_default_size_is_640() {
        let out = compose_export(None, None, &EditorConfig::new());
        assert_eq!((out.width, out.height), (640, 640));
    }

    #[test]
    fn test_photo_fills_canvas() {
        let photo = Bitmap::filled(4, 4, RED);
        let t = transform(0.0, 0.0, 16.0, 16.0);
        let out = compose_export(Some((&photo, &t)), None, &small_config());
        assert!(out.pixels.chunks(4).all(|p| p == RED));
    }

    #[test]
    fn test_photo_right_half() {
        let photo = Bitmap::filled(2, 2, RED);
        let t = transform(8.0, 0.0, 8.0, 16.0);
        let out = compose_export(Some((&photo, &t)), None, &small_config());
        assert_eq!(out.pixel(3, 5), WHITE);
        assert_eq!(out.pixel(7, 5), WHITE);
        assert_eq!(out.pixel(8, 5), RED);
        assert_eq!(out.pixel(15, 15), RED);
    }

    #[test]
    fn test_photo_scale_applies() {
        let photo = Bitmap::filled(2, 2, RED);
        let mut t = transform(0.0, 0.0, 4.0, 4.0);
        t.scale = Point::new(2.0, 2.0);
        let out = compose_export(Some((&photo, &t)), None, &small_config());
        assert_eq!(out.pixel(7, 7), RED);
        assert_eq!(out.pixel(8, 8), WHITE);
    }

    #[test]
    fn test_photo_rotated_half_turn() {
        // Rotating 180 degrees about the bottom-right corner covers the canvas
        let photo = Bitmap::filled(2, 2, RED);
        let mut t = transform(16.0, 16.0, 16.0, 16.0);
        t.rotation = 180.0;
        let out = compose_export(Some((&photo, &t)), None, &small_config());
        assert_eq!(out.pixel(0, 0), RED);
        assert_eq!(out.pixel(15, 15), RED);
    }

    #[test]
    fn test_photo_offscreen_is_clipped() {
        let photo = Bitmap::filled(2, 2, RED);
        let t = transform(-100.0, -100.0, 50.0, 50.0);
        let out = compose_export(Some((&photo, &t)), None, &small_config());
        assert!(out.pixels.chunks(4).all(|p| p == WHITE));
    }

    #[test]
    fn test_frame_on_top_of_photo() {
        let photo = Bitmap::filled(2, 2, RED);
        let t = transform(0.0, 0.0, 16.0, 16.0);
        let frame = frame_with_hole(16, 4);
        let out = compose_export(Some((&photo, &t)), Some(&frame), &small_config());

        assert_eq!(out.pixel(0, 0), BLUE);
        assert_eq!(out.pixel(15, 8), BLUE);
        assert_eq!(out.pixel(8, 8), RED);
    }

    #[test]
    fn test_frame_is_resized_to_canvas() {
        let frame = frame_with_hole(32, 8);
        let out = compose_export(None, Some(&frame), &small_config());
        assert_eq!(out.pixel(0, 0), BLUE);
        assert_eq!(out.pixel(8, 8), WHITE);
    }

    #[test]
    fn test_half_transparent_blend() {
        let mut canvas = Bitmap::filled(1, 1, WHITE);
        blend_over(&mut canvas, 0, 0, [0, 0, 0, 128]);
        let p = canvas.pixel(0, 0);
        assert!((p[0] as i32 - 127).abs() <= 1);
        assert_eq!(p[3], 255);
    }

    #[test]
    fn test_sample_bilinear_midpoint() {
        let bmp = Bitmap::new(2, 1, vec![0, 0, 0, 255, 200, 100, 50, 255]);
        assert_eq!(sample_bilinear(&bmp, 0.5, 0.0), [100, 50, 25, 255]);
        // Out of range clamps to the edge
        assert_eq!(sample_bilinear(&bmp, -3.0, 9.0), [0, 0, 0, 255]);
    }
}
