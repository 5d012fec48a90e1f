//! Transform handles drawn around the selected photo.
//!
//! Four corner anchors resize the photo with its aspect ratio kept and its
//! center fixed. A rotation anchor above the top edge turns the photo about
//! its center.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::geometry::Point;
use crate::transform::PhotoTransform;

/// Distance of the rotation anchor above the top edge.
pub const ROTATE_ANCHOR_OFFSET: f64 = 50.0;

/// One of the four enabled resize anchors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Anchor {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Anchor {
    pub const ALL: [Anchor; 4] = [
        Anchor::TopLeft,
        Anchor::TopRight,
        Anchor::BottomLeft,
        Anchor::BottomRight,
    ];

    /// Unit direction from the center to this corner, before scaling.
    fn sign(self) -> Point {
        match self {
            Anchor::TopLeft => Point::new(-1.0, -1.0),
            Anchor::TopRight => Point::new(1.0, -1.0),
            Anchor::BottomLeft => Point::new(-1.0, 1.0),
            Anchor::BottomRight => Point::new(1.0, 1.0),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Anchor::TopLeft => "top-left",
            Anchor::TopRight => "top-right",
            Anchor::BottomLeft => "bottom-left",
            Anchor::BottomRight => "bottom-right",
        }
    }
}

impl FromStr for Anchor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Anchor::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| format!("Unknown anchor: {}", s))
    }
}

/// Where the host should draw each handle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandleLayout {
    pub anchors: Vec<(Anchor, Point)>,
    pub rotater: Point,
}

/// Vector from the photo center to `anchor`, in absolute coordinates.
fn half_diagonal(transform: &PhotoTransform, anchor: Anchor) -> Point {
    let s = transform.rendered_size();
    let sign = anchor.sign();
    Point::new(sign.x * s.width / 2.0, sign.y * s.height / 2.0).rotate(transform.rotation)
}

/// Handle positions for the current transform.
pub fn handle_layout(transform: &PhotoTransform) -> HandleLayout {
    let center = transform.center();
    let anchors = Anchor::ALL
        .into_iter()
        .map(|a| (a, center + half_diagonal(transform, a)))
        .collect();
    let up = Point::new(
        0.0,
        -(transform.rendered_size().height / 2.0 + ROTATE_ANCHOR_OFFSET),
    );
    HandleLayout {
        anchors,
        rotater: center + up.rotate(transform.rotation),
    }
}

/// Resize from a corner anchor dragged to `pointer`.
///
/// The pointer is projected onto the anchor's diagonal, both scale factors
/// change by the same ratio and the center stays put. The rendered width and
/// height never drop below `min_size`.
pub fn resize_from_corner(
    transform: &PhotoTransform,
    anchor: Anchor,
    pointer: Point,
    min_size: f64,
) -> PhotoTransform {
    let center = transform.center();
    let diagonal = half_diagonal(transform, anchor);
    let half = diagonal.length();
    if half <= 0.0 {
        return *transform;
    }

    let projected = (pointer - center).dot(diagonal) / half;
    let rendered = transform.rendered_size();
    let smallest = rendered.width.min(rendered.height);
    let floor = if smallest > 0.0 { min_size / smallest } else { 0.0 };
    let factor = (projected / half).max(floor);

    let mut next = *transform;
    next.scale = transform.scale * factor;
    next.with_center(center)
}

/// Rotate about the center so the rotation anchor points at `pointer`.
pub fn rotate_about_center(transform: &PhotoTransform, pointer: Point) -> PhotoTransform {
    let center = transform.center();
    let d = pointer - center;
    let mut next = *transform;
    next.rotation = d.y.atan2(d.x).to_degrees() + 90.0;
    next.with_center(center)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Size;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn photo() -> PhotoTransform {
        PhotoTransform {
            position: Point::new(100.0, 100.0),
            size: Size::new(200.0, 100.0),
            ..PhotoTransform::default()
        }
    }

    #[test]
    fn test_anchor_parse() {
        assert_eq!("top-left".parse::<Anchor>(), Ok(Anchor::TopLeft));
        assert_eq!("bottom-right".parse::<Anchor>(), Ok(Anchor::BottomRight));
        assert!("middle-left".parse::<Anchor>().is_err());
    }

    #[test]
    fn test_handle_layout_unrotated() {
        let layout = handle_layout(&photo());
        assert_eq!(layout.anchors[0], (Anchor::TopLeft, Point::new(100.0, 100.0)));
        assert_eq!(layout.anchors[3], (Anchor::BottomRight, Point::new(300.0, 200.0)));
        assert_eq!(layout.rotater, Point::new(200.0, 50.0));
    }

    #[test]
    fn test_resize_doubles_from_bottom_right() {
        let t = photo();
        // Center (200, 150); corner sits at +(100, 50); pointer at +(200, 100)
        let next = resize_from_corner(&t, Anchor::BottomRight, Point::new(400.0, 250.0), 10.0);

        assert!(approx(next.scale.x, 2.0));
        assert!(approx(next.scale.y, 2.0));
        let c = next.center();
        assert!(approx(c.x, 200.0));
        assert!(approx(c.y, 150.0));
    }

    #[test]
    fn test_resize_from_opposite_corner_shrinks() {
        let t = photo();
        // Moving the top-left corner halfway to the center halves the size
        let next = resize_from_corner(&t, Anchor::TopLeft, Point::new(150.0, 125.0), 10.0);
        assert!(approx(next.scale.x, 0.5));
        assert!(approx(next.position.x, 150.0));
        assert!(approx(next.position.y, 125.0));
    }

    #[test]
    fn test_resize_respects_min_size() {
        let t = photo();
        let next = resize_from_corner(&t, Anchor::BottomRight, Point::new(200.0, 150.0), 10.0);
        let s = next.rendered_size();
        assert!(approx(s.height, 10.0));
        assert!(approx(s.width, 20.0));
    }

    #[test]
    fn test_resize_empty_photo_unchanged() {
        let t = PhotoTransform::default();
        let next = resize_from_corner(&t, Anchor::TopRight, Point::new(50.0, 50.0), 10.0);
        assert_eq!(next, t);
    }

    #[test]
    fn test_rotate_pointer_right_is_quarter_turn() {
        let t = photo();
        let next = rotate_about_center(&t, Point::new(400.0, 150.0));
        assert!(approx(next.rotation, 90.0));
        let c = next.center();
        assert!(approx(c.x, 200.0));
        assert!(approx(c.y, 150.0));
    }

    #[test]
    fn test_rotate_pointer_above_is_zero() {
        let t = photo();
        let next = rotate_about_center(&t, Point::new(200.0, 0.0));
        assert!(approx(next.rotation, 0.0));
        assert!(approx(next.position.x, 100.0));
        assert!(approx(next.position.y, 100.0));
    }
}
