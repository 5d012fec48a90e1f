//! Snap-guide engine.
//!
//! While the photo is dragged, each axis is checked for an edge (start,
//! center or end of the photo's bounding box) that lies close to a canvas
//! edge. The closest match per axis becomes a guide: the photo is pulled onto
//! it and a dashed line is drawn through the canvas at that coordinate.
//!
//! # Algorithm
//!
//! 1. Guide stops are the canvas edges `0` and the full extent per axis.
//! 2. The dragged box yields three snapping edges per axis. Each edge's
//!    `guide` is rounded to whole pixels for matching; its `offset` is the
//!    exact distance from the edge back to the node's absolute position.
//! 3. Every (stop, edge) pair closer than the tolerance is a candidate.
//! 4. Per axis the candidate with the smallest `diff` wins; ties keep the
//!    first one found.
//! 5. Applying a guide sets `position = line_guide + offset` on its axis.

use serde::{Deserialize, Serialize};

use crate::config::{GuideStyle, EXPORT_HEIGHT, EXPORT_WIDTH};
use crate::geometry::{BoundingBox, Point};
use crate::transform::CanvasSize;

/// Which alignment point of the dragged box matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Snap {
    Start,
    Center,
    End,
}

/// Axis of a guide line.
///
/// A `Vertical` guide is a vertical line at an x coordinate; a `Horizontal`
/// guide is a horizontal line at a y coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Vertical,
    Horizontal,
}

/// Candidate alignment coordinates per axis.
#[derive(Debug, Clone, PartialEq)]
pub struct GuideStops {
    pub vertical: Vec<f64>,
    pub horizontal: Vec<f64>,
}

/// One alignment point of the dragged box on one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapEdge {
    /// Edge coordinate rounded to whole pixels.
    pub guide: f64,
    /// Absolute position minus the exact edge coordinate.
    pub offset: f64,
    pub snap: Snap,
}

/// Start, center and end edges of a box on both axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnappingEdges {
    pub vertical: [SnapEdge; 3],
    pub horizontal: [SnapEdge; 3],
}

/// A snap edge matched to a guide stop within tolerance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Guide {
    pub line_guide: f64,
    pub diff: f64,
    pub snap: Snap,
    pub offset: f64,
}

/// The winning guide for one axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedGuide {
    pub line_guide: f64,
    pub snap: Snap,
    pub offset: f64,
    pub orientation: Orientation,
}

/// Dashed overlay drawn for a resolved guide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuideLine {
    pub orientation: Orientation,
    /// Absolute position the line's local points are drawn from.
    pub position: Point,
    /// Local line segment: `[x1, y1, x2, y2]`.
    pub points: [f64; 4],
    pub stroke: String,
    pub stroke_width: f64,
    pub dash: [f64; 2],
}

/// Canvas edges used as guide stops.
///
/// Missing or empty canvas extents fall back to the export size.
pub fn line_guide_stops(canvas: Option<CanvasSize>) -> GuideStops {
    let (width, height) = match canvas {
        Some(size) if !size.is_empty() => (size.width, size.height),
        _ => (EXPORT_WIDTH as f64, EXPORT_HEIGHT as f64),
    };
    GuideStops {
        vertical: vec![0.0, width],
        horizontal: vec![0.0, height],
    }
}

/// Start, center and end edges of `bounds` relative to `absolute_position`.
pub fn snapping_edges(bounds: &BoundingBox, absolute_position: Point) -> SnappingEdges {
    let axis = |origin: f64, extent: f64, anchor: f64| {
        [
            (origin, Snap::Start),
            (origin + extent / 2.0, Snap::Center),
            (origin + extent, Snap::End),
        ]
        .map(|(edge, snap)| SnapEdge {
            guide: edge.round(),
            offset: anchor - edge,
            snap,
        })
    };

    SnappingEdges {
        vertical: axis(bounds.x, bounds.width, absolute_position.x),
        horizontal: axis(bounds.y, bounds.height, absolute_position.y),
    }
}

/// Match every stop against every edge on one axis and keep the closest.
fn closest_guide(stops: &[f64], edges: &[SnapEdge], tolerance: f64) -> Option<Guide> {
    stops
        .iter()
        .flat_map(|&line_guide| {
            edges.iter().filter_map(move |edge| {
                let diff = (line_guide - edge.guide).abs();
                (diff < tolerance).then_some(Guide {
                    line_guide,
                    diff,
                    snap: edge.snap,
                    offset: edge.offset,
                })
            })
        })
        // min_by returns the first of several equal minimums
        .min_by(|a, b| a.diff.total_cmp(&b.diff))
}

/// Resolve at most one guide per axis, vertical first.
pub fn get_guides(stops: &GuideStops, edges: &SnappingEdges, tolerance: f64) -> Vec<ResolvedGuide> {
    let vertical = closest_guide(&stops.vertical, &edges.vertical, tolerance)
        .map(|g| (g, Orientation::Vertical));
    let horizontal = closest_guide(&stops.horizontal, &edges.horizontal, tolerance)
        .map(|g| (g, Orientation::Horizontal));

    vertical
        .into_iter()
        .chain(horizontal)
        .map(|(g, orientation)| ResolvedGuide {
            line_guide: g.line_guide,
            snap: g.snap,
            offset: g.offset,
            orientation,
        })
        .collect()
}

/// Guides for a dragged box against the canvas edges.
pub fn compute_guides(
    canvas: Option<CanvasSize>,
    dragged: &BoundingBox,
    absolute_position: Point,
    tolerance: f64,
) -> Vec<ResolvedGuide> {
    let stops = line_guide_stops(canvas);
    let edges = snapping_edges(dragged, absolute_position);
    get_guides(&stops, &edges, tolerance)
}

/// Move `position` so each guide's matched edge lands on its line.
pub fn apply_guides(position: Point, guides: &[ResolvedGuide]) -> Point {
    guides.iter().fold(position, |mut pos, guide| {
        match guide.orientation {
            Orientation::Vertical => pos.x = guide.line_guide + guide.offset,
            Orientation::Horizontal => pos.y = guide.line_guide + guide.offset,
        }
        pos
    })
}

/// Build the dashed overlay line for a guide.
pub fn guide_line(guide: &ResolvedGuide, style: &GuideStyle) -> GuideLine {
    let e = style.extent;
    let (position, points) = match guide.orientation {
        Orientation::Vertical => (Point::new(guide.line_guide, 0.0), [0.0, -e, 0.0, e]),
        Orientation::Horizontal => (Point::new(0.0, guide.line_guide), [-e, 0.0, e, 0.0]),
    };
    GuideLine {
        orientation: guide.orientation,
        position,
        points,
        stroke: style.css_stroke(),
        stroke_width: style.stroke_width,
        dash: style.dash,
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::config::GUIDELINE_OFFSET;
    use crate::geometry::Size;
    use proptest::prelude::*;

    const SIDE: f64 = 640.0;

    fn canvas() -> Option<CanvasSize> {
        Some(Size::new(SIDE, SIDE))
    }

    fn edge_of(bb: &BoundingBox, orientation: Orientation, snap: Snap) -> f64 {
        let (origin, extent) = match orientation {
            Orientation::Vertical => (bb.x, bb.width),
            Orientation::Horizontal => (bb.y, bb.height),
        };
        match snap {
            Snap::Start => origin,
            Snap::Center => origin + extent / 2.0,
            Snap::End => origin + extent,
        }
    }

    proptest! {
        /// Property: A box starting exactly on the left edge gets a zero-diff guide at 0.
        #[test]
        fn prop_on_edge_gives_zero_diff(
            y in 100.0f64..200.0,
            w in 20.0f64..300.0,
            h in 20.0f64..300.0,
        ) {
            let bb = BoundingBox::new(0.0, y, w, h);
            let stops = line_guide_stops(canvas());
            let edges = snapping_edges(&bb, Point::new(bb.x, bb.y));
            let v = closest_guide(&stops.vertical, &edges.vertical, GUIDELINE_OFFSET);
            prop_assert!(v.is_some());
            let v = v.unwrap();
            prop_assert_eq!(v.diff, 0.0);
            prop_assert_eq!(v.line_guide, 0.0);
        }

        /// Property: Every edge farther than the tolerance from both stops means no guide.
        #[test]
        fn prop_far_from_edges_gives_no_guide(
            x in 10.0f64..100.0,
            w in 20.0f64..400.0,
        ) {
            let bb = BoundingBox::new(x, 10.0, w, 10.0);
            let all_far = [x, x + w / 2.0, x + w]
                .iter()
                .all(|e| e.round().abs() >= GUIDELINE_OFFSET && (SIDE - e.round()).abs() >= GUIDELINE_OFFSET);
            prop_assume!(all_far);

            let guides = compute_guides(canvas(), &bb, Point::new(bb.x, bb.y), GUIDELINE_OFFSET);
            prop_assert!(guides.iter().all(|g| g.orientation != Orientation::Vertical));
        }

        /// Property: Applying a guide lands the matched edge exactly on the guide line.
        #[test]
        fn prop_apply_lands_edge_on_line(
            x in -700.0f64..700.0,
            y in -700.0f64..700.0,
            w in 1.0f64..1500.0,
            h in 1.0f64..1500.0,
            dx in -50.0f64..50.0,
            dy in -50.0f64..50.0,
        ) {
            let bb = BoundingBox::new(x, y, w, h);
            let abs = Point::new(x + dx, y + dy);
            let guides = compute_guides(canvas(), &bb, abs, GUIDELINE_OFFSET);
            let snapped = apply_guides(abs, &guides);
            let moved = BoundingBox::new(
                bb.x + (snapped.x - abs.x),
                bb.y + (snapped.y - abs.y),
                w,
                h,
            );

            for g in &guides {
                let edge = edge_of(&moved, g.orientation, g.snap);
                prop_assert!((edge - g.line_guide).abs() < 1e-9, "edge {} vs line {}", edge, g.line_guide);
            }
        }

        /// Property: At most one guide per orientation.
        #[test]
        fn prop_at_most_one_guide_per_axis(
            x in -10.0f64..650.0,
            y in -10.0f64..650.0,
            w in 0.0f64..20.0,
            h in 0.0f64..20.0,
        ) {
            let bb = BoundingBox::new(x, y, w, h);
            let guides = compute_guides(canvas(), &bb, Point::new(x, y), GUIDELINE_OFFSET);
            prop_assert!(guides.len() <= 2);
            let vertical = guides.iter().filter(|g| g.orientation == Orientation::Vertical).count();
            let horizontal = guides.iter().filter(|g| g.orientation == Orientation::Horizontal).count();
            prop_assert!(vertical <= 1);
            prop_assert!(horizontal <= 1);
        }
    }
}
