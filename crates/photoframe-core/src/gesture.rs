//! Two-finger pinch-to-zoom and pan.
//!
//! A gesture starts on the first touch-move that sees two fingers: that frame
//! only records the midpoint. Each following frame scales the photo by the
//! change in finger distance around the point under the midpoint, and pans it
//! by how far the midpoint moved:
//!
//! ```text
//! point_to  = (center - position) / scale
//! scale'    = scale * distance / last_distance
//! position' = center - point_to * scale' + (center - last_center)
//! ```

use crate::geometry::{distance, midpoint, Point};
use crate::transform::PhotoTransform;

/// State of one continuous two-finger interaction.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GestureState {
    /// No two-finger gesture in progress.
    #[default]
    Idle,
    /// Two fingers down. `distance` is unset until the first transforming frame.
    Active {
        center: Point,
        distance: Option<f64>,
    },
}

/// What a touch-move event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchMove {
    /// Fewer than two touches; nothing changed.
    Ignored,
    /// First two-finger frame; only the midpoint was recorded.
    Baseline,
    /// The photo transform was updated.
    Transformed,
}

/// Turns touch-move sequences into photo scale and position updates.
#[derive(Debug, Clone, Default)]
pub struct GestureController {
    state: GestureState,
}

impl GestureController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, GestureState::Active { .. })
    }

    /// Handle one touch-move event with touches in client coordinates.
    ///
    /// Only the first two touches are used.
    pub fn touch_move(&mut self, touches: &[Point], photo: &mut PhotoTransform) -> TouchMove {
        let (p1, p2) = match touches {
            [p1, p2, ..] => (*p1, *p2),
            _ => return TouchMove::Ignored,
        };

        let new_center = midpoint(p1, p2);
        let (last_center, last_distance) = match self.state {
            GestureState::Idle => {
                log::debug!("pinch started at ({:.1}, {:.1})", new_center.x, new_center.y);
                self.state = GestureState::Active {
                    center: new_center,
                    distance: None,
                };
                return TouchMove::Baseline;
            }
            GestureState::Active { center, distance } => (center, distance),
        };

        let dist = distance(p1, p2);
        let last_distance = match last_distance {
            Some(d) if d > 0.0 => d,
            _ => dist,
        };

        let current = photo.scale.x;
        let point_to = (new_center - photo.position) / current;

        // Coincident fingers would collapse the photo to nothing
        let scale = if dist > 0.0 && last_distance > 0.0 {
            current * (dist / last_distance)
        } else {
            current
        };

        let pan = new_center - last_center;
        photo.scale = Point::new(scale, scale);
        photo.position = new_center - point_to * scale + pan;

        log::trace!(
            "pinch: distance {:.2} -> {:.2}, scale {:.4} -> {:.4}",
            last_distance,
            dist,
            current,
            scale
        );

        self.state = GestureState::Active {
            center: new_center,
            distance: Some(dist),
        };
        TouchMove::Transformed
    }

    /// End the gesture, returning to [`GestureState::Idle`].
    pub fn touch_end(&mut self) {
        if self.is_active() {
            log::debug!("pinch ended");
        }
        self.state = GestureState::Idle;
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
