//! Bounding-box tracking and the canvas size derived from it.

use bevy_math::Rect;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Headroom added to both canvas dimensions so the drawing never touches the edge.
pub const DEFAULT_CANVAS_MARGIN: f32 = 100.0;

/// Axis-aligned box around every point the turtle has visited.
///
/// Starts collapsed at the origin, the turtle's home position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Vec2,
    pub max: Vec2,
}

impl BoundingBox {
    /// Widens the box to include `point`.
    ///
    /// Per axis, a coordinate below the minimum lowers the minimum; otherwise a
    /// coordinate above the maximum raises the maximum. Only one side of an
    /// axis moves per call.
    pub fn include(&mut self, point: Vec2) {
        if point.x < self.min.x {
            self.min.x = point.x;
        } else if point.x > self.max.x {
            self.max.x = point.x;
        }

        if point.y < self.min.y {
            self.min.y = point.y;
        } else if point.y > self.max.y {
            self.max.y = point.y;
        }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        self.to_rect().contains(point)
    }

    pub fn to_rect(&self) -> Rect {
        Rect::from_corners(self.min, self.max)
    }

    /// Largest distance from the origin to the box along each axis.
    pub fn half_extent(&self) -> Vec2 {
        Vec2::new(
            (-self.min.x).max(self.max.x),
            (-self.min.y).max(self.max.y),
        )
    }
}

/// Observes turtle positions and derives the origin-centred canvas size
/// needed to show them.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BoundsTracker {
    bbox: BoundingBox,
    margin: f32,
}

impl Default for BoundsTracker {
    fn default() -> Self {
        Self::new(DEFAULT_CANVAS_MARGIN)
    }
}

impl BoundsTracker {
    pub fn new(margin: f32) -> Self {
        Self {
            bbox: BoundingBox::default(),
            margin,
        }
    }

    /// Includes `point` in the box and returns the resulting canvas size.
    pub fn observe(&mut self, point: Vec2) -> Vec2 {
        self.bbox.include(point);
        self.canvas_size()
    }

    pub fn bounding_box(&self) -> BoundingBox {
        self.bbox
    }

    pub fn margin(&self) -> f32 {
        self.margin
    }

    /// `2 * max(-min, max) + margin` on each axis.
    pub fn canvas_size(&self) -> Vec2 {
        self.bbox.half_extent() * 2.0 + Vec2::splat(self.margin)
    }
}
