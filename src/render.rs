//! The canvas capability and the context that ties turtle, canvas and bounds together.

use crate::bounds::{BoundingBox, BoundsTracker};
use crate::turtle::Turtle;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Drawing surface whose scrollable extent can be changed.
pub trait Canvas {
    /// Sets the scrollable canvas size. Must be safe to call with an unchanged size.
    fn resize(&mut self, width: f32, height: f32);
}

/// In-memory canvas that remembers its latest size.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RecordingCanvas {
    size: Option<Vec2>,
    resizes: usize,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest size passed to [`Canvas::resize`], if any.
    pub fn size(&self) -> Option<Vec2> {
        self.size
    }

    /// Number of resize calls received.
    pub fn resize_count(&self) -> usize {
        self.resizes
    }
}

impl Canvas for RecordingCanvas {
    fn resize(&mut self, width: f32, height: f32) {
        self.size = Some(Vec2::new(width, height));
        self.resizes += 1;
    }
}

/// Everything an L-System run draws through.
///
/// Owns the turtle and canvas for the duration of a run; every position
/// change must be followed by [`observe_position`](Self::observe_position).
#[derive(Debug)]
pub struct RenderContext<T, C> {
    pub turtle: T,
    pub canvas: C,
    bounds: BoundsTracker,
}

impl<T: Turtle, C: Canvas> RenderContext<T, C> {
    pub fn new(turtle: T, canvas: C) -> Self {
        Self::with_bounds(turtle, canvas, BoundsTracker::default())
    }

    pub fn with_bounds(turtle: T, canvas: C, bounds: BoundsTracker) -> Self {
        Self {
            turtle,
            canvas,
            bounds,
        }
    }

    /// Samples the turtle's position, widens the bounding box and resizes the canvas.
    pub fn observe_position(&mut self) {
        let size = self.bounds.observe(self.turtle.position());
        self.canvas.resize(size.x, size.y);
    }

    pub fn bounds(&self) -> &BoundsTracker {
        &self.bounds
    }

    pub fn bounding_box(&self) -> BoundingBox {
        self.bounds.bounding_box()
    }
}
