//! Turtle state, the turtle capability and the operations a turtle understands.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Position and heading of a turtle.
///
/// Heading is in degrees, counter-clockwise from the +X axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TurtlePose {
    pub position: Vec2,
    pub heading: f32,
}

impl TurtlePose {
    pub fn new(position: Vec2, heading: f32) -> Self {
        Self { position, heading }
    }

    /// Unit vector pointing along the heading.
    pub fn direction(&self) -> Vec2 {
        Vec2::from_angle(self.heading.to_radians())
    }
}

/// The drawing primitives an L-System run needs from a turtle.
///
/// `set_position` moves the turtle without drawing, whatever the pen state.
pub trait Turtle {
    fn forward(&mut self, distance: f32);
    fn pen_up(&mut self);
    fn pen_down(&mut self);
    fn turn_left(&mut self, degrees: f32);
    fn turn_right(&mut self, degrees: f32);
    fn position(&self) -> Vec2;
    fn heading(&self) -> f32;
    fn set_position(&mut self, position: Vec2);
    fn set_heading(&mut self, degrees: f32);

    fn pose(&self) -> TurtlePose {
        TurtlePose::new(self.position(), self.heading())
    }

    /// Restores position and heading together.
    fn set_pose(&mut self, pose: TurtlePose) {
        self.set_position(pose.position);
        self.set_heading(pose.heading);
    }
}

/// Operations bound to symbols by the [`ActionTable`](crate::interpreter::ActionTable).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurtleOp {
    /// Move forward one step, drawing a line (`F`).
    Forward,
    /// Move forward one step with the pen lifted (`f`).
    Move,
    /// Turn counter-clockwise by the configured angle (`+`).
    TurnLeft,
    /// Turn clockwise by the configured angle (`-`).
    TurnRight,
    /// Save the current pose (`[`).
    Push,
    /// Restore the most recently saved pose (`]`).
    Pop,
    /// The symbol has no drawing meaning.
    Unrecognized,
}

impl TurtleOp {
    /// Whether executing this operation can change the turtle's position.
    pub fn moves(self) -> bool {
        matches!(self, Self::Forward | Self::Move | Self::Pop)
    }
}

/// LIFO stack of saved poses used for branching (`[` / `]`).
#[derive(Clone, Debug, Default)]
pub struct PoseStack {
    poses: Vec<TurtlePose>,
}

impl PoseStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, pose: TurtlePose) {
        self.poses.push(pose);
    }

    /// Removes and returns the most recently pushed pose.
    pub fn pop(&mut self) -> Option<TurtlePose> {
        self.poses.pop()
    }

    pub fn depth(&self) -> usize {
        self.poses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.poses.is_empty()
    }
}

/// A straight line drawn with the pen down.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub from: Vec2,
    pub to: Vec2,
}

/// In-memory turtle that records every line it draws.
///
/// Starts at the origin facing +X with the pen down, stroking in red and
/// filling in yellow.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RecordingTurtle {
    pose: TurtlePose,
    pen_down: bool,
    pub pen_color: [u8; 3],
    pub fill_color: [u8; 3],
    segments: Vec<Segment>,
}

impl Default for RecordingTurtle {
    fn default() -> Self {
        Self {
            pose: TurtlePose::default(),
            pen_down: true,
            pen_color: [255, 0, 0],
            fill_color: [255, 255, 0],
            segments: Vec::new(),
        }
    }
}

impl RecordingTurtle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets stroke and fill colors (builder pattern).
    pub fn with_colors(mut self, pen: [u8; 3], fill: [u8; 3]) -> Self {
        self.pen_color = pen;
        self.fill_color = fill;
        self
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_pen_down(&self) -> bool {
        self.pen_down
    }
}

impl Turtle for RecordingTurtle {
    fn forward(&mut self, distance: f32) {
        let from = self.pose.position;
        let to = from + self.pose.direction() * distance;
        if self.pen_down {
            self.segments.push(Segment { from, to });
        }
        self.pose.position = to;
    }

    fn pen_up(&mut self) {
        self.pen_down = false;
    }

    fn pen_down(&mut self) {
        self.pen_down = true;
    }

    fn turn_left(&mut self, degrees: f32) {
        self.pose.heading += degrees;
    }

    fn turn_right(&mut self, degrees: f32) {
        self.pose.heading -= degrees;
    }

    fn position(&self) -> Vec2 {
        self.pose.position
    }

    fn heading(&self) -> f32 {
        self.pose.heading
    }

    fn set_position(&mut self, position: Vec2) {
        self.pose.position = position;
    }

    fn set_heading(&mut self, degrees: f32) {
        self.pose.heading = degrees;
    }
}
