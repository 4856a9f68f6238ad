//! # lsystem-canvas
//!
//! Draws L-System grammars with turtle graphics on an auto-fitting canvas.
//!
//! A grammar is a seed string plus single-character productions. The
//! [`LSystemEngine`] rewrites the seed generation by generation and executes
//! every produced symbol through an [`ActionTable`] as soon as it appears:
//! `F` draws a step, `f` moves a step without drawing, `+`/`-` turn, and
//! `[`/`]` save and restore the turtle pose. Each move widens a
//! [`BoundingBox`], and the canvas is resized so the origin stays centred with
//! a fixed margin around the drawing.
//!
//! The turtle and canvas are traits ([`Turtle`], [`Canvas`]) bundled in a
//! [`RenderContext`], so any backend can be plugged in. [`RecordingTurtle`]
//! and [`RecordingCanvas`] are in-memory implementations.
//!
//! ```rust,ignore
//! use lsystem_canvas::{draw_lsystem, LSystemParams, RenderConfig};
//!
//! let params = LSystemParams::new(5, 20.0, 25.7, "F", &[('F', "F[+F]F[-F]F")]);
//! let mut ctx = RenderConfig::default().recording_context();
//! let report = draw_lsystem(&params, &mut ctx)?;
//! println!("canvas {:?}", report.canvas_size);
//! ```

pub mod bounds;
pub mod config;
pub mod engine;
pub mod error;
pub mod grammar;
pub mod interpreter;
pub mod render;
pub mod turtle;
pub mod viewport;

pub use bounds::*;
pub use config::*;
pub use engine::*;
pub use error::*;
pub use grammar::*;
pub use interpreter::*;
pub use render::*;
pub use turtle::*;
pub use viewport::*;
