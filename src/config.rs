//! Run parameters, render settings and the built-in preset catalogue.

use crate::bounds::{BoundsTracker, DEFAULT_CANVAS_MARGIN};
use crate::error::LSystemError;
use crate::render::{RecordingCanvas, RenderContext};
use crate::turtle::RecordingTurtle;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// The five caller-supplied parameters of a run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LSystemParams {
    /// Number of rewriting passes. `0` draws the seed once.
    pub generations: u32,
    /// Distance covered by `F` and `f`.
    pub step: f32,
    /// Turn in degrees applied by `+` and `-`.
    pub angle: f32,
    /// Initial sequence.
    pub seed: String,
    /// Productions keyed by single-character symbol.
    #[serde(default)]
    pub rules: BTreeMap<String, String>,
}

impl LSystemParams {
    pub fn new(
        generations: u32,
        step: f32,
        angle: f32,
        seed: &str,
        rules: &[(char, &str)],
    ) -> Self {
        Self {
            generations,
            step,
            angle,
            seed: seed.to_owned(),
            rules: rules
                .iter()
                .map(|(k, v)| (k.to_string(), (*v).to_owned()))
                .collect(),
        }
    }

    /// Checks the numeric parameters. Grammar-level checks happen when the
    /// engine is built.
    pub fn validate(&self) -> Result<(), LSystemError> {
        if !self.step.is_finite() || self.step <= 0.0 {
            return Err(LSystemError::InvalidParameters(format!(
                "step must be a positive finite number, got {}",
                self.step
            )));
        }
        if !self.angle.is_finite() {
            return Err(LSystemError::InvalidParameters(format!(
                "angle must be finite, got {}",
                self.angle
            )));
        }
        Ok(())
    }
}

/// Fixed drawing style and canvas headroom.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Added to both canvas dimensions around the drawing.
    pub margin: f32,
    pub pen_color: [u8; 3],
    pub fill_color: [u8; 3],
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            margin: DEFAULT_CANVAS_MARGIN,
            pen_color: [255, 0, 0],
            fill_color: [255, 255, 0],
        }
    }
}

impl RenderConfig {
    /// A headless context with a [`RecordingTurtle`] styled by this config.
    pub fn recording_context(&self) -> RenderContext<RecordingTurtle, RecordingCanvas> {
        RenderContext::with_bounds(
            RecordingTurtle::new().with_colors(self.pen_color, self.fill_color),
            RecordingCanvas::new(),
            BoundsTracker::new(self.margin),
        )
    }
}

/// A complete scene file: run parameters plus optional render settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    #[serde(flatten)]
    pub lsystem: LSystemParams,
    #[serde(default)]
    pub render: RenderConfig,
}

impl SceneConfig {
    pub fn from_json(text: &str) -> Result<Self, LSystemError> {
        Ok(serde_json::from_str(text)?)
    }
}

/// Classic grammars, ready to draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Preset {
    QuadraticKochIsland,
    KochCurve,
    IslandsAndLakes,
    KochA,
    KochB,
    KochC,
    KochD,
    PlantA,
    PlantB,
}

impl Preset {
    pub const ALL: [Preset; 9] = [
        Preset::QuadraticKochIsland,
        Preset::KochCurve,
        Preset::IslandsAndLakes,
        Preset::KochA,
        Preset::KochB,
        Preset::KochC,
        Preset::KochD,
        Preset::PlantA,
        Preset::PlantB,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::QuadraticKochIsland => "quadratic-koch-island",
            Self::KochCurve => "koch-curve",
            Self::IslandsAndLakes => "islands-and-lakes",
            Self::KochA => "koch-a",
            Self::KochB => "koch-b",
            Self::KochC => "koch-c",
            Self::KochD => "koch-d",
            Self::PlantA => "plant-a",
            Self::PlantB => "plant-b",
        }
    }

    pub fn params(self) -> LSystemParams {
        match self {
            Self::QuadraticKochIsland => LSystemParams::new(
                2,
                20.0,
                90.0,
                "F-F-F-F",
                &[('F', "F+FF-FF-F-F+F+FF-F-F+F+FF+FF-F")],
            ),
            Self::KochCurve => LSystemParams::new(4, 30.0, 90.0, "-F", &[('F', "F+F-F-F+F")]),
            Self::IslandsAndLakes => LSystemParams::new(
                2,
                20.0,
                90.0,
                "F+F+F+F",
                &[
                    ('F', "F+f-FF+F+FF+Ff+FF-f+FF-F-FF-Ff-FFF"),
                    ('f', "ffffff"),
                ],
            ),
            Self::KochA => {
                LSystemParams::new(4, 20.0, 90.0, "F-F-F-F", &[('F', "FF-F-F-F-F-F+F")])
            }
            Self::KochB => {
                LSystemParams::new(4, 20.0, 90.0, "F-F-F-F", &[('F', "FF-F-F-F-FF")])
            }
            Self::KochC => {
                LSystemParams::new(3, 20.0, 90.0, "F-F-F-F", &[('F', "FF-F+F-F-FF")])
            }
            Self::KochD => {
                LSystemParams::new(4, 20.0, 90.0, "F-F-F-F", &[('F', "FF-F--F-F")])
            }
            Self::PlantA => LSystemParams::new(5, 20.0, 25.7, "F", &[('F', "F[+F]F[-F]F")]),
            Self::PlantB => {
                LSystemParams::new(4, 20.0, 22.5, "F", &[('F', "FF-[-F+F+F]+[+F-F-F]")])
            }
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for Preset {
    type Err = LSystemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| {
                let known: Vec<&str> = Self::ALL.iter().map(|p| p.name()).collect();
                LSystemError::InvalidParameters(format!(
                    "unknown preset {s:?}, expected one of: {}",
                    known.join(", ")
                ))
            })
    }
}
