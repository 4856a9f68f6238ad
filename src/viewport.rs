//! Pan and zoom over a finished drawing.
//!
//! [`ViewportController`] turns raw pointer input into a world-to-view
//! transform. It never touches the turtle or the bounding box, so it can be
//! driven by any event loop once drawing has completed.

use glam::{Affine2, Vec2};

/// Scale applied per wheel notch towards the viewer.
pub const ZOOM_IN_FACTOR: f32 = 1.1;
/// Scale applied per wheel notch away from the viewer.
pub const ZOOM_OUT_FACTOR: f32 = 0.9;

/// Pointer input understood by the viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    /// Mouse wheel; negative `delta` zooms out, anything else zooms in.
    Wheel { delta: f32 },
    /// Pointer moved with the primary button held, in view coordinates.
    Drag { position: Vec2 },
    /// Primary button released.
    Release,
}

/// Uniform zoom plus pan, anchored at the view origin.
#[derive(Clone, Debug)]
pub struct ViewportController {
    world_to_view: Affine2,
    zoom: f32,
    min_zoom: f32,
    max_zoom: f32,
    drag_anchor: Option<Vec2>,
}

impl Default for ViewportController {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewportController {
    /// Identity transform; zoom is clamped to `[1e-3, 1e3]`.
    pub fn new() -> Self {
        Self {
            world_to_view: Affine2::IDENTITY,
            zoom: 1.0,
            min_zoom: 1e-3,
            max_zoom: 1e3,
            drag_anchor: None,
        }
    }

    /// Sets the zoom range, normalized so that `min <= max`.
    pub fn set_zoom_limits(&mut self, min_zoom: f32, max_zoom: f32) {
        let (min_zoom, max_zoom) = if min_zoom <= max_zoom {
            (min_zoom, max_zoom)
        } else {
            (max_zoom, min_zoom)
        };
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
    }

    pub fn handle(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Wheel { delta } => {
                let factor = if delta < 0.0 {
                    ZOOM_OUT_FACTOR
                } else {
                    ZOOM_IN_FACTOR
                };
                self.zoom_by(factor);
            }
            PointerEvent::Drag { position } => {
                let anchor = self.drag_anchor.unwrap_or(position);
                self.pan_by(position - anchor);
                self.drag_anchor = Some(position);
            }
            PointerEvent::Release => self.drag_anchor = None,
        }
    }

    /// Scales the whole view about the view origin. The factor is reduced
    /// as needed to stay inside the zoom limits.
    pub fn zoom_by(&mut self, factor: f32) {
        if factor <= 0.0 {
            return;
        }
        let new_zoom = (self.zoom * factor).clamp(self.min_zoom, self.max_zoom);
        let applied = new_zoom / self.zoom;
        if (applied - 1.0).abs() < f32::EPSILON {
            return;
        }
        self.zoom = new_zoom;
        self.world_to_view = Affine2::from_scale(Vec2::splat(applied)) * self.world_to_view;
    }

    /// Translates the view by `delta` view units.
    pub fn pan_by(&mut self, delta: Vec2) {
        if delta == Vec2::ZERO {
            return;
        }
        self.world_to_view = Affine2::from_translation(delta) * self.world_to_view;
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn pan(&self) -> Vec2 {
        self.world_to_view.translation
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_anchor.is_some()
    }

    pub fn world_to_view(&self) -> Affine2 {
        self.world_to_view
    }

    pub fn to_view(&self, world: Vec2) -> Vec2 {
        self.world_to_view.transform_point2(world)
    }

    pub fn to_world(&self, view: Vec2) -> Vec2 {
        self.world_to_view.inverse().transform_point2(view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec2, b: Vec2) -> bool {
        a.abs_diff_eq(b, 1e-4)
    }

    #[test]
    fn wheel_scales_about_origin() {
        let mut vp = ViewportController::new();
        vp.handle(PointerEvent::Wheel { delta: 120.0 });
        assert!((vp.zoom() - 1.1).abs() < 1e-6);
        assert!(approx(vp.to_view(Vec2::new(10.0, -20.0)), Vec2::new(11.0, -22.0)));
        assert!(approx(vp.to_view(Vec2::ZERO), Vec2::ZERO));

        vp.handle(PointerEvent::Wheel { delta: -120.0 });
        assert!((vp.zoom() - 0.99).abs() < 1e-5);
    }

    #[test]
    fn first_drag_sample_only_anchors() {
        let mut vp = ViewportController::new();
        vp.handle(PointerEvent::Drag {
            position: Vec2::new(50.0, 50.0),
        });
        assert_eq!(vp.pan(), Vec2::ZERO);
        assert!(vp.is_dragging());

        vp.handle(PointerEvent::Drag {
            position: Vec2::new(60.0, 45.0),
        });
        assert!(approx(vp.pan(), Vec2::new(10.0, -5.0)));
    }

    #[test]
    fn release_resets_the_drag() {
        let mut vp = ViewportController::new();
        vp.handle(PointerEvent::Drag {
            position: Vec2::new(0.0, 0.0),
        });
        vp.handle(PointerEvent::Drag {
            position: Vec2::new(5.0, 0.0),
        });
        vp.handle(PointerEvent::Release);
        assert!(!vp.is_dragging());

        // A new drag far away must not jump by the distance to the old anchor.
        vp.handle(PointerEvent::Drag {
            position: Vec2::new(500.0, 500.0),
        });
        assert!(approx(vp.pan(), Vec2::new(5.0, 0.0)));
    }

    #[test]
    fn pan_is_scaled_by_later_zoom_and_round_trips() {
        let mut vp = ViewportController::new();
        vp.pan_by(Vec2::new(10.0, 0.0));
        vp.zoom_by(2.0);
        assert!(approx(vp.pan(), Vec2::new(20.0, 0.0)));

        let world = Vec2::new(3.0, 4.0);
        assert!(approx(vp.to_world(vp.to_view(world)), world));
    }

    #[test]
    fn zoom_is_clamped() {
        let mut vp = ViewportController::new();
        vp.set_zoom_limits(2.0, 0.5);
        vp.zoom_by(10.0);
        assert!((vp.zoom() - 2.0).abs() < 1e-6);
        assert!(approx(vp.to_view(Vec2::ONE), Vec2::splat(2.0)));
    }
}
