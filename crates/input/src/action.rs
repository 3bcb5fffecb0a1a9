use bridgewalk_common::CameraView;
use glam::{Mat4, Vec2};

use crate::cast::{CastError, cast_to_ground, pixel_to_clip};

/// A game-level action. The world and camera consume actions, never raw
/// device events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Walk toward a ground point.
    SetTarget(Vec2),
    /// Jump to a ground point.
    Teleport(Vec2),
    TogglePhysics,
    /// Multiply the base tick rate by this factor.
    SetTickRateScale(f32),
    /// Zoom the follow camera by whole steps; positive moves away.
    Zoom(i32),
    Noop,
}

impl Action {
    /// Digit `n` slows the simulation to `0.5^n` of its base rate; `.`
    /// toggles physics.
    pub fn from_key(key: char) -> Self {
        match key {
            '.' => Action::TogglePhysics,
            _ => match key.to_digit(10) {
                Some(n) => Action::SetTickRateScale(0.5f32.powi(n as i32)),
                None => Action::Noop,
            },
        }
    }

    /// One zoom step per wheel event, in the direction of the delta.
    pub fn from_wheel(delta_y: f32) -> Self {
        if delta_y > 0.0 {
            Action::Zoom(1)
        } else if delta_y < 0.0 {
            Action::Zoom(-1)
        } else {
            Action::Noop
        }
    }

    /// A pointer press at `pixel` targets the ground point under it.
    pub fn from_pointer(
        pixel: Vec2,
        viewport: Vec2,
        view: &CameraView,
        projection: Mat4,
    ) -> Result<Self, CastError> {
        let clip = pixel_to_clip(pixel, viewport)?;
        let hit = cast_to_ground(clip, view, projection)?;
        tracing::debug!(x = hit.x, y = hit.y, "pointer cast to ground");
        Ok(Action::SetTarget(hit.truncate()))
    }
}
