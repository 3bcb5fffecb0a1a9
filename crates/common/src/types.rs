use glam::{Mat4, Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// How a vertex buffer is assembled into triangles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Topology {
    /// Every three vertices form an independent triangle.
    #[default]
    TriangleList,
    /// Each vertex after the second forms a triangle with the previous two.
    TriangleStrip,
}

/// Render-space placement of a mesh: translation plus a per-axis scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub position: Vec3,
    pub scale: Vec3,
}

impl Placement {
    pub fn new(position: Vec3, scale: Vec3) -> Self {
        Self { position, scale }
    }

    /// Scale x and y only; heights are drawn as stored.
    pub fn planar(position: Vec3, scale: Vec2) -> Self {
        Self::new(position, scale.extend(1.0))
    }

    /// Same scale on every axis, e.g. to undo a quantization scale.
    pub fn uniform(position: Vec3, scale: f32) -> Self {
        Self::new(position, Vec3::splat(scale))
    }

    /// Model transform: scale, then translate.
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, Quat::IDENTITY, self.position)
    }
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

/// Read-only camera vectors handed to ray casting and rendering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraView {
    /// Eye position in world space.
    pub position: Vec3,
    /// Point the camera looks at.
    pub target: Vec3,
    pub up: Vec3,
}

impl CameraView {
    /// Unnormalized viewing direction.
    pub fn direction(&self) -> Vec3 {
        self.target - self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placement_default_is_identity() {
        let p = Placement::default();
        assert_eq!(p.model_matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn planar_placement_keeps_heights() {
        let p = Placement::planar(Vec3::new(1.0, 2.0, 3.0), Vec2::new(0.5, 0.25));
        let out = p.model_matrix().transform_point3(Vec3::new(2.0, 4.0, 1.0));
        assert_eq!(out, Vec3::new(2.0, 3.0, 4.0));
    }

    #[test]
    fn uniform_placement_undoes_quantization_scale() {
        let p = Placement::uniform(Vec3::ZERO, 0.125);
        let out = p.model_matrix().transform_point3(Vec3::new(80.0, -16.0, 32.0));
        assert_eq!(out, Vec3::new(10.0, -2.0, 4.0));
    }

    #[test]
    fn camera_direction_points_at_target() {
        let view = CameraView {
            position: Vec3::new(0.0, -4.0, 5.0),
            target: Vec3::new(0.0, 0.0, 1.0),
            up: Vec3::Y,
        };
        assert_eq!(view.direction(), Vec3::new(0.0, 4.0, -4.0));
    }
}
