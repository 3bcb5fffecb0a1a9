use bridgewalk_mesh::{BridgeShape, Quad, UvRect};
use glam::{DVec2, Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// An axis-aligned face given by two opposite corners, the form world
/// content is written in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FaceSpec {
    pub from: Vec3,
    pub to: Vec3,
    pub uv_from: Vec2,
    pub uv_to: Vec2,
}

impl FaceSpec {
    pub fn new(from: Vec3, to: Vec3, uv_from: Vec2, uv_to: Vec2) -> Self {
        Self {
            from,
            to,
            uv_from,
            uv_to,
        }
    }

    pub fn to_quad(&self) -> Quad {
        Quad::from_box_corners(self.from, self.to, self.uv_from, self.uv_to)
    }
}

/// The player's sprite and extents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerLayout {
    pub start: DVec2,
    /// Upright sprite face in model space.
    pub sprite: FaceSpec,
    /// Quantization scale of the sprite mesh.
    pub mesh_scale: f32,
    /// Planar render scale applied when drawing the sprite.
    pub sprite_scale: Vec2,
    pub width: f64,
    pub height: f64,
    /// Height above the ground the sprite is drawn at.
    pub draw_height: f32,
}

impl Default for PlayerLayout {
    fn default() -> Self {
        Self {
            start: DVec2::ZERO,
            sprite: FaceSpec::new(
                Vec3::new(-1.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 2.0),
                Vec2::new(0.0, 0.25),
                Vec2::new(0.125, 0.0),
            ),
            mesh_scale: 1.0,
            sprite_scale: Vec2::splat(0.5),
            width: 1.0,
            height: 2.0,
            draw_height: 0.125,
        }
    }
}

/// The circle drawn under a pending move target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerLayout {
    pub iterations: u32,
    pub uv: UvRect,
    /// Planar scale that brings the full-range fan down to world units.
    pub scale: f32,
    pub draw_height: f32,
}

impl Default for MarkerLayout {
    fn default() -> Self {
        Self {
            iterations: 3,
            uv: UvRect::new(Vec2::new(0.125, 0.125), Vec2::new(0.25, 0.25)),
            scale: 2f32.powi(-15),
            draw_height: 0.125,
        }
    }
}

/// World content as data: static geometry, the player sprite, the marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldLayout {
    /// Static geometry is quantized at this scale and drawn at its inverse.
    pub geometry_scale: f32,
    pub ground: FaceSpec,
    pub bridge: BridgeShape,
    pub landing: FaceSpec,
    /// Additional free-form quads appended to the static geometry.
    pub extra_quads: Vec<Quad>,
    pub player: PlayerLayout,
    pub marker: MarkerLayout,
}

impl Default for WorldLayout {
    fn default() -> Self {
        Self {
            geometry_scale: 10.0,
            ground: FaceSpec::new(
                Vec3::new(-10.0, -10.0, 0.0),
                Vec3::new(10.0, 10.0, 0.0),
                Vec2::new(0.0, 1.0),
                Vec2::new(0.5, 0.5),
            ),
            bridge: BridgeShape::default(),
            landing: FaceSpec::new(
                Vec3::new(-10.0, 110.0, 0.0),
                Vec3::new(10.0, 130.0, 0.0),
                Vec2::new(0.5, 1.0),
                Vec2::new(1.0, 0.5),
            ),
            extra_quads: Vec::new(),
            player: PlayerLayout::default(),
            marker: MarkerLayout::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_landing_meets_bridge_end() {
        let layout = WorldLayout::default();
        assert_eq!(
            layout.bridge.start_y + layout.bridge.length,
            layout.landing.from.y
        );
        assert_eq!(layout.bridge.start_y, layout.ground.to.y);
    }

    #[test]
    fn face_spec_expands_to_canonical_quad() {
        let face = PlayerLayout::default().sprite;
        let quad = face.to_quad();
        assert_eq!(quad.corners()[0].position, face.from);
        assert_eq!(quad.corners()[2].position, face.to);
    }

    #[test]
    fn marker_scale_undoes_full_radius() {
        let m = MarkerLayout::default();
        assert_eq!(m.scale * 32768.0, 1.0);
    }
}
