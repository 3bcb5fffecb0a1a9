use std::f32::consts::PI;

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::mesh::MeshError;
use crate::quad::{Quad, QuadCorner};

/// Rectangle in texture space, `min` at the first quad corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UvRect {
    pub min: Vec2,
    pub max: Vec2,
}

impl UvRect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }
}

/// An arched bridge running along +y, centred on x = 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeShape {
    /// y coordinate where the deck starts (at ground height).
    pub start_y: f32,
    pub length: f32,
    pub half_width: f32,
    /// Height of the arch at mid-span.
    pub rise: f32,
    pub segments: u32,
    /// Side walls rise this far above the deck. Zero leaves the deck open.
    pub wall_height: f32,
    pub deck_uv: UvRect,
    pub wall_uv: UvRect,
}

impl Default for BridgeShape {
    fn default() -> Self {
        Self {
            start_y: 10.0,
            length: 100.0,
            half_width: 5.0,
            rise: 4.0,
            segments: 50,
            wall_height: 1.0,
            deck_uv: UvRect::new(Vec2::new(0.0, 0.3125), Vec2::new(0.125, 0.25)),
            wall_uv: UvRect::new(Vec2::new(0.125, 0.3125), Vec2::new(0.25, 0.25)),
        }
    }
}

impl BridgeShape {
    /// Deck height at parameter `t` in `[0, 1]` along the span.
    pub fn deck_height(&self, t: f32) -> f32 {
        self.rise * (PI * t).sin()
    }

    fn validate(&self) -> Result<(), MeshError> {
        if self.segments == 0 {
            return Err(MeshError::InvalidShape("bridge needs at least one segment"));
        }
        if !(self.length.is_finite() && self.length > 0.0) {
            return Err(MeshError::InvalidShape("bridge length must be positive"));
        }
        if !(self.half_width.is_finite() && self.half_width > 0.0) {
            return Err(MeshError::InvalidShape("bridge width must be positive"));
        }
        if !(self.rise.is_finite() && self.start_y.is_finite()) {
            return Err(MeshError::InvalidShape("bridge rise and start must be finite"));
        }
        if !(self.wall_height.is_finite() && self.wall_height >= 0.0) {
            return Err(MeshError::InvalidShape("wall height must be non-negative"));
        }
        Ok(())
    }
}

/// Generate the deck and side-wall quads of a curved bridge.
///
/// Per segment: the deck, then the left wall, then the right wall. Deck
/// quads slant between the arch heights at their two edges; walls follow the
/// deck edge and face outward.
pub fn bridge_quads(shape: &BridgeShape) -> Result<Vec<Quad>, MeshError> {
    shape.validate()?;

    let walls = shape.wall_height > 0.0;
    let per_segment = if walls { 3 } else { 1 };
    let mut quads = Vec::with_capacity(shape.segments as usize * per_segment);

    let w = shape.half_width;
    let h = shape.wall_height;
    let deck = shape.deck_uv;
    let wall = shape.wall_uv;

    for i in 0..shape.segments {
        let t0 = i as f32 / shape.segments as f32;
        let t1 = (i + 1) as f32 / shape.segments as f32;
        let y0 = shape.start_y + shape.length * t0;
        let y1 = shape.start_y + shape.length * t1;
        let z0 = shape.deck_height(t0);
        let z1 = shape.deck_height(t1);

        quads.push(Quad::new([
            QuadCorner::new(Vec3::new(-w, y0, z0), deck.min),
            QuadCorner::new(Vec3::new(w, y0, z0), Vec2::new(deck.max.x, deck.min.y)),
            QuadCorner::new(Vec3::new(w, y1, z1), deck.max),
            QuadCorner::new(Vec3::new(-w, y1, z1), Vec2::new(deck.min.x, deck.max.y)),
        ]));

        if !walls {
            continue;
        }

        quads.push(Quad::new([
            QuadCorner::new(Vec3::new(-w, y1, z1), wall.min),
            QuadCorner::new(Vec3::new(-w, y0, z0), Vec2::new(wall.max.x, wall.min.y)),
            QuadCorner::new(Vec3::new(-w, y0, z0 + h), wall.max),
            QuadCorner::new(Vec3::new(-w, y1, z1 + h), Vec2::new(wall.min.x, wall.max.y)),
        ]));
        quads.push(Quad::new([
            QuadCorner::new(Vec3::new(w, y0, z0), wall.min),
            QuadCorner::new(Vec3::new(w, y1, z1), Vec2::new(wall.max.x, wall.min.y)),
            QuadCorner::new(Vec3::new(w, y1, z1 + h), wall.max),
            QuadCorner::new(Vec3::new(w, y0, z0 + h), Vec2::new(wall.min.x, wall.max.y)),
        ]));
    }

    Ok(quads)
}
