use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::MeshError;

/// One corner of a quad: a point in model space and its texture coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuadCorner {
    pub position: Vec3,
    pub uv: Vec2,
}

impl QuadCorner {
    pub fn new(position: Vec3, uv: Vec2) -> Self {
        Self { position, uv }
    }
}

/// A four-cornered face, corners listed around the perimeter.
///
/// Corners need not be coplanar with an axis, which is what lets bridge
/// decks slant and walls follow the deck.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quad {
    corners: [QuadCorner; 4],
}

impl Quad {
    /// Corner indices of the two triangles a quad is split into. Both share
    /// the `0-2` diagonal.
    pub const TRIANGLE_ORDER: [usize; 6] = [0, 1, 2, 2, 3, 0];

    pub fn new(corners: [QuadCorner; 4]) -> Self {
        Self { corners }
    }

    /// Build a quad from a corner list that must hold exactly four corners.
    pub fn from_corners(corners: &[QuadCorner]) -> Result<Self, MeshError> {
        let corners: [QuadCorner; 4] = corners
            .try_into()
            .map_err(|_| MeshError::MalformedQuad {
                corners: corners.len(),
            })?;
        Ok(Self { corners })
    }

    /// Legacy two-corner form: opposite corners `p1` and `p2` of a face that
    /// is flat in at least one axis, with `uv1`/`uv2` at those corners.
    ///
    /// Expands to `(x1,y1,z1) (x2,y1,z1) (x2,y2,z2) (x1,y2,z2)`, so x spans
    /// the first edge and y/z together span the second. Prefer [`Quad::new`]
    /// for anything that is not an axis-aligned box face.
    pub fn from_box_corners(p1: Vec3, p2: Vec3, uv1: Vec2, uv2: Vec2) -> Self {
        Self::new([
            QuadCorner::new(p1, uv1),
            QuadCorner::new(Vec3::new(p2.x, p1.y, p1.z), Vec2::new(uv2.x, uv1.y)),
            QuadCorner::new(p2, uv2),
            QuadCorner::new(Vec3::new(p1.x, p2.y, p2.z), Vec2::new(uv1.x, uv2.y)),
        ])
    }

    pub fn corners(&self) -> &[QuadCorner; 4] {
        &self.corners
    }

    /// The six corners of both triangles, in draw order.
    pub fn triangle_corners(&self) -> impl Iterator<Item = &QuadCorner> + '_ {
        Self::TRIANGLE_ORDER.iter().map(|&i| &self.corners[i])
    }
}
