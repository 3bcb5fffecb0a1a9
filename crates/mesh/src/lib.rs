//! Procedural mesh building.
//!
//! Turns a handful of control points into packed vertex arrays ready for a
//! vertex buffer: 16-bit positions at a caller-chosen scale plus a packed
//! byte-pair texture coordinate.
//!
//! # Invariants
//! - Meshes are immutable once built.
//! - Out-of-range input is an error, never wrapped or skipped.
//! - Every builder emits a triangle list.
//! - Uploading is the renderer's job; building stops at the vertex array.

mod circle;
mod mesh;
mod quad;
mod shapes;
mod vertex;

pub use bridgewalk_common::Topology;
pub use circle::{CIRCLE_RADIUS, MAX_CIRCLE_ITERATIONS, build_circle, circle_vertex_count};
pub use mesh::{Mesh, MeshError, build_quads};
pub use quad::{Quad, QuadCorner};
pub use shapes::{BridgeShape, UvRect, bridge_quads};
pub use vertex::{Vertex, pack_uv, quantize_component};
