use std::f64::consts::PI;

use bridgewalk_common::Topology;
use glam::Vec2;

use crate::mesh::{Mesh, MeshError};
use crate::vertex::{Vertex, pack_uv, quantize_component};

/// Largest magnitude a signed 16-bit component can hold; the fan is built at
/// this radius and scaled down by the model transform.
pub const CIRCLE_RADIUS: f64 = 32767.0;

/// Upper bound on fan iterations. Vertex count roughly doubles per
/// iteration, so this keeps the buffer under 300k vertices.
pub const MAX_CIRCLE_ITERATIONS: u32 = 16;

/// Number of vertices a fan with `iterations` iterations emits: 3 for the
/// base triangle, then `9 * 2^(k - 2)` for iteration `k >= 2`.
///
/// Counts outside `1..=MAX_CIRCLE_ITERATIONS` are rejected the same way
/// [`build_circle`] rejects them.
pub fn circle_vertex_count(iterations: u32) -> Result<usize, MeshError> {
    if !(1..=MAX_CIRCLE_ITERATIONS).contains(&iterations) {
        return Err(MeshError::InvalidIterations { iterations });
    }
    Ok(3 + 9 * ((1usize << (iterations - 1)) - 1))
}

/// Build a disc as a triangle list of ever finer slivers.
///
/// Iteration 1 is the equilateral triangle inscribed in the circle. Each
/// further iteration fills the gap between the previous polygon's edges and
/// the circle with one triangle per edge, doubling the edge count. Texture
/// coordinates map the unit disc onto the `uv_min..uv_max` box, with v
/// growing downward.
pub fn build_circle(iterations: u32, uv_min: Vec2, uv_max: Vec2) -> Result<Mesh, MeshError> {
    let expected = circle_vertex_count(iterations)?;
    let _span = tracing::debug_span!("build_circle", iterations).entered();

    let mut vertices = Vec::with_capacity(expected);

    for vertex in 0..3u32 {
        let theta = PI * 2.0 / 3.0 * vertex as f64;
        vertices.push(circle_vertex(theta, uv_min, uv_max)?);
    }

    let mut polygons: u32 = 3;
    for _ in 2..=iterations {
        for polygon in 0..polygons {
            for vertex in 0..3u32 {
                let theta = PI * (polygon * 2 + vertex) as f64 / polygons as f64;
                vertices.push(circle_vertex(theta, uv_min, uv_max)?);
            }
        }
        polygons *= 2;
    }

    debug_assert_eq!(vertices.len(), expected);
    Ok(Mesh::from_parts(vertices, Topology::TriangleList))
}

fn circle_vertex(theta: f64, uv_min: Vec2, uv_max: Vec2) -> Result<Vertex, MeshError> {
    let (sin, cos) = theta.sin_cos();
    let (u1, v1) = (uv_min.x as f64, uv_min.y as f64);
    let (u2, v2) = (uv_max.x as f64, uv_max.y as f64);
    let u = u1 + (u2 - u1) * 0.5 * (1.0 + cos);
    let v = v1 + (v2 - v1) * 0.5 * (1.0 - sin);
    Ok(Vertex {
        position: [
            quantize_component(cos * CIRCLE_RADIUS)?,
            quantize_component(sin * CIRCLE_RADIUS)?,
            0,
        ],
        uv: pack_uv(u, v)?,
    })
}
