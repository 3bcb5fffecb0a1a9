use bridgewalk_common::Topology;

use crate::quad::Quad;
use crate::vertex::Vertex;

/// Errors from mesh building. All of them are precondition violations in the
/// caller's input; nothing is skipped or coerced.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MeshError {
    #[error("quad must have exactly 4 corners, got {corners}")]
    MalformedQuad { corners: usize },
    #[error("scaled position component {value} does not fit in a signed 16-bit integer")]
    PositionOutOfRange { value: f64 },
    #[error("texture coordinate {value} is outside [0, 1]")]
    UvOutOfRange { value: f64 },
    #[error("circle iteration count {iterations} is outside 1..={max}", max = crate::MAX_CIRCLE_ITERATIONS)]
    InvalidIterations { iterations: u32 },
    #[error("invalid shape: {0}")]
    InvalidShape(&'static str),
}

/// An immutable, ready-to-upload vertex array plus its topology.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mesh {
    vertices: Vec<Vertex>,
    topology: Topology,
}

impl Mesh {
    pub(crate) fn from_parts(vertices: Vec<Vertex>, topology: Topology) -> Self {
        Self { vertices, topology }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    /// Raw bytes of the vertex array, as handed to a GPU buffer.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}

/// Lay out each quad as two triangles `(0,1,2,2,3,0)`, scaling every
/// position by `scale` before quantizing.
pub fn build_quads(quads: &[Quad], scale: f32) -> Result<Mesh, MeshError> {
    let _span = tracing::debug_span!("build_quads", quads = quads.len(), scale).entered();

    if !scale.is_finite() {
        return Err(MeshError::InvalidShape("quad scale must be finite"));
    }

    let mut vertices = Vec::with_capacity(quads.len() * Quad::TRIANGLE_ORDER.len());
    for quad in quads {
        for corner in quad.triangle_corners() {
            vertices.push(Vertex::quantize(corner.position, scale, corner.uv)?);
        }
    }

    tracing::trace!(vertices = vertices.len(), "quad mesh built");
    Ok(Mesh::from_parts(vertices, Topology::TriangleList))
}
