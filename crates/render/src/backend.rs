use std::fmt::Write as _;

use bridgewalk_common::Topology;
use bridgewalk_mesh::Vertex;
use glam::Mat4;

/// Opaque handle to a mesh living on the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshHandle(pub u64);

/// The graphics API seen from the scene: upload once, draw every frame.
///
/// Vertices arrive in the packed [`Vertex`] layout, 8 bytes each: three
/// `i16` positions then one `u16` texture coordinate holding `u` in the low
/// byte and `v` in the high byte.
pub trait RenderBackend {
    /// Called once per frame before any draw.
    fn begin_frame(&mut self, _view_projection: Mat4) {}

    fn upload_mesh(&mut self, vertices: &[Vertex], topology: Topology) -> MeshHandle;

    /// Draw a previously uploaded mesh with the given model matrix. The
    /// backend combines it with the frame's view-projection.
    fn draw_mesh(&mut self, mesh: MeshHandle, model: Mat4);
}

#[derive(Debug, Clone, PartialEq)]
pub struct UploadRecord {
    pub handle: MeshHandle,
    pub vertex_count: usize,
    pub topology: Topology,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawRecord {
    pub handle: MeshHandle,
    pub model: Mat4,
}

/// Backend that draws nothing and remembers everything.
///
/// Useful for headless runs, logging, and testing the draw order.
#[derive(Debug, Default)]
pub struct DebugTextBackend {
    uploads: Vec<UploadRecord>,
    draws: Vec<DrawRecord>,
    view_projection: Mat4,
    frames: u64,
}

impl DebugTextBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn uploads(&self) -> &[UploadRecord] {
        &self.uploads
    }

    /// Draw calls of the current frame.
    pub fn draws(&self) -> &[DrawRecord] {
        &self.draws
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn view_projection(&self) -> Mat4 {
        self.view_projection
    }

    /// Human-readable dump of the current frame.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "=== Frame {} (meshes={}, draws={}) ===",
            self.frames,
            self.uploads.len(),
            self.draws.len()
        );
        for draw in &self.draws {
            let (scale, _, translation) = draw.model.to_scale_rotation_translation();
            let vertices = self
                .uploads
                .iter()
                .find(|u| u.handle == draw.handle)
                .map_or(0, |u| u.vertex_count);
            let _ = writeln!(
                out,
                "  mesh #{} vertices={} at ({:.2}, {:.2}, {:.2}) scale ({:.4}, {:.4})",
                draw.handle.0,
                vertices,
                translation.x,
                translation.y,
                translation.z,
                scale.x,
                scale.y
            );
        }
        out
    }
}

impl RenderBackend for DebugTextBackend {
    fn begin_frame(&mut self, view_projection: Mat4) {
        self.frames += 1;
        self.view_projection = view_projection;
        self.draws.clear();
    }

    fn upload_mesh(&mut self, vertices: &[Vertex], topology: Topology) -> MeshHandle {
        let handle = MeshHandle(self.uploads.len() as u64);
        self.uploads.push(UploadRecord {
            handle,
            vertex_count: vertices.len(),
            topology,
        });
        handle
    }

    fn draw_mesh(&mut self, mesh: MeshHandle, model: Mat4) {
        self.draws.push(DrawRecord {
            handle: mesh,
            model,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn handles_are_sequential() {
        let mut b = DebugTextBackend::new();
        let a = b.upload_mesh(&[], Topology::TriangleList);
        let c = b.upload_mesh(&[], Topology::TriangleStrip);
        assert_eq!(a, MeshHandle(0));
        assert_eq!(c, MeshHandle(1));
        assert_eq!(b.uploads()[1].topology, Topology::TriangleStrip);
    }

    #[test]
    fn begin_frame_clears_previous_draws() {
        let mut b = DebugTextBackend::new();
        let h = b.upload_mesh(&[], Topology::TriangleList);
        b.begin_frame(Mat4::IDENTITY);
        b.draw_mesh(h, Mat4::IDENTITY);
        b.draw_mesh(h, Mat4::IDENTITY);
        assert_eq!(b.draws().len(), 2);
        b.begin_frame(Mat4::IDENTITY);
        assert!(b.draws().is_empty());
        assert_eq!(b.frames(), 2);
    }

    #[test]
    fn text_lists_draw_translation() {
        let mut b = DebugTextBackend::new();
        let h = b.upload_mesh(&[], Topology::TriangleList);
        b.begin_frame(Mat4::IDENTITY);
        b.draw_mesh(h, Mat4::from_translation(Vec3::new(1.5, -2.0, 0.5)));
        let text = b.render_text();
        assert!(text.contains("Frame 1"));
        assert!(text.contains("at (1.50, -2.00, 0.50)"));
    }
}
