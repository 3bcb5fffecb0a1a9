//! Rendering adapter: draws the world through a backend-agnostic trait.
//!
//! # Invariants
//! - The renderer never mutates the world.
//! - Meshes are uploaded once; frames only issue draws.
//! - Camera state lives here and is handed to input as a read-only view.
//!
//! [`DebugTextBackend`] stands in for a GPU backend in headless runs and
//! tests. Swap in a real implementation of [`RenderBackend`] without
//! changing the scene.

mod backend;
mod camera;
mod scene;

pub use backend::{DebugTextBackend, DrawRecord, MeshHandle, RenderBackend, UploadRecord};
pub use camera::FollowCamera;
pub use scene::{FrameStats, SceneRenderer, SceneStyle};

pub fn crate_info() -> &'static str {
    concat!("bridgewalk-render v", env!("CARGO_PKG_VERSION"))
}
