use std::time::Duration;

use bridgewalk_common::Placement;
use bridgewalk_kernel::{World, WorldLayout};
use glam::{Vec2, Vec3};

use crate::backend::{MeshHandle, RenderBackend};
use crate::camera::FollowCamera;

/// Per-frame drawing parameters that are not part of the simulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneStyle {
    pub player_draw_height: f32,
    pub marker_draw_height: f32,
    pub marker_scale: f32,
}

impl SceneStyle {
    pub fn from_layout(layout: &WorldLayout) -> Self {
        Self {
            player_draw_height: layout.player.draw_height,
            marker_draw_height: layout.marker.draw_height,
            marker_scale: layout.marker.scale,
        }
    }
}

impl Default for SceneStyle {
    fn default() -> Self {
        Self::from_layout(&WorldLayout::default())
    }
}

/// What one frame drew.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStats {
    pub draws: usize,
    pub marker_drawn: bool,
    pub player_at: Vec3,
}

/// Draws a [`World`] through a [`RenderBackend`].
///
/// Every mesh is uploaded once at construction; frames only issue draws.
/// Draw order: static geometry, the player, then the target marker.
pub struct SceneRenderer<B: RenderBackend> {
    backend: B,
    geometry: Vec<(MeshHandle, Placement)>,
    player: MeshHandle,
    marker: MeshHandle,
    style: SceneStyle,
}

impl<B: RenderBackend> SceneRenderer<B> {
    pub fn new(mut backend: B, world: &World, style: SceneStyle) -> Self {
        let geometry = world
            .geometry()
            .iter()
            .map(|g| {
                let handle = backend.upload_mesh(g.mesh.vertices(), g.mesh.topology());
                (handle, g.placement)
            })
            .collect();
        let model = world.player().model();
        let player = backend.upload_mesh(model.vertices(), model.topology());
        let marker = backend.upload_mesh(world.marker().vertices(), world.marker().topology());
        tracing::debug!(meshes = world.geometry().len() + 2, "scene uploaded");

        Self {
            backend,
            geometry,
            player,
            marker,
            style,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    pub fn render_frame(&mut self, world: &World, camera: &FollowCamera, now: Duration) -> FrameStats {
        self.backend.begin_frame(camera.view_projection());
        let mut draws = 0;

        for (handle, placement) in &self.geometry {
            self.backend.draw_mesh(*handle, placement.model_matrix());
            draws += 1;
        }

        let player = world.player();
        let pos = world.interpolated_position(now).as_vec3();
        let player_at = Vec3::new(pos.x, pos.y, self.style.player_draw_height);
        let sprite = Placement::planar(player_at, player.sprite_scale());
        self.backend.draw_mesh(self.player, sprite.model_matrix());
        draws += 1;

        let marker_drawn = player.has_target_position();
        if marker_drawn {
            let target = player.target_position().as_vec2();
            let at = target.extend(self.style.marker_draw_height);
            let placement = Placement::planar(at, Vec2::splat(self.style.marker_scale));
            self.backend.draw_mesh(self.marker, placement.model_matrix());
            draws += 1;
        }

        tracing::trace!(draws, marker_drawn, "frame rendered");
        FrameStats {
            draws,
            marker_drawn,
            player_at,
        }
    }
}
