use std::time::Duration;

use bridgewalk_common::Placement;
use bridgewalk_mesh::{Mesh, Quad, bridge_quads, build_circle, build_quads};
use glam::{DVec2, DVec3, Vec3};
use serde::{Deserialize, Serialize};

use crate::KernelError;
use crate::clock::{ClockState, SimClock};
use crate::config::SimConfig;
use crate::layout::WorldLayout;
use crate::player::Player;

/// A record of one input-driven mutation.
///
/// Tick drains are not logged; [`SimClock::ticks_performed`] counts them.
/// The log grows only with input, and the frame loop drains it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WorldEvent {
    TargetSet { target: DVec2 },
    Teleported { position: DVec2 },
    PhysicsToggled { state: ClockState },
    TickRateScaled { scale: f64 },
}

/// Static geometry drawn every frame at a fixed placement.
#[derive(Debug, Clone)]
pub struct GeometryEntry {
    pub mesh: Mesh,
    pub placement: Placement,
}

/// The authoritative game state: static geometry, the player, the target
/// marker and the simulation clock.
///
/// Input reaches the player only through the methods here, so every
/// mutation is validated and logged.
#[derive(Debug, Clone)]
pub struct World {
    geometry: Vec<GeometryEntry>,
    player: Player,
    marker: Mesh,
    clock: SimClock,
    event_log: Vec<WorldEvent>,
}

impl World {
    /// Build every mesh named by `layout` and start the clock at `start`.
    pub fn from_layout(
        layout: &WorldLayout,
        config: SimConfig,
        start: Duration,
    ) -> Result<Self, KernelError> {
        let _span = tracing::info_span!("world_from_layout").entered();

        if !(layout.geometry_scale.is_finite() && layout.geometry_scale > 0.0) {
            return Err(KernelError::InvalidConfig("geometry_scale must be positive"));
        }

        let mut quads = vec![layout.ground.to_quad()];
        quads.extend(bridge_quads(&layout.bridge)?);
        quads.push(layout.landing.to_quad());
        quads.extend(layout.extra_quads.iter().copied());

        let terrain = build_quads(&quads, layout.geometry_scale)?;
        let geometry = vec![GeometryEntry {
            mesh: terrain,
            placement: Placement::uniform(Vec3::ZERO, 1.0 / layout.geometry_scale),
        }];

        let p = &layout.player;
        let sprite = build_quads(&[p.sprite.to_quad()], p.mesh_scale)?;
        let player = Player::new(p.start, sprite, p.sprite_scale, p.width, p.height);

        let m = &layout.marker;
        let marker = build_circle(m.iterations, m.uv.min, m.uv.max)?;

        let clock = SimClock::new(config, start)?;

        tracing::debug!(
            quads = quads.len(),
            vertices = geometry[0].mesh.vertex_count(),
            marker_vertices = marker.vertex_count(),
            "world built"
        );

        Ok(Self {
            geometry,
            player,
            marker,
            clock,
            event_log: Vec::new(),
        })
    }

    /// The canonical world with default tuning.
    pub fn with_defaults(start: Duration) -> Result<Self, KernelError> {
        Self::from_layout(&WorldLayout::default(), SimConfig::default(), start)
    }

    pub fn geometry(&self) -> &[GeometryEntry] {
        &self.geometry
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    /// Circle mesh drawn under a pending target.
    pub fn marker(&self) -> &Mesh {
        &self.marker
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    pub fn events(&self) -> &[WorldEvent] {
        &self.event_log
    }

    pub fn drain_events(&mut self) -> Vec<WorldEvent> {
        std::mem::take(&mut self.event_log)
    }

    /// Run the ticks due at `now`. Returns how many ran.
    pub fn perform_ticks(&mut self, now: Duration) -> u32 {
        self.clock.perform_ticks(now, &mut self.player)
    }

    /// Player render position at `now`; z is the player's vertical centre.
    pub fn interpolated_position(&self, now: Duration) -> DVec3 {
        self.clock
            .interpolate(&self.player, now)
            .extend(self.player.height() / 2.0)
    }

    pub fn set_target_position(&mut self, target: DVec2) -> Result<(), KernelError> {
        ensure_finite(target)?;
        self.player.set_target_position(target);
        tracing::debug!(x = target.x, y = target.y, "target set");
        self.event_log.push(WorldEvent::TargetSet { target });
        Ok(())
    }

    pub fn teleport(&mut self, position: DVec2) -> Result<(), KernelError> {
        ensure_finite(position)?;
        self.player.teleport(position);
        tracing::debug!(x = position.x, y = position.y, "teleported");
        self.event_log.push(WorldEvent::Teleported { position });
        Ok(())
    }

    pub fn toggle_physics(&mut self, now: Duration) -> ClockState {
        let state = self.clock.toggle_physics(now);
        self.event_log.push(WorldEvent::PhysicsToggled { state });
        state
    }

    pub fn set_tick_rate_scale(&mut self, scale: f64, now: Duration) -> Result<(), KernelError> {
        self.clock.set_tick_rate_scale(scale, now)?;
        self.event_log.push(WorldEvent::TickRateScaled { scale });
        Ok(())
    }

    /// Total quads making up the static geometry.
    pub fn geometry_quad_count(&self) -> usize {
        self.geometry
            .iter()
            .map(|g| g.mesh.vertex_count() / Quad::TRIANGLE_ORDER.len())
            .sum()
    }
}

fn ensure_finite(p: DVec2) -> Result<(), KernelError> {
    if p.is_finite() {
        Ok(())
    } else {
        Err(KernelError::NonFiniteCoordinate { x: p.x, y: p.y })
    }
}
