use std::fmt;

use bridgewalk_kernel::{ClockState, World};
use serde::Serialize;

/// Read-only queries against the world for debugging and CLI output.
pub struct SimInspector;

impl SimInspector {
    pub fn summary(world: &World) -> SimSummary {
        let clock = world.clock();
        let player = world.player();
        let p = player.position();
        let t = player.target_position();
        SimSummary {
            ticks: clock.ticks_performed(),
            state: clock.state(),
            tick_rate: clock.tick_rate(),
            tick_ms: clock.tick_duration().as_secs_f64() * 1000.0,
            position: [p.x, p.y],
            target: player.has_target_position().then_some([t.x, t.y]),
            angle: player.angle(),
            geometry_entries: world.geometry().len(),
            geometry_quads: world.geometry_quad_count(),
            pending_events: world.events().len(),
        }
    }
}

/// Snapshot of the simulation for display or JSON export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimSummary {
    pub ticks: u64,
    pub state: ClockState,
    pub tick_rate: f64,
    pub tick_ms: f64,
    pub position: [f64; 2],
    /// `None` once the player stands on its target.
    pub target: Option<[f64; 2]>,
    pub angle: f64,
    pub geometry_entries: usize,
    pub geometry_quads: usize,
    pub pending_events: usize,
}

impl fmt::Display for SimSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match self.state {
            ClockState::Running => "running",
            ClockState::Paused => "paused",
        };
        write!(
            f,
            "Sim: ticks={} {} rate={:.2}/s pos=({:.2}, {:.2})",
            self.ticks, state, self.tick_rate, self.position[0], self.position[1]
        )?;
        if let Some([x, y]) = self.target {
            write!(f, " target=({x:.2}, {y:.2})")?;
        }
        write!(
            f,
            " geometry={} quads={} pending_events={}",
            self.geometry_entries, self.geometry_quads, self.pending_events
        )
    }
}
