//! Simulation kernel: the player, the fixed-timestep clock, render-time
//! interpolation and the world that ties them together.
//!
//! # Invariants
//! - The player moves only inside a tick, and at most `step_distance` per tick.
//! - A single drain runs at most `max_catch_up_ticks` ticks.
//! - `last_tick` never moves backwards.
//! - Interpolation is exactly the previous position at zero elapsed time and
//!   exactly the current position after a full tick.
//! - All input-driven mutations flow through [`World`] and are logged.

pub mod clock;
pub mod config;
pub mod layout;
pub mod player;
pub mod world;

pub use clock::{ClockState, SimClock, interpolate};
pub use config::{GameConfig, SimConfig};
pub use layout::{FaceSpec, MarkerLayout, PlayerLayout, WorldLayout};
pub use player::Player;
pub use world::{GeometryEntry, World, WorldEvent};

use bridgewalk_mesh::MeshError;

/// Errors surfaced by world construction and input handling.
#[derive(Debug, thiserror::Error)]
pub enum KernelError {
    #[error(transparent)]
    Mesh(#[from] MeshError),
    #[error("tick rate scale must be finite and positive, got {scale}")]
    InvalidTickRateScale { scale: f64 },
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
    #[error("coordinate ({x}, {y}) is not finite")]
    NonFiniteCoordinate { x: f64, y: f64 },
    #[error("config parse error: {0}")]
    ConfigParse(#[from] serde_yaml::Error),
}
