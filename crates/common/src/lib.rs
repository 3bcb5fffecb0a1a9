//! Shared value types used across the bridgewalk crates.

mod types;

pub use types::{CameraView, Placement, Topology};
