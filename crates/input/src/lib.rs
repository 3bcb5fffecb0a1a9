//! Input mapping: turns pointer, key and wheel events into game actions,
//! and pointer positions into ground points by ray casting.
//!
//! # Invariants
//! - Camera state is read-only here; the render layer owns it.
//! - A cast either hits the ground plane `z = 0` or returns an error, never
//!   an infinite or NaN point.

pub mod action;
pub mod cast;

pub use action::Action;
pub use cast::{CastError, cast_to_ground, clip_ray, pixel_to_clip};
