//! Developer tooling: simulation inspector and debug overlay.
//!
//! # Invariants
//! - Tools only read world state.

mod inspector;
mod overlay;

pub use inspector::{SimInspector, SimSummary};
pub use overlay::DebugOverlay;

pub fn crate_info() -> &'static str {
    concat!("bridgewalk-tools v", env!("CARGO_PKG_VERSION"))
}
