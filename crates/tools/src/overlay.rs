use glam::DVec2;

/// On-screen debug readout.
pub struct DebugOverlay;

impl DebugOverlay {
    /// Player position to two decimals, with the zoom level on its own line
    /// above it whenever the camera is zoomed.
    pub fn text(position: DVec2, zoom: i32) -> String {
        let line = format!("position: ({:.2}, {:.2})", position.x, position.y);
        if zoom == 0 {
            line
        } else {
            format!("zoom: {zoom}\n{line}")
        }
    }
}
