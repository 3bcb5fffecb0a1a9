use std::time::Duration;

use anyhow::Context;
use bridgewalk_input::Action;
use bridgewalk_kernel::{GameConfig, World};
use bridgewalk_render::{DebugTextBackend, FollowCamera, FrameStats, SceneRenderer, SceneStyle};
use glam::{DVec2, Vec2};

/// A headless game loop on a simulated clock: every frame advances time by a
/// fixed step, so runs are reproducible.
pub struct Session {
    world: World,
    camera: FollowCamera,
    scene: SceneRenderer<DebugTextBackend>,
    viewport: Vec2,
    now: Duration,
    frame_time: Duration,
    frames: u64,
}

impl Session {
    pub fn new(config: &GameConfig, fps: u32, viewport: Vec2) -> anyhow::Result<Self> {
        anyhow::ensure!(fps > 0, "fps must be positive");
        anyhow::ensure!(
            viewport.x > 0.0 && viewport.y > 0.0,
            "viewport must have positive size"
        );
        let world = World::from_layout(&config.layout, config.sim, Duration::ZERO)
            .context("building world from layout")?;
        let start = world.player().position().as_vec2();
        let mut camera = FollowCamera::new(start, viewport.x / viewport.y);
        // Settle the eye at the zoom height before the first input arrives.
        camera.follow(camera.target(), Duration::ZERO);
        let scene = SceneRenderer::new(
            DebugTextBackend::new(),
            &world,
            SceneStyle::from_layout(&config.layout),
        );

        Ok(Self {
            world,
            camera,
            scene,
            viewport,
            now: Duration::ZERO,
            frame_time: Duration::from_secs(1) / fps,
            frames: 0,
        })
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn camera(&self) -> &FollowCamera {
        &self.camera
    }

    pub fn backend(&self) -> &DebugTextBackend {
        self.scene.backend()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Feed one input action to the world or camera.
    pub fn apply(&mut self, action: Action) -> anyhow::Result<()> {
        match action {
            Action::SetTarget(p) => self.world.set_target_position(p.as_dvec2())?,
            Action::Teleport(p) => self.world.teleport(p.as_dvec2())?,
            Action::TogglePhysics => {
                let state = self.world.toggle_physics(self.now);
                tracing::info!(?state, "physics toggled");
            }
            Action::SetTickRateScale(scale) => {
                self.world.set_tick_rate_scale(f64::from(scale), self.now)?;
                tracing::info!(scale, "tick rate scale set");
            }
            Action::Zoom(steps) => self.camera.zoom_by(steps),
            Action::Noop => {}
        }
        Ok(())
    }

    /// Press the pointer at `pixel` against the current camera.
    pub fn click(&mut self, pixel: Vec2) -> anyhow::Result<DVec2> {
        let action = Action::from_pointer(
            pixel,
            self.viewport,
            &self.camera.view(),
            self.camera.projection(),
        )
        .with_context(|| format!("casting pixel ({}, {})", pixel.x, pixel.y))?;
        self.apply(action)?;
        Ok(self.world.player().target_position())
    }

    /// Advance the clock one frame: drain ticks and events, follow, draw.
    pub fn step_frame(&mut self) -> FrameStats {
        self.now += self.frame_time;
        self.frames += 1;
        let ticks = self.world.perform_ticks(self.now);
        for event in self.world.drain_events() {
            tracing::debug!(frame = self.frames, ?event, "world event");
        }
        let focus = self.world.interpolated_position(self.now).as_vec3();
        self.camera.follow(focus, self.frame_time);
        let stats = self.scene.render_frame(&self.world, &self.camera, self.now);
        tracing::trace!(frame = self.frames, ticks, draws = stats.draws, "frame");
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridgewalk_kernel::ClockState;

    fn session() -> Session {
        Session::new(&GameConfig::default(), 60, Vec2::new(800.0, 600.0)).unwrap()
    }

    #[test]
    fn walks_to_target_and_clears_marker() {
        let mut s = session();
        s.apply(Action::SetTarget(Vec2::new(0.0, 2.0))).unwrap();
        let first = s.step_frame();
        assert!(first.marker_drawn);
        // 10 ticks at 50 Hz fit comfortably in 60 frames at 60 fps.
        for _ in 0..60 {
            s.step_frame();
        }
        assert_eq!(s.world().player().position(), DVec2::new(0.0, 2.0));
        assert!(!s.step_frame().marker_drawn);
    }

    #[test]
    fn camera_trails_player() {
        let mut s = session();
        s.apply(Action::Teleport(Vec2::new(5.0, 5.0))).unwrap();
        for _ in 0..600 {
            s.step_frame();
        }
        let target = s.camera().target();
        assert!((target.x - 5.0).abs() < 1e-2);
        assert!((target.y - 5.0).abs() < 1e-2);
        assert!(s.camera().position().y < target.y);
    }

    #[test]
    fn paused_session_runs_no_ticks() {
        let mut s = session();
        s.apply(Action::SetTarget(Vec2::new(0.0, 5.0))).unwrap();
        s.apply(Action::from_key('.')).unwrap();
        assert_eq!(s.world().clock().state(), ClockState::Paused);
        for _ in 0..30 {
            s.step_frame();
        }
        assert_eq!(s.world().clock().ticks_performed(), 0);
        assert_eq!(s.world().player().position(), DVec2::ZERO);
    }

    #[test]
    fn frames_drain_the_event_log() {
        let mut s = session();
        s.apply(Action::SetTarget(Vec2::new(0.0, 2.0))).unwrap();
        s.apply(Action::from_key('1')).unwrap();
        assert_eq!(s.world().events().len(), 2);
        s.step_frame();
        assert!(s.world().events().is_empty());

        // Ten idle minutes at 60 fps.
        for _ in 0..36_000 {
            s.step_frame();
        }
        assert!(s.world().events().is_empty());
        assert!(s.world().clock().ticks_performed() > 10_000);
    }

    #[test]
    fn key_slows_tick_rate() {
        let mut s = session();
        s.apply(Action::from_key('2')).unwrap();
        assert_eq!(s.world().clock().tick_rate(), 12.5);
    }

    #[test]
    fn click_at_screen_centre_targets_camera_focus() {
        let mut s = session();
        let hit = s.click(Vec2::new(400.0, 300.0)).unwrap();
        // The eye looks at (0, 0, 1) from 45 degrees, so the ground point
        // lies one unit beyond the focus.
        assert!((hit - DVec2::new(0.0, 1.0)).length() < 1e-2, "{hit:?}");
    }

    #[test]
    fn zero_fps_is_rejected() {
        assert!(Session::new(&GameConfig::default(), 0, Vec2::new(800.0, 600.0)).is_err());
    }
}
