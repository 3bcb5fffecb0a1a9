use std::time::Duration;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::KernelError;
use crate::config::SimConfig;
use crate::player::Player;

/// Whether the clock drains ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClockState {
    Running,
    Paused,
}

/// Fixed-timestep simulation clock, decoupled from the render frame rate.
///
/// Timestamps are durations since an epoch the caller picks; the clock only
/// compares them. `last_tick` never moves backwards.
#[derive(Debug, Clone)]
pub struct SimClock {
    config: SimConfig,
    scale: f64,
    tick_duration: Duration,
    last_tick: Duration,
    state: ClockState,
    ticks_performed: u64,
}

impl SimClock {
    /// A running clock at scale 1 whose first tick boundary is `start`.
    pub fn new(config: SimConfig, start: Duration) -> Result<Self, KernelError> {
        config.validate()?;
        let tick_duration = tick_duration_for(&config, 1.0)?;
        Ok(Self {
            config,
            scale: 1.0,
            tick_duration,
            last_tick: start,
            state: ClockState::Running,
            ticks_performed: 0,
        })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn tick_duration(&self) -> Duration {
        self.tick_duration
    }

    /// Effective ticks per second.
    pub fn tick_rate(&self) -> f64 {
        self.config.base_tick_rate * self.scale
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn last_tick(&self) -> Duration {
        self.last_tick
    }

    pub fn state(&self) -> ClockState {
        self.state
    }

    pub fn is_paused(&self) -> bool {
        self.state == ClockState::Paused
    }

    /// Total ticks executed since creation.
    pub fn ticks_performed(&self) -> u64 {
        self.ticks_performed
    }

    /// Run every tick that is due at `now`, at most `max_catch_up_ticks`.
    ///
    /// Elapsed time beyond the catch-up window is dropped, not queued.
    /// Returns the number of ticks run.
    pub fn perform_ticks(&mut self, now: Duration, player: &mut Player) -> u32 {
        if self.is_paused() {
            return 0;
        }

        // One tick wider than the cap: the strict comparison below always
        // leaves the final partial tick for the next frame.
        let window = self
            .tick_duration
            .checked_mul(self.config.max_catch_up_ticks.saturating_add(1))
            .unwrap_or(Duration::MAX);
        let floor = now.saturating_sub(window);
        if self.last_tick < floor {
            let dropped = (floor - self.last_tick).as_secs_f64() / self.tick_duration.as_secs_f64();
            tracing::debug!(dropped_ticks = dropped.floor(), "catch-up debt discarded");
            self.last_tick = floor;
        }

        let mut ran = 0;
        while let Some(next) = self.last_tick.checked_add(self.tick_duration) {
            if next >= now {
                break;
            }
            player.tick(self.config.step_distance);
            self.last_tick = next;
            ran += 1;
        }

        self.ticks_performed += u64::from(ran);
        tracing::trace!(ran, total = self.ticks_performed, "ticks drained");
        ran
    }

    /// Change the tick-rate multiplier and resynchronize to `now`, so no
    /// burst of ticks at the new rate follows.
    pub fn set_tick_rate_scale(&mut self, scale: f64, now: Duration) -> Result<(), KernelError> {
        if !(scale.is_finite() && scale > 0.0) {
            return Err(KernelError::InvalidTickRateScale { scale });
        }
        self.tick_duration = tick_duration_for(&self.config, scale)?;
        self.scale = scale;
        self.resync(now);
        tracing::debug!(scale, rate = self.tick_rate(), "tick rate changed");
        Ok(())
    }

    pub fn pause(&mut self) {
        if self.state == ClockState::Running {
            self.state = ClockState::Paused;
            tracing::debug!("physics paused");
        }
    }

    /// Resume from `now`; time spent paused is never simulated.
    pub fn resume(&mut self, now: Duration) {
        if self.state == ClockState::Paused {
            self.state = ClockState::Running;
            self.resync(now);
            tracing::debug!("physics resumed");
        }
    }

    /// Flip between running and paused. Returns the new state.
    pub fn toggle_physics(&mut self, now: Duration) -> ClockState {
        match self.state {
            ClockState::Running => self.pause(),
            ClockState::Paused => self.resume(now),
        }
        self.state
    }

    /// Time since the last tick boundary, zero when paused or when `now`
    /// lags the clock.
    pub fn elapsed_since_tick(&self, now: Duration) -> Duration {
        match self.state {
            ClockState::Running => now.saturating_sub(self.last_tick),
            ClockState::Paused => Duration::ZERO,
        }
    }

    /// Render position of `player` at `now`, blended between its last two
    /// tick positions.
    pub fn interpolate(&self, player: &Player, now: Duration) -> DVec2 {
        interpolate(
            player.prev_position(),
            player.position(),
            self.elapsed_since_tick(now),
            self.tick_duration,
        )
    }

    fn resync(&mut self, now: Duration) {
        self.last_tick = self.last_tick.max(now);
    }
}

/// Linear blend from `prev` to `current` by `elapsed / tick`, with elapsed
/// clamped to `[0, tick]`.
///
/// Exactly `prev` at zero elapsed and exactly `current` at a full tick.
pub fn interpolate(prev: DVec2, current: DVec2, elapsed: Duration, tick: Duration) -> DVec2 {
    let alpha = if tick.is_zero() {
        1.0
    } else {
        elapsed.min(tick).as_secs_f64() / tick.as_secs_f64()
    };
    prev * (1.0 - alpha) + current * alpha
}

fn tick_duration_for(config: &SimConfig, scale: f64) -> Result<Duration, KernelError> {
    Duration::try_from_secs_f64(1.0 / (config.base_tick_rate * scale))
        .ok()
        .filter(|d| !d.is_zero())
        .ok_or(KernelError::InvalidTickRateScale { scale })
}
