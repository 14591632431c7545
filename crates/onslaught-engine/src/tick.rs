//! Host-time to simulation-time conversion.
//!
//! Hosts measure wall-clock time between frames. [`FrameClock`] turns that
//! into a safe simulation step: capped at `max_dt` so one long stall cannot
//! tunnel entities through each other, then multiplied by `time_scale`.
//! Garbage deltas (negative, NaN, infinite) become a zero step.

use crate::config::TimingConfig;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameClock {
    fixed_dt: f32,
    max_dt: f32,
    time_scale: f32,
}

impl FrameClock {
    pub fn new(timing: &TimingConfig) -> Self {
        Self {
            fixed_dt: timing.fixed_dt,
            max_dt: timing.max_dt,
            time_scale: timing.time_scale,
        }
    }

    /// Simulation step for a raw host delta in seconds.
    pub fn step(&self, raw_dt: f32) -> f32 {
        if !raw_dt.is_finite() || raw_dt <= 0.0 {
            return 0.0;
        }
        raw_dt.min(self.max_dt) * self.time_scale
    }

    /// Simulation step used by fixed-rate drivers.
    pub fn fixed_step(&self) -> f32 {
        self.step(self.fixed_dt)
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    pub fn set_time_scale(&mut self, scale: f32) {
        if scale.is_finite() && scale >= 0.0 {
            self.time_scale = scale;
        }
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(&TimingConfig::default())
    }
}
