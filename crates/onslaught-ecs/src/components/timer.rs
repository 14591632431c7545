use serde::{Deserialize, Serialize};

/// Countdown that drives periodic events such as weapon fire and spawns.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Timer {
    pub remaining: f32,
    pub duration: f32,
    pub is_looping: bool,
    pub is_active: bool,
}

impl Timer {
    /// An active timer starting at a full `duration`.
    pub fn new(duration: f32, is_looping: bool) -> Self {
        Self {
            remaining: duration,
            duration,
            is_looping,
            is_active: true,
        }
    }

    /// A looping timer whose first completion comes after `first_delay`.
    pub fn looping_with_delay(duration: f32, first_delay: f32) -> Self {
        Self {
            remaining: first_delay,
            ..Self::new(duration, true)
        }
    }

    /// Advance by `dt` seconds and report whether the timer completed.
    ///
    /// Looping timers carry the overshoot into the next period
    /// (`remaining = duration + remaining`). A step longer than a whole
    /// period leaves `remaining <= 0`, so the timer completes again on each
    /// following update until it has caught up. One-shot timers clamp to
    /// zero and deactivate. Inactive timers never complete.
    pub fn update(&mut self, dt: f32) -> bool {
        if !self.is_active {
            return false;
        }
        self.remaining -= dt;
        if self.remaining > 0.0 {
            return false;
        }
        if self.is_looping {
            self.remaining += self.duration;
        } else {
            self.remaining = 0.0;
            self.is_active = false;
        }
        true
    }

    /// Restore `remaining` to a full `duration` and set whether the timer
    /// runs.
    pub fn reset(&mut self, activate: bool) {
        self.remaining = self.duration;
        self.is_active = activate;
    }

    /// Fraction of the current period that has elapsed.
    pub fn progress(&self) -> f32 {
        if self.duration > 0.0 {
            (1.0 - self.remaining / self.duration).clamp(0.0, 1.0)
        } else {
            1.0
        }
    }
}
