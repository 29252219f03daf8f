//! Tick timing.

use bevy::prelude::*;

/// Monotonic time and frame delta for one simulation tick.
///
/// Both values are `f64`. Phase and jump timers compare `now` against a
/// captured start time instead of accumulating `dt`, so a variable frame
/// rate does not change the real-time shape of a curve.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TickClock {
    /// Seconds since an arbitrary fixed origin.
    pub now: f64,
    /// Seconds since the previous tick.
    pub dt: f64,
}

impl TickClock {
    /// Create a clock sample.
    pub fn new(now: f64, dt: f64) -> Self {
        Self { now, dt }
    }

    /// Sample a Bevy clock.
    pub fn from_time<T: Default>(time: &Time<T>) -> Self {
        Self {
            now: time.elapsed_secs_f64(),
            dt: time.delta_secs_f64(),
        }
    }

    /// The sample `dt` seconds later.
    pub fn advance(self, dt: f64) -> Self {
        Self {
            now: self.now + dt,
            dt,
        }
    }
}

/// Normalized progress of a timed phase, clamped to [0, 1].
///
/// `duration` must be positive; configs are validated before any timer runs.
#[inline]
pub fn normalized_progress(now: f64, start: f64, duration: f32) -> f32 {
    ((now - start) / f64::from(duration)).clamp(0.0, 1.0) as f32
}
