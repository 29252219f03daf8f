//! Jump arc model.
//!
//! A jump is a fixed-duration height curve. There is no gravity and no early
//! abort: once started, the arc runs until its timer expires.

use crate::clock::normalized_progress;
use crate::config::JumpTuning;
use crate::curve::lerp;
use crate::state::MotionState;

/// Result of advancing the jump arc by one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JumpSample {
    /// Height for this tick (the base height while grounded).
    pub height: f32,
    /// Normalized jump progress, if a jump was advanced this tick.
    pub progress: Option<f32>,
    /// True on the tick the arc completed.
    pub landed: bool,
}

/// Start a jump at `now` from `takeoff_height`.
///
/// Returns false, and changes nothing, while already airborne.
pub fn try_start_jump(state: &mut MotionState, now: f64, takeoff_height: f32) -> bool {
    if state.is_airborne {
        return false;
    }
    state.is_airborne = true;
    state.jump_start_time = now;
    state.jump_elapsed = 0.0;
    state.jump_start_height = takeoff_height;
    true
}

/// Advance the arc and sample the height at `now`.
///
/// On the landing tick the height is the curve's final value and the state
/// is already grounded; from the next tick on, the base height applies.
pub fn advance_jump(state: &mut MotionState, jump: &JumpTuning, now: f64) -> JumpSample {
    if !state.is_airborne {
        return JumpSample {
            height: jump.base_height,
            progress: None,
            landed: false,
        };
    }

    state.jump_elapsed = now - state.jump_start_time;
    let progress = normalized_progress(now, state.jump_start_time, jump.duration);
    let landed = progress >= 1.0;
    if landed {
        state.is_airborne = false;
    }

    let peak = state.jump_start_height + jump.jump_height;
    let height = lerp(state.jump_start_height, peak, jump.curve.evaluate(progress));

    JumpSample {
        height,
        progress: Some(progress),
        landed,
    }
}
