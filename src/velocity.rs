//! Horizontal velocity model.
//!
//! Velocity is never integrated from an acceleration. Each phase captures a
//! start time and start velocity, and every tick re-evaluates the phase curve
//! at `(now - start) / duration`. Two consequences:
//! - frame rate does not change the real-time shape of a ramp;
//! - a finished phase lands exactly on its target, with no curve-tail drift.

use bevy::prelude::*;

use crate::clock::normalized_progress;
use crate::config::{InputAxes, MotionConfig};
use crate::curve::lerp;
use crate::intent::{MovementIntent, DEAD_ZONE};
use crate::state::{AccelPhase, MotionState};

/// Speed above which a reversal is eased instead of restarted from rest.
const REVERSAL_SPEED: f32 = 0.1;

/// Advance `state.velocity` by one tick.
///
/// Reads `state.is_airborne` to pick the ground or air regime, so call this
/// before the jump model clears the flag on landing.
pub fn update_velocity(
    state: &mut MotionState,
    config: &MotionConfig,
    intent: &MovementIntent,
    now: f64,
) {
    let airborne = state.is_airborne;
    let max_speed = config.current_max_speed(airborne);
    let mut target = intent.lateral * max_speed;

    if config.use_acceleration {
        let phase = config.phase(airborne);
        let has_input = has_input(intent, config.input_axes);
        let mut direction_changed = has_input
            && direction_sign(intent.lateral) != direction_sign(state.last_intent)
            && state.last_intent.abs() > DEAD_ZONE;
        // Airborne reversal refused: keep driving the old direction until landing.
        let mut hold_direction = false;

        if airborne && has_input && direction_changed {
            if config.allow_air_direction_change {
                target = state.velocity.x + (target - state.velocity.x) * config.air_control_factor;
            } else {
                target = direction_sign(state.last_intent) * max_speed;
                direction_changed = false;
                hold_direction = true;
            }
        }

        if has_input {
            if state.accel_phase != AccelPhase::Accelerating || direction_changed {
                start_acceleration(state, now, direction_changed);
            }

            let progress =
                normalized_progress(now, state.phase_start_time, phase.acceleration_time);
            let shaped = phase.acceleration_curve.evaluate(progress);
            state.velocity.x = lerp(state.velocity_at_phase_start, target, shaped);

            if progress >= 1.0 {
                state.accel_phase = AccelPhase::None;
                state.velocity.x = target;
            } else if state.accel_phase == AccelPhase::Decelerating {
                // Reversal re-baseline only lasts for the tick that registered it.
                state.accel_phase = AccelPhase::None;
            }

            if !hold_direction {
                state.last_intent = intent.lateral;
            }
        } else {
            if state.accel_phase != AccelPhase::Decelerating {
                start_deceleration(state, now);
            }

            let progress =
                normalized_progress(now, state.phase_start_time, phase.deceleration_time);
            let shaped = phase.deceleration_curve.evaluate(progress);
            state.velocity.x = lerp(state.velocity_at_phase_start, 0.0, shaped);

            if progress >= 1.0 {
                state.accel_phase = AccelPhase::None;
                state.velocity.x = 0.0;
            }
        }
    } else {
        state.velocity.x = target;
        state.last_intent = intent.lateral;
    }

    state.velocity.x = state.velocity.x.clamp(-max_speed, max_speed);

    if config.input_axes == InputAxes::LateralAndSecondary {
        state.velocity.y = (intent.secondary * max_speed).clamp(-max_speed, max_speed);
    }
}

/// Whether the intent counts as input under the given axis policy.
pub fn has_input(intent: &MovementIntent, axes: InputAxes) -> bool {
    match axes {
        InputAxes::Lateral => intent.has_lateral_input(),
        InputAxes::LateralAndSecondary => {
            intent.has_lateral_input() || intent.has_secondary_input()
        }
    }
}

/// Sign where zero counts as positive.
#[inline]
fn direction_sign(value: f32) -> f32 {
    if value >= 0.0 {
        1.0
    } else {
        -1.0
    }
}

fn start_acceleration(state: &mut MotionState, now: f64, direction_changed: bool) {
    state.accel_phase = AccelPhase::Accelerating;
    state.phase_start_time = now;
    state.velocity_at_phase_start = state.velocity.x;

    if direction_changed && state.velocity.x.abs() > REVERSAL_SPEED {
        trace!("direction reversal at {:.3} u/s, re-baselining", state.velocity.x);
        start_deceleration(state, now);
    }
}

fn start_deceleration(state: &mut MotionState, now: f64) {
    state.accel_phase = AccelPhase::Decelerating;
    state.phase_start_time = now;
    state.velocity_at_phase_start = state.velocity.x;
}
