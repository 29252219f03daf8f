//! Motion state and state marker components.
//!
//! [`MotionState`] is the mutable half of a controller: everything the
//! velocity, jump and projection steps read and write between ticks.
//! The marker components mirror its airborne flag into the ECS so other
//! systems can filter on them.

use bevy::prelude::*;

/// Which timed velocity phase is running.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccelPhase {
    /// No phase: velocity is at its target (or zero).
    #[default]
    None,
    /// Easing toward the input target.
    Accelerating,
    /// Easing toward zero.
    Decelerating,
}

/// Per-entity motion state.
///
/// Created at spawn with zero velocity, grounded, angle 0. Mutated once per
/// tick by the controller that owns it and never shared.
#[derive(Reflect, Debug, Clone, PartialEq, Default)]
pub struct MotionState {
    /// `x` is lateral speed; `y` is tangential speed along the arc.
    pub velocity: Vec2,
    /// Whether a jump arc is in progress.
    pub is_airborne: bool,
    /// Clock time of the last takeoff.
    pub jump_start_time: f64,
    /// Seconds since takeoff, as of the last tick.
    pub jump_elapsed: f64,
    /// Height at the instant of takeoff.
    pub jump_start_height: f32,
    /// Current velocity phase.
    pub accel_phase: AccelPhase,
    /// Clock time the current phase started.
    pub phase_start_time: f64,
    /// `velocity.x` captured when the current phase started.
    pub velocity_at_phase_start: f32,
    /// Last lateral intent that counted as input (raw value, not just sign).
    pub last_intent: f32,
    /// Accumulated arc angle in degrees. Never wrapped.
    pub arc_angle: f64,
}

impl MotionState {
    /// Create a fresh state: at rest, grounded, angle 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sign of the last lateral intent: -1, 0 or +1.
    pub fn last_intent_sign(&self) -> i8 {
        if self.last_intent > 0.0 {
            1
        } else if self.last_intent < 0.0 {
            -1
        } else {
            0
        }
    }

    /// Check if the velocity model is easing toward the input target.
    pub fn is_accelerating(&self) -> bool {
        self.accel_phase == AccelPhase::Accelerating
    }

    /// Check if the velocity model is easing toward zero.
    pub fn is_decelerating(&self) -> bool {
        self.accel_phase == AccelPhase::Decelerating
    }
}

/// Marker component indicating the character is on its base height.
///
/// Mutually exclusive with [`Airborne`].
///
/// # Example
///
/// ```rust
/// use bevy::prelude::*;
/// use curve_locomotion::prelude::*;
///
/// // Grounded is a marker component - just use it in queries
/// fn check_grounded(grounded: Option<&Grounded>) -> bool {
///     grounded.is_some()
/// }
/// ```
#[derive(Component, Reflect, Debug, Clone, Copy, Default)]
#[reflect(Component)]
pub struct Grounded;

/// Marker component indicating a jump arc is in progress.
///
/// Mutually exclusive with [`Grounded`].
#[derive(Component, Reflect, Debug, Clone, Copy, Default)]
#[reflect(Component)]
pub struct Airborne;
