//! Authored motion configuration.
//!
//! A [`MotionConfig`] holds every designer-tunable number and curve used by
//! the motion state machine. It is validated once, then shared read-only
//! between controllers (see [`LocomotionController`](crate::controller::LocomotionController)).

use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Deserializer, Serialize};

use crate::curve::ResponseCurve;
use crate::error::ConfigError;

/// Which intent axes count as "input" for the velocity model.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputAxes {
    /// Only the lateral axis drives motion. `velocity.y` stays zero.
    #[default]
    Lateral,
    /// The secondary axis also counts as input and drives `velocity.y`
    /// (tangential speed along the arc).
    LateralAndSecondary,
}

/// Acceleration and deceleration timing for one regime (ground or air).
///
/// Inside a [`MotionConfig`] file, missing fields fall back to the defaults
/// of their own regime ([`ground`](Self::ground) or [`air`](Self::air)).
#[derive(Reflect, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhaseTuning {
    /// Seconds to ease from the phase-start velocity to the target.
    pub acceleration_time: f32,
    /// Seconds to ease from the phase-start velocity to zero.
    pub deceleration_time: f32,
    /// Shape of the acceleration ramp.
    pub acceleration_curve: ResponseCurve,
    /// Shape of the deceleration ramp.
    pub deceleration_curve: ResponseCurve,
}

impl Default for PhaseTuning {
    fn default() -> Self {
        Self::ground()
    }
}

impl PhaseTuning {
    /// Ground regime: slow to start, quicker to stop.
    pub fn ground() -> Self {
        Self {
            acceleration_time: 0.5,
            deceleration_time: 0.3,
            acceleration_curve: ResponseCurve::ease_in_out(),
            deceleration_curve: ResponseCurve::ease_in_out(),
        }
    }

    /// Air regime: snappier in both directions.
    pub fn air() -> Self {
        Self {
            acceleration_time: 0.2,
            deceleration_time: 0.2,
            ..Self::ground()
        }
    }

    /// Builder: set both phase durations.
    pub fn with_times(mut self, acceleration: f32, deceleration: f32) -> Self {
        self.acceleration_time = acceleration;
        self.deceleration_time = deceleration;
        self
    }

    /// Builder: set both phase curves.
    pub fn with_curves(mut self, acceleration: ResponseCurve, deceleration: ResponseCurve) -> Self {
        self.acceleration_curve = acceleration;
        self.deceleration_curve = deceleration;
        self
    }

    fn validate(&self, fields: &PhaseFields) -> Result<(), ConfigError> {
        positive(fields.acceleration_time, self.acceleration_time)?;
        positive(fields.deceleration_time, self.deceleration_time)?;
        curve(fields.acceleration_curve, &self.acceleration_curve)?;
        curve(fields.deceleration_curve, &self.deceleration_curve)
    }
}

/// Jump arc parameters.
#[derive(Reflect, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JumpTuning {
    /// Resting height while grounded (the arc radius for orbiting entities).
    pub base_height: f32,
    /// Height gained over the takeoff height when the curve reaches 1.0.
    pub jump_height: f32,
    /// Seconds from takeoff to landing.
    pub duration: f32,
    /// Height shape over normalized jump progress.
    pub curve: ResponseCurve,
}

impl Default for JumpTuning {
    fn default() -> Self {
        Self {
            base_height: 2.0,
            jump_height: 3.0,
            duration: 0.5,
            curve: ResponseCurve::ease_in_out(),
        }
    }
}

/// Configuration parameters for the motion state machine.
///
/// All fields are public so configs can be authored in code, but the
/// controller only accepts a config that passes [`MotionConfig::validate`].
///
/// # Example
///
/// ```rust
/// use curve_locomotion::config::MotionConfig;
///
/// let config = MotionConfig::player()
///     .with_max_speed(8.0)
///     .with_jump(4.0, 0.6);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.current_max_speed(true), 8.0 * config.air_max_speed_multiplier);
/// ```
#[derive(Reflect, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    // === Horizontal ===
    /// Maximum lateral speed on the ground (units/second).
    pub max_speed: f32,

    /// When false, velocity snaps to the target every tick.
    pub use_acceleration: bool,

    /// Phase timing while grounded.
    #[serde(deserialize_with = "ground_table")]
    pub ground: PhaseTuning,

    /// Phase timing while airborne.
    #[serde(deserialize_with = "air_table")]
    pub air: PhaseTuning,

    // === Air control ===
    /// How far an airborne direction change moves the target toward the new
    /// intent (0.0 = not at all, 1.0 = fully).
    pub air_control_factor: f32,

    /// Whether the lateral direction may flip while airborne.
    pub allow_air_direction_change: bool,

    /// Max speed multiplier while airborne.
    pub air_max_speed_multiplier: f32,

    // === Jump ===
    /// Jump arc parameters.
    pub jump: JumpTuning,

    // === Input ===
    /// Which intent axes count as input.
    pub input_axes: InputAxes,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            max_speed: 5.0,
            use_acceleration: true,
            ground: PhaseTuning::ground(),
            air: PhaseTuning::air(),
            air_control_factor: 0.8,
            allow_air_direction_change: true,
            air_max_speed_multiplier: 0.9,
            jump: JumpTuning::default(),
            input_axes: InputAxes::Lateral,
        }
    }
}

impl MotionConfig {
    /// Config for a device-driven entity on a linear track.
    pub fn player() -> Self {
        Self::default()
    }

    /// Config for an orbiting enemy: the secondary axis drives the arc.
    pub fn enemy() -> Self {
        Self {
            input_axes: InputAxes::LateralAndSecondary,
            ..default()
        }
    }

    /// Parse and validate a config from TOML. Missing fields take defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML config file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Reject configs that would divide by zero or produce nonsense.
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("max_speed", self.max_speed)?;
        non_negative("air_max_speed_multiplier", self.air_max_speed_multiplier)?;
        if !(0.0..=1.0).contains(&self.air_control_factor) {
            return Err(ConfigError::OutOfRange {
                field: "air_control_factor",
                value: self.air_control_factor,
                min: 0.0,
                max: 1.0,
            });
        }
        self.ground.validate(&GROUND_FIELDS)?;
        self.air.validate(&AIR_FIELDS)?;
        positive("jump.duration", self.jump.duration)?;
        finite("jump.base_height", self.jump.base_height)?;
        finite("jump.jump_height", self.jump.jump_height)?;
        curve("jump.curve", &self.jump.curve)
    }

    /// Max speed for the given airborne state.
    #[inline]
    pub fn current_max_speed(&self, airborne: bool) -> f32 {
        if airborne {
            self.max_speed * self.air_max_speed_multiplier
        } else {
            self.max_speed
        }
    }

    /// Phase timing for the given airborne state.
    #[inline]
    pub fn phase(&self, airborne: bool) -> &PhaseTuning {
        if airborne {
            &self.air
        } else {
            &self.ground
        }
    }

    /// Builder: set max speed.
    pub fn with_max_speed(mut self, max_speed: f32) -> Self {
        self.max_speed = max_speed;
        self
    }

    /// Builder: enable or disable curve-driven acceleration.
    pub fn with_acceleration(mut self, enabled: bool) -> Self {
        self.use_acceleration = enabled;
        self
    }

    /// Builder: set ground acceleration and deceleration times.
    pub fn with_ground_times(mut self, acceleration: f32, deceleration: f32) -> Self {
        self.ground = self.ground.with_times(acceleration, deceleration);
        self
    }

    /// Builder: set air acceleration and deceleration times.
    pub fn with_air_times(mut self, acceleration: f32, deceleration: f32) -> Self {
        self.air = self.air.with_times(acceleration, deceleration);
        self
    }

    /// Builder: set the same curves for ground and air phases.
    pub fn with_phase_curves(mut self, acceleration: ResponseCurve, deceleration: ResponseCurve) -> Self {
        self.ground = self
            .ground
            .with_curves(acceleration.clone(), deceleration.clone());
        self.air = self.air.with_curves(acceleration, deceleration);
        self
    }

    /// Builder: set air control parameters.
    pub fn with_air_control(mut self, factor: f32, allow_direction_change: bool) -> Self {
        self.air_control_factor = factor;
        self.allow_air_direction_change = allow_direction_change;
        self
    }

    /// Builder: set the airborne max speed multiplier.
    pub fn with_air_max_speed_multiplier(mut self, multiplier: f32) -> Self {
        self.air_max_speed_multiplier = multiplier;
        self
    }

    /// Builder: set jump height and duration.
    pub fn with_jump(mut self, height: f32, duration: f32) -> Self {
        self.jump.jump_height = height;
        self.jump.duration = duration;
        self
    }

    /// Builder: set the grounded base height.
    pub fn with_base_height(mut self, height: f32) -> Self {
        self.jump.base_height = height;
        self
    }

    /// Builder: set the jump height curve.
    pub fn with_jump_curve(mut self, curve: ResponseCurve) -> Self {
        self.jump.curve = curve;
        self
    }

    /// Builder: set which intent axes count as input.
    pub fn with_input_axes(mut self, axes: InputAxes) -> Self {
        self.input_axes = axes;
        self
    }
}

/// A `[ground]` or `[air]` table as written, before defaults are filled in.
#[derive(Deserialize)]
struct PhaseTable {
    acceleration_time: Option<f32>,
    deceleration_time: Option<f32>,
    acceleration_curve: Option<ResponseCurve>,
    deceleration_curve: Option<ResponseCurve>,
}

impl PhaseTable {
    fn onto(self, base: PhaseTuning) -> PhaseTuning {
        PhaseTuning {
            acceleration_time: self.acceleration_time.unwrap_or(base.acceleration_time),
            deceleration_time: self.deceleration_time.unwrap_or(base.deceleration_time),
            acceleration_curve: self.acceleration_curve.unwrap_or(base.acceleration_curve),
            deceleration_curve: self.deceleration_curve.unwrap_or(base.deceleration_curve),
        }
    }
}

fn ground_table<'de, D: Deserializer<'de>>(deserializer: D) -> Result<PhaseTuning, D::Error> {
    PhaseTable::deserialize(deserializer).map(|table| table.onto(PhaseTuning::ground()))
}

fn air_table<'de, D: Deserializer<'de>>(deserializer: D) -> Result<PhaseTuning, D::Error> {
    PhaseTable::deserialize(deserializer).map(|table| table.onto(PhaseTuning::air()))
}

/// Field names reported by [`PhaseTuning::validate`].
struct PhaseFields {
    acceleration_time: &'static str,
    deceleration_time: &'static str,
    acceleration_curve: &'static str,
    deceleration_curve: &'static str,
}

const GROUND_FIELDS: PhaseFields = PhaseFields {
    acceleration_time: "ground.acceleration_time",
    deceleration_time: "ground.deceleration_time",
    acceleration_curve: "ground.acceleration_curve",
    deceleration_curve: "ground.deceleration_curve",
};

const AIR_FIELDS: PhaseFields = PhaseFields {
    acceleration_time: "air.acceleration_time",
    deceleration_time: "air.deceleration_time",
    acceleration_curve: "air.acceleration_curve",
    deceleration_curve: "air.deceleration_curve",
};

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    // Written as a negated comparison so NaN is rejected too.
    if !(value > 0.0) || !value.is_finite() {
        return Err(ConfigError::NonPositiveDuration { field, value });
    }
    Ok(())
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if !(value >= 0.0) || !value.is_finite() {
        return Err(ConfigError::Negative { field, value });
    }
    Ok(())
}

fn finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NonFinite { field, value });
    }
    Ok(())
}

fn curve(field: &'static str, curve: &ResponseCurve) -> Result<(), ConfigError> {
    curve
        .validate()
        .map_err(|source| ConfigError::InvalidCurve { field, source })
}
