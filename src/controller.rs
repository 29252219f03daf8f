//! The locomotion controller component.
//!
//! [`LocomotionController`] bundles a validated config, the entity's
//! [`MotionState`] and a [`PositionProjector`]. One call to
//! [`LocomotionController::tick`] runs the whole per-frame pipeline:
//!
//! 1. consume the jump trigger and take off if grounded;
//! 2. update velocity (ground or air regime);
//! 3. advance the jump arc and sample the height;
//! 4. project velocity and height into a pose.

use std::sync::Arc;

use bevy::prelude::*;

use crate::clock::TickClock;
use crate::config::MotionConfig;
use crate::error::ConfigError;
use crate::intent::MovementIntent;
use crate::jump::{advance_jump, try_start_jump};
use crate::projector::{MovementBounds, PositionProjector};
use crate::state::MotionState;
use crate::velocity::update_velocity;

/// Everything one tick produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionOutput {
    pub translation: Vec3,
    /// New orientation; `None` leaves the current one alone.
    pub rotation: Option<Quat>,
    pub airborne: bool,
    pub velocity: Vec2,
    /// Cumulative arc angle in degrees.
    pub total_rotation: f64,
    /// True on the takeoff tick.
    pub jumped: bool,
    /// True on the tick the jump arc completed.
    pub landed: bool,
}

/// Curve-driven locomotion for one entity.
///
/// The config is shared behind an [`Arc`], so many entities can use one
/// tuning without copying its curves. The state is owned and never shared.
///
/// # Example
///
/// ```rust
/// use bevy::prelude::*;
/// use curve_locomotion::prelude::*;
///
/// let mut controller = LocomotionController::player();
/// let mut intent = MovementIntent::new();
/// intent.set_lateral(1.0);
///
/// let mut clock = TickClock::default();
/// let mut position = Vec3::new(0.0, 2.0, 0.0);
/// for _ in 0..60 {
///     clock = clock.advance(1.0 / 60.0);
///     position = controller.tick(position, &mut intent, clock, None).translation;
/// }
/// assert_eq!(controller.velocity().x, 5.0);
/// assert!(position.x > 3.0);
/// ```
#[derive(Component, Reflect, Debug, Clone)]
#[reflect(Component)]
pub struct LocomotionController {
    #[reflect(ignore)]
    config: Arc<MotionConfig>,
    state: MotionState,
    projector: PositionProjector,
}

impl Default for LocomotionController {
    fn default() -> Self {
        Self::player()
    }
}

impl LocomotionController {
    /// Build a controller, rejecting configs the tick cannot run with.
    pub fn new(
        config: impl Into<Arc<MotionConfig>>,
        projector: PositionProjector,
    ) -> Result<Self, ConfigError> {
        let config = config.into();
        if let Err(err) = check(&config, &projector) {
            warn!("rejected locomotion config: {err}");
            return Err(err);
        }
        Ok(Self::from_parts(config, projector))
    }

    /// Linear controller with the player preset.
    pub fn player() -> Self {
        Self::from_parts(Arc::new(MotionConfig::player()), PositionProjector::Linear)
    }

    /// Arc controller with the enemy preset, orbiting `pivot`.
    pub fn enemy(pivot: Vec3) -> Self {
        Self::from_parts(Arc::new(MotionConfig::enemy()), PositionProjector::arc(pivot))
    }

    fn from_parts(config: Arc<MotionConfig>, projector: PositionProjector) -> Self {
        Self {
            config,
            state: MotionState::new(),
            projector,
        }
    }

    /// Swap in a new config without resetting motion state.
    ///
    /// On error the current config stays in place.
    pub fn set_config(&mut self, config: impl Into<Arc<MotionConfig>>) -> Result<(), ConfigError> {
        let config = config.into();
        check(&config, &self.projector)?;
        self.config = config;
        Ok(())
    }

    /// Run one tick for an entity currently at `position`.
    pub fn tick(
        &mut self,
        position: Vec3,
        intent: &mut MovementIntent,
        clock: TickClock,
        bounds: Option<&MovementBounds>,
    ) -> MotionOutput {
        let jumped = intent.take_jump_request()
            && try_start_jump(
                &mut self.state,
                clock.now,
                self.projector.takeoff_height(position),
            );
        if jumped {
            debug!(
                "jump started at t={:.3} from height {:.3}",
                clock.now, self.state.jump_start_height
            );
        }

        update_velocity(&mut self.state, &self.config, intent, clock.now);

        let sample = advance_jump(&mut self.state, &self.config.jump, clock.now);
        if sample.landed {
            debug!("landed at t={:.3}", clock.now);
        }

        let pose = self
            .projector
            .project(&mut self.state, position, sample.height, clock.dt, bounds);

        MotionOutput {
            translation: pose.translation,
            rotation: pose.rotation,
            airborne: self.state.is_airborne,
            velocity: self.state.velocity,
            total_rotation: self.state.arc_angle,
            jumped,
            landed: sample.landed,
        }
    }

    /// Check if a jump arc is in progress.
    pub fn is_airborne(&self) -> bool {
        self.state.is_airborne
    }

    /// Current velocity (`x` lateral, `y` tangential).
    pub fn velocity(&self) -> Vec2 {
        self.state.velocity
    }

    /// Cumulative arc angle in degrees.
    pub fn total_rotation(&self) -> f64 {
        self.state.arc_angle
    }

    pub fn state(&self) -> &MotionState {
        &self.state
    }

    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    pub fn projector(&self) -> &PositionProjector {
        &self.projector
    }
}

fn check(config: &MotionConfig, projector: &PositionProjector) -> Result<(), ConfigError> {
    config.validate()?;
    // The arc radius is the height; a grounded entity must not sit on the pivot.
    if projector.is_arc() && config.jump.base_height <= 0.0 {
        return Err(ConfigError::NonPositiveRadius(config.jump.base_height));
    }
    Ok(())
}
