//! # `curve_locomotion`
//!
//! Curve-driven, frame-rate independent locomotion for Bevy.
//!
//! This crate provides a designer-tunable motion model that:
//! - Eases lateral velocity in and out through authored response curves
//! - Uses separate ground and air timing, with limited air control
//! - Runs fixed-duration jump arcs with no gravity simulation
//! - Projects motion onto a flat track or around a cylindrical drum
//! - Steers arc-bound enemies toward a target with a pursuit heuristic
//!
//! ## Architecture
//!
//! Every phase stores its start time and start value and re-evaluates its
//! curve at `(now - start) / duration` each frame:
//! 1. Input (device or [`TargetTracker`](targeting::TargetTracker)) fills a
//!    [`MovementIntent`](intent::MovementIntent)
//! 2. The velocity model picks a phase and samples its curve
//! 3. The jump model samples the height curve
//! 4. A [`PositionProjector`](projector::PositionProjector) turns velocity and
//!    height into a `Transform`
//!
//! ## Usage
//!
//! ```rust
//! use bevy::prelude::*;
//! use curve_locomotion::prelude::*;
//!
//! let config = MotionConfig::player().with_max_speed(6.0).with_jump(3.5, 0.45);
//! let controller = LocomotionController::new(config, PositionProjector::Linear).unwrap();
//! let intent = MovementIntent::default();
//!
//! // Spawn both together with a Transform, then add LocomotionPlugin.
//! ```

use bevy::prelude::*;

pub mod clock;
pub mod config;
pub mod controller;
pub mod curve;
pub mod error;
pub mod events;
pub mod intent;
pub mod jump;
pub mod projector;
pub mod state;
pub mod systems;
pub mod targeting;
pub mod velocity;

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::clock::TickClock;
    pub use crate::config::{InputAxes, JumpTuning, MotionConfig, PhaseTuning};
    pub use crate::controller::{LocomotionController, MotionOutput};
    pub use crate::curve::{Keyframe, ResponseCurve};
    pub use crate::error::{ConfigError, CurveError};
    pub use crate::events::{JumpStarted, Landed};
    pub use crate::intent::MovementIntent;
    pub use crate::projector::{ArcProjection, MovementBounds, PositionProjector};
    pub use crate::state::{AccelPhase, Airborne, Grounded, MotionState};
    pub use crate::targeting::{TargetTracker, TrackTarget};
    pub use crate::{LocomotionPlugin, LocomotionSet};
}

/// System sets for ordering input against locomotion.
///
/// Device input systems should run before [`LocomotionSet::Motion`].
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocomotionSet {
    /// Target tracking writes intents.
    Intent,
    /// Controllers tick, transforms and markers are updated.
    Motion,
}

/// Main plugin for curve-driven locomotion.
///
/// # Examples
///
/// ```rust,no_run
/// use bevy::prelude::*;
/// use curve_locomotion::prelude::*;
///
/// App::new()
///     .add_plugins(DefaultPlugins)
///     .add_plugins(LocomotionPlugin)
///     .run();
/// ```
#[derive(Default)]
pub struct LocomotionPlugin;

impl Plugin for LocomotionPlugin {
    fn build(&self, app: &mut App) {
        // Register core types
        app.register_type::<controller::LocomotionController>();
        app.register_type::<config::MotionConfig>();
        app.register_type::<intent::MovementIntent>();
        app.register_type::<projector::MovementBounds>();
        app.register_type::<projector::PositionProjector>();
        app.register_type::<state::MotionState>();
        app.register_type::<state::Grounded>();
        app.register_type::<state::Airborne>();
        app.register_type::<targeting::TargetTracker>();

        app.add_event::<events::JumpStarted>();
        app.add_event::<events::Landed>();

        app.configure_sets(
            Update,
            (LocomotionSet::Intent, LocomotionSet::Motion).chain(),
        );
        app.add_systems(
            Update,
            systems::drive_target_intents.in_set(LocomotionSet::Intent),
        );
        app.add_systems(
            Update,
            (systems::step_locomotion, systems::sync_state_markers)
                .chain()
                .in_set(LocomotionSet::Motion),
        );
    }
}
