//! Pursuit heuristic for arc-projected entities.
//!
//! Produces a [`MovementIntent`](crate::intent::MovementIntent) axis pair that
//! steers toward a target: lateral input from the `x` offset, angular input
//! from how far the target sits around the drum.

use bevy::prelude::*;

/// What a [`TargetTracker`] pursues.
#[derive(Reflect, Debug, Clone, Copy, PartialEq)]
pub enum TrackTarget {
    /// Follow another entity's global position.
    Entity(Entity),
    /// Head for a fixed world point.
    Point(Vec3),
}

/// Drives an entity's intent toward a target every tick.
///
/// Requires a [`LocomotionController`](crate::controller::LocomotionController)
/// with an arc projector on the same entity. Without a target the intent is
/// zeroed.
#[derive(Component, Reflect, Debug, Clone, PartialEq)]
#[reflect(Component)]
pub struct TargetTracker {
    pub target: Option<TrackTarget>,
    /// Angular input applied even when already facing the target.
    pub base_angular_speed: f32,
}

impl Default for TargetTracker {
    fn default() -> Self {
        Self {
            target: None,
            base_angular_speed: 0.5,
        }
    }
}

impl TargetTracker {
    /// Track another entity.
    pub fn entity(target: Entity) -> Self {
        Self {
            target: Some(TrackTarget::Entity(target)),
            ..default()
        }
    }

    /// Track a fixed point.
    pub fn point(target: Vec3) -> Self {
        Self {
            target: Some(TrackTarget::Point(target)),
            ..default()
        }
    }

    /// Set the base angular speed.
    pub fn with_base_angular_speed(mut self, speed: f32) -> Self {
        self.base_angular_speed = speed;
        self
    }
}

/// Compute the intent that steers toward `target`.
///
/// `angle_deg` is the entity's accumulated arc angle. The angular component
/// is `base_angular_speed` plus a factor in [0, 1] that is largest when the
/// angle already matches the target and smallest half a turn away. The target
/// angle uses a plain arctangent of the Y/Z ratio, so targets behind the
/// pivot fold onto the front half.
pub fn aim_intent(
    position: Vec3,
    angle_deg: f64,
    target: Option<Vec3>,
    pivot: Vec3,
    base_angular_speed: f32,
) -> Vec2 {
    let Some(target) = target else {
        return Vec2::ZERO;
    };

    let lateral = (target.x - position.x).clamp(-1.0, 1.0);

    let rise = f64::from(target.y - pivot.y);
    let run = f64::from(target.z - pivot.z);
    let ratio = rise / run;
    // 0/0 is a target sitting on the pivot: no preferred angle.
    let ratio = if ratio.is_nan() { 0.0 } else { ratio };
    let target_angle = ratio.atan().to_degrees();

    let factor = (((target_angle - angle_deg).abs() % 360.0) - 180.0).abs() / 180.0;

    Vec2::new(lateral, base_angular_speed + factor as f32)
}
