//! Position projection.
//!
//! Turns a velocity and a height into a world pose. The linear variant moves
//! on a flat plane with height as `y`. The arc variant wraps the secondary
//! axis around a pivot, so walking "forward" rolls the entity around a drum
//! whose radius is the current height.

use std::f64::consts::TAU;

use bevy::prelude::*;

use crate::state::MotionState;

/// Lateral limits for an entity, shrunk by half its width.
///
/// Missing bounds are not enforced.
#[derive(Component, Reflect, Debug, Clone, Copy, PartialEq, Default)]
#[reflect(Component)]
pub struct MovementBounds {
    /// Lowest `x` the entity's left edge may reach.
    pub min_x: Option<f32>,
    /// Highest `x` the entity's right edge may reach.
    pub max_x: Option<f32>,
    /// Entity width.
    pub width: f32,
}

impl MovementBounds {
    /// Bounds on both sides for a zero-width entity.
    pub fn new(min_x: f32, max_x: f32) -> Self {
        Self {
            min_x: Some(min_x),
            max_x: Some(max_x),
            width: 0.0,
        }
    }

    /// Set the entity width.
    pub fn with_width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    /// Clamp a lateral position into the bounds.
    pub fn clamp(&self, x: f32) -> f32 {
        let half = self.width * 0.5;
        let mut x = x;
        if let Some(min) = self.min_x {
            x = x.max(min + half);
        }
        if let Some(max) = self.max_x {
            x = x.min(max - half);
        }
        x
    }
}

/// Circle placement around a fixed pivot in the Y/Z plane.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Default)]
pub struct ArcProjection {
    /// Centre of the circle. Only `y` and `z` are used.
    pub pivot: Vec3,
}

/// How velocity and height become a pose.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Default)]
pub enum PositionProjector {
    /// `x` integrates lateral velocity, `y` is the height.
    #[default]
    Linear,
    /// `x` integrates lateral velocity, the secondary velocity moves along a
    /// circle of radius `height` around the pivot.
    Arc(ArcProjection),
}

/// Output of one projection step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub translation: Vec3,
    /// New orientation, or `None` to leave it untouched.
    pub rotation: Option<Quat>,
}

impl PositionProjector {
    /// Arc projector around `pivot`.
    pub fn arc(pivot: Vec3) -> Self {
        Self::Arc(ArcProjection { pivot })
    }

    /// Check if this is the arc variant.
    pub fn is_arc(&self) -> bool {
        matches!(self, Self::Arc(_))
    }

    /// Height to record at takeoff for an entity at `position`.
    pub fn takeoff_height(&self, position: Vec3) -> f32 {
        match self {
            Self::Linear => position.y,
            Self::Arc(arc) => Vec2::new(position.y - arc.pivot.y, position.z - arc.pivot.z).length(),
        }
    }

    /// Place the entity for this tick.
    ///
    /// Order: integrate `x`, clamp to bounds, vertical or arc placement,
    /// rotation. The arc variant accumulates its angle into `state`.
    pub fn project(
        &self,
        state: &mut MotionState,
        position: Vec3,
        height: f32,
        dt: f64,
        bounds: Option<&MovementBounds>,
    ) -> Pose {
        let mut x = position.x + (f64::from(state.velocity.x) * dt) as f32;
        if let Some(bounds) = bounds {
            x = bounds.clamp(x);
        }

        match self {
            Self::Linear => Pose {
                translation: Vec3::new(x, height, position.z),
                rotation: None,
            },
            Self::Arc(arc) => {
                let radius = f64::from(height);
                if radius != 0.0 {
                    let arc_length = f64::from(state.velocity.y) * dt;
                    state.arc_angle += 360.0 * arc_length / (TAU * radius);
                }

                let radians = state.arc_angle.to_radians();
                let y = (radians.cos() * radius) as f32 + arc.pivot.y;
                let z = (radians.sin() * radius) as f32 + arc.pivot.z;

                Pose {
                    translation: Vec3::new(x, y, z),
                    rotation: Some(Quat::from_rotation_x(radians as f32)),
                }
            }
        }
    }
}
