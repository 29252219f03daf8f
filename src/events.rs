//! Jump lifecycle events.
//!
//! Cosmetic layers (takeoff dust, squash and stretch) read these with an
//! `EventReader` instead of reaching into controllers.

use bevy::prelude::*;

/// Sent on the tick an entity leaves the ground.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct JumpStarted {
    pub entity: Entity,
    /// Translation at takeoff, before this tick's movement.
    pub position: Vec3,
}

/// Sent on the tick a jump arc completes.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct Landed {
    pub entity: Entity,
    /// Translation after this tick's movement.
    pub position: Vec3,
}
