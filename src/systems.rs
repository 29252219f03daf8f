//! Core locomotion systems.
//!
//! All systems run in `Update`, once per rendered frame, because the motion
//! model is frame-rate independent by construction and does not need a fixed
//! timestep.

use bevy::prelude::*;

use crate::clock::TickClock;
use crate::controller::LocomotionController;
use crate::events::{JumpStarted, Landed};
use crate::intent::MovementIntent;
use crate::projector::{MovementBounds, PositionProjector};
use crate::state::{Airborne, Grounded};
use crate::targeting::{aim_intent, TargetTracker, TrackTarget};

/// Write pursuit intents for every entity with a [`TargetTracker`].
///
/// Entity targets are read from their `GlobalTransform` and brought into the
/// tracker's parent space, where its `Transform` and arc pivot live. A target
/// that has despawned or has no transform yields zero intent.
pub fn drive_target_intents(
    mut q_trackers: Query<(
        Entity,
        &TargetTracker,
        &LocomotionController,
        &Transform,
        Option<&ChildOf>,
        &mut MovementIntent,
    )>,
    q_targets: Query<&GlobalTransform>,
) {
    for (entity, tracker, controller, transform, child_of, mut intent) in &mut q_trackers {
        let target_world = match tracker.target {
            Some(TrackTarget::Point(point)) => Some(point),
            Some(TrackTarget::Entity(target)) => match q_targets.get(target) {
                Ok(global) => Some(global.translation()),
                Err(_) => {
                    debug!("{entity}: tracked target {target} has no transform");
                    None
                }
            },
            None => None,
        };

        let target = match (target_world, child_of) {
            (Some(world), Some(child_of)) => match q_targets.get(child_of.parent()) {
                Ok(parent) => Some(parent.affine().inverse().transform_point3(world)),
                Err(_) => Some(world),
            },
            (target, _) => target,
        };

        let pivot = match controller.projector() {
            PositionProjector::Arc(arc) => arc.pivot,
            PositionProjector::Linear => Vec3::ZERO,
        };

        let aim = aim_intent(
            transform.translation,
            controller.total_rotation(),
            target,
            pivot,
            tracker.base_angular_speed,
        );
        intent.set_axes(aim);
    }
}

/// Advance every controller by one frame and commit the resulting pose.
pub fn step_locomotion(
    time: Res<Time>,
    mut q_controllers: Query<(
        Entity,
        &mut LocomotionController,
        &mut MovementIntent,
        &mut Transform,
        Option<&MovementBounds>,
    )>,
    mut jump_started: EventWriter<JumpStarted>,
    mut landed: EventWriter<Landed>,
) {
    let clock = TickClock::from_time(&time);

    for (entity, mut controller, mut intent, mut transform, bounds) in &mut q_controllers {
        let position = transform.translation;
        let output = controller.tick(position, &mut intent, clock, bounds);

        transform.translation = output.translation;
        if let Some(rotation) = output.rotation {
            transform.rotation = rotation;
        }

        if output.jumped {
            jump_started.write(JumpStarted { entity, position });
        }
        if output.landed {
            landed.write(Landed {
                entity,
                position: output.translation,
            });
        }
    }
}

/// Synchronize the [`Grounded`]/[`Airborne`] markers with controller state.
pub fn sync_state_markers(
    mut commands: Commands,
    q_controllers: Query<(Entity, &LocomotionController, Has<Grounded>, Has<Airborne>)>,
) {
    for (entity, controller, has_grounded, has_airborne) in &q_controllers {
        let airborne = controller.is_airborne();
        if !airborne && !has_grounded {
            commands.entity(entity).insert(Grounded).remove::<Airborne>();
        } else if airborne && !has_airborne {
            commands.entity(entity).insert(Airborne).remove::<Grounded>();
        }
    }
}
