//! Integration tests for the locomotion plugin.
//!
//! These tests run the full system chain in a headless app with manually
//! stepped time, and check the resulting transforms, markers and events.

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use curve_locomotion::prelude::*;

const FRAME: f64 = 1.0 / 60.0;

/// Jump events seen by a reader system.
#[derive(Resource, Default)]
struct JumpLog {
    started: Vec<JumpStarted>,
    landed: Vec<Landed>,
}

fn record_jump_events(
    mut started: EventReader<JumpStarted>,
    mut landed: EventReader<Landed>,
    mut log: ResMut<JumpLog>,
) {
    log.started.extend(started.read().copied());
    log.landed.extend(landed.read().copied());
}

/// Create a minimal test app with the locomotion plugin.
///
/// Each update advances time by one 60 Hz frame. The first update after
/// creation has a zero delta, so it is run here.
fn create_test_app() -> App {
    let mut app = App::new();

    app.add_plugins(MinimalPlugins);
    app.add_plugins(LocomotionPlugin);
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
        FRAME,
    )));
    app.init_resource::<JumpLog>();
    app.add_systems(Update, record_jump_events.after(LocomotionSet::Motion));

    app.finish();
    app.cleanup();
    app.update();
    app
}

/// Spawn a linear controller with the player preset.
fn spawn_player(app: &mut App, position: Vec3) -> Entity {
    app.world_mut()
        .spawn((
            Transform::from_translation(position),
            LocomotionController::player(),
            MovementIntent::default(),
        ))
        .id()
}

/// Spawn an arc controller with the enemy preset.
fn spawn_enemy(app: &mut App, position: Vec3, pivot: Vec3, tracker: TargetTracker) -> Entity {
    app.world_mut()
        .spawn((
            Transform::from_translation(position),
            LocomotionController::enemy(pivot),
            MovementIntent::default(),
            tracker,
        ))
        .id()
}

/// Run the app for N frames.
fn run_frames(app: &mut App, frames: usize) {
    for _ in 0..frames {
        app.update();
    }
}

fn intent_mut(app: &mut App, entity: Entity) -> Mut<'_, MovementIntent> {
    app.world_mut()
        .get_mut::<MovementIntent>(entity)
        .expect("entity has an intent")
}

fn translation(app: &App, entity: Entity) -> Vec3 {
    app.world()
        .get::<Transform>(entity)
        .expect("entity has a transform")
        .translation
}

fn controller(app: &App, entity: Entity) -> &LocomotionController {
    app.world()
        .get::<LocomotionController>(entity)
        .expect("entity has a controller")
}

// ==================== Horizontal Movement Tests ====================

mod horizontal {
    use super::*;

    #[test]
    fn player_reaches_max_speed() {
        let mut app = create_test_app();
        let player = spawn_player(&mut app, Vec3::new(0.0, 2.0, 0.0));
        intent_mut(&mut app, player).set_lateral(1.0);

        run_frames(&mut app, 15);
        let early = controller(&app, player).velocity().x;
        assert!(early > 0.0 && early < 5.0, "mid-ramp velocity {early}");

        run_frames(&mut app, 45);
        assert_eq!(controller(&app, player).velocity().x, 5.0);
        assert!(translation(&app, player).x > 3.0);
        assert_eq!(translation(&app, player).y, 2.0);
    }

    #[test]
    fn release_decelerates_to_rest() {
        let mut app = create_test_app();
        let player = spawn_player(&mut app, Vec3::new(0.0, 2.0, 0.0));
        intent_mut(&mut app, player).set_lateral(-1.0);
        run_frames(&mut app, 60);
        assert_eq!(controller(&app, player).velocity().x, -5.0);

        intent_mut(&mut app, player).clear();
        run_frames(&mut app, 5);
        let easing = controller(&app, player).velocity().x;
        assert!(easing < 0.0 && easing > -5.0);

        run_frames(&mut app, 30);
        assert_eq!(controller(&app, player).velocity().x, 0.0);
    }

    #[test]
    fn bounds_stop_the_player() {
        let mut app = create_test_app();
        let player = spawn_player(&mut app, Vec3::new(0.0, 2.0, 0.0));
        app.world_mut()
            .entity_mut(player)
            .insert(MovementBounds::new(-1.0, 1.5).with_width(1.0));
        intent_mut(&mut app, player).set_lateral(1.0);

        run_frames(&mut app, 90);
        assert_eq!(translation(&app, player).x, 1.0);
    }

    #[test]
    fn toml_config_drives_controller() {
        let config = MotionConfig::from_toml_str(
            r#"
            max_speed = 8.0

            [ground]
            acceleration_time = 0.25
            "#,
        )
        .unwrap();
        let mut app = create_test_app();
        let player = app
            .world_mut()
            .spawn((
                Transform::from_xyz(0.0, 2.0, 0.0),
                LocomotionController::new(config, PositionProjector::Linear).unwrap(),
                MovementIntent::default(),
            ))
            .id();
        intent_mut(&mut app, player).set_lateral(1.0);

        run_frames(&mut app, 20);
        assert_eq!(controller(&app, player).velocity().x, 8.0);
    }
}

// ==================== Jump Tests ====================

mod jump {
    use super::*;

    #[test]
    fn markers_follow_jump_state() {
        let mut app = create_test_app();
        let player = spawn_player(&mut app, Vec3::new(0.0, 2.0, 0.0));

        run_frames(&mut app, 1);
        assert!(app.world().get::<Grounded>(player).is_some());
        assert!(app.world().get::<Airborne>(player).is_none());

        intent_mut(&mut app, player).request_jump();
        run_frames(&mut app, 1);
        assert!(app.world().get::<Airborne>(player).is_some());
        assert!(app.world().get::<Grounded>(player).is_none());

        run_frames(&mut app, 40);
        assert!(app.world().get::<Grounded>(player).is_some());
        assert!(app.world().get::<Airborne>(player).is_none());
    }

    #[test]
    fn jump_rises_and_returns_to_base_height() {
        let mut app = create_test_app();
        let player = spawn_player(&mut app, Vec3::new(0.0, 2.0, 0.0));

        intent_mut(&mut app, player).set_jump_pressed(true);
        run_frames(&mut app, 15);
        let y = translation(&app, player).y;
        assert!(y > 2.0 && y < 5.0, "mid-jump height {y}");
        assert!(controller(&app, player).is_airborne());

        run_frames(&mut app, 25);
        assert!(!controller(&app, player).is_airborne());
        assert_eq!(translation(&app, player).y, 2.0);
    }

    #[test]
    fn held_button_jumps_once() {
        let mut app = create_test_app();
        let player = spawn_player(&mut app, Vec3::new(0.0, 2.0, 0.0));

        intent_mut(&mut app, player).set_jump_pressed(true);
        run_frames(&mut app, 80);

        let log = app.world().resource::<JumpLog>();
        assert_eq!(log.started.len(), 1);
        assert_eq!(log.landed.len(), 1);
    }

    #[test]
    fn events_carry_entity_and_position() {
        let mut app = create_test_app();
        let player = spawn_player(&mut app, Vec3::new(0.5, 2.0, 0.0));

        intent_mut(&mut app, player).request_jump();
        run_frames(&mut app, 40);

        let log = app.world().resource::<JumpLog>();
        assert_eq!(log.started[0].entity, player);
        assert_eq!(log.started[0].position, Vec3::new(0.5, 2.0, 0.0));
        assert_eq!(log.landed[0].entity, player);
        assert_eq!(log.landed[0].position.y, 5.0);
    }
}

// ==================== Target Tracking Tests ====================

mod tracking {
    use super::*;

    const PIVOT: Vec3 = Vec3::new(0.0, 0.0, -6.0);

    #[test]
    fn enemy_orbits_toward_point() {
        let mut app = create_test_app();
        let target = Vec3::new(3.0, 2.0, -4.0);
        let enemy = spawn_enemy(
            &mut app,
            Vec3::new(0.0, 2.0, -6.0),
            PIVOT,
            TargetTracker::point(target),
        );

        run_frames(&mut app, 30);

        let intent = app.world().get::<MovementIntent>(enemy).unwrap();
        assert_eq!(intent.lateral, 1.0);
        assert!(intent.secondary > 0.5);

        assert!(controller(&app, enemy).total_rotation() > 0.0);
        assert!(translation(&app, enemy).x > 0.0);
        let rotation = app.world().get::<Transform>(enemy).unwrap().rotation;
        assert_ne!(rotation, Quat::IDENTITY);

        let position = translation(&app, enemy);
        let radius = Vec2::new(position.y - PIVOT.y, position.z - PIVOT.z).length();
        assert!((radius - 2.0).abs() < 1e-3);
    }

    #[test]
    fn enemy_follows_target_entity() {
        let mut app = create_test_app();
        let target = app
            .world_mut()
            .spawn(GlobalTransform::from_translation(Vec3::new(-4.0, 0.0, 0.0)))
            .id();
        let enemy = spawn_enemy(
            &mut app,
            Vec3::new(0.0, 2.0, -6.0),
            PIVOT,
            TargetTracker::entity(target),
        );

        run_frames(&mut app, 30);

        assert_eq!(app.world().get::<MovementIntent>(enemy).unwrap().lateral, -1.0);
        assert!(translation(&app, enemy).x < 0.0);
    }

    #[test]
    fn parented_enemy_aims_in_parent_space() {
        let mut app = create_test_app();
        let rig = app
            .world_mut()
            .spawn(GlobalTransform::from_translation(Vec3::new(10.0, 0.0, 0.0)))
            .id();
        let enemy = spawn_enemy(
            &mut app,
            Vec3::new(0.0, 2.0, -6.0),
            PIVOT,
            TargetTracker::point(Vec3::new(9.0, 2.0, -4.0)),
        );
        app.world_mut().entity_mut(enemy).insert(ChildOf(rig));

        run_frames(&mut app, 1);

        // The target is one unit left of the rig, so left of the enemy locally.
        assert_eq!(app.world().get::<MovementIntent>(enemy).unwrap().lateral, -1.0);
    }

    #[test]
    fn missing_target_gives_zero_intent() {
        let mut app = create_test_app();
        let gone = app.world_mut().spawn_empty().id();
        app.world_mut().despawn(gone);
        let enemy = spawn_enemy(
            &mut app,
            Vec3::new(0.0, 2.0, -6.0),
            PIVOT,
            TargetTracker::entity(gone),
        );

        run_frames(&mut app, 10);

        let intent = app.world().get::<MovementIntent>(enemy).unwrap();
        assert_eq!(intent.axes(), Vec2::ZERO);
        assert_eq!(controller(&app, enemy).total_rotation(), 0.0);
        assert_eq!(translation(&app, enemy).x, 0.0);
    }

    #[test]
    fn untargeted_enemy_stays_put() {
        let mut app = create_test_app();
        let enemy = spawn_enemy(
            &mut app,
            Vec3::new(0.0, 2.0, -6.0),
            PIVOT,
            TargetTracker::default(),
        );

        run_frames(&mut app, 10);

        assert_eq!(controller(&app, enemy).velocity(), Vec2::ZERO);
        assert_eq!(controller(&app, enemy).total_rotation(), 0.0);
    }
}
