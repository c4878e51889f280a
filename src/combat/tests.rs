//! Combat domain: unit tests for knockback and patrol enemies.

use std::time::Duration;

use avian2d::prelude::*;
use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::systems::tick_knockback;
use super::{
    EnemyAction, EnemyKind, EnemySenses, EnemyTuning, Knockback, KnockbackGateSet,
    KnockbackTuning, PatrolController, configure_knockback_gate,
};
use crate::movement::{
    CollisionProbe, Facing, KnockbackGate, LocomotionSet, MovementInput, MovementTuning,
    Player, PlayerMovementController, apply_player_input,
};

const DT: f32 = 1.0 / 60.0;

fn rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(7)
}

fn open_floor() -> EnemySenses {
    EnemySenses {
        ground_ahead: true,
        ..default()
    }
}

// -----------------------------------------------------------------------------
// Knockback
// -----------------------------------------------------------------------------

#[test]
fn test_knockback_pushes_away_from_facing() {
    let mut knockback = Knockback::from_tuning(&KnockbackTuning::default());

    let impulse = knockback.trigger(1).unwrap();

    assert_eq!(impulse, Vec2::new(-4.0, 6.0));
    assert!(knockback.is_knocked());
    assert!(knockback.is_knocked_back());
    assert!(!knockback.can_be_knocked);
}

#[test]
fn test_knockback_facing_left_pushes_right() {
    let mut knockback = Knockback::new(0.5, Vec2::new(3.0, 2.0));

    assert_eq!(knockback.trigger(-1), Some(Vec2::new(3.0, 2.0)));
}

#[test]
fn test_knockback_refused_while_running() {
    let mut knockback = Knockback::new(1.0, Vec2::new(4.0, 6.0));
    knockback.trigger(1);
    knockback.tick(0.5);

    assert_eq!(knockback.trigger(1), None);
    assert_eq!(knockback.timer, 0.5);
}

#[test]
fn test_knockback_expires_and_rearms() {
    let mut knockback = Knockback::new(1.0, Vec2::new(4.0, 6.0));
    knockback.trigger(1);

    for _ in 0..61 {
        knockback.tick(DT);
    }

    assert!(!knockback.is_knocked());
    assert_eq!(knockback.timer, 0.0);
    assert!(knockback.can_be_knocked);
    assert!(knockback.trigger(1).is_some());
}

#[test]
fn test_idle_knockback_is_not_knocked() {
    let mut knockback = Knockback::new(1.0, Vec2::ZERO);
    knockback.tick(DT);

    assert!(!knockback.is_knocked());
    assert!(knockback.can_be_knocked);
}

// -----------------------------------------------------------------------------
// Knockback gate ordering
// -----------------------------------------------------------------------------

fn knock_player(mut query: Query<&mut Knockback, With<Player>>) {
    for mut knockback in &mut query {
        knockback.trigger(1);
    }
}

/// One frame with a jump press, the knockback systems, and the input system.
fn gate_app(knockback: Knockback) -> (App, Entity) {
    let mut app = App::new();
    configure_knockback_gate(&mut app);
    app.insert_resource(Time::<()>::default())
        .insert_resource(MovementInput {
            axis: Vec2::ZERO,
            jump_just_pressed: true,
        })
        .add_systems(
            Update,
            (
                apply_player_input.in_set(LocomotionSet::Input),
                tick_knockback.in_set(KnockbackGateSet),
            ),
        );

    let player = app
        .world_mut()
        .spawn((
            Player,
            PlayerMovementController::new(MovementTuning::default()).unwrap(),
            CollisionProbe::default(),
            Facing::Right,
            knockback,
            LinearVelocity::default(),
        ))
        .id();

    app.world_mut()
        .resource_mut::<Time>()
        .advance_by(Duration::from_millis(100));

    (app, player)
}

#[test]
fn test_press_on_the_frame_knockback_ends_is_kept() {
    let mut knockback = Knockback::new(0.05, Vec2::new(4.0, 6.0));
    knockback.trigger(1);
    let (mut app, player) = gate_app(knockback);

    app.update();

    let world = app.world();
    let controller = world.get::<PlayerMovementController>(player).unwrap();
    assert!(!world.get::<Knockback>(player).unwrap().is_knocked());
    assert_eq!(controller.jump_count(), 1);
    assert_eq!(world.get::<LinearVelocity>(player).unwrap().y, 7.5);
}

#[test]
fn test_press_on_the_frame_knockback_starts_is_dropped() {
    let (mut app, player) = gate_app(Knockback::new(1.0, Vec2::new(4.0, 6.0)));
    app.add_systems(
        Update,
        knock_player.in_set(KnockbackGateSet).after(tick_knockback),
    );

    app.update();

    let controller = app
        .world()
        .get::<PlayerMovementController>(player)
        .unwrap();
    assert!(controller.is_player_knocked());
    assert_eq!(controller.jump_count(), 0);
    assert_eq!(controller.jump_buffer_remaining(), 0.0);
}

// -----------------------------------------------------------------------------
// Patrol enemies
// -----------------------------------------------------------------------------

#[test]
fn test_walker_patrols_in_facing_direction() {
    let tuning = EnemyTuning::default();
    let mut rng = rng();
    let mut walker = PatrolController::new(EnemyKind::Walker, Facing::Left, true);

    let action = walker.tick(DT, &open_floor(), &tuning, &mut rng);

    assert_eq!(action, EnemyAction::Patrol { velocity_x: -2.0 });
}

#[test]
fn test_walker_ignores_ledges() {
    let tuning = EnemyTuning::default();
    let mut rng = rng();
    let mut walker = PatrolController::new(EnemyKind::Walker, Facing::Right, true);

    walker.tick(DT, &EnemySenses::default(), &tuning, &mut rng);

    assert!(walker.is_patrolling());
    assert!(!walker.is_paused());
}

#[test]
fn test_enemy_not_patrolling_stays_idle() {
    let tuning = EnemyTuning::default();
    let mut rng = rng();
    let mut enemy = PatrolController::new(EnemyKind::Walker, Facing::Right, false);

    assert_eq!(
        enemy.tick(DT, &open_floor(), &tuning, &mut rng),
        EnemyAction::Idle
    );
}

#[test]
fn test_player_ahead_triggers_attack() {
    let tuning = EnemyTuning::default();
    let mut rng = rng();
    let mut enemy = PatrolController::new(EnemyKind::Walker, Facing::Right, true);
    let senses = EnemySenses {
        player_ahead: true,
        ..open_floor()
    };

    assert_eq!(
        enemy.tick(DT, &senses, &tuning, &mut rng),
        EnemyAction::Attack
    );
    assert_eq!(enemy.facing(), Facing::Right);
}

#[test]
fn test_player_behind_turns_enemy_around() {
    let tuning = EnemyTuning::default();
    let mut rng = rng();
    let mut enemy = PatrolController::new(EnemyKind::Walker, Facing::Right, true);
    let senses = EnemySenses {
        player_behind: true,
        ..open_floor()
    };

    assert_eq!(
        enemy.tick(DT, &senses, &tuning, &mut rng),
        EnemyAction::TurnAround
    );
    assert_eq!(enemy.facing(), Facing::Left);
}

#[test]
fn test_mushroom_pauses_at_ledge_then_turns() {
    let tuning = EnemyTuning::default();
    let mut rng = rng();
    let mut mushroom = PatrolController::new(EnemyKind::Mushroom, Facing::Right, true);

    mushroom.tick(DT, &EnemySenses::default(), &tuning, &mut rng);
    assert!(mushroom.is_paused());
    assert!(!mushroom.is_patrolling());

    // Shorter than the minimum pause
    assert_eq!(
        mushroom.tick(0.5, &open_floor(), &tuning, &mut rng),
        EnemyAction::Idle
    );
    assert_eq!(mushroom.facing(), Facing::Right);

    // Longer than the maximum pause
    let action = mushroom.tick(2.0, &open_floor(), &tuning, &mut rng);
    assert_eq!(action, EnemyAction::Patrol { velocity_x: -2.0 });
    assert_eq!(mushroom.facing(), Facing::Left);
    assert!(!mushroom.is_paused());
}

#[test]
fn test_mushroom_pauses_at_wall() {
    let tuning = EnemyTuning::default();
    let mut rng = rng();
    let mut mushroom = PatrolController::new(EnemyKind::Mushroom, Facing::Left, true);
    let senses = EnemySenses {
        wall_ahead: true,
        ..open_floor()
    };

    mushroom.tick(DT, &senses, &tuning, &mut rng);

    assert!(mushroom.is_paused());
}

#[test]
fn test_only_one_pause_pending() {
    let tuning = EnemyTuning {
        patrol_pause_min: 1.0,
        patrol_pause_max: 1.0,
        ..default()
    };
    let mut rng = rng();
    let mut mushroom = PatrolController::new(EnemyKind::Mushroom, Facing::Right, true);
    let ledge = EnemySenses::default();

    // Still at the ledge: repeated detections must not restart the pause
    for _ in 0..5 {
        mushroom.tick(0.1, &ledge, &tuning, &mut rng);
    }
    mushroom.tick(0.55, &open_floor(), &tuning, &mut rng);

    assert!(!mushroom.is_paused());
    assert_eq!(mushroom.facing(), Facing::Left);
}

#[test]
fn test_dead_enemy_reports_dying() {
    let tuning = EnemyTuning::default();
    let mut rng = rng();
    let mut enemy = PatrolController::new(EnemyKind::Mushroom, Facing::Right, true);
    enemy.kill();

    let senses = EnemySenses {
        player_ahead: true,
        ..default()
    };
    let action = enemy.tick(0.5, &senses, &tuning, &mut rng);

    assert!(enemy.is_dead());
    assert_eq!(
        action,
        EnemyAction::Dying {
            velocity_y: 5.0,
            spin_degrees: 180.0,
        }
    );
    assert!(!enemy.is_paused());
}

// -----------------------------------------------------------------------------
// Tuning
// -----------------------------------------------------------------------------

#[test]
fn test_patrol_pause_roll_stays_in_range() {
    let tuning = EnemyTuning::default();
    let mut rng = rng();

    for _ in 0..100 {
        let pause = tuning.roll_patrol_pause(&mut rng);
        assert!((1.0..2.0).contains(&pause));
    }
}

#[test]
fn test_degenerate_pause_range_uses_minimum() {
    let tuning = EnemyTuning {
        patrol_pause_min: 1.5,
        patrol_pause_max: 1.5,
        ..default()
    };

    assert_eq!(tuning.roll_patrol_pause(&mut rng()), 1.5);
}

#[test]
fn test_default_combat_tuning_is_valid() {
    assert!(KnockbackTuning::default().errors().is_empty());
    assert!(EnemyTuning::default().errors().is_empty());
}

#[test]
fn test_inverted_pause_range_is_rejected() {
    let tuning = EnemyTuning {
        patrol_pause_min: 2.0,
        patrol_pause_max: 1.0,
        ..default()
    };

    let errors = tuning.errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field, "enemy.patrol_pause_max");
}

#[test]
fn test_zero_knockback_duration_is_rejected() {
    let tuning = KnockbackTuning {
        duration: 0.0,
        ..default()
    };

    let errors = tuning.errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field, "knockback.duration");
}
