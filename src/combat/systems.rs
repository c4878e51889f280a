//! Combat domain: knockback, stomping, and cleanup systems.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::combat::ai::PatrolController;
use crate::combat::components::{DespawnTimer, Enemy, Knockback};
use crate::combat::events::{EnemyStomped, KnockbackApplied};
use crate::combat::resources::EnemyTuning;
use crate::movement::{Facing, GameLayer, Player, ProbeTuning};

pub(crate) fn tick_knockback(time: Res<Time>, mut query: Query<(Entity, &mut Knockback)>) {
    let dt = time.delta_secs();

    for (entity, mut knockback) in &mut query {
        if !knockback.is_knocked() {
            continue;
        }

        knockback.tick(dt);
        if !knockback.is_knocked() {
            debug!("Knockback ended for {:?}", entity);
        }
    }
}

/// Dev hotkey standing in for a hit from a trap or enemy.
#[cfg(feature = "dev-tools")]
pub(crate) fn trigger_debug_knockback(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut query: Query<(Entity, &mut Knockback, &Facing, &mut LinearVelocity), With<Player>>,
    mut applied: MessageWriter<KnockbackApplied>,
) {
    if !keyboard.just_pressed(KeyCode::KeyT) {
        return;
    }

    for (entity, mut knockback, facing, mut velocity) in &mut query {
        apply_knockback(entity, &mut knockback, *facing, &mut velocity, &mut applied);
    }
}

pub(crate) fn apply_knockback(
    entity: Entity,
    knockback: &mut Knockback,
    facing: Facing,
    velocity: &mut LinearVelocity,
    applied: &mut MessageWriter<KnockbackApplied>,
) {
    let Some(impulse) = knockback.trigger(facing.sign()) else {
        debug!("Knockback refused for {:?}: already knocked", entity);
        return;
    };

    velocity.0 = impulse;
    applied.write(KnockbackApplied { entity, impulse });
    debug!(
        "Knockback applied to {:?}: impulse=({:.1}, {:.1}), duration={:.2}s",
        entity, impulse.x, impulse.y, knockback.duration
    );
}

/// A falling player overlapping an enemy below its feet kills it and bounces.
pub(crate) fn stomp_enemies(
    mut commands: Commands,
    spatial_query: SpatialQuery,
    probes: Res<ProbeTuning>,
    enemy_tuning: Res<EnemyTuning>,
    mut players: Query<(Entity, &Transform, &mut LinearVelocity), With<Player>>,
    mut enemies: Query<&mut PatrolController, With<Enemy>>,
    mut stomped: MessageWriter<EnemyStomped>,
) {
    let filter = SpatialQueryFilter::from_mask(GameLayer::Enemy);
    let probe_shape = Collider::circle(probes.stomp_check_radius);

    for (player, transform, mut velocity) in &mut players {
        if velocity.y >= 0.0 {
            continue;
        }

        let center = transform.translation.truncate() - Vec2::Y * probes.stomp_check_offset;

        for enemy in spatial_query.shape_intersections(&probe_shape, center, 0.0, &filter) {
            let Ok(mut controller) = enemies.get_mut(enemy) else {
                continue;
            };
            if controller.is_dead() {
                continue;
            }

            controller.kill();
            commands
                .entity(enemy)
                .insert((ColliderDisabled, DespawnTimer(enemy_tuning.despawn_delay)));

            velocity.y = probes.stomp_bounce_force;
            stomped.write(EnemyStomped { player, enemy });
            debug!("Player {:?} stomped enemy {:?}", player, enemy);
        }
    }
}

pub(crate) fn despawn_expired(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut DespawnTimer)>,
) {
    let dt = time.delta_secs();

    for (entity, mut timer) in &mut query {
        timer.0 -= dt;
        if timer.0 <= 0.0 {
            commands.entity(entity).despawn();
        }
    }
}
