//! Combat domain: enemy spawning helpers.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::combat::ai::{EnemyKind, EnemySenses, PatrolController};
use crate::combat::components::Enemy;
use crate::movement::{Facing, GameLayer};

/// Bundle for spawning a patrolling enemy
#[derive(Bundle)]
pub struct EnemyBundle {
    pub enemy: Enemy,
    pub controller: PatrolController,
    pub senses: EnemySenses,
    pub sprite: Sprite,
    pub transform: Transform,
    pub rigid_body: RigidBody,
    pub collider: Collider,
    pub collision_layers: CollisionLayers,
    pub velocity: LinearVelocity,
    pub locked_axes: LockedAxes,
    pub gravity_scale: GravityScale,
    pub friction: Friction,
}

impl EnemyBundle {
    pub fn new(kind: EnemyKind, position: Vec2, facing: Facing) -> Self {
        let size = Vec2::new(0.8, 0.7);
        let color = match kind {
            EnemyKind::Walker => Color::srgb(0.8, 0.4, 0.4),
            EnemyKind::Mushroom => Color::srgb(0.7, 0.5, 0.8),
        };

        Self {
            enemy: Enemy,
            controller: PatrolController::new(kind, facing, true),
            senses: EnemySenses::default(),
            sprite: Sprite {
                color,
                custom_size: Some(size),
                ..default()
            },
            transform: Transform::from_xyz(position.x, position.y, 0.0),
            rigid_body: RigidBody::Dynamic,
            collider: Collider::rectangle(size.x, size.y),
            collision_layers: CollisionLayers::new(
                GameLayer::Enemy,
                [GameLayer::Ground, GameLayer::Wall, GameLayer::Player],
            ),
            velocity: LinearVelocity::default(),
            locked_axes: LockedAxes::ROTATION_LOCKED,
            gravity_scale: GravityScale(1.0),
            friction: Friction::new(0.0),
        }
    }
}

#[cfg(feature = "dev-tools")]
pub(crate) fn spawn_practice_enemies(mut commands: Commands) {
    for (kind, position, facing) in [
        (EnemyKind::Mushroom, Vec2::new(5.0, -4.0), Facing::Left),
        (EnemyKind::Mushroom, Vec2::new(6.25, 1.9), Facing::Right),
    ] {
        commands.spawn(EnemyBundle::new(kind, position, facing));
    }
    info!("Spawned practice enemies");
}
