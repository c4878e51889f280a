//! Movement domain: player bootstrap and collaborator wiring checks.

use std::fmt;

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::combat::{Knockback, KnockbackTuning};
use crate::movement::{
    AnimationParams, CollisionProbe, Facing, GameLayer, MovementTuning, Player,
    PlayerMovementController,
};

/// Player body size in world units.
pub(crate) const PLAYER_SIZE: Vec2 = Vec2::new(0.8, 1.0);

/// Spawn the player with every collaborator the locomotion controller reads.
pub(crate) fn spawn_player(
    mut commands: Commands,
    tuning: Res<MovementTuning>,
    knockback: Res<KnockbackTuning>,
    existing_player: Query<Entity, With<Player>>,
    mut exit: MessageWriter<AppExit>,
) {
    if !existing_player.is_empty() {
        info!("Player already exists, skipping spawn");
        return;
    }

    let controller = match PlayerMovementController::new(tuning.clone()) {
        Ok(controller) => controller,
        Err(err) => {
            error!("Cannot build player controller: {}", err);
            exit.write(AppExit::error());
            return;
        }
    };

    info!(
        "Spawning player: move_speed={}, jump_force={}, jump_cap={}, buffer={}s",
        tuning.move_speed, tuning.jump_force, tuning.jump_cap, tuning.jump_buffer_time
    );

    commands.spawn((
        // Identity & Locomotion
        (
            Player,
            controller,
            CollisionProbe::default(),
            Facing::default(),
            Knockback::from_tuning(&knockback),
            AnimationParams::default(),
        ),
        // Rendering
        Sprite {
            color: Color::srgb(0.9, 0.9, 0.9),
            custom_size: Some(PLAYER_SIZE),
            ..default()
        },
        Transform::from_xyz(0.0, 1.0, 0.0),
        // Physics
        (
            RigidBody::Dynamic,
            Collider::rectangle(PLAYER_SIZE.x, PLAYER_SIZE.y),
            LockedAxes::ROTATION_LOCKED,
            LinearVelocity::default(),
            GravityScale(1.0),
            Friction::new(0.0),
            CollisionLayers::new(
                GameLayer::Player,
                [GameLayer::Ground, GameLayer::Wall, GameLayer::Enemy],
            ),
        ),
    ));
}

/// Which collaborators a player entity actually carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PlayerWiring {
    pub controller: bool,
    pub probe: bool,
    pub facing: bool,
    pub knockback: bool,
    pub velocity: bool,
    pub gravity: bool,
}

impl PlayerWiring {
    pub fn missing(&self) -> Vec<&'static str> {
        [
            (self.controller, "PlayerMovementController"),
            (self.probe, "CollisionProbe"),
            (self.facing, "Facing"),
            (self.knockback, "Knockback"),
            (self.velocity, "LinearVelocity"),
            (self.gravity, "GravityScale"),
        ]
        .into_iter()
        .filter(|(present, _)| !present)
        .map(|(_, name)| name)
        .collect()
    }

    pub fn check(&self, entity: Entity) -> Result<(), WiringError> {
        let missing = self.missing();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(WiringError { entity, missing })
        }
    }
}

/// A player spawned without a collaborator the controller needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WiringError {
    pub entity: Entity,
    pub missing: Vec<&'static str>,
}

impl fmt::Display for WiringError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "player {:?} is missing required components: {}",
            self.entity,
            self.missing.join(", ")
        )
    }
}

impl std::error::Error for WiringError {}

/// Missing collaborators are a startup error, never a per-frame one.
pub(crate) fn verify_player_wiring(
    players: Query<
        (
            Entity,
            Has<PlayerMovementController>,
            Has<CollisionProbe>,
            Has<Facing>,
            Has<Knockback>,
            Has<LinearVelocity>,
            Has<GravityScale>,
        ),
        With<Player>,
    >,
    mut exit: MessageWriter<AppExit>,
) {
    for (entity, controller, probe, facing, knockback, velocity, gravity) in &players {
        let wiring = PlayerWiring {
            controller,
            probe,
            facing,
            knockback,
            velocity,
            gravity,
        };

        match wiring.check(entity) {
            Ok(()) => debug!("Player {:?} wiring verified", entity),
            Err(err) => {
                error!("{}", err);
                exit.write(AppExit::error());
            }
        }
    }
}
