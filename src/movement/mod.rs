//! Movement domain: player locomotion, environment probes, and orientation.

mod bootstrap;
mod components;
mod controller;
#[cfg(feature = "dev-tools")]
mod dev;
mod resources;
mod systems;

pub use components::{AnimationParams, CollisionProbe, Facing, GameLayer, Ground, Player, Wall};
pub use controller::{
    EnvironmentProbe, INTENT_EPSILON, JumpBuffer, JumpEconomy, KnockbackGate, MovementState,
    Orientation, PlayerMovementController, Surroundings, VelocityCommand, input_direction,
};
pub use resources::{MovementInput, MovementTuning, ProbeTuning, TuningError};

pub(crate) use resources::{non_negative, positive};
pub(crate) use systems::apply_player_input;
pub(crate) use systems::collisions::{half_extents, solid_filter};

use bevy::prelude::*;

use crate::core::GameState;
use crate::movement::bootstrap::{spawn_player, verify_player_wiring};
use crate::movement::systems::{
    detect_ground, detect_walls, drive_locomotion, read_input, update_animation_params,
    update_facing,
};

/// Per-frame locomotion phases. Knockback and stomp run before `Input`, so the gate is
/// settled for the whole frame.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum LocomotionSet {
    Input,
    Sense,
    Drive,
    Present,
}

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MovementTuning>()
            .init_resource::<ProbeTuning>()
            .init_resource::<MovementInput>()
            .configure_sets(
                Update,
                (
                    LocomotionSet::Input,
                    LocomotionSet::Sense,
                    LocomotionSet::Drive,
                    LocomotionSet::Present,
                )
                    .chain()
                    .run_if(in_state(GameState::Run)),
            )
            .add_systems(
                OnEnter(GameState::Run),
                (spawn_player, verify_player_wiring).chain(),
            )
            .add_systems(
                Update,
                (
                    (read_input, apply_player_input)
                        .chain()
                        .in_set(LocomotionSet::Input),
                    (update_facing, detect_ground, detect_walls)
                        .chain()
                        .in_set(LocomotionSet::Sense),
                    drive_locomotion.in_set(LocomotionSet::Drive),
                    update_animation_params.in_set(LocomotionSet::Present),
                ),
            );

        #[cfg(feature = "dev-tools")]
        app.add_systems(OnEnter(GameState::Run), dev::spawn_test_room);
    }
}
