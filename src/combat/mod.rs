//! Combat domain: knockback lock, enemy stomping, and patrol enemies.

pub(crate) mod ai;
mod components;
mod events;
mod resources;
mod spawn;
mod systems;
#[cfg(test)]
mod tests;

pub use ai::{EnemyAction, EnemyKind, EnemySenses, PatrolController};
pub use components::{DespawnTimer, Enemy, Knockback};
pub use events::{EnemyStomped, KnockbackApplied};
pub use resources::{EnemyTuning, KnockbackTuning};
pub use spawn::EnemyBundle;

use bevy::prelude::*;

use crate::combat::ai::{apply_enemy_ai, sense_enemy_surroundings};
use crate::combat::systems::{despawn_expired, stomp_enemies, tick_knockback};
use crate::core::GameState;
use crate::movement::LocomotionSet;

/// Systems that change the knockback gate or overwrite the player's velocity. They
/// settle before any controller call in the frame, so a jump press and the tick
/// always see the same gate.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct KnockbackGateSet;

pub(crate) fn configure_knockback_gate(app: &mut App) {
    app.configure_sets(Update, KnockbackGateSet.before(LocomotionSet::Input));
}

pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        configure_knockback_gate(app);

        app.init_resource::<KnockbackTuning>()
            .init_resource::<EnemyTuning>()
            .add_message::<KnockbackApplied>()
            .add_message::<EnemyStomped>()
            .add_systems(
                Update,
                (
                    (tick_knockback, stomp_enemies)
                        .chain()
                        .in_set(KnockbackGateSet),
                    (sense_enemy_surroundings, apply_enemy_ai, despawn_expired).chain(),
                )
                    .run_if(in_state(GameState::Run)),
            );

        #[cfg(feature = "dev-tools")]
        app.add_systems(OnEnter(GameState::Run), spawn::spawn_practice_enemies)
            .add_systems(
                Update,
                systems::trigger_debug_knockback
                    .in_set(KnockbackGateSet)
                    .after(tick_knockback)
                    .before(stomp_enemies)
                    .run_if(in_state(GameState::Run)),
            );
    }
}
