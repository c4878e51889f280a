//! Core domain: camera setup and run bookkeeping.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::combat::{EnemyStomped, KnockbackApplied};
use crate::core::resources::RunStats;

/// Screen pixels per world unit.
pub const PIXELS_PER_UNIT: f32 = 48.0;

pub(crate) fn setup_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        Projection::Orthographic(OrthographicProjection {
            scale: 1.0 / PIXELS_PER_UNIT,
            ..OrthographicProjection::default_2d()
        }),
    ));
}

pub(crate) fn record_run_stats(
    mut stomps: MessageReader<EnemyStomped>,
    mut knockbacks: MessageReader<KnockbackApplied>,
    mut stats: ResMut<RunStats>,
) {
    for _ in stomps.read() {
        stats.record_stomp();
        info!("{} enemies stomped", stats.enemies_stomped);
    }

    for _ in knockbacks.read() {
        stats.record_knockback();
    }
}
