//! Core domain: app state, camera, and run bookkeeping.

mod resources;
mod state;
mod systems;

pub use resources::RunStats;
pub use state::GameState;

use bevy::prelude::*;

use crate::core::systems::{record_run_stats, setup_camera};

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .init_resource::<RunStats>()
            .add_systems(Startup, setup_camera)
            .add_systems(Update, record_run_stats.run_if(in_state(GameState::Run)));
    }
}
