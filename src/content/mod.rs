//! Content domain: data-driven tuning loaded from `assets/data`.

mod data;
mod loader;
mod validation;

pub use data::{TUNING_SCHEMA_VERSION, TuningFile};
pub use loader::{ContentLoadError, load_tuning_file, parse_tuning};
pub use validation::validate_tuning;

use bevy::prelude::*;
use std::path::Path;

use crate::core::GameState;

pub const TUNING_PATH: &str = "assets/data/tuning.ron";

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, load_tuning);
    }
}

/// A missing or unreadable file falls back to defaults; invalid values stop the app.
fn load_tuning(
    mut commands: Commands,
    mut next_state: ResMut<NextState<GameState>>,
    mut exit: MessageWriter<AppExit>,
) {
    let path = Path::new(TUNING_PATH);
    let tuning = match load_tuning_file(path) {
        Ok(tuning) => {
            info!("Loaded tuning from {}", path.display());
            tuning
        }
        Err(e) => {
            warn!("{}; using default tuning", e);
            TuningFile::default()
        }
    };

    let errors = validate_tuning(&tuning);
    if !errors.is_empty() {
        for e in &errors {
            error!("Invalid tuning: {}", e);
        }
        exit.write(AppExit::error());
        return;
    }

    commands.insert_resource(tuning.movement);
    commands.insert_resource(tuning.probes);
    commands.insert_resource(tuning.knockback);
    commands.insert_resource(tuning.enemy);
    next_state.set(GameState::Run);
}
