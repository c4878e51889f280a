//! Validation of loaded tuning values.

use super::data::{TUNING_SCHEMA_VERSION, TuningFile};
use crate::movement::TuningError;

/// Returns every invalid value, empty if the tuning is usable.
pub fn validate_tuning(file: &TuningFile) -> Vec<TuningError> {
    let mut errors = Vec::new();

    if file.schema_version != TUNING_SCHEMA_VERSION {
        errors.push(TuningError {
            field: "schema_version",
            value: file.schema_version as f32,
            reason: "does not match the supported tuning schema",
        });
    }

    errors.extend(file.movement.errors());
    errors.extend(file.probes.errors());
    errors.extend(file.knockback.errors());
    errors.extend(file.enemy.errors());

    errors
}
