//! Data definitions for the RON tuning file.

use serde::{Deserialize, Serialize};

use crate::combat::{EnemyTuning, KnockbackTuning};
use crate::movement::{MovementTuning, ProbeTuning};

/// Bumped whenever a field changes meaning.
pub const TUNING_SCHEMA_VERSION: u32 = 1;

/// Top-level layout of `assets/data/tuning.ron`. Missing sections and fields fall
/// back to their defaults.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TuningFile {
    pub schema_version: u32,
    pub movement: MovementTuning,
    pub probes: ProbeTuning,
    pub knockback: KnockbackTuning,
    pub enemy: EnemyTuning,
}

impl Default for TuningFile {
    fn default() -> Self {
        Self {
            schema_version: TUNING_SCHEMA_VERSION,
            movement: MovementTuning::default(),
            probes: ProbeTuning::default(),
            knockback: KnockbackTuning::default(),
            enemy: EnemyTuning::default(),
        }
    }
}
