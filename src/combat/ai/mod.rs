//! Combat domain: AI system modules for enemies.

pub(crate) mod enemy;

pub(crate) use enemy::{apply_enemy_ai, sense_enemy_surroundings};
pub use enemy::{EnemyAction, EnemyKind, EnemySenses, PatrolController};
