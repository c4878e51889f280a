//! Combat domain: tuning resources for knockback and enemies.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::movement::{TuningError, non_negative, positive};

#[derive(Resource, Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct KnockbackTuning {
    pub duration: f32,
    /// Horizontal impulse, applied away from the facing direction.
    pub power_x: f32,
    pub power_y: f32,
}

impl Default for KnockbackTuning {
    fn default() -> Self {
        Self {
            duration: 1.0,
            power_x: 4.0,
            power_y: 6.0,
        }
    }
}

impl KnockbackTuning {
    pub fn errors(&self) -> Vec<TuningError> {
        let mut errors = Vec::new();
        positive(&mut errors, "knockback.duration", self.duration);
        non_negative(&mut errors, "knockback.power_x", self.power_x);
        non_negative(&mut errors, "knockback.power_y", self.power_y);
        errors
    }
}

#[derive(Resource, Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct EnemyTuning {
    pub move_speed: f32,
    /// Length of the ledge ray cast down just ahead of the enemy.
    pub ground_check_distance: f32,
    pub wall_check_distance: f32,
    pub aggro_range: f32,
    /// Upward velocity while dying.
    pub death_impact: f32,
    /// Degrees per second.
    pub death_rotation_speed: f32,
    pub patrol_pause_min: f32,
    pub patrol_pause_max: f32,
    pub despawn_delay: f32,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            move_speed: 2.0,
            ground_check_distance: 0.5,
            wall_check_distance: 0.1,
            aggro_range: 3.0,
            death_impact: 5.0,
            death_rotation_speed: 360.0,
            patrol_pause_min: 1.0,
            patrol_pause_max: 2.0,
            despawn_delay: 1.0,
        }
    }
}

impl EnemyTuning {
    pub fn errors(&self) -> Vec<TuningError> {
        let mut errors = Vec::new();
        non_negative(&mut errors, "enemy.move_speed", self.move_speed);
        positive(&mut errors, "enemy.ground_check_distance", self.ground_check_distance);
        positive(&mut errors, "enemy.wall_check_distance", self.wall_check_distance);
        non_negative(&mut errors, "enemy.aggro_range", self.aggro_range);
        non_negative(&mut errors, "enemy.death_impact", self.death_impact);
        non_negative(&mut errors, "enemy.death_rotation_speed", self.death_rotation_speed);
        non_negative(&mut errors, "enemy.patrol_pause_min", self.patrol_pause_min);
        non_negative(&mut errors, "enemy.despawn_delay", self.despawn_delay);

        if !self.patrol_pause_max.is_finite() || self.patrol_pause_max < self.patrol_pause_min {
            errors.push(TuningError {
                field: "enemy.patrol_pause_max",
                value: self.patrol_pause_max,
                reason: "must be >= enemy.patrol_pause_min",
            });
        }

        errors
    }

    /// Draw a patrol pause length from `[patrol_pause_min, patrol_pause_max)`.
    pub fn roll_patrol_pause(&self, rng: &mut impl rand::Rng) -> f32 {
        if self.patrol_pause_max > self.patrol_pause_min {
            rng.random_range(self.patrol_pause_min..self.patrol_pause_max)
        } else {
            self.patrol_pause_min
        }
    }
}
