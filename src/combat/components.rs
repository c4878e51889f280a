//! Combat domain: components and combat-related state types.

use bevy::prelude::*;

use crate::combat::KnockbackTuning;
use crate::movement::KnockbackGate;

/// Knockback lock. While knocked, the locomotion controller is inert and the impulse
/// written by [`Knockback::trigger`] owns the body's velocity.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Knockback {
    pub duration: f32,
    pub power: Vec2,
    pub timer: f32,
    pub can_be_knocked: bool,
}

impl Knockback {
    pub fn new(duration: f32, power: Vec2) -> Self {
        Self {
            duration,
            power,
            timer: 0.0,
            can_be_knocked: true,
        }
    }

    pub fn from_tuning(tuning: &KnockbackTuning) -> Self {
        Self::new(tuning.duration, Vec2::new(tuning.power_x, tuning.power_y))
    }

    pub fn is_knocked(&self) -> bool {
        self.timer > 0.0
    }

    /// Start a knockback away from `facing`. Returns the impulse velocity, or `None`
    /// while a previous knockback is still running.
    pub fn trigger(&mut self, facing: i8) -> Option<Vec2> {
        if !self.can_be_knocked {
            return None;
        }

        self.timer = self.duration;
        self.can_be_knocked = false;
        Some(Vec2::new(self.power.x * -f32::from(facing), self.power.y))
    }

    pub fn tick(&mut self, dt: f32) {
        self.timer = (self.timer - dt).max(0.0);
        if self.timer <= 0.0 {
            self.can_be_knocked = true;
        }
    }
}

impl KnockbackGate for Knockback {
    fn is_knocked_back(&self) -> bool {
        self.is_knocked()
    }
}

/// Marks an entity as an enemy
#[derive(Component, Debug)]
pub struct Enemy;

/// Removes the entity once the timer runs out
#[derive(Component, Debug)]
pub struct DespawnTimer(pub f32);
