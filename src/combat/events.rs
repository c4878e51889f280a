//! Combat domain: combat-related events.

use bevy::ecs::message::Message;
use bevy::prelude::*;

/// A knockback started and wrote its impulse to the target's velocity
#[derive(Debug)]
pub struct KnockbackApplied {
    pub entity: Entity,
    pub impulse: Vec2,
}

impl Message for KnockbackApplied {}

/// The player landed on an enemy from above
#[derive(Debug)]
pub struct EnemyStomped {
    pub player: Entity,
    pub enemy: Entity,
}

impl Message for EnemyStomped {}
