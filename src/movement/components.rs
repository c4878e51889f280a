//! Movement domain: components and physics layers for locomotion.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::controller::{EnvironmentProbe, Orientation};

/// Physics layers for collision filtering
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Ground surfaces (floors, platforms)
    Ground,
    /// Wall surfaces
    Wall,
    /// Player character
    Player,
    /// Enemy characters
    Enemy,
}

#[derive(Component, Debug)]
pub struct Player;

/// Marker for ground colliders
#[derive(Component, Debug)]
pub struct Ground;

/// Marker for wall colliders
#[derive(Component, Debug)]
pub struct Wall;

/// Latest ground and wall ray results for an entity.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionProbe {
    pub grounded: bool,
    pub wall_detected: bool,
    pub wall_direction: i8,
}

impl Default for CollisionProbe {
    fn default() -> Self {
        Self {
            grounded: false,
            wall_detected: false,
            wall_direction: 1,
        }
    }
}

impl EnvironmentProbe for CollisionProbe {
    fn is_grounded(&self) -> bool {
        self.grounded
    }

    fn is_wall_detected(&self) -> bool {
        self.wall_detected
    }

    fn wall_direction(&self) -> i8 {
        self.wall_direction
    }
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    pub fn from_direction(direction: i8) -> Option<Self> {
        match direction.signum() {
            1 => Some(Facing::Right),
            -1 => Some(Facing::Left),
            _ => None,
        }
    }

    pub fn sign(self) -> i8 {
        match self {
            Facing::Right => 1,
            Facing::Left => -1,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Facing::Right => Facing::Left,
            Facing::Left => Facing::Right,
        }
    }
}

impl Orientation for Facing {
    fn facing_direction(&self) -> i8 {
        self.sign()
    }
}

/// Values an animator would read each frame. Playback itself lives elsewhere.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct AnimationParams {
    pub x_input: f32,
    pub y_velocity: f32,
    pub airborne: bool,
    pub wall_detected: bool,
    /// Set for the frame a double jump was consumed.
    pub double_jump_triggered: bool,
}
