//! Movement domain: tuning and input resources.

use std::fmt;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Resource, Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MovementTuning {
    pub move_speed: f32,
    pub jump_force: f32,
    /// Jumps available between ground contacts (2 = one double jump).
    pub jump_cap: u8,
    pub air_move_speed_multiplier: f32,
    pub wall_jump_horizontal_speed: f32,
    pub wall_jump_lock_duration: f32,
    pub jump_buffer_time: f32,
    /// Gravity multiplier handed to the physics body while wall sliding.
    pub wall_slide_gravity_scale: f32,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            jump_force: 7.5,
            jump_cap: 2,
            air_move_speed_multiplier: 1.0,
            wall_jump_horizontal_speed: 5.0,
            wall_jump_lock_duration: 0.12,
            jump_buffer_time: 0.12,
            wall_slide_gravity_scale: 0.1,
        }
    }
}

impl MovementTuning {
    /// Check every field, returning the first value a controller cannot run with.
    pub fn validate(&self) -> Result<(), TuningError> {
        match self.errors().into_iter().next() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// All invalid fields, in declaration order.
    pub fn errors(&self) -> Vec<TuningError> {
        let mut errors = Vec::new();

        non_negative(&mut errors, "movement.move_speed", self.move_speed);
        non_negative(&mut errors, "movement.jump_force", self.jump_force);
        non_negative(
            &mut errors,
            "movement.air_move_speed_multiplier",
            self.air_move_speed_multiplier,
        );
        non_negative(
            &mut errors,
            "movement.wall_jump_horizontal_speed",
            self.wall_jump_horizontal_speed,
        );
        non_negative(
            &mut errors,
            "movement.wall_jump_lock_duration",
            self.wall_jump_lock_duration,
        );
        non_negative(&mut errors, "movement.jump_buffer_time", self.jump_buffer_time);
        non_negative(
            &mut errors,
            "movement.wall_slide_gravity_scale",
            self.wall_slide_gravity_scale,
        );

        if self.jump_cap == 0 {
            errors.push(TuningError {
                field: "movement.jump_cap",
                value: 0.0,
                reason: "must allow at least one jump",
            });
        }

        errors
    }
}

/// Ray and overlap distances used by the environment probes.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ProbeTuning {
    /// Measured from the collider edge, like `wall_check_distance`.
    pub ground_check_distance: f32,
    pub wall_check_distance: f32,
    /// Offset below the body centre of the stomp overlap circle.
    pub stomp_check_offset: f32,
    pub stomp_check_radius: f32,
    pub stomp_bounce_force: f32,
}

impl Default for ProbeTuning {
    fn default() -> Self {
        Self {
            ground_check_distance: 0.1,
            wall_check_distance: 0.1,
            stomp_check_offset: 0.5,
            stomp_check_radius: 0.25,
            stomp_bounce_force: 10.0,
        }
    }
}

impl ProbeTuning {
    pub fn errors(&self) -> Vec<TuningError> {
        let mut errors = Vec::new();
        positive(
            &mut errors,
            "probes.ground_check_distance",
            self.ground_check_distance,
        );
        positive(&mut errors, "probes.wall_check_distance", self.wall_check_distance);
        non_negative(&mut errors, "probes.stomp_check_offset", self.stomp_check_offset);
        positive(&mut errors, "probes.stomp_check_radius", self.stomp_check_radius);
        non_negative(&mut errors, "probes.stomp_bounce_force", self.stomp_bounce_force);
        errors
    }
}

/// Latest sampled keyboard state, rebuilt every frame by `read_input`.
#[derive(Resource, Debug, Default)]
pub struct MovementInput {
    pub axis: Vec2,
    pub jump_just_pressed: bool,
}

/// A tuning value the game refuses to start with.
#[derive(Debug, Clone, PartialEq)]
pub struct TuningError {
    pub field: &'static str,
    pub value: f32,
    pub reason: &'static str,
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {} {}", self.field, self.value, self.reason)
    }
}

impl std::error::Error for TuningError {}

pub(crate) fn non_negative(errors: &mut Vec<TuningError>, field: &'static str, value: f32) {
    if !value.is_finite() || value < 0.0 {
        errors.push(TuningError {
            field,
            value,
            reason: "must be a finite value >= 0",
        });
    }
}

pub(crate) fn positive(errors: &mut Vec<TuningError>, field: &'static str, value: f32) {
    if !value.is_finite() || value <= 0.0 {
        errors.push(TuningError {
            field,
            value,
            reason: "must be a finite value > 0",
        });
    }
}
