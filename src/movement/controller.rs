//! Movement domain: the player locomotion state machine.
//!
//! [`PlayerMovementController`] turns latched input and a once-per-tick snapshot of its
//! collaborators ([`Surroundings`]) into a discrete [`MovementState`] and a
//! [`VelocityCommand`]. It never integrates physics itself: the caller applies the
//! command to the body, and the body's velocity after integration is fed back through
//! [`PlayerMovementController::set_velocity`] before the next tick.
//!
//! Per tick, in order: knockback short-circuit, timer decrement, grounded jump reset,
//! buffered jump consumption, state resolution, action execution.

use bevy::prelude::*;

use crate::movement::{MovementTuning, TuningError};

/// Below this magnitude horizontal input and vertical velocity count as "no intent".
pub const INTENT_EPSILON: f32 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MovementState {
    #[default]
    Idle,
    Moving,
    Jumping,
    Falling,
    WallSliding,
}

impl MovementState {
    pub fn is_airborne(self) -> bool {
        matches!(
            self,
            MovementState::Jumping | MovementState::Falling | MovementState::WallSliding
        )
    }
}

/// Ground and wall detection, answered by the collision probes.
pub trait EnvironmentProbe {
    fn is_grounded(&self) -> bool;
    fn is_wall_detected(&self) -> bool;
    /// `-1` for a wall on the left, `1` for the right.
    fn wall_direction(&self) -> i8;
}

/// Which way the body is facing, owned by the orientation collaborator.
pub trait Orientation {
    /// `-1` for left, `1` for right.
    fn facing_direction(&self) -> i8;
}

/// The external lock that makes the controller inert while it is held.
pub trait KnockbackGate {
    fn is_knocked_back(&self) -> bool;
}

/// Everything the controller reads from its collaborators, sampled once per tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surroundings {
    pub grounded: bool,
    pub wall_detected: bool,
    pub wall_direction: i8,
    pub facing: i8,
    pub knocked_back: bool,
}

impl Default for Surroundings {
    fn default() -> Self {
        Self {
            grounded: false,
            wall_detected: false,
            wall_direction: 1,
            facing: 1,
            knocked_back: false,
        }
    }
}

impl Surroundings {
    pub fn sample(
        probe: &impl EnvironmentProbe,
        orientation: &impl Orientation,
        gate: &impl KnockbackGate,
    ) -> Self {
        Self {
            grounded: probe.is_grounded(),
            wall_detected: probe.is_wall_detected(),
            wall_direction: probe.wall_direction(),
            facing: orientation.facing_direction(),
            knocked_back: gate.is_knocked_back(),
        }
    }
}

/// What the physics body should do after a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VelocityCommand {
    pub velocity: Vec2,
    pub gravity_scale: f32,
}

/// Limited jump resources between ground contacts.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct JumpEconomy {
    pub jump_count: u8,
    pub jump_cap: u8,
    /// Raised by the second jump of a sequence, cleared by its single reader.
    pub is_double_jumping: bool,
    pub wall_jump_lock_timer: f32,
}

impl JumpEconomy {
    pub fn new(jump_cap: u8) -> Self {
        Self {
            jump_cap,
            ..default()
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.jump_count >= self.jump_cap
    }

    pub fn is_wall_jump_locked(&self) -> bool {
        self.wall_jump_lock_timer > 0.0
    }

    /// Wall contact gives all jumps back.
    fn refresh(&mut self) {
        self.jump_count = 0;
        self.is_double_jumping = false;
    }
}

/// A pending jump request that expires after `jump_buffer_time`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct JumpBuffer {
    pub timer: f32,
}

impl JumpBuffer {
    pub fn arm(&mut self, duration: f32) {
        self.timer = duration;
    }

    pub fn clear(&mut self) {
        self.timer = 0.0;
    }

    pub fn is_armed(&self) -> bool {
        self.timer > 0.0
    }

    fn tick(&mut self, dt: f32) {
        self.timer = (self.timer - dt).max(0.0);
    }
}

/// Discrete direction of a horizontal input value. Only full deflection counts,
/// partial stick input truncates to zero.
pub fn input_direction(x: f32) -> i8 {
    (x.trunc() as i8).clamp(-1, 1)
}

#[derive(Component, Debug, Clone)]
pub struct PlayerMovementController {
    tuning: MovementTuning,
    state: MovementState,
    move_input: Vec2,
    economy: JumpEconomy,
    buffer: JumpBuffer,
    velocity: Vec2,
    knocked_back: bool,
}

impl PlayerMovementController {
    pub fn new(tuning: MovementTuning) -> Result<Self, TuningError> {
        tuning.validate()?;

        Ok(Self {
            economy: JumpEconomy::new(tuning.jump_cap),
            tuning,
            state: MovementState::default(),
            move_input: Vec2::ZERO,
            buffer: JumpBuffer::default(),
            velocity: Vec2::ZERO,
            knocked_back: false,
        })
    }

    pub fn tuning(&self) -> &MovementTuning {
        &self.tuning
    }

    pub fn current_state(&self) -> MovementState {
        self.state
    }

    pub fn move_input(&self) -> Vec2 {
        self.move_input
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Feed the body's authoritative velocity back in (after physics integration,
    /// or after another writer such as a knockback impulse).
    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    pub fn jump_count(&self) -> u8 {
        self.economy.jump_count
    }

    pub fn economy(&self) -> &JumpEconomy {
        &self.economy
    }

    pub fn wall_jump_lock_remaining(&self) -> f32 {
        self.economy.wall_jump_lock_timer
    }

    pub fn jump_buffer_remaining(&self) -> f32 {
        self.buffer.timer
    }

    /// Knockback state as observed on the last press or tick.
    pub fn is_player_knocked(&self) -> bool {
        self.knocked_back
    }

    /// Read-and-clear: true at most once per double jump.
    pub fn consume_double_jump(&mut self) -> bool {
        std::mem::take(&mut self.economy.is_double_jumping)
    }

    pub fn on_move(&mut self, input: Vec2) {
        self.move_input = input;
    }

    pub fn on_move_canceled(&mut self) {
        self.move_input = Vec2::ZERO;
    }

    /// Buffer the press and try to spend it straight away. If it can't be spent now
    /// it is retried every tick until the buffer runs out.
    pub fn on_jump_pressed(&mut self, surroundings: &Surroundings) {
        self.knocked_back = surroundings.knocked_back;
        if self.knocked_back {
            return;
        }

        self.buffer.arm(self.tuning.jump_buffer_time);
        self.try_consume_buffered_jump(surroundings.facing);
    }

    /// Advance one frame. Returns `None` while knocked back: nothing moves, and the
    /// knockback owner stays the only writer of the body's velocity.
    pub fn tick(&mut self, dt: f32, surroundings: &Surroundings) -> Option<VelocityCommand> {
        self.knocked_back = surroundings.knocked_back;
        if self.knocked_back {
            return None;
        }

        let dt = dt.max(0.0);
        self.buffer.tick(dt);
        self.economy.wall_jump_lock_timer = (self.economy.wall_jump_lock_timer - dt).max(0.0);

        if surroundings.grounded && self.velocity.y == 0.0 && self.economy.jump_count > 0 {
            self.economy.jump_count = 0;
        }

        let previous = self.state;

        self.try_consume_buffered_jump(surroundings.facing);
        self.resolve_state(surroundings);
        self.execute_state(surroundings);

        if self.state != previous {
            debug!(
                "Locomotion: {:?} -> {:?}, velocity=({:.2}, {:.2}), jumps={}/{}",
                previous,
                self.state,
                self.velocity.x,
                self.velocity.y,
                self.economy.jump_count,
                self.economy.jump_cap
            );
        }

        Some(self.command())
    }

    fn command(&self) -> VelocityCommand {
        let gravity_scale = if self.state == MovementState::WallSliding {
            self.tuning.wall_slide_gravity_scale
        } else {
            1.0
        };

        VelocityCommand {
            velocity: self.velocity,
            gravity_scale,
        }
    }

    fn try_consume_buffered_jump(&mut self, facing: i8) {
        if !self.buffer.is_armed() || self.economy.is_exhausted() {
            return;
        }

        self.buffer.clear();

        if self.state == MovementState::WallSliding {
            self.wall_jump(facing);
        } else {
            self.economy.jump_count += 1;
            if self.economy.jump_count == 2 {
                self.economy.is_double_jumping = true;
            }
            self.velocity.y = self.tuning.jump_force;
            debug!(
                "Jump: count={}/{}, double={}",
                self.economy.jump_count, self.economy.jump_cap, self.economy.is_double_jumping
            );
        }

        self.state = MovementState::Jumping;
    }

    /// Push away from the wall the body faces while sliding.
    fn wall_jump(&mut self, facing: i8) {
        self.velocity = Vec2::new(
            -f32::from(facing) * self.tuning.wall_jump_horizontal_speed,
            self.tuning.jump_force,
        );
        self.economy.wall_jump_lock_timer = self.tuning.wall_jump_lock_duration;
        self.economy.jump_count += 1;
        debug!(
            "Wall jump: facing={}, velocity=({:.2}, {:.2}), lock={:.2}s",
            facing, self.velocity.x, self.velocity.y, self.economy.wall_jump_lock_timer
        );
    }

    fn resolve_state(&mut self, surroundings: &Surroundings) {
        let vy = self.velocity.y;
        let is_falling = vy < -INTENT_EPSILON;
        let is_rising = vy > INTENT_EPSILON;

        // Wall contact does not matter on the ground.
        if surroundings.grounded {
            self.state = if self.move_input.x.abs() > INTENT_EPSILON {
                MovementState::Moving
            } else {
                MovementState::Idle
            };
            return;
        }

        // No wall-slide re-entry straight after a wall jump.
        if self.economy.is_wall_jump_locked() {
            if is_falling {
                self.state = MovementState::Falling;
            } else if is_rising {
                self.state = MovementState::Jumping;
            }
            return;
        }

        if is_falling && self.pressing_into_wall(surroundings) {
            self.state = MovementState::WallSliding;
        } else if is_falling {
            self.state = MovementState::Falling;
        } else if is_rising {
            self.state = MovementState::Jumping;
        }
        // Near-zero vy in the air keeps the previous state (apex flicker).
    }

    fn execute_state(&mut self, surroundings: &Surroundings) {
        match self.state {
            MovementState::Idle => self.velocity.x = 0.0,
            MovementState::Moving => {
                // Input stays latched for animation while the wall blocks the body.
                self.velocity.x = if self.pressing_into_wall(surroundings) {
                    0.0
                } else {
                    self.move_input.x * self.tuning.move_speed
                };
            }
            MovementState::Jumping | MovementState::Falling => {
                // The wall-jump push owns horizontal velocity until the lock runs out.
                if !self.economy.is_wall_jump_locked() {
                    self.velocity.x = if self.pressing_into_wall(surroundings) {
                        0.0
                    } else {
                        self.move_input.x
                            * self.tuning.move_speed
                            * self.tuning.air_move_speed_multiplier
                    };
                }

                if self.state == MovementState::Jumping && self.velocity.y <= 0.0 {
                    self.state = MovementState::Falling;
                }
            }
            MovementState::WallSliding => {
                self.economy.refresh();

                let direction = input_direction(self.move_input.x);
                if direction != 0 && direction != surroundings.facing {
                    self.state = MovementState::Idle;
                }
            }
        }
    }

    fn pressing_into_wall(&self, surroundings: &Surroundings) -> bool {
        surroundings.wall_detected
            && self.move_input.x.abs() > INTENT_EPSILON
            && self.move_input.x.signum() as i8 == surroundings.wall_direction
    }
}
