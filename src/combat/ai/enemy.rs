//! Combat domain: patrol enemy behaviour and its sensing.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::combat::components::Enemy;
use crate::combat::resources::EnemyTuning;
use crate::movement::{Facing, GameLayer, half_extents, solid_filter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnemyKind {
    /// Walks while patrolling, never reacts to ledges.
    #[default]
    Walker,
    /// Pauses and turns around at ledges and walls.
    Mushroom,
}

/// Ray results for one enemy, refreshed every frame.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EnemySenses {
    pub ground_ahead: bool,
    pub wall_ahead: bool,
    pub player_ahead: bool,
    pub player_behind: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EnemyAction {
    Idle,
    Patrol { velocity_x: f32 },
    Attack,
    TurnAround,
    Dying { velocity_y: f32, spin_degrees: f32 },
}

#[derive(Component, Debug, Clone, PartialEq)]
pub struct PatrolController {
    pub kind: EnemyKind,
    facing: Facing,
    patrolling: bool,
    /// Remaining pause before turning around, at most one pending.
    patrol_pause: Option<f32>,
    attacking: bool,
    dead: bool,
}

impl PatrolController {
    pub fn new(kind: EnemyKind, facing: Facing, patrolling: bool) -> Self {
        Self {
            kind,
            facing,
            patrolling,
            patrol_pause: None,
            attacking: false,
            dead: false,
        }
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn is_patrolling(&self) -> bool {
        self.patrolling
    }

    pub fn is_paused(&self) -> bool {
        self.patrol_pause.is_some()
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    pub fn kill(&mut self) {
        self.dead = true;
    }

    fn turn_around(&mut self) {
        self.facing = self.facing.flipped();
    }

    /// Stop walking, then turn and resume after `pause` seconds.
    fn begin_patrol_pause(&mut self, pause: f32) {
        if self.patrol_pause.is_some() {
            return;
        }

        self.patrolling = false;
        self.patrol_pause = Some(pause);
    }

    pub fn tick(
        &mut self,
        dt: f32,
        senses: &EnemySenses,
        tuning: &EnemyTuning,
        rng: &mut impl rand::Rng,
    ) -> EnemyAction {
        if self.dead {
            return EnemyAction::Dying {
                velocity_y: tuning.death_impact,
                spin_degrees: tuning.death_rotation_speed * dt,
            };
        }

        if let Some(remaining) = self.patrol_pause {
            let remaining = remaining - dt;
            if remaining <= 0.0 {
                self.patrol_pause = None;
                self.turn_around();
                self.patrolling = true;
            } else {
                self.patrol_pause = Some(remaining);
            }
        }

        let action = if senses.player_ahead {
            EnemyAction::Attack
        } else if senses.player_behind {
            self.turn_around();
            EnemyAction::TurnAround
        } else if self.patrolling {
            EnemyAction::Patrol {
                velocity_x: tuning.move_speed * f32::from(self.facing.sign()),
            }
        } else {
            EnemyAction::Idle
        };

        let attacking = action == EnemyAction::Attack;
        if attacking && !self.attacking {
            debug!("Enemy attack: facing={:?}", self.facing);
        }
        self.attacking = attacking;

        if self.kind == EnemyKind::Mushroom && (!senses.ground_ahead || senses.wall_ahead) {
            self.begin_patrol_pause(tuning.roll_patrol_pause(rng));
        }

        action
    }
}

pub(crate) fn sense_enemy_surroundings(
    spatial_query: SpatialQuery,
    tuning: Res<EnemyTuning>,
    mut query: Query<(&Transform, &Collider, &PatrolController, &mut EnemySenses), With<Enemy>>,
) {
    let solid = solid_filter();
    let player_filter = SpatialQueryFilter::from_mask(GameLayer::Player);

    for (transform, collider, controller, mut senses) in &mut query {
        if controller.is_dead() {
            continue;
        }

        let origin = transform.translation.truncate();
        let half = half_extents(collider);
        let sign = f32::from(controller.facing().sign());
        let (ahead, behind) = if sign < 0.0 {
            (Dir2::NEG_X, Dir2::X)
        } else {
            (Dir2::X, Dir2::NEG_X)
        };

        // Ledge ray starts just past the leading edge, at foot height
        let ledge_origin = origin + Vec2::new(sign * (half.x + tuning.wall_check_distance), -half.y);

        senses.ground_ahead = spatial_query
            .cast_ray(
                ledge_origin,
                Dir2::NEG_Y,
                tuning.ground_check_distance,
                true,
                &solid,
            )
            .is_some();
        senses.wall_ahead = spatial_query
            .cast_ray(
                origin,
                ahead,
                half.x + tuning.wall_check_distance,
                true,
                &solid,
            )
            .is_some();
        senses.player_ahead = spatial_query
            .cast_ray(origin, ahead, tuning.aggro_range, true, &player_filter)
            .is_some();
        senses.player_behind = spatial_query
            .cast_ray(origin, behind, tuning.aggro_range, true, &player_filter)
            .is_some();
    }
}

pub(crate) fn apply_enemy_ai(
    time: Res<Time>,
    tuning: Res<EnemyTuning>,
    mut query: Query<
        (
            &mut PatrolController,
            &EnemySenses,
            &mut LinearVelocity,
            &mut Transform,
            &mut Sprite,
        ),
        With<Enemy>,
    >,
) {
    let dt = time.delta_secs();
    let mut rng = rand::rng();

    for (mut controller, senses, mut velocity, mut transform, mut sprite) in &mut query {
        match controller.tick(dt, senses, &tuning, &mut rng) {
            EnemyAction::Idle => velocity.x = 0.0,
            EnemyAction::Patrol { velocity_x } => velocity.x = velocity_x,
            EnemyAction::Attack | EnemyAction::TurnAround => {}
            EnemyAction::Dying {
                velocity_y,
                spin_degrees,
            } => {
                velocity.y = velocity_y;
                transform.rotate_z(spin_degrees.to_radians());
            }
        }

        sprite.flip_x = controller.facing() == Facing::Left;
    }
}
