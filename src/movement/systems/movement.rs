//! Movement domain: controller ticking, facing, and animation parameters.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::combat::Knockback;
use crate::movement::{
    AnimationParams, CollisionProbe, Facing, Player, PlayerMovementController, Surroundings,
    input_direction,
};

/// Facing follows full horizontal deflection and holds on zero input.
pub(crate) fn update_facing(
    mut query: Query<(&PlayerMovementController, &mut Facing, &mut Sprite), With<Player>>,
) {
    for (controller, mut facing, mut sprite) in &mut query {
        let Some(next) = Facing::from_direction(input_direction(controller.move_input().x)) else {
            continue;
        };

        if *facing != next {
            *facing = next;
        }
        sprite.flip_x = *facing == Facing::Left;
    }
}

/// One controller tick per frame. The physics velocity is fed in first so the
/// controller sees what the integrator (or a knockback impulse) produced.
pub(crate) fn drive_locomotion(
    time: Res<Time>,
    mut query: Query<
        (
            &mut PlayerMovementController,
            &CollisionProbe,
            &Facing,
            &Knockback,
            &mut LinearVelocity,
            &mut GravityScale,
        ),
        With<Player>,
    >,
) {
    let dt = time.delta_secs();

    for (mut controller, probe, facing, knockback, mut velocity, mut gravity) in &mut query {
        let surroundings = Surroundings::sample(probe, facing, knockback);
        controller.set_velocity(velocity.0);

        let Some(command) = controller.tick(dt, &surroundings) else {
            continue;
        };

        velocity.0 = command.velocity;
        if gravity.0 != command.gravity_scale {
            gravity.0 = command.gravity_scale;
        }
    }
}

/// The only reader of the double-jump trigger.
pub(crate) fn update_animation_params(
    mut query: Query<
        (
            &mut PlayerMovementController,
            &CollisionProbe,
            &LinearVelocity,
            &mut AnimationParams,
        ),
        With<Player>,
    >,
) {
    for (mut controller, probe, velocity, mut params) in &mut query {
        params.x_input = controller.move_input().x;
        // The body, not the controller: the controller is not ticked during knockback.
        params.y_velocity = velocity.y;
        params.airborne = controller.current_state().is_airborne();
        params.wall_detected = probe.wall_detected;
        params.double_jump_triggered = controller.consume_double_jump();

        if params.double_jump_triggered {
            debug!("Double jump trigger consumed");
        }
    }
}
