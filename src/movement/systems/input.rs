//! Movement domain: input sampling for locomotion.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::combat::Knockback;
use crate::movement::{
    CollisionProbe, Facing, MovementInput, Player, PlayerMovementController, Surroundings,
};

pub(crate) fn read_input(keyboard: Res<ButtonInput<KeyCode>>, mut input: ResMut<MovementInput>) {
    let mut x = 0.0;
    if keyboard.pressed(KeyCode::KeyA) || keyboard.pressed(KeyCode::ArrowLeft) {
        x -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) || keyboard.pressed(KeyCode::ArrowRight) {
        x += 1.0;
    }

    let mut y = 0.0;
    if keyboard.pressed(KeyCode::KeyS) || keyboard.pressed(KeyCode::ArrowDown) {
        y -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyW) || keyboard.pressed(KeyCode::ArrowUp) {
        y += 1.0;
    }

    input.axis = Vec2::new(x, y);
    input.jump_just_pressed = keyboard.just_pressed(KeyCode::Space)
        || keyboard.just_pressed(KeyCode::KeyW)
        || keyboard.just_pressed(KeyCode::ArrowUp);
}

/// Turn sampled input into controller events: a move on every axis change, a cancel
/// when the axis returns to zero, and a press on the jump edge.
pub(crate) fn apply_player_input(
    input: Res<MovementInput>,
    mut query: Query<
        (
            &mut PlayerMovementController,
            &CollisionProbe,
            &Facing,
            &Knockback,
            &mut LinearVelocity,
        ),
        With<Player>,
    >,
) {
    for (mut controller, probe, facing, knockback, mut velocity) in &mut query {
        if input.axis != controller.move_input() {
            if input.axis == Vec2::ZERO {
                controller.on_move_canceled();
            } else {
                controller.on_move(input.axis);
            }
        }

        if input.jump_just_pressed {
            let surroundings = Surroundings::sample(probe, facing, knockback);
            controller.set_velocity(velocity.0);
            controller.on_jump_pressed(&surroundings);

            // A press during knockback is dropped and the impulse owns the velocity.
            if !controller.is_player_knocked() {
                velocity.0 = controller.velocity();
            }
        }
    }
}
