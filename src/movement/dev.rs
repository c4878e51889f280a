//! Movement domain: debug-only practice room.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::{GameLayer, Ground, Wall};

fn spawn_block<M: Component>(
    commands: &mut Commands,
    marker: M,
    color: Color,
    size: Vec2,
    position: Vec2,
    layers: CollisionLayers,
) {
    commands.spawn((
        marker,
        Sprite {
            color,
            custom_size: Some(size),
            ..default()
        },
        Transform::from_xyz(position.x, position.y, 0.0),
        RigidBody::Static,
        Collider::rectangle(size.x, size.y),
        layers,
    ));
}

pub(crate) fn spawn_test_room(mut commands: Commands) {
    let wall_color = Color::srgb(0.3, 0.3, 0.4);
    let ground_color = Color::srgb(0.4, 0.5, 0.4);
    let platform_color = Color::srgb(0.5, 0.4, 0.3);

    let ground_layers =
        CollisionLayers::new(GameLayer::Ground, [GameLayer::Player, GameLayer::Enemy]);
    let wall_layers = CollisionLayers::new(GameLayer::Wall, [GameLayer::Player, GameLayer::Enemy]);

    // Floor
    spawn_block(
        &mut commands,
        Ground,
        ground_color,
        Vec2::new(20.0, 1.0),
        Vec2::new(0.0, -5.0),
        ground_layers,
    );

    // Side walls, tall enough to wall-jump between
    for x in [-10.5, 10.5] {
        spawn_block(
            &mut commands,
            Wall,
            wall_color,
            Vec2::new(1.0, 12.5),
            Vec2::new(x, 1.25),
            wall_layers,
        );
    }

    // Platforms
    for (size, position) in [
        (Vec2::new(3.75, 0.5), Vec2::new(-6.25, -1.25)),
        (Vec2::new(3.75, 0.5), Vec2::new(6.25, 1.25)),
        (Vec2::new(3.0, 0.5), Vec2::new(0.0, 3.75)),
    ] {
        spawn_block(
            &mut commands,
            Ground,
            platform_color,
            size,
            position,
            ground_layers,
        );
    }

    // Pillar for wall-jump practice
    spawn_block(
        &mut commands,
        Wall,
        wall_color,
        Vec2::new(0.75, 5.0),
        Vec2::new(-2.5, -2.0),
        wall_layers,
    );
}
