//! Movement domain: ground and wall detection systems.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::{CollisionProbe, Facing, GameLayer, ProbeTuning};

/// Layers a body can stand on or slide against.
pub(crate) fn solid_filter() -> SpatialQueryFilter {
    SpatialQueryFilter::from_mask([GameLayer::Ground, GameLayer::Wall])
}

pub(crate) fn half_extents(collider: &Collider) -> Vec2 {
    match collider.shape_scaled().as_cuboid() {
        Some(c) => c.half_extents.into(),
        None => Vec2::splat(0.5),
    }
}

pub(crate) fn detect_ground(
    spatial_query: SpatialQuery,
    tuning: Res<ProbeTuning>,
    mut query: Query<(Entity, &Transform, &Collider, &mut CollisionProbe)>,
) {
    let filter = solid_filter();

    for (entity, transform, collider, mut probe) in &mut query {
        let was_grounded = probe.grounded;

        // Short ray down from the feet
        let ray_origin = transform.translation.truncate() - Vec2::new(0.0, half_extents(collider).y);
        let hit = spatial_query.cast_ray(
            ray_origin,
            Dir2::NEG_Y,
            tuning.ground_check_distance,
            true,
            &filter,
        );

        probe.grounded = hit.is_some();

        if probe.grounded != was_grounded {
            debug!("Ground probe {:?}: grounded={}", entity, probe.grounded);
        }
    }
}

/// The wall ray follows the facing direction, so `wall_direction` is the facing sign.
pub(crate) fn detect_walls(
    spatial_query: SpatialQuery,
    tuning: Res<ProbeTuning>,
    mut query: Query<(Entity, &Transform, &Collider, &Facing, &mut CollisionProbe)>,
) {
    let filter = solid_filter();

    for (entity, transform, collider, facing, mut probe) in &mut query {
        let was_on_wall = probe.wall_detected;
        let direction = if facing.sign() < 0 { Dir2::NEG_X } else { Dir2::X };

        let hit = spatial_query.cast_ray(
            transform.translation.truncate(),
            direction,
            half_extents(collider).x + tuning.wall_check_distance,
            true,
            &filter,
        );

        probe.wall_direction = facing.sign();
        probe.wall_detected = hit.is_some();

        if probe.wall_detected != was_on_wall {
            debug!(
                "Wall probe {:?}: wall_detected={}, direction={}",
                entity, probe.wall_detected, probe.wall_direction
            );
        }
    }
}
