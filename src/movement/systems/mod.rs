//! Movement domain: system modules for locomotion updates.

pub(crate) mod collisions;
pub(crate) mod input;
pub(crate) mod movement;

pub(crate) use collisions::{detect_ground, detect_walls};
pub(crate) use input::{apply_player_input, read_input};
pub(crate) use movement::{drive_locomotion, update_animation_params, update_facing};
