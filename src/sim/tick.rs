//! Frame step
//!
//! Fixed order per frame: clamp dt, handle reload, advance sim time, hazards,
//! flyers, camera, then the player. Hazards and the camera keep running on
//! the win screen; only player physics stops.

use crate::consts::{CAMERA_SMOOTHING, MAX_FRAME_DT, MIN_X};

use super::state::{Phase, World};
use super::{flyer, hazard, player};

/// Sampled input for one frame. `jump_pressed` and `reload` are one-shot:
/// the shell sets them on the triggering event and clears them after the
/// tick consumes them.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    /// Jump key currently held (stillness detection)
    pub jump: bool,
    /// Jump key went down this frame
    pub jump_pressed: bool,
    /// Regenerate the current level from scratch
    pub reload: bool,
}

pub fn tick(world: &mut World, input: &TickInput, dt: f32) {
    let dt = dt.min(MAX_FRAME_DT);

    if input.reload {
        let index = world.player.level_index;
        world.load_level(index);
        return;
    }

    world.time_secs += dt;

    hazard::update(world, dt);
    flyer::update(world, dt);

    let follow = (dt * CAMERA_SMOOTHING).min(1.0);
    world.camera_x += (world.camera_target() - world.camera_x) * follow;

    if world.phase == Phase::Playing {
        player::update(world, input, dt);
    }

    debug_assert!(world.player.pos.x >= MIN_X);
}
