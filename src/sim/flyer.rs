//! Flyer AI
//!
//! Flyers ignore gravity and platforms entirely. They home toward a point
//! above the player with a sinusoidal vertical drift, clamped to a fixed
//! altitude band, and return to their spawn while the player stands still.
//! Motion is a capped step toward the target, so a flyer never overshoots.

use crate::consts::*;

use super::state::World;

pub fn update(world: &mut World, dt: f32) {
    let t = world.time_secs;
    let player_pos = world.player.pos;
    let player_idle = world.player.still_timer > IDLE_THRESHOLD_SECS;

    for f in world.flyers.iter_mut() {
        let (target_x, base_y) = if player_idle {
            (f.spawn.x, f.spawn.y)
        } else {
            (player_pos.x, player_pos.y + FLYER_HOVER_OFFSET)
        };
        let wave = (t * f.drift_rate + f.phase).sin() * f.drift;
        let target_y = (base_y + wave).clamp(FLYER_MIN_Y, FLYER_MAX_Y);

        let delta = glam::Vec2::new(target_x - f.pos.x, target_y - f.pos.y);
        let dist = delta.length();
        if dist > 1e-3 {
            let step = dist.min(f.speed * dt);
            f.pos += delta / dist * step;
        }
    }
}
