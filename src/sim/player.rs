//! Player physics and interactions
//!
//! One call per frame, after the AI updates. Order inside the frame matters:
//! move and resolve first, then fall-out, then hazard/flyer contact, then
//! checkpoints, collectible, finish. The first respawn or level transition
//! ends the frame for the player.

use crate::consts::*;

use super::collision::{overlaps, resolve_horizontal, resolve_vertical};
use super::state::{FrameEvent, Phase, World};
use super::tick::TickInput;

pub fn update(world: &mut World, input: &TickInput, dt: f32) {
    let player = &mut world.player;
    player.finish_lock_timer = (player.finish_lock_timer - dt).max(0.0);

    let mut dir = 0.0;
    if input.left {
        dir -= 1.0;
    }
    if input.right {
        dir += 1.0;
    }
    player.vel.x = dir * MOVE_SPEED;

    // Edge-triggered jump. The second press mid-air is the double jump; a
    // third does nothing until something lands.
    if input.jump_pressed && (player.grounded || player.jumps_used < MAX_JUMPS) {
        player.vel.y = JUMP_SPEED;
        player.grounded = false;
        player.jumps_used += 1;
    }

    player.vel.y += GRAVITY * dt;

    let next_x = player.pos.x + player.vel.x * dt;
    let hit = resolve_horizontal(
        PLAYER_SIZE,
        next_x,
        player.pos.y,
        player.vel.x,
        0.0,
        &world.platforms,
    );
    let next_x = hit.x;

    let next_y = player.pos.y + player.vel.y * dt;
    let v = resolve_vertical(
        PLAYER_SIZE,
        next_x,
        player.pos.y,
        next_y,
        player.vel.y,
        &world.platforms,
    );
    player.vel.y = v.vy;
    player.grounded = v.landed;
    if v.landed {
        player.jumps_used = 0;
    }

    if v.y < PLAYER_FALL_Y {
        player.respawn();
        world.events.push(FrameEvent::PlayerRespawned);
        return;
    }

    player.pos.x = next_x.clamp(MIN_X, player.level_max_x);
    player.pos.y = v.y;

    let player_box = player.bounds();

    // Hazard contact: a steep enough fall onto the top quarter is a stomp,
    // anything else is lethal. Kills collect first so indices stay valid.
    let mut killed: Vec<usize> = Vec::new();
    let mut lethal = false;
    for (i, h) in world.hazards.iter().enumerate() {
        if !overlaps(&player_box, &h.bounds()) {
            continue;
        }
        let stomp = world.player.vel.y < STOMP_FALL_VY
            && world.player.pos.y > h.pos.y + h.size.y * STOMP_TOP_FRACTION;
        if stomp {
            killed.push(i);
        } else {
            lethal = true;
            break;
        }
    }
    if lethal {
        world.player.respawn();
        world.events.push(FrameEvent::PlayerRespawned);
        return;
    }
    for &i in killed.iter().rev() {
        world.hazards.remove(i);
        world.player.score += HAZARD_STOMP_SCORE;
        world.player.stomps_this_level += 1;
        world.player.vel.y = world.player.vel.y.max(JUMP_SPEED * HAZARD_STOMP_REBOUND);
        world.events.push(FrameEvent::HazardStomped);
    }

    let mut killed: Vec<usize> = Vec::new();
    let mut lethal = false;
    for (i, f) in world.flyers.iter().enumerate() {
        if !overlaps(&player_box, &f.bounds()) {
            continue;
        }
        let stomp = world.player.vel.y < STOMP_FALL_VY
            && world.player.pos.y > f.pos.y + f.size.y * STOMP_TOP_FRACTION;
        if stomp {
            killed.push(i);
        } else {
            lethal = true;
            break;
        }
    }
    if lethal {
        world.player.respawn();
        world.events.push(FrameEvent::PlayerRespawned);
        return;
    }
    for &i in killed.iter().rev() {
        world.flyers.remove(i);
        world.player.score += FLYER_STOMP_SCORE;
        world.player.stomps_this_level += 1;
        world.player.vel.y = world.player.vel.y.max(JUMP_SPEED * FLYER_STOMP_REBOUND);
        world.events.push(FrameEvent::FlyerStomped);
    }

    for c in world.checkpoints.iter_mut() {
        if c.touched || !overlaps(&player_box, &c.bounds()) {
            continue;
        }
        c.touched = true;
        world.player.checkpoint = c.pos + glam::Vec2::new(0.0, CHECKPOINT_RESPAWN_LIFT);
        world.events.push(FrameEvent::CheckpointReached);
    }

    if let Some(c) = world.collectible {
        if overlaps(&player_box, &c.bounds()) {
            world.collectible = None;
            world.player.collectible_taken = true;
            world.events.push(FrameEvent::CollectibleTaken);
        }
    }

    if overlaps(&player_box, &world.finish.bounds()) {
        let cleared = world.player.collectible_taken && world.player.stomps_this_level > 0;
        if cleared {
            let next = world.player.level_index + 1;
            if next < LEVEL_COUNT {
                world.events.push(FrameEvent::LevelAdvanced { index: next });
                world.load_level(next);
            } else {
                world.phase = Phase::Won;
                world.events.push(FrameEvent::Won);
            }
            return;
        }
        if world.player.finish_lock_timer == 0.0 {
            world.events.push(FrameEvent::FinishBlocked);
        }
        world.player.finish_lock_timer = FINISH_LOCK_SECS;
    }

    // Stillness drives the flyers' return-home behavior.
    let no_input = !input.left && !input.right && !input.jump;
    let still = world.player.vel.x.abs() < IDLE_MAX_VX
        && world.player.vel.y.abs() < IDLE_MAX_VY
        && world.player.grounded;
    if no_input && still {
        world.player.still_timer += dt;
    } else {
        world.player.still_timer = 0.0;
    }
}
