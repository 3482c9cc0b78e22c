//! Ground hazard AI
//!
//! Hazards run the same two-phase collision as the player; the difference is
//! where the horizontal intent comes from. In sensing range they hold a
//! comfort distance on an oscillating flank side; out of range they patrol
//! around their spawn. Jumping is reactive: blocked by a wall, chasing a
//! player overhead, or forced off the floor when the player has climbed.

use crate::consts::*;

use super::collision::{has_support_at, resolve_horizontal, resolve_vertical};
use super::state::World;

pub fn update(world: &mut World, dt: f32) {
    let t = world.time_secs;
    let player_pos = world.player.pos;
    let player_grounded = world.player.grounded;
    let level_max_x = world.player.level_max_x;
    let platforms = &world.platforms;

    for h in world.hazards.iter_mut() {
        let dx = player_pos.x - h.pos.x;
        let dy = player_pos.y - h.pos.y;
        let sees_player = dx.abs() < SENSE_RANGE_X && dy.abs() < SENSE_RANGE_Y;

        // Flank side flips slowly and out of phase across the pack.
        let flank_sign = if (h.behavior_phase + t * FLANK_RATE).sin() >= 0.0 {
            1.0
        } else {
            -1.0
        };
        let stand_off = player_pos.x - flank_sign * h.comfort_dist;
        let roam = h.spawn.x + (t * PATROL_RATE + h.behavior_phase).sin() * PATROL_RADIUS;
        let mut desired_x = if sees_player { stand_off } else { roam };

        // A floor-bound hazard with the player up on the course heads for
        // the nearest elevated platform instead of pacing underneath.
        let mut force_climb = false;
        let on_floor = h.grounded && h.pos.y < FLOOR_LEVEL_Y;
        let player_low = player_grounded && player_pos.y < PLAYER_GROUND_Y;
        if on_floor && !player_low {
            let target = platforms
                .iter()
                .filter(|p| p.top() > ELEVATED_TOP_Y)
                .min_by(|a, b| {
                    let da = (a.pos.x - h.pos.x).abs();
                    let db = (b.pos.x - h.pos.x).abs();
                    da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
                });
            if let Some(p) = target {
                desired_x = p.pos.x;
                force_climb = true;
            }
        }

        let to_target = desired_x - h.pos.x;
        let desired_dir = if to_target > INTENT_DEAD_ZONE {
            1.0
        } else if to_target < -INTENT_DEAD_ZONE {
            -1.0
        } else {
            0.0
        };
        h.intent += (desired_dir - h.intent) * (dt * INTENT_SMOOTHING).min(1.0);

        let speed = h.chase_speed * if sees_player { 1.0 } else { PATROL_SPEED_SCALE };
        let next_x = h.pos.x + h.intent * speed * dt;
        let hit = resolve_horizontal(h.size, next_x, h.pos.y, h.intent, BLOCKED_INTENT, platforms);
        let mut next_x = hit.x;
        let mut blocked = hit.blocked;

        // Elevated hazards stop at edges rather than walking off.
        if h.grounded
            && h.pos.y > ELEVATED_TOP_Y
            && has_support_at(h.size, h.pos.x, h.pos.y, platforms)
            && !has_support_at(h.size, next_x, h.pos.y, platforms)
        {
            next_x = h.pos.x;
            blocked = true;
        }

        h.jump_timer = (h.jump_timer - dt).max(0.0);
        let chase_jump = dy > CLIMB_HEIGHT_MARGIN && dx.abs() < CLIMB_CLOSE_RANGE;
        let climb_jump = force_climb && (desired_x - h.pos.x).abs() < CLIMB_ALIGN_RANGE;
        let wants_jump = blocked || chase_jump || climb_jump;
        if wants_jump && h.jump_timer == 0.0 && h.grounded {
            h.vy = h.jump_power;
            h.grounded = false;
            h.jump_timer = h.jump_cooldown.max(MIN_JUMP_INTERVAL);
            h.jumps_used += 1;
        }

        h.vy += GRAVITY * dt;
        let next_y = h.pos.y + h.vy * dt;
        let v = resolve_vertical(h.size, next_x, h.pos.y, next_y, h.vy, platforms);
        h.vy = v.vy;
        h.grounded = v.landed;
        if v.landed {
            h.jumps_used = 0;
        }

        if v.y < HAZARD_FALL_Y {
            h.reset_to_spawn();
        } else {
            h.pos.x = next_x.clamp(MIN_X, level_max_x);
            h.pos.y = v.y;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Hazard, Platform, World};
    use glam::{Vec2, Vec3};

    fn bare_world() -> World {
        let mut world = World::new();
        world.hazards.clear();
        world.flyers.clear();
        world.platforms.clear();
        world
    }

    fn hazard_at(pos: Vec2) -> Hazard {
        Hazard {
            pos,
            spawn: pos,
            size: Vec3::new(1.0, 0.8, 2.2),
            vy: 0.0,
            grounded: true,
            chase_speed: 5.0,
            jump_power: JUMP_SPEED,
            jump_cooldown: 0.2,
            jump_timer: 0.0,
            jumps_used: 0,
            behavior_phase: 0.0,
            comfort_dist: 2.0,
            intent: 0.0,
            stuck_timer: 0.0,
        }
    }

    fn platform(x: f32, y: f32, w: f32, h: f32) -> Platform {
        Platform {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[test]
    fn chases_toward_player_in_sensing_range() {
        let mut world = bare_world();
        world.platforms.push(platform(20.0, -1.0, 60.0, 2.0));
        let mut h = hazard_at(Vec2::new(10.0, 0.4));
        h.grounded = true;
        world.hazards.push(h);
        world.player.pos = Vec2::new(18.0, 0.5);
        world.player.grounded = true;

        for _ in 0..60 {
            world.time_secs += 0.016;
            update(&mut world, 0.016);
        }

        // Closed distance, but holds a stand-off short of the player.
        let h = &world.hazards[0];
        assert!(h.pos.x > 12.0);
        assert!(h.pos.x < world.player.pos.x);
    }

    #[test]
    fn patrols_near_spawn_when_player_is_far() {
        let mut world = bare_world();
        world.platforms.push(platform(50.0, -1.0, 200.0, 2.0));
        world.hazards.push(hazard_at(Vec2::new(50.0, 0.4)));
        world.player.pos = Vec2::new(140.0, 0.5); // outside the 22 window
        world.player.level_max_x = 149.5;

        for _ in 0..300 {
            world.time_secs += 0.016;
            update(&mut world, 0.016);
        }

        let h = &world.hazards[0];
        assert!((h.pos.x - h.spawn.x).abs() < PATROL_RADIUS + 1.5);
    }

    #[test]
    fn stops_at_platform_edge_when_elevated() {
        let mut world = bare_world();
        // Narrow elevated platform, player off to the right beyond its edge
        // but on the same height so no chase jump triggers.
        world.platforms.push(platform(10.0, 2.0, 4.0, 1.0)); // top at 2.5
        let mut h = hazard_at(Vec2::new(10.0, 2.9));
        h.jump_timer = 1e9; // never allowed to jump
        world.hazards.push(h);
        world.player.pos = Vec2::new(16.0, 2.9);

        for _ in 0..120 {
            world.time_secs += 0.016;
            update(&mut world, 0.016);
        }

        let h = &world.hazards[0];
        // Still supported by the platform: did not walk off the right edge.
        assert!(has_support_at(h.size, h.pos.x, h.pos.y, &world.platforms));
    }

    #[test]
    fn jumps_when_player_is_above_and_close() {
        let mut world = bare_world();
        world.platforms.push(platform(10.0, -1.0, 40.0, 2.0));
        world.hazards.push(hazard_at(Vec2::new(10.0, 0.4)));
        world.player.pos = Vec2::new(11.0, 3.5);
        world.player.grounded = false;

        update(&mut world, 0.016);

        let h = &world.hazards[0];
        assert!(!h.grounded);
        assert!(h.vy > 0.0);
        assert!(h.jump_timer >= MIN_JUMP_INTERVAL - 0.016);
    }

    #[test]
    fn jump_respects_cooldown() {
        let mut world = bare_world();
        world.platforms.push(platform(10.0, -1.0, 40.0, 2.0));
        let mut h = hazard_at(Vec2::new(10.0, 0.4));
        h.jump_timer = 5.0;
        world.hazards.push(h);
        world.player.pos = Vec2::new(10.5, 3.5);

        update(&mut world, 0.016);

        // Wanted to jump but the cooldown held it down (one gravity frame).
        let h = &world.hazards[0];
        assert!(h.vy <= 0.0);
    }

    #[test]
    fn falling_out_resets_to_spawn() {
        let mut world = bare_world();
        let spawn = Vec2::new(12.0, 3.0);
        let mut h = hazard_at(spawn);
        h.pos = Vec2::new(30.0, HAZARD_FALL_Y + 0.1);
        h.vy = -30.0;
        h.grounded = false;
        world.hazards.push(h);

        update(&mut world, 0.016);

        let h = &world.hazards[0];
        assert_eq!(h.pos, spawn);
        assert_eq!(h.vy, 0.0);
    }

    #[test]
    fn floor_hazard_targets_nearest_elevated_platform() {
        let mut world = bare_world();
        world.platforms.push(platform(30.0, -1.0, 100.0, 2.0));
        world.platforms.push(platform(26.0, 2.0, 4.0, 1.0)); // top 2.5
        let mut h = hazard_at(Vec2::new(20.0, 0.4));
        h.jump_timer = 1e9;
        world.hazards.push(h);
        // Player elevated and far enough that stand-off alone would not
        // move the hazard rightward past the platform.
        world.player.pos = Vec2::new(40.0, 3.0);
        world.player.grounded = true;

        for _ in 0..90 {
            world.time_secs += 0.016;
            update(&mut world, 0.016);
        }

        // Drifted toward the climb target at x = 26.
        assert!(world.hazards[0].pos.x > 21.0);
    }

    #[test]
    fn intent_is_smoothed_not_instant() {
        let mut world = bare_world();
        world.platforms.push(platform(20.0, -1.0, 60.0, 2.0));
        world.hazards.push(hazard_at(Vec2::new(10.0, 0.4)));
        world.player.pos = Vec2::new(20.0, 0.5);

        update(&mut world, 0.016);

        let h = &world.hazards[0];
        assert!(h.intent > 0.0);
        assert!(h.intent < 1.0);
    }
}
