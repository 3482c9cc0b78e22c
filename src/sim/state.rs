//! World state and entity types
//!
//! The live world is an owned value, rebuilt wholesale on every level load.
//! Nothing here reaches for globals: the frame step receives `&mut World`
//! and is the only writer.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::collision::BoxBounds;
use super::level;
use crate::consts::*;

/// A static platform box. Created at generation time, immutable until the
/// level unloads.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub pos: Vec2,
    /// Full extents (w, h); depth is the shared [`BOX_DEPTH`]
    pub size: Vec2,
}

impl Platform {
    /// Y of the walkable top face
    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y + self.size.y * 0.5
    }

    pub fn bounds(&self) -> BoxBounds {
        BoxBounds::new(
            Vec3::new(self.pos.x, self.pos.y, 0.0),
            Vec3::new(self.size.x, self.size.y, BOX_DEPTH),
        )
    }
}

/// A ground-based hazard (the alligators). Destroyed by a stomp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hazard {
    pub pos: Vec2,
    pub spawn: Vec2,
    /// Full extents (w, h, d)
    pub size: Vec3,
    pub vy: f32,
    pub grounded: bool,
    pub chase_speed: f32,
    pub jump_power: f32,
    pub jump_cooldown: f32,
    pub jump_timer: f32,
    pub jumps_used: u32,
    /// Per-hazard phase so the pack doesn't flank in lockstep
    pub behavior_phase: f32,
    /// Stand-off distance held while chasing
    pub comfort_dist: f32,
    /// Smoothed horizontal intent in [-1, 1]
    pub intent: f32,
    pub stuck_timer: f32,
}

impl Hazard {
    pub fn bounds(&self) -> BoxBounds {
        BoxBounds::new(Vec3::new(self.pos.x, self.pos.y, 0.0), self.size)
    }

    /// Full reset to the spawn point (out-of-world recovery)
    pub fn reset_to_spawn(&mut self) {
        self.pos = self.spawn;
        self.vy = 0.0;
        self.grounded = false;
        self.jumps_used = 0;
        self.stuck_timer = 0.0;
    }
}

/// An airborne hazard (the birds). Gravity-exempt; destroyed by a stomp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flyer {
    pub pos: Vec2,
    pub spawn: Vec2,
    pub size: Vec3,
    pub speed: f32,
    pub drift: f32,
    pub drift_rate: f32,
    pub phase: f32,
}

impl Flyer {
    pub fn bounds(&self) -> BoxBounds {
        BoxBounds::new(Vec3::new(self.pos.x, self.pos.y, 0.0), self.size)
    }
}

/// The level's banana. At most one; picked up on contact.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Collectible {
    pub pos: Vec2,
    pub radius: f32,
}

impl Collectible {
    pub fn bounds(&self) -> BoxBounds {
        let side = self.radius * 1.9;
        BoxBounds::new(Vec3::new(self.pos.x, self.pos.y, 0.0), Vec3::splat(side))
    }
}

/// A respawn marker. First touch arms it; re-touching is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub pos: Vec2,
    pub size: Vec2,
    pub touched: bool,
}

impl Checkpoint {
    pub fn bounds(&self) -> BoxBounds {
        BoxBounds::new(
            Vec3::new(self.pos.x, self.pos.y, 0.0),
            Vec3::new(self.size.x, self.size.y, BOX_DEPTH),
        )
    }
}

/// The level exit. Crossing it with unmet conditions re-locks it instead.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinishGate {
    pub pos: Vec2,
    pub size: Vec2,
}

impl FinishGate {
    pub fn bounds(&self) -> BoxBounds {
        BoxBounds::new(
            Vec3::new(self.pos.x, self.pos.y, 0.0),
            Vec3::new(self.size.x, self.size.y, BOX_DEPTH),
        )
    }
}

/// Session-long player state. Per-level fields reset on load; `score`
/// persists until "play again".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub pos: Vec2,
    pub vel: Vec2,
    pub grounded: bool,
    pub jumps_used: u32,
    pub checkpoint: Vec2,
    pub level_index: usize,
    pub collectible_taken: bool,
    pub stomps_this_level: u32,
    pub finish_lock_timer: f32,
    pub level_max_x: f32,
    /// How long the player has been grounded, still, and without input
    pub still_timer: f32,
    pub score: u64,
}

impl PlayerState {
    fn new() -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            grounded: false,
            jumps_used: 0,
            checkpoint: Vec2::ZERO,
            level_index: 0,
            collectible_taken: false,
            stomps_this_level: 0,
            finish_lock_timer: 0.0,
            level_max_x: 39.5,
            still_timer: 0.0,
            score: 0,
        }
    }

    pub fn bounds(&self) -> BoxBounds {
        BoxBounds::new(Vec3::new(self.pos.x, self.pos.y, 0.0), PLAYER_SIZE)
    }

    /// Teleport back to the checkpoint with all motion state cleared.
    /// Idempotent: respawning twice is the same as respawning once.
    pub fn respawn(&mut self) {
        self.pos = self.checkpoint;
        self.vel = Vec2::ZERO;
        self.grounded = false;
        self.jumps_used = 0;
    }
}

/// Session phase. The win overlay suppresses player physics while hazard,
/// flyer and camera updates keep running underneath it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Playing,
    Won,
}

/// Things that happened during a frame, for the shell's HUD/audio hooks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FrameEvent {
    HazardStomped,
    FlyerStomped,
    CheckpointReached,
    CollectibleTaken,
    FinishBlocked,
    LevelAdvanced { index: usize },
    PlayerRespawned,
    Won,
}

/// HUD snapshot, recomputed whenever displayed state may have changed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HudStatus {
    pub level_index: usize,
    pub level_count: usize,
    pub score: u64,
    pub collectible_taken: bool,
    pub stomps_this_level: u32,
    pub finish_locked: bool,
}

/// The live world: one level's entities plus the session player state
#[derive(Debug, Clone, Serialize)]
pub struct World {
    pub platforms: Vec<Platform>,
    pub hazards: Vec<Hazard>,
    pub flyers: Vec<Flyer>,
    pub checkpoints: Vec<Checkpoint>,
    pub collectible: Option<Collectible>,
    pub finish: FinishGate,
    pub player: PlayerState,
    pub phase: Phase,
    /// Camera-follow x, smoothed toward [`World::camera_target`]
    pub camera_x: f32,
    /// Accumulated sim time driving AI oscillations
    pub time_secs: f32,
    /// Frame events since the shell last drained them
    #[serde(skip)]
    pub events: Vec<FrameEvent>,
}

impl World {
    /// A fresh session, starting on level 0
    pub fn new() -> Self {
        let mut world = Self {
            platforms: Vec::new(),
            hazards: Vec::new(),
            flyers: Vec::new(),
            checkpoints: Vec::new(),
            collectible: None,
            finish: FinishGate {
                pos: Vec2::ZERO,
                size: Vec2::ZERO,
            },
            player: PlayerState::new(),
            phase: Phase::Playing,
            camera_x: CAMERA_MIN_X,
            time_secs: 0.0,
            events: Vec::new(),
        };
        world.load_level(0);
        world
    }

    /// Discard the previous level's entities and instantiate level `index`.
    /// Per-level player fields reset; score and accumulated time persist.
    pub fn load_level(&mut self, index: usize) {
        let desc = level::generate(index);

        self.platforms = desc.platforms;
        self.hazards = desc.hazards;
        self.flyers = desc.flyers;
        self.checkpoints = desc.checkpoints;
        self.collectible = Some(desc.collectible);
        self.finish = desc.finish;

        self.player.level_index = index;
        self.player.level_max_x = desc.level_max_x;
        self.player.collectible_taken = false;
        self.player.stomps_this_level = 0;
        self.player.finish_lock_timer = 0.0;
        self.player.still_timer = 0.0;
        self.player.checkpoint = desc.spawn;
        self.player.respawn();

        self.phase = Phase::Playing;

        log::info!(
            "Level {} loaded: {} platforms, {} hazards, {} flyers, {} checkpoints",
            index + 1,
            self.platforms.len(),
            self.hazards.len(),
            self.flyers.len(),
            self.checkpoints.len(),
        );
    }

    /// "Play again" from the win screen: score resets, session restarts
    pub fn play_again(&mut self) {
        self.player.score = 0;
        self.load_level(0);
    }

    /// Where the camera wants to be: ahead of the player, clamped to the
    /// level's interior
    pub fn camera_target(&self) -> f32 {
        (self.player.pos.x + CAMERA_LEAD).clamp(
            CAMERA_MIN_X,
            (self.player.level_max_x - CAMERA_END_MARGIN).max(CAMERA_MIN_X),
        )
    }

    pub fn hud_status(&self) -> HudStatus {
        HudStatus {
            level_index: self.player.level_index,
            level_count: LEVEL_COUNT,
            score: self.player.score,
            collectible_taken: self.player.collectible_taken,
            stomps_this_level: self.player.stomps_this_level,
            finish_locked: self.player.finish_lock_timer > 0.0,
        }
    }

    /// Hand the accumulated frame events to the shell
    pub fn take_events(&mut self) -> Vec<FrameEvent> {
        std::mem::take(&mut self.events)
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
