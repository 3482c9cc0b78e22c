//! Jungle Dash - a 2.5D platformer core with procedural levels
//!
//! Core modules:
//! - `sim`: Deterministic simulation (level generation, physics, hazard AI)
//!
//! Rendering, DOM wiring and input events live in the thin shell (`main.rs`);
//! the simulation itself never touches the platform.

pub mod sim;

/// Game tuning constants
///
/// These values are tuned by feel, not derived. Treat them as a table.
pub mod consts {
    /// Number of generated levels before the win screen
    pub const LEVEL_COUNT: usize = 25;
    /// Frame delta clamp in seconds (a backgrounded tab must not tunnel)
    pub const MAX_FRAME_DT: f32 = 0.033;

    /// Player movement
    pub const MOVE_SPEED: f32 = 7.8;
    pub const JUMP_SPEED: f32 = 14.5;
    pub const GRAVITY: f32 = -31.0;
    /// Ground jump plus one air jump
    pub const MAX_JUMPS: u32 = 2;

    /// Player collision box (w, h, d)
    pub const PLAYER_SIZE: glam::Vec3 = glam::Vec3::new(1.0, 1.0, 1.0);
    /// Default depth for platforms, checkpoints and the finish gate
    pub const BOX_DEPTH: f32 = 2.6;

    /// Horizontal world bound: entities never cross the left wall
    pub const MIN_X: f32 = 0.5;
    /// Falling below this resets the player to the checkpoint
    pub const PLAYER_FALL_Y: f32 = -8.0;
    /// Falling below this resets a hazard to its spawn point
    pub const HAZARD_FALL_Y: f32 = -10.0;

    /// Side-collision threshold slack: standing on top of a thin platform
    /// must not read as a horizontal block
    pub const SIDE_CONTACT_SLACK: f32 = 0.03;
    /// Foot-to-platform-top tolerance for the support probe
    pub const SUPPORT_TOP_TOLERANCE: f32 = 0.36;
    /// Fraction of entity width counted as support overhang
    pub const SUPPORT_WIDTH_SLACK: f32 = 0.6;

    /// Stomp detection: player must be falling faster than this...
    pub const STOMP_FALL_VY: f32 = -1.2;
    /// ...and above the target's upper-quarter line
    pub const STOMP_TOP_FRACTION: f32 = 0.25;
    pub const HAZARD_STOMP_SCORE: u64 = 50;
    pub const FLYER_STOMP_SCORE: u64 = 100;
    /// Rebound after a stomp, as a fraction of jump speed
    pub const HAZARD_STOMP_REBOUND: f32 = 0.4;
    pub const FLYER_STOMP_REBOUND: f32 = 0.45;

    /// Finish gate lock-out after an early crossing attempt
    pub const FINISH_LOCK_SECS: f32 = 1.1;
    /// Checkpoint respawn point sits this far above the marker
    pub const CHECKPOINT_RESPAWN_LIFT: f32 = 1.2;

    /// Player counts as idle (flyers return home) past this stillness time
    pub const IDLE_THRESHOLD_SECS: f32 = 0.35;
    pub const IDLE_MAX_VX: f32 = 0.08;
    pub const IDLE_MAX_VY: f32 = 0.15;

    /// Hazard AI sensing window
    pub const SENSE_RANGE_X: f32 = 22.0;
    pub const SENSE_RANGE_Y: f32 = 7.5;
    /// Flank side oscillation rate (radians/sec over sim time)
    pub const FLANK_RATE: f32 = 0.35;
    pub const PATROL_RATE: f32 = 0.65;
    pub const PATROL_RADIUS: f32 = 2.1;
    /// Dead zone around the desired x before intent kicks in
    pub const INTENT_DEAD_ZONE: f32 = 0.25;
    /// Exponential smoothing rate for horizontal intent
    pub const INTENT_SMOOTHING: f32 = 7.5;
    /// Patrol is slower than chase
    pub const PATROL_SPEED_SCALE: f32 = 0.55;
    /// Intent magnitude below this never counts as a horizontal block
    pub const BLOCKED_INTENT: f32 = 0.08;
    /// A hazard below this height stands on the ground floor
    pub const FLOOR_LEVEL_Y: f32 = 0.8;
    /// The player below this height also counts as grounded for climb logic
    pub const PLAYER_GROUND_Y: f32 = 1.2;
    /// Platform tops above this are climb targets
    pub const ELEVATED_TOP_Y: f32 = 1.0;
    /// Player is "notably higher" past this margin
    pub const CLIMB_HEIGHT_MARGIN: f32 = 0.85;
    /// Horizontal closeness that justifies a chase jump
    pub const CLIMB_CLOSE_RANGE: f32 = 4.1;
    /// Forced-climb targeting counts as aligned within this distance
    pub const CLIMB_ALIGN_RANGE: f32 = 2.4;
    /// Lower bound on the re-jump interval regardless of rolled cooldown
    pub const MIN_JUMP_INTERVAL: f32 = 0.26;

    /// Flyers aim this far above the player
    pub const FLYER_HOVER_OFFSET: f32 = 1.5;
    /// Flyer altitude band
    pub const FLYER_MIN_Y: f32 = 2.5;
    pub const FLYER_MAX_Y: f32 = 13.0;

    /// Camera follows the player with a forward lead, clamped to the level
    pub const CAMERA_LEAD: f32 = 9.0;
    pub const CAMERA_MIN_X: f32 = 20.0;
    pub const CAMERA_END_MARGIN: f32 = 6.0;
    pub const CAMERA_SMOOTHING: f32 = 4.5;
}
