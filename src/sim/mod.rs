//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Frame deltas clamped to a fixed cap
//! - Seeded RNG only, and only during level generation
//! - Stable iteration order (entities in generation order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod flyer;
pub mod hazard;
pub mod level;
pub mod player;
pub mod rng;
pub mod state;
pub mod tick;

pub use collision::{BoxBounds, overlaps, resolve_horizontal, resolve_vertical};
pub use level::{LevelDesc, generate};
pub use rng::LevelRng;
pub use state::{
    Checkpoint, Collectible, FinishGate, Flyer, FrameEvent, Hazard, HudStatus, Phase, Platform,
    PlayerState, World,
};
pub use tick::{TickInput, tick};
