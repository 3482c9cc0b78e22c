//! Box overlap and per-axis collision resolution
//!
//! Everything that moves in the world is an axis-aligned box on the z = 0
//! plane. Resolution is two-phase: horizontal displacement is applied and
//! clamped against platform sides first, then gravity displacement is applied
//! and clamped against tops/undersides. Re-testing overlap per axis is what
//! keeps fast entities from tunneling or catching on corners.

use glam::Vec3;

use super::state::Platform;
use crate::consts::{SIDE_CONTACT_SLACK, SUPPORT_TOP_TOLERANCE, SUPPORT_WIDTH_SLACK};

/// An axis-aligned box given by center and full extents
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxBounds {
    pub center: Vec3,
    pub size: Vec3,
}

impl BoxBounds {
    pub fn new(center: Vec3, size: Vec3) -> Self {
        Self { center, size }
    }
}

/// Strict overlap test: on every axis the center distance must be less than
/// the half-sum of extents. Touching faces do not overlap.
pub fn overlaps(a: &BoxBounds, b: &BoxBounds) -> bool {
    (a.center.x - b.center.x).abs() * 2.0 < a.size.x + b.size.x
        && (a.center.y - b.center.y).abs() * 2.0 < a.size.y + b.size.y
        && (a.center.z - b.center.z).abs() * 2.0 < a.size.z + b.size.z
}

/// Result of the horizontal pass
#[derive(Debug, Clone, Copy)]
pub struct HorizontalHit {
    pub x: f32,
    pub blocked: bool,
}

/// Clamp a horizontal move against platform sides.
///
/// `move_dir` is the entity's signed horizontal intent (velocity for the
/// player, smoothed intent for hazards); `dir_threshold` is the magnitude
/// below which the entity is not considered to be pushing into a wall.
/// Platforms whose vertical separation reaches the side threshold are
/// ignored, so standing on top of a thin platform never reads as a wall.
pub fn resolve_horizontal(
    size: Vec3,
    mut next_x: f32,
    y: f32,
    move_dir: f32,
    dir_threshold: f32,
    platforms: &[Platform],
) -> HorizontalHit {
    let mut blocked = false;
    for p in platforms {
        let probe = BoxBounds::new(Vec3::new(next_x, y, 0.0), size);
        if !overlaps(&probe, &p.bounds()) {
            continue;
        }
        let vertical_overlap = (y - p.pos.y).abs();
        let side_threshold = (p.size.y + size.y) * 0.5 - SIDE_CONTACT_SLACK;
        if vertical_overlap >= side_threshold {
            continue;
        }
        if move_dir > dir_threshold {
            next_x = p.pos.x - (p.size.x + size.x) * 0.5;
            blocked = true;
        }
        if move_dir < -dir_threshold {
            next_x = p.pos.x + (p.size.x + size.x) * 0.5;
            blocked = true;
        }
    }
    HorizontalHit { x: next_x, blocked }
}

/// Result of the vertical pass
#[derive(Debug, Clone, Copy)]
pub struct VerticalHit {
    pub y: f32,
    pub vy: f32,
    /// Entity came to rest on a platform top this frame
    pub landed: bool,
}

/// Clamp a vertical move against platform tops and undersides.
///
/// Landing requires downward (or zero) velocity with the previous position at
/// or above the platform center; a head bump requires upward velocity from
/// below. Both zero the vertical velocity.
pub fn resolve_vertical(
    size: Vec3,
    x: f32,
    current_y: f32,
    mut next_y: f32,
    mut vy: f32,
    platforms: &[Platform],
) -> VerticalHit {
    let mut landed = false;
    for p in platforms {
        let probe = BoxBounds::new(Vec3::new(x, next_y, 0.0), size);
        if !overlaps(&probe, &p.bounds()) {
            continue;
        }
        if vy <= 0.0 && current_y >= p.pos.y {
            next_y = p.pos.y + (p.size.y + size.y) * 0.5;
            vy = 0.0;
            landed = true;
        } else if vy > 0.0 && current_y < p.pos.y {
            next_y = p.pos.y - (p.size.y + size.y) * 0.5;
            vy = 0.0;
        }
    }
    VerticalHit {
        y: next_y,
        vy,
        landed,
    }
}

/// Would an entity of `size` standing at (x, y) have a platform under its
/// feet? Used by hazards to avoid stepping off edges.
pub fn has_support_at(size: Vec3, x: f32, y: f32, platforms: &[Platform]) -> bool {
    let foot_y = y - size.y * 0.5;
    platforms.iter().any(|p| {
        let close_to_top = (foot_y - p.top()).abs() < SUPPORT_TOP_TOLERANCE;
        let inside_width = (x - p.pos.x).abs() * 2.0 < p.size.x + size.x * SUPPORT_WIDTH_SLACK;
        close_to_top && inside_width
    })
}
