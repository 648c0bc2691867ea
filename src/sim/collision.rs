//! Collision detection for lane entities
//!
//! Everything is tested in the ground plane. Obstacles use axis-aligned boxes
//! with an inset margin (a forgiving hit), or a circle for round hazards.
//! Collectibles are circles tested against the player's box.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::Player;
use crate::tuning::{Evasion, HitOutcome, ObstacleRule};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Box of `size` centred on `center`
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Shrink every side by `margin`, never past the centre
    pub fn inset(&self, margin: f32) -> Self {
        let center = (self.min + self.max) / 2.0;
        let half = ((self.max - self.min) / 2.0 - Vec2::splat(margin)).max(Vec2::ZERO);
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Strict overlap (touching edges do not count)
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    /// Closest point inside the box to `p`
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        p.clamp(self.min, self.max)
    }
}

/// Per-entity hit shape
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Hitbox {
    /// Entity box shrunk by `inset` on every side
    Aabb { inset: f32 },
    /// Circle around the entity centre
    Circle { radius: f32 },
}

impl Default for Hitbox {
    fn default() -> Self {
        Hitbox::Aabb { inset: 0.0 }
    }
}

impl Hitbox {
    /// Test this shape, placed at `center` with visual `size`, against a box
    pub fn hits(&self, center: Vec2, size: Vec2, target: &Aabb) -> bool {
        match *self {
            Hitbox::Aabb { inset } => Aabb::from_center(center, size).inset(inset).overlaps(target),
            Hitbox::Circle { radius } => circle_aabb_overlap(center, radius, target),
        }
    }
}

/// Circle vs box overlap via the closest point on the box
pub fn circle_aabb_overlap(center: Vec2, radius: f32, aabb: &Aabb) -> bool {
    let closest = aabb.closest_point(center);
    (center - closest).length_squared() < radius * radius
}

/// How an obstacle overlap is settled
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution {
    /// Shield active: the obstacle is destroyed for a bonus
    Smash,
    /// Matching evasive action: bonus, combo, obstacle removed
    Evade,
    /// Post-hit grace: nothing happens, the obstacle scrolls on
    Ignore,
    /// Unmitigated hit
    Hit(HitOutcome),
}

/// Whether the player is currently performing `evasion`
pub fn is_evading(player: &Player, evasion: Evasion) -> bool {
    match evasion {
        Evasion::Jump => player.jumping,
        Evasion::Slide => player.is_sliding(),
        Evasion::Boost => player.is_boosting(),
    }
}

/// Decision table for a player/obstacle overlap. Precedence: shield, matching
/// evasion, grace, then the rule's hit outcome.
pub fn resolve_obstacle(player: &Player, rule: &ObstacleRule) -> Resolution {
    if player.is_shielded() {
        return Resolution::Smash;
    }
    if let Some(evasion) = rule.evaded_by
        && is_evading(player, evasion)
    {
        return Resolution::Evade;
    }
    if player.is_invulnerable() {
        return Resolution::Ignore;
    }
    Resolution::Hit(rule.outcome)
}
