//! Entity rule tables: hit shape, motion, collision outcome and spawn weight
//! for every obstacle and collectible kind.

use serde::{Deserialize, Serialize};

use crate::sim::collision::Hitbox;
use crate::sim::state::{CollectibleKind, ObstacleKind};

/// Player state that turns an obstacle hit into a bonus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Evasion {
    Jump,
    Slide,
    Boost,
}

/// What an unmitigated hit does
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum HitOutcome {
    /// Remove this much health (ends the run under one-hit-kill)
    Damage(f32),
    /// Ends the run regardless of health
    Lethal,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleRule {
    pub kind: ObstacleKind,
    pub width: f32,
    pub height: f32,
    pub hitbox: Hitbox,
    /// Scroll speed added on top of the world speed
    pub extra_speed: f32,
    pub evaded_by: Option<Evasion>,
    pub outcome: HitOutcome,
    /// Points for evading or smashing it
    pub evade_bonus: u64,
    /// Relative spawn weight (0 disables the kind)
    pub weight: f32,
}

impl ObstacleRule {
    pub fn default_for(kind: ObstacleKind) -> Self {
        match kind {
            ObstacleKind::Barrier => Self {
                kind,
                width: 80.0,
                height: 30.0,
                hitbox: Hitbox::Aabb { inset: 6.0 },
                extra_speed: 0.0,
                evaded_by: Some(Evasion::Jump),
                outcome: HitOutcome::Damage(1.0),
                evade_bonus: 10,
                weight: 3.0,
            },
            ObstacleKind::Overhead => Self {
                kind,
                width: 90.0,
                height: 24.0,
                hitbox: Hitbox::Aabb { inset: 4.0 },
                extra_speed: 0.0,
                evaded_by: Some(Evasion::Slide),
                outcome: HitOutcome::Damage(1.0),
                evade_bonus: 10,
                weight: 2.0,
            },
            ObstacleKind::Breakable => Self {
                kind,
                width: 90.0,
                height: 40.0,
                hitbox: Hitbox::Aabb { inset: 4.0 },
                extra_speed: 0.0,
                evaded_by: Some(Evasion::Boost),
                outcome: HitOutcome::Damage(1.0),
                evade_bonus: 25,
                weight: 1.5,
            },
            ObstacleKind::Wall => Self {
                kind,
                width: 100.0,
                height: 60.0,
                hitbox: Hitbox::Aabb { inset: 2.0 },
                extra_speed: 0.0,
                evaded_by: None,
                outcome: HitOutcome::Lethal,
                evade_bonus: 50,
                weight: 0.5,
            },
            ObstacleKind::Hazard => Self {
                kind,
                width: 56.0,
                height: 56.0,
                hitbox: Hitbox::Circle { radius: 24.0 },
                extra_speed: 3.0,
                evaded_by: Some(Evasion::Jump),
                outcome: HitOutcome::Damage(1.0),
                evade_bonus: 20,
                weight: 1.0,
            },
        }
    }
}

/// What picking up a collectible does
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Effect {
    Coins(u32),
    Keys(u32),
    /// Restore health (clamped to max)
    Heal(f32),
    /// Restore energy (clamped to max)
    Energize(f32),
    /// Timed shield buff, in seconds
    Shield(f32),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CollectibleRule {
    pub kind: CollectibleKind,
    pub radius: f32,
    pub effect: Effect,
    /// Base points, scaled by the combo multiplier
    pub score: u64,
    pub weight: f32,
}

impl CollectibleRule {
    pub fn default_for(kind: CollectibleKind) -> Self {
        let (radius, effect, score, weight) = match kind {
            CollectibleKind::Coin => (12.0, Effect::Coins(1), 10, 6.0),
            CollectibleKind::Gem => (14.0, Effect::Coins(5), 50, 1.0),
            CollectibleKind::Health => (16.0, Effect::Heal(1.0), 20, 0.6),
            CollectibleKind::Energy => (16.0, Effect::Energize(30.0), 15, 1.0),
            CollectibleKind::Shield => (16.0, Effect::Shield(3.0), 15, 0.4),
            CollectibleKind::Key => (14.0, Effect::Keys(1), 30, 0.5),
        };
        Self {
            kind,
            radius,
            effect,
            score,
            weight,
        }
    }
}

pub fn default_obstacles() -> Vec<ObstacleRule> {
    ObstacleKind::ALL.iter().map(|&k| ObstacleRule::default_for(k)).collect()
}

pub fn default_collectibles() -> Vec<CollectibleRule> {
    CollectibleKind::ALL
        .iter()
        .map(|&k| CollectibleRule::default_for(k))
        .collect()
}
