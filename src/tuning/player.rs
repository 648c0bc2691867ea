//! Gameplay tuning for the player avatar, abilities, pacing and scoring.
//!
//! Keep this separate from engine wiring (seeds, world size, rule tables).

use serde::{Deserialize, Serialize};

use crate::sim::state::AbilityId;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    /// Avatar box width in world units.
    pub width: f32,

    /// Avatar box height in world units.
    pub tall: f32,

    pub max_health: f32,
    pub max_energy: f32,

    /// Energy regained per second while not boosting.
    pub energy_regen: f32,

    /// Upward velocity on jump (units per reference frame).
    pub jump_velocity: f32,

    /// Downward acceleration (units per reference frame squared).
    pub gravity: f32,

    /// Seconds a slide lasts.
    pub slide_duration: f32,

    /// Fraction of the remaining lane offset covered per reference frame.
    pub lane_lerp: f32,

    /// Seconds of invulnerability after a damaging hit.
    pub hit_grace: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            width: 40.0,
            tall: 60.0,
            max_health: 3.0,
            max_energy: 100.0,
            energy_regen: 8.0,
            jump_velocity: 12.0,
            gravity: 0.6,
            slide_duration: 0.6,
            lane_lerp: 0.25,
            hit_grace: 1.0,
        }
    }
}

/// Cost and timing of one ability
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AbilitySpec {
    /// Energy deducted on activation
    pub cost: f32,
    /// Seconds the effect lasts
    pub duration: f32,
    /// Seconds before it can be used again (counted from activation)
    pub cooldown: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AbilityTuning {
    pub boost: AbilitySpec,
    /// World speed multiplier while boosting
    pub boost_speed_multiplier: f32,
    pub shield: AbilitySpec,
}

impl Default for AbilityTuning {
    fn default() -> Self {
        Self {
            boost: AbilitySpec {
                cost: 40.0,
                duration: 2.0,
                cooldown: 5.0,
            },
            boost_speed_multiplier: 1.8,
            shield: AbilitySpec {
                cost: 60.0,
                duration: 3.0,
                cooldown: 8.0,
            },
        }
    }
}

impl AbilityTuning {
    pub fn spec(&self, ability: AbilityId) -> &AbilitySpec {
        match ability {
            AbilityId::Boost => &self.boost,
            AbilityId::Shield => &self.shield,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedTuning {
    /// Scroll speed at distance 0 (units per reference frame).
    pub base_speed: f32,

    /// Scroll speed ceiling.
    pub max_speed: f32,

    /// Speed gained per unit of distance travelled.
    pub speed_gain: f32,
}

impl Default for SpeedTuning {
    fn default() -> Self {
        Self {
            base_speed: 5.0,
            max_speed: 14.0,
            speed_gain: 0.0005,
        }
    }
}

impl SpeedTuning {
    /// Speed for a given distance, capped at `max_speed`
    pub fn speed_at(&self, distance: f32) -> f32 {
        (self.base_speed + distance.max(0.0) * self.speed_gain).min(self.max_speed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreTuning {
    /// Passive points per distance unit.
    pub score_per_distance: f32,

    /// Seconds without a pickup or evasion before the combo lapses.
    pub combo_timeout: f32,

    /// Combo count per multiplier step.
    pub combo_tier: u32,

    /// Multiplier added per full tier.
    pub combo_step: f32,

    pub max_multiplier: f32,
}

impl Default for ScoreTuning {
    fn default() -> Self {
        Self {
            score_per_distance: 0.25,
            combo_timeout: 2.5,
            combo_tier: 5,
            combo_step: 0.5,
            max_multiplier: 4.0,
        }
    }
}

impl ScoreTuning {
    /// Multiplier for a combo count: +`combo_step` per `combo_tier`, capped
    pub fn multiplier_for(&self, combo: u32) -> f32 {
        let tiers = combo / self.combo_tier.max(1);
        (1.0 + tiers as f32 * self.combo_step).min(self.max_multiplier.max(1.0))
    }
}
