//! Data-driven game balance
//!
//! `EngineConfig` is accepted at construction. Every field has a default, so a
//! host can pass a partial JSON object and only override what it needs.

pub mod entities;
pub mod player;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use entities::{CollectibleRule, Effect, Evasion, HitOutcome, ObstacleRule};
pub use player::{AbilitySpec, AbilityTuning, PlayerTuning, ScoreTuning, SpeedTuning};

use crate::consts::{LANE_COUNT, WORLD_HEIGHT, WORLD_WIDTH};
use crate::sim::spawner::SpawnSchedule;
use crate::sim::state::{CollectibleKind, ObstacleKind};

/// Upper bound on lanes; more than this is not a lane runner any more
pub const MAX_LANES: usize = 8;

/// How an unmitigated, non-lethal hit is treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FailurePolicy {
    /// Hits remove health; the run ends at zero
    #[default]
    Health,
    /// Any hit ends the run
    OneHitKill,
}

/// Escape variants: a hazard boundary chases the player
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EscapeTuning {
    pub start_gap: f32,
    pub max_gap: f32,
    /// Gap the player gains per second (doubled while boosting)
    pub recovery_rate: f32,
    /// Gap the hazard closes per second
    pub creep_rate: f32,
    /// Gap lost on every damaging hit
    pub hit_penalty: f32,
}

impl Default for EscapeTuning {
    fn default() -> Self {
        Self {
            start_gap: 120.0,
            max_gap: 200.0,
            recovery_rate: 4.0,
            creep_rate: 5.0,
            hit_penalty: 50.0,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config field `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub world_width: f32,
    pub world_height: f32,
    pub lane_count: usize,
    /// Distance from the bottom edge to the player's feet
    pub player_offset: f32,
    /// RNG seed for spawn selection
    pub seed: u64,
    pub player: PlayerTuning,
    pub abilities: AbilityTuning,
    pub speed: SpeedTuning,
    pub scoring: ScoreTuning,
    pub obstacle_schedule: SpawnSchedule,
    pub collectible_schedule: SpawnSchedule,
    pub failure: FailurePolicy,
    pub escape: Option<EscapeTuning>,
    pub obstacles: Vec<ObstacleRule>,
    pub collectibles: Vec<CollectibleRule>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            lane_count: LANE_COUNT,
            player_offset: 100.0,
            seed: 0x5eed,
            player: PlayerTuning::default(),
            abilities: AbilityTuning::default(),
            speed: SpeedTuning::default(),
            scoring: ScoreTuning::default(),
            obstacle_schedule: SpawnSchedule {
                base_interval: 1.4,
                min_interval: 0.45,
                decay_rate: 6000.0,
            },
            collectible_schedule: SpawnSchedule {
                base_interval: 0.9,
                min_interval: 0.5,
                decay_rate: 12000.0,
            },
            failure: FailurePolicy::Health,
            escape: None,
            obstacles: entities::default_obstacles(),
            collectibles: entities::default_collectibles(),
        }
    }
}

impl EngineConfig {
    /// Classic one-hit-kill runner
    pub fn one_hit() -> Self {
        Self {
            failure: FailurePolicy::OneHitKill,
            ..Self::default()
        }
    }

    /// Escape runner: outpace the hazard boundary
    pub fn escape() -> Self {
        Self {
            escape: Some(EscapeTuning::default()),
            ..Self::default()
        }
    }

    /// Parse a (possibly partial) JSON config and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        log::info!(
            "Loaded config: {} lanes, {}x{} world, seed {:#x}",
            config.lane_count,
            config.world_width,
            config.world_height,
            config.seed
        );
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_LANES).contains(&self.lane_count) {
            return Err(invalid("lane_count", format!("must be in 1..={MAX_LANES}")));
        }
        if !(self.world_width > 0.0 && self.world_height > 0.0) {
            return Err(invalid("world_width", "world dimensions must be positive"));
        }
        if !(self.player_offset >= 0.0 && self.player_offset < self.world_height) {
            return Err(invalid("player_offset", "must lie inside the world"));
        }
        if self.player.max_health <= 0.0 {
            return Err(invalid("player.max_health", "must be positive"));
        }
        if !(self.player.gravity > 0.0) {
            return Err(invalid("player.gravity", "must be positive"));
        }
        if !(self.player.lane_lerp > 0.0 && self.player.lane_lerp <= 1.0) {
            return Err(invalid("player.lane_lerp", "must be in (0, 1]"));
        }
        if self.speed.base_speed < 0.0 || self.speed.max_speed < self.speed.base_speed {
            return Err(invalid("speed", "need 0 <= base_speed <= max_speed"));
        }
        self.obstacle_schedule
            .validate()
            .map_err(|reason| invalid("obstacle_schedule", reason))?;
        self.collectible_schedule
            .validate()
            .map_err(|reason| invalid("collectible_schedule", reason))?;
        if self.scoring.combo_tier == 0 {
            return Err(invalid("scoring.combo_tier", "must be at least 1"));
        }
        if let Some(escape) = &self.escape
            && !(escape.start_gap > 0.0 && escape.max_gap >= escape.start_gap)
        {
            return Err(invalid("escape", "need 0 < start_gap <= max_gap"));
        }
        if let Some(escape) = &self.escape
            && ![escape.recovery_rate, escape.creep_rate, escape.hit_penalty]
                .iter()
                .all(|rate| rate.is_finite() && *rate >= 0.0)
        {
            return Err(invalid("escape", "rates must be finite and non-negative"));
        }
        if self.obstacles.iter().any(|r| !(r.weight >= 0.0)) {
            return Err(invalid("obstacles", "weights must be non-negative"));
        }
        if self.collectibles.iter().any(|r| !(r.weight >= 0.0)) {
            return Err(invalid("collectibles", "weights must be non-negative"));
        }
        Ok(())
    }

    /// Rule for an obstacle kind (falls back to the built-in rule)
    pub fn obstacle_rule(&self, kind: ObstacleKind) -> ObstacleRule {
        self.obstacles
            .iter()
            .find(|r| r.kind == kind)
            .copied()
            .unwrap_or_else(|| ObstacleRule::default_for(kind))
    }

    /// Rule for a collectible kind (falls back to the built-in rule)
    pub fn collectible_rule(&self, kind: CollectibleKind) -> CollectibleRule {
        self.collectibles
            .iter()
            .find(|r| r.kind == kind)
            .copied()
            .unwrap_or_else(|| CollectibleRule::default_for(kind))
    }

    /// Screen y of the player's feet
    #[inline]
    pub fn feet_y(&self) -> f32 {
        self.world_height - self.player_offset
    }
}
