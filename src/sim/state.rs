//! Game state and core simulation types
//!
//! Everything the render adapter reads lives here. The engine is the only
//! writer; adapters receive `&GameState` or an owned copy.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::lane_center_x;
use crate::tuning::EngineConfig;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Constructed, `start()` not called yet
    #[default]
    Idle,
    /// Active gameplay
    Playing,
    /// Run ended, state frozen until the next `start()`
    GameOver,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverReason {
    /// Health ran out
    Depleted,
    /// Struck by a lethal obstacle (or any obstacle under one-hit-kill)
    Lethal,
    /// Caught by the advancing hazard boundary
    Overtaken,
}

/// A depletable, regenerating quantity bounded to `[0, max]`
///
/// The value is private so every mutation goes through a clamping method.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    value: f32,
    max: f32,
}

impl Resource {
    pub fn full(max: f32) -> Self {
        let max = max.max(0.0);
        Self { value: max, max }
    }

    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }

    #[inline]
    pub fn max(&self) -> f32 {
        self.max
    }

    /// Fill ratio in [0, 1] for HUD bars
    pub fn fraction(&self) -> f32 {
        if self.max > 0.0 { self.value / self.max } else { 0.0 }
    }

    pub fn is_full(&self) -> bool {
        self.value >= self.max
    }

    pub fn is_depleted(&self) -> bool {
        self.value <= 0.0
    }

    /// Add (or remove, if negative) and clamp
    pub fn add(&mut self, amount: f32) {
        if amount.is_finite() {
            self.value = (self.value + amount).clamp(0.0, self.max);
        }
    }

    pub fn drain(&mut self, amount: f32) {
        self.add(-amount);
    }

    /// Deduct `cost` only if affordable
    pub fn spend(&mut self, cost: f32) -> bool {
        if self.value >= cost {
            self.add(-cost);
            true
        } else {
            false
        }
    }
}

/// Abilities the player can trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AbilityId {
    /// Speed burst that breaks through breakable barriers
    Boost,
    /// Temporary invincibility that smashes any obstacle
    Shield,
}

/// The player avatar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Target lane (discrete, always in `0..lane_count`)
    pub lane: usize,
    /// Rendered x position (lazily follows the lane centre)
    pub x: f32,
    /// Height above the ground while jumping
    pub height: f32,
    /// Vertical velocity (units per reference frame, up is positive)
    pub vy: f32,
    pub width: f32,
    pub tall: f32,
    pub jumping: bool,
    /// Countdowns in seconds; a flag is active while its timer is positive
    pub slide_timer: f32,
    pub boost_timer: f32,
    pub shield_timer: f32,
    /// Post-hit invulnerability
    pub grace_timer: f32,
    pub boost_cooldown: f32,
    pub shield_cooldown: f32,
    pub health: Resource,
    pub energy: Resource,
}

impl Player {
    pub fn new(config: &EngineConfig) -> Self {
        let lane = config.lane_count / 2;
        Self {
            lane,
            x: lane_center_x(lane, config.lane_count, config.world_width),
            height: 0.0,
            vy: 0.0,
            width: config.player.width,
            tall: config.player.tall,
            jumping: false,
            slide_timer: 0.0,
            boost_timer: 0.0,
            shield_timer: 0.0,
            grace_timer: 0.0,
            boost_cooldown: 0.0,
            shield_cooldown: 0.0,
            health: Resource::full(config.player.max_health),
            energy: Resource::full(config.player.max_energy),
        }
    }

    #[inline]
    pub fn grounded(&self) -> bool {
        !self.jumping
    }

    #[inline]
    pub fn is_sliding(&self) -> bool {
        self.slide_timer > 0.0
    }

    #[inline]
    pub fn is_boosting(&self) -> bool {
        self.boost_timer > 0.0
    }

    #[inline]
    pub fn is_shielded(&self) -> bool {
        self.shield_timer > 0.0
    }

    #[inline]
    pub fn is_invulnerable(&self) -> bool {
        self.grace_timer > 0.0
    }

    pub fn is_active(&self, ability: AbilityId) -> bool {
        match ability {
            AbilityId::Boost => self.is_boosting(),
            AbilityId::Shield => self.is_shielded(),
        }
    }

    pub fn cooldown(&self, ability: AbilityId) -> f32 {
        match ability {
            AbilityId::Boost => self.boost_cooldown,
            AbilityId::Shield => self.shield_cooldown,
        }
    }

    /// Ground-plane bounding box with the feet at `feet_y`
    pub fn bounds(&self, feet_y: f32) -> Aabb {
        Aabb::new(
            Vec2::new(self.x - self.width / 2.0, feet_y - self.tall),
            Vec2::new(self.x + self.width / 2.0, feet_y),
        )
    }
}

/// Obstacle types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Low ground barrier, jump over it
    Barrier,
    /// Overhead beam, slide under it
    Overhead,
    /// Crates that a boost smashes through
    Breakable,
    /// Lane-blocking wall, only a shield survives it
    Wall,
    /// Oncoming traffic that moves faster than the scroll
    Hazard,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 5] = [
        ObstacleKind::Barrier,
        ObstacleKind::Overhead,
        ObstacleKind::Breakable,
        ObstacleKind::Wall,
        ObstacleKind::Hazard,
    ];
}

/// An obstacle entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    pub lane: usize,
    /// Centre position
    pub pos: Vec2,
    pub size: Vec2,
    /// Extra scroll speed on top of the world speed
    pub extra_speed: f32,
}

/// Collectible types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CollectibleKind {
    Coin,
    Gem,
    Health,
    Energy,
    Shield,
    Key,
}

impl CollectibleKind {
    pub const ALL: [CollectibleKind; 6] = [
        CollectibleKind::Coin,
        CollectibleKind::Gem,
        CollectibleKind::Health,
        CollectibleKind::Energy,
        CollectibleKind::Shield,
        CollectibleKind::Key,
    ];
}

/// A collectible entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collectible {
    pub id: u32,
    pub kind: CollectibleKind,
    pub lane: usize,
    pub pos: Vec2,
    pub radius: f32,
    /// Set during pickup; the item is removed in the same tick, so snapshots
    /// never show it true. Watch for `GameEvent::Collected` instead.
    pub collected: bool,
}

/// Visual tag for particle colouring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleTag {
    Pickup(CollectibleKind),
    Debris(ObstacleKind),
    Impact,
}

/// A particle for visual effects (never affects gameplay)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    /// Units per second
    pub vel: Vec2,
    /// Seconds left
    pub life: f32,
    pub max_life: f32,
    pub size: f32,
    pub tag: ParticleTag,
}

impl Particle {
    /// Remaining life in [0, 1], for fading
    pub fn alpha(&self) -> f32 {
        if self.max_life > 0.0 {
            (self.life / self.max_life).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

/// Something that happened during the last tick, for adapter-side effects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Collected { id: u32, kind: CollectibleKind, points: u64 },
    Evaded { id: u32, kind: ObstacleKind, points: u64 },
    Hit { id: u32, kind: ObstacleKind, damage: f32 },
    ComboBroken { combo: u32 },
    GameOver { reason: GameOverReason },
}

/// Complete game state for one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    /// Pause flag (distinct from GameOver, preserves state)
    pub paused: bool,
    pub game_over_reason: Option<GameOverReason>,
    pub lane_count: usize,
    pub player: Player,
    /// Active obstacles (ascending id)
    pub obstacles: Vec<Obstacle>,
    /// Active collectibles (ascending id)
    pub collectibles: Vec<Collectible>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    pub score: u64,
    pub distance: f32,
    /// World scroll speed (units per reference frame)
    pub speed: f32,
    pub coins: u32,
    pub keys: u32,
    pub combo: u32,
    pub best_combo: u32,
    /// Seconds until the combo lapses
    pub combo_timer: f32,
    pub multiplier: f32,
    /// Distance between the player and the chasing hazard (escape variants)
    pub hazard_gap: Option<f32>,
    /// Seconds of simulated play
    pub elapsed: f32,
    pub ticks: u64,
    /// Events from the most recent tick
    pub events: Vec<GameEvent>,
    /// Fractional passive score carried between ticks
    #[serde(skip)]
    pub(crate) score_carry: f32,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Build a fresh state from configuration (phase `Idle`)
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            phase: GamePhase::Idle,
            paused: false,
            game_over_reason: None,
            lane_count: config.lane_count,
            player: Player::new(config),
            obstacles: Vec::new(),
            collectibles: Vec::new(),
            particles: Vec::new(),
            score: 0,
            distance: 0.0,
            speed: config.speed.base_speed,
            coins: 0,
            keys: 0,
            combo: 0,
            best_combo: 0,
            combo_timer: 0.0,
            multiplier: 1.0,
            hazard_gap: config.escape.map(|e| e.start_gap),
            elapsed: 0.0,
            ticks: 0,
            events: Vec::new(),
            score_carry: 0.0,
            next_id: 1,
        }
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// The ID the next spawned entity will receive
    #[inline]
    pub fn peek_next_id(&self) -> u32 {
        self.next_id
    }

    /// Transition to GameOver (first reason wins)
    pub fn end_run(&mut self, reason: GameOverReason) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.phase = GamePhase::GameOver;
        self.game_over_reason = Some(reason);
        self.events.push(GameEvent::GameOver { reason });
        log::info!(
            "Run over ({:?}): score={} distance={:.0} coins={}",
            reason,
            self.score,
            self.distance,
            self.coins
        );
    }

    /// Add bonus points; scores only ever grow
    pub fn award(&mut self, points: u64) {
        self.score = self.score.saturating_add(points);
    }
}
