//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Host-supplied deltas only, no clock access
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod command;
pub mod engine;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Aabb, Hitbox, Resolution, resolve_obstacle};
pub use command::Command;
pub use engine::SimulationEngine;
pub use spawner::{SpawnSchedule, SpawnTable, SpawnTimer, Spawner};
pub use state::{
    AbilityId, Collectible, CollectibleKind, GameEvent, GameOverReason, GamePhase, GameState,
    Obstacle, ObstacleKind, Particle, ParticleTag, Player, Resource,
};
pub use tick::{effective_speed, tick};
