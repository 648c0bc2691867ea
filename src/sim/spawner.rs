//! Timer-driven entity spawning
//!
//! Each entity family has its own accumulating timer. When the timer reaches
//! the current interval it resets and one entity is appended, its kind drawn
//! from a weighted table and its lane drawn uniformly. Intervals shrink as
//! distance grows, floored at a minimum.

use glam::Vec2;
use rand::Rng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use serde::{Deserialize, Serialize};

use super::state::{Collectible, CollectibleKind, GameState, Obstacle, ObstacleKind};
use crate::lane_center_x;
use crate::tuning::EngineConfig;

/// Spawn interval curve: `max(min_interval, base_interval - distance / decay_rate)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnSchedule {
    /// Seconds between spawns at distance 0
    pub base_interval: f32,
    /// Floor in seconds
    pub min_interval: f32,
    /// Distance units per second of interval reduction
    pub decay_rate: f32,
}

impl Default for SpawnSchedule {
    fn default() -> Self {
        Self {
            base_interval: 1.5,
            min_interval: 0.5,
            decay_rate: 5000.0,
        }
    }
}

impl SpawnSchedule {
    pub fn interval_at(&self, distance: f32) -> f32 {
        (self.base_interval - distance.max(0.0) / self.decay_rate).max(self.min_interval)
    }

    pub fn validate(&self) -> Result<(), &'static str> {
        if !(self.min_interval > 0.0) {
            return Err("min_interval must be positive");
        }
        if self.base_interval < self.min_interval {
            return Err("base_interval must not be below min_interval");
        }
        if !(self.decay_rate > 0.0) {
            return Err("decay_rate must be positive");
        }
        Ok(())
    }
}

/// Monotonically accumulating countdown
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SpawnTimer {
    elapsed: f32,
}

impl SpawnTimer {
    /// Accumulate `dt`; fires (and resets to zero) once the interval is reached
    pub fn advance(&mut self, dt: f32, interval: f32) -> bool {
        self.elapsed += dt;
        if self.elapsed >= interval {
            self.elapsed = 0.0;
            true
        } else {
            false
        }
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }
}

/// Discrete weighted distribution over an entity kind enum
#[derive(Debug, Clone)]
pub struct SpawnTable<K> {
    kinds: Vec<K>,
    index: Option<WeightedIndex<f32>>,
    fallback: K,
}

impl<K: Copy> SpawnTable<K> {
    /// Build from (kind, weight) pairs. If no weight is positive every draw
    /// returns `fallback`, so a draw never fails.
    pub fn new(entries: impl IntoIterator<Item = (K, f32)>, fallback: K) -> Self {
        let (kinds, weights): (Vec<K>, Vec<f32>) = entries.into_iter().unzip();
        let index = WeightedIndex::new(weights).ok();
        if index.is_none() {
            log::warn!("Spawn table has no positive weights, using fallback kind");
        }
        Self {
            kinds,
            index,
            fallback,
        }
    }

    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> K {
        match &self.index {
            Some(index) => self.kinds[index.sample(rng)],
            None => self.fallback,
        }
    }
}

/// Spawn timers and tables for one engine
#[derive(Debug, Clone)]
pub struct Spawner {
    obstacle_timer: SpawnTimer,
    collectible_timer: SpawnTimer,
    obstacles: SpawnTable<ObstacleKind>,
    collectibles: SpawnTable<CollectibleKind>,
}

impl Spawner {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            obstacle_timer: SpawnTimer::default(),
            collectible_timer: SpawnTimer::default(),
            obstacles: SpawnTable::new(
                ObstacleKind::ALL
                    .iter()
                    .map(|&k| (k, config.obstacle_rule(k).weight)),
                ObstacleKind::Barrier,
            ),
            collectibles: SpawnTable::new(
                CollectibleKind::ALL
                    .iter()
                    .map(|&k| (k, config.collectible_rule(k).weight)),
                CollectibleKind::Coin,
            ),
        }
    }

    pub fn reset(&mut self) {
        self.obstacle_timer.reset();
        self.collectible_timer.reset();
    }

    /// Advance both timers and append whatever is due
    pub fn run<R: Rng + ?Sized>(
        &mut self,
        state: &mut GameState,
        config: &EngineConfig,
        rng: &mut R,
        dt: f32,
    ) {
        let obstacle_interval = config.obstacle_schedule.interval_at(state.distance);
        if self.obstacle_timer.advance(dt, obstacle_interval) {
            let kind = self.obstacles.pick(rng);
            let lane = rng.random_range(0..config.lane_count);
            let rule = config.obstacle_rule(kind);
            let id = spawn_obstacle(state, config, kind, lane, -rule.height / 2.0);
            log::debug!(
                "Spawned obstacle {id} {kind:?} in lane {lane} (interval {obstacle_interval:.2}s)"
            );
        }

        let collectible_interval = config.collectible_schedule.interval_at(state.distance);
        if self.collectible_timer.advance(dt, collectible_interval) {
            let kind = self.collectibles.pick(rng);
            let lane = rng.random_range(0..config.lane_count);
            let rule = config.collectible_rule(kind);
            let id = spawn_collectible(state, config, kind, lane, -rule.radius);
            log::debug!("Spawned collectible {id} {kind:?} in lane {lane}");
        }
    }
}

/// Append an obstacle centred on `lane` at screen height `y`
pub fn spawn_obstacle(
    state: &mut GameState,
    config: &EngineConfig,
    kind: ObstacleKind,
    lane: usize,
    y: f32,
) -> u32 {
    let rule = config.obstacle_rule(kind);
    let lane = lane.min(config.lane_count.saturating_sub(1));
    let id = state.next_entity_id();
    state.obstacles.push(Obstacle {
        id,
        kind,
        lane,
        pos: Vec2::new(lane_center_x(lane, config.lane_count, config.world_width), y),
        size: Vec2::new(rule.width, rule.height),
        extra_speed: rule.extra_speed,
    });
    id
}

/// Append a collectible centred on `lane` at screen height `y`
pub fn spawn_collectible(
    state: &mut GameState,
    config: &EngineConfig,
    kind: CollectibleKind,
    lane: usize,
    y: f32,
) -> u32 {
    let rule = config.collectible_rule(kind);
    let lane = lane.min(config.lane_count.saturating_sub(1));
    let id = state.next_entity_id();
    state.collectibles.push(Collectible {
        id,
        kind,
        lane,
        pos: Vec2::new(lane_center_x(lane, config.lane_count, config.world_width), y),
        radius: rule.radius,
        collected: false,
    });
    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_interval_shrinks_to_floor() {
        let schedule = SpawnSchedule {
            base_interval: 1.5,
            min_interval: 0.5,
            decay_rate: 1000.0,
        };
        assert_eq!(schedule.interval_at(0.0), 1.5);
        assert!((schedule.interval_at(500.0) - 1.0).abs() < 1e-6);
        assert_eq!(schedule.interval_at(5000.0), 0.5);
        assert_eq!(schedule.interval_at(-10.0), 1.5);
    }

    #[test]
    fn test_timer_fires_and_resets() {
        let mut timer = SpawnTimer::default();
        assert!(!timer.advance(0.4, 1.0));
        assert!(!timer.advance(0.4, 1.0));
        assert!(timer.advance(0.4, 1.0));
        assert_eq!(timer.elapsed(), 0.0);
    }

    #[test]
    fn test_table_respects_zero_weights() {
        let table = SpawnTable::new(
            [(ObstacleKind::Barrier, 0.0), (ObstacleKind::Wall, 1.0)],
            ObstacleKind::Barrier,
        );
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..200 {
            assert_eq!(table.pick(&mut rng), ObstacleKind::Wall);
        }
    }

    #[test]
    fn test_table_falls_back_when_empty() {
        let table: SpawnTable<CollectibleKind> =
            SpawnTable::new(std::iter::empty(), CollectibleKind::Coin);
        let mut rng = Pcg32::seed_from_u64(7);
        assert_eq!(table.pick(&mut rng), CollectibleKind::Coin);

        let zeros = SpawnTable::new([(CollectibleKind::Gem, 0.0)], CollectibleKind::Coin);
        assert_eq!(zeros.pick(&mut rng), CollectibleKind::Coin);
    }

    #[test]
    fn test_table_distribution_follows_weights() {
        let table = SpawnTable::new(
            [(CollectibleKind::Coin, 3.0), (CollectibleKind::Gem, 1.0)],
            CollectibleKind::Coin,
        );
        let mut rng = Pcg32::seed_from_u64(42);
        let coins = (0..4000)
            .filter(|_| table.pick(&mut rng) == CollectibleKind::Coin)
            .count();
        // Expect ~3000
        assert!((2700..3300).contains(&coins), "coins = {coins}");
    }

    #[test]
    fn test_spawner_same_seed_same_sequence() {
        let config = EngineConfig::default();
        let run = || {
            let mut state = GameState::new(&config);
            let mut spawner = Spawner::new(&config);
            let mut rng = Pcg32::seed_from_u64(config.seed);
            for _ in 0..300 {
                spawner.run(&mut state, &config, &mut rng, 0.016);
            }
            state
                .obstacles
                .iter()
                .map(|o| (o.kind, o.lane))
                .collect::<Vec<_>>()
        };
        let a = run();
        assert!(!a.is_empty());
        assert_eq!(a, run());
    }

    #[test]
    fn test_spawned_entities_start_above_view() {
        let config = EngineConfig::default();
        let mut state = GameState::new(&config);
        let mut spawner = Spawner::new(&config);
        let mut rng = Pcg32::seed_from_u64(1);
        spawner.run(&mut state, &config, &mut rng, 10.0);
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.collectibles.len(), 1);
        let o = &state.obstacles[0];
        assert!(o.pos.y + o.size.y / 2.0 <= 0.0);
        assert!(o.lane < config.lane_count);
        let c = &state.collectibles[0];
        assert!(c.pos.y + c.radius <= 0.0);
    }
}
