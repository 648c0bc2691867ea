//! Variable timestep simulation tick
//!
//! Subsystems run in a fixed order: player, entities, particles, spawning,
//! collisions, then score and terminal checks. Entities spawned during a tick
//! are not collision-tested until the next one, and particles emitted by a
//! collision start moving on the next tick.

use glam::Vec2;
use rand::Rng;

use super::collision::{Resolution, circle_aabb_overlap, resolve_obstacle};
use super::spawner::Spawner;
use super::state::{
    CollectibleKind, GameEvent, GameOverReason, GameState, ObstacleKind, ParticleTag,
};
use crate::consts::{BURST_PARTICLES, MAX_PARTICLES};
use crate::tuning::{Effect, EngineConfig, FailurePolicy, HitOutcome};
use crate::{clamp_dt, frames, lane_center_x};

/// Downward pull on particles (units per second squared)
const PARTICLE_GRAVITY: f32 = 240.0;

/// Advance the game state by `dt` seconds
///
/// No-op unless the run is playing and not paused.
pub fn tick<R: Rng + ?Sized>(
    state: &mut GameState,
    config: &EngineConfig,
    spawner: &mut Spawner,
    rng: &mut R,
    dt: f32,
) {
    if !state.is_playing() || state.paused {
        return;
    }

    let dt = clamp_dt(dt);
    let f = frames(dt);
    state.events.clear();
    state.ticks += 1;
    state.elapsed += dt;

    step_player(state, config, dt, f);
    let travelled = step_entities(state, config, f);
    step_particles(state, dt, f);

    let fresh_from = state.peek_next_id();
    spawner.run(state, config, rng, dt);

    resolve_obstacles(state, config, fresh_from);
    if state.is_playing() {
        resolve_collectibles(state, config, fresh_from);
    }
    if state.is_playing() {
        accrue(state, config, dt, travelled);
        check_terminal(state);
    }

    log::trace!(
        "tick {} dt={:.4} score={} dist={:.1} obstacles={} collectibles={}",
        state.ticks,
        dt,
        state.score,
        state.distance,
        state.obstacles.len(),
        state.collectibles.len()
    );
}

/// World scroll speed including the boost multiplier
pub fn effective_speed(state: &GameState, config: &EngineConfig) -> f32 {
    if state.player.is_boosting() {
        state.speed * config.abilities.boost_speed_multiplier
    } else {
        state.speed
    }
}

#[inline]
fn countdown(timer: &mut f32, dt: f32) {
    *timer = (*timer - dt).max(0.0);
}

/// Lane interpolation, jump integration, timed flag decay, regeneration
fn step_player(state: &mut GameState, config: &EngineConfig, dt: f32, f: f32) {
    let tuning = &config.player;
    let player = &mut state.player;

    let target_x = lane_center_x(player.lane, config.lane_count, config.world_width);
    let t = (tuning.lane_lerp * f).min(1.0);
    player.x += (target_x - player.x) * t;
    if (target_x - player.x).abs() < 0.5 {
        player.x = target_x;
    }

    if player.jumping {
        player.height += player.vy * f;
        player.vy -= tuning.gravity * f;
        if player.height <= 0.0 {
            player.height = 0.0;
            player.vy = 0.0;
            player.jumping = false;
        }
    }

    countdown(&mut player.slide_timer, dt);
    countdown(&mut player.boost_timer, dt);
    countdown(&mut player.shield_timer, dt);
    countdown(&mut player.grace_timer, dt);
    countdown(&mut player.boost_cooldown, dt);
    countdown(&mut player.shield_cooldown, dt);

    if !player.is_boosting() {
        player.energy.add(tuning.energy_regen * dt);
    }
}

/// Scroll obstacles and collectibles, dropping whatever left the view.
/// Returns the distance the world moved.
fn step_entities(state: &mut GameState, config: &EngineConfig, f: f32) -> f32 {
    let scroll = effective_speed(state, config) * f;
    let bottom = config.world_height;

    for obstacle in &mut state.obstacles {
        obstacle.pos.y += scroll + obstacle.extra_speed * f;
    }
    state.obstacles.retain(|o| o.pos.y - o.size.y / 2.0 < bottom);

    for collectible in &mut state.collectibles {
        collectible.pos.y += scroll;
    }
    state.collectibles.retain(|c| c.pos.y - c.radius < bottom);

    scroll
}

fn step_particles(state: &mut GameState, dt: f32, f: f32) {
    let drag = 0.98_f32.powf(f);
    for particle in &mut state.particles {
        particle.pos += particle.vel * dt;
        particle.vel.y += PARTICLE_GRAVITY * dt;
        particle.vel *= drag;
        particle.life -= dt;
    }
    state.particles.retain(|p| p.life > 0.0);
}

fn resolve_obstacles(state: &mut GameState, config: &EngineConfig, fresh_from: u32) {
    let player_box = state.player.bounds(config.feet_y());
    let overlapping: Vec<(u32, ObstacleKind, Vec2)> = state
        .obstacles
        .iter()
        .filter(|o| o.id < fresh_from)
        .filter(|o| {
            config
                .obstacle_rule(o.kind)
                .hitbox
                .hits(o.pos, o.size, &player_box)
        })
        .map(|o| (o.id, o.kind, o.pos))
        .collect();
    if overlapping.is_empty() {
        return;
    }

    let mut removed = Vec::with_capacity(overlapping.len());
    for (id, kind, pos) in overlapping {
        let rule = config.obstacle_rule(kind);
        match resolve_obstacle(&state.player, &rule) {
            Resolution::Smash | Resolution::Evade => {
                let points = scaled(rule.evade_bonus, state.multiplier);
                state.award(points);
                bump_combo(state, config);
                burst(state, pos, ParticleTag::Debris(kind), id);
                state.events.push(GameEvent::Evaded { id, kind, points });
                log::debug!("Evaded {kind:?} #{id} for {points}");
                removed.push(id);
            }
            Resolution::Ignore => {}
            Resolution::Hit(outcome) => {
                burst(state, pos, ParticleTag::Impact, id);
                removed.push(id);
                apply_hit(state, config, id, kind, outcome);
                if !state.is_playing() {
                    break;
                }
            }
        }
    }
    state.obstacles.retain(|o| !removed.contains(&o.id));
}

fn apply_hit(
    state: &mut GameState,
    config: &EngineConfig,
    id: u32,
    kind: ObstacleKind,
    outcome: HitOutcome,
) {
    let damage = match outcome {
        HitOutcome::Lethal => state.player.health.value(),
        HitOutcome::Damage(d) => d,
    };
    state.events.push(GameEvent::Hit { id, kind, damage });
    log::debug!("Hit by {kind:?} #{id} ({outcome:?})");

    match (outcome, config.failure) {
        (HitOutcome::Lethal, _) | (HitOutcome::Damage(_), FailurePolicy::OneHitKill) => {
            state.end_run(GameOverReason::Lethal);
        }
        (HitOutcome::Damage(d), FailurePolicy::Health) => {
            state.player.health.drain(d);
            state.player.grace_timer = config.player.hit_grace;
            break_combo(state);
            if let (Some(gap), Some(escape)) = (state.hazard_gap.as_mut(), config.escape) {
                *gap -= escape.hit_penalty;
            }
            if state.player.health.is_depleted() {
                state.end_run(GameOverReason::Depleted);
            }
        }
    }
}

fn resolve_collectibles(state: &mut GameState, config: &EngineConfig, fresh_from: u32) {
    let player_box = state.player.bounds(config.feet_y());
    let mut picked: Vec<(u32, CollectibleKind, Vec2)> = Vec::new();
    for collectible in state
        .collectibles
        .iter_mut()
        .filter(|c| c.id < fresh_from && !c.collected)
    {
        if circle_aabb_overlap(collectible.pos, collectible.radius, &player_box) {
            collectible.collected = true;
            picked.push((collectible.id, collectible.kind, collectible.pos));
        }
    }

    for (id, kind, pos) in picked {
        let rule = config.collectible_rule(kind);
        apply_effect(state, rule.effect);
        let points = scaled(rule.score, state.multiplier);
        state.award(points);
        bump_combo(state, config);
        burst(state, pos, ParticleTag::Pickup(kind), id);
        state.events.push(GameEvent::Collected { id, kind, points });
        log::debug!("Collected {kind:?} #{id} for {points}");
    }

    state.collectibles.retain(|c| !c.collected);
}

fn apply_effect(state: &mut GameState, effect: Effect) {
    let player = &mut state.player;
    match effect {
        Effect::Coins(n) => state.coins = state.coins.saturating_add(n),
        Effect::Keys(n) => state.keys = state.keys.saturating_add(n),
        Effect::Heal(amount) => player.health.add(amount),
        Effect::Energize(amount) => player.energy.add(amount),
        Effect::Shield(secs) => player.shield_timer = player.shield_timer.max(secs),
    }
}

/// Passive score, distance, speed, combo decay and the escape hazard
fn accrue(state: &mut GameState, config: &EngineConfig, dt: f32, travelled: f32) {
    state.distance += travelled;
    state.speed = state.speed.max(config.speed.speed_at(state.distance));

    let gained = travelled * config.scoring.score_per_distance + state.score_carry;
    let whole = gained.floor();
    state.award(whole as u64);
    state.score_carry = gained - whole;

    if state.combo > 0 {
        state.combo_timer -= dt;
        if state.combo_timer <= 0.0 {
            break_combo(state);
        }
    }

    if let (Some(gap), Some(escape)) = (state.hazard_gap.as_mut(), config.escape) {
        let recovery = if state.player.is_boosting() {
            escape.recovery_rate * 2.0
        } else {
            escape.recovery_rate
        };
        *gap = (*gap + (recovery - escape.creep_rate) * dt).min(escape.max_gap);
    }
}

fn check_terminal(state: &mut GameState) {
    if state.player.health.is_depleted() {
        state.end_run(GameOverReason::Depleted);
    } else if state.hazard_gap.is_some_and(|gap| gap <= 0.0) {
        state.end_run(GameOverReason::Overtaken);
    }
}

fn bump_combo(state: &mut GameState, config: &EngineConfig) {
    state.combo += 1;
    state.best_combo = state.best_combo.max(state.combo);
    state.combo_timer = config.scoring.combo_timeout;
    state.multiplier = config.scoring.multiplier_for(state.combo);
}

fn break_combo(state: &mut GameState) {
    if state.combo > 0 {
        state.events.push(GameEvent::ComboBroken { combo: state.combo });
    }
    state.combo = 0;
    state.combo_timer = 0.0;
    state.multiplier = 1.0;
}

#[inline]
fn scaled(points: u64, multiplier: f32) -> u64 {
    (points as f32 * multiplier.max(1.0)).round() as u64
}

/// Celebration/debris burst; pseudo-random from the tick and entity id so the
/// gameplay RNG stream is untouched
fn burst(state: &mut GameState, origin: Vec2, tag: ParticleTag, salt: u32) {
    let room = MAX_PARTICLES.saturating_sub(state.particles.len());
    for j in 0..BURST_PARTICLES.min(room) as u32 {
        let hash = (state.ticks as u32)
            .wrapping_mul(2654435761)
            .wrapping_add(j * 7919)
            .wrapping_add(salt.wrapping_mul(31337));
        let rand1 = (hash % 1000) as f32 / 1000.0;
        let rand2 = ((hash >> 10) % 1000) as f32 / 1000.0;
        let rand3 = ((hash >> 20) % 1000) as f32 / 1000.0;

        let angle = rand1 * std::f32::consts::TAU;
        let speed = 60.0 + rand2 * 120.0;
        let life = 0.3 + rand3 * 0.4;
        state.particles.push(super::state::Particle {
            pos: origin,
            vel: Vec2::from_angle(angle) * speed,
            life,
            max_life: life,
            size: 2.0 + rand2 * 2.0,
            tag,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::REFERENCE_FRAME_DT;
    use crate::sim::spawner::{SpawnSchedule, spawn_collectible, spawn_obstacle};
    use crate::sim::state::GamePhase;
    use crate::tuning::ObstacleRule;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    struct Rig {
        config: EngineConfig,
        state: GameState,
        spawner: Spawner,
        rng: Pcg32,
    }

    impl Rig {
        /// Playing rig with the spawn timers pushed out of reach, so only
        /// hand-placed entities take part
        fn new(mut config: EngineConfig) -> Self {
            config.obstacle_schedule = SpawnSchedule {
                base_interval: 1.0e6,
                min_interval: 1.0e6,
                decay_rate: 1.0,
            };
            config.collectible_schedule = config.obstacle_schedule;
            let mut state = GameState::new(&config);
            state.phase = GamePhase::Playing;
            Self {
                spawner: Spawner::new(&config),
                rng: Pcg32::seed_from_u64(config.seed),
                state,
                config,
            }
        }

        fn step(&mut self) {
            tick(
                &mut self.state,
                &self.config,
                &mut self.spawner,
                &mut self.rng,
                REFERENCE_FRAME_DT,
            );
        }

        /// Obstacle centred on the player's feet in the player's lane
        fn obstacle_on_player(&mut self, kind: ObstacleKind) -> u32 {
            let lane = self.state.player.lane;
            let y = self.config.feet_y() - self.config.player.tall / 2.0;
            spawn_obstacle(&mut self.state, &self.config, kind, lane, y)
        }

        fn collectible_on_player(&mut self, kind: CollectibleKind) -> u32 {
            let lane = self.state.player.lane;
            let y = self.config.feet_y() - self.config.player.tall / 2.0;
            spawn_collectible(&mut self.state, &self.config, kind, lane, y)
        }
    }

    #[test]
    fn test_no_tick_unless_playing() {
        let mut rig = Rig::new(EngineConfig::default());
        rig.state.phase = GamePhase::Idle;
        rig.step();
        assert_eq!(rig.state.ticks, 0);

        rig.state.phase = GamePhase::Playing;
        rig.state.paused = true;
        rig.step();
        assert_eq!(rig.state.ticks, 0);
        assert_eq!(rig.state.distance, 0.0);
    }

    #[test]
    fn test_distance_and_passive_score() {
        let mut rig = Rig::new(EngineConfig::default());
        rig.step();
        assert!((rig.state.distance - 5.0).abs() < 1e-4);
        assert_eq!(rig.state.score, 1);
        // 1.25 per tick: the carry pays out
        for _ in 0..3 {
            rig.step();
        }
        assert_eq!(rig.state.score, 5);
    }

    #[test]
    fn test_jump_arc_lands() {
        let mut rig = Rig::new(EngineConfig::default());
        rig.state.player.jumping = true;
        rig.state.player.vy = rig.config.player.jump_velocity;
        rig.step();
        assert!(rig.state.player.height > 0.0);
        let mut peak: f32 = 0.0;
        for _ in 0..100 {
            rig.step();
            peak = peak.max(rig.state.player.height);
        }
        assert!(peak > 50.0);
        assert!(!rig.state.player.jumping);
        assert_eq!(rig.state.player.height, 0.0);
    }

    #[test]
    fn test_jump_over_barrier_scores_bonus() {
        let mut rig = Rig::new(EngineConfig::default());
        let id = rig.obstacle_on_player(ObstacleKind::Barrier);
        rig.state.player.jumping = true;
        rig.state.player.vy = rig.config.player.jump_velocity;
        rig.step();
        assert!(rig.state.obstacles.iter().all(|o| o.id != id));
        assert!(rig.state.events.iter().any(|e| matches!(
            e,
            GameEvent::Evaded { id: evaded, .. } if *evaded == id
        )));
        assert_eq!(rig.state.combo, 1);
        assert_eq!(rig.state.player.health.value(), 3.0);
        assert!(rig.state.score >= 10);
        assert!(!rig.state.particles.is_empty());
    }

    #[test]
    fn test_barrier_hit_costs_health_and_grants_grace() {
        let mut rig = Rig::new(EngineConfig::default());
        rig.obstacle_on_player(ObstacleKind::Barrier);
        rig.obstacle_on_player(ObstacleKind::Hazard);
        rig.step();
        // Second overlap in the same tick lands inside the grace window
        assert_eq!(rig.state.player.health.value(), 2.0);
        assert!(rig.state.player.is_invulnerable());
        assert_eq!(rig.state.phase, GamePhase::Playing);
        assert_eq!(rig.state.obstacles.len(), 1);
    }

    #[test]
    fn test_one_hit_kill_policy() {
        let mut rig = Rig::new(EngineConfig::one_hit());
        rig.obstacle_on_player(ObstacleKind::Barrier);
        rig.step();
        assert_eq!(rig.state.phase, GamePhase::GameOver);
        assert_eq!(rig.state.game_over_reason, Some(GameOverReason::Lethal));
    }

    #[test]
    fn test_health_runs_out() {
        let mut rig = Rig::new(EngineConfig::default());
        rig.state.player.health.drain(2.0);
        rig.obstacle_on_player(ObstacleKind::Barrier);
        rig.step();
        assert_eq!(rig.state.phase, GamePhase::GameOver);
        assert_eq!(rig.state.game_over_reason, Some(GameOverReason::Depleted));
        assert_eq!(rig.state.player.health.value(), 0.0);
    }

    #[test]
    fn test_boost_smashes_breakable() {
        let mut rig = Rig::new(EngineConfig::default());
        rig.state.player.boost_timer = 1.0;
        rig.obstacle_on_player(ObstacleKind::Breakable);
        rig.step();
        assert!(rig.state.obstacles.is_empty());
        assert!(rig.state.score >= 25);
        // Boost also scrolls faster
        assert!(rig.state.distance > 5.0);
    }

    #[test]
    fn test_shield_pickup_then_wall() {
        let mut rig = Rig::new(EngineConfig::default());
        rig.collectible_on_player(CollectibleKind::Shield);
        rig.step();
        assert!(rig.state.player.is_shielded());
        rig.obstacle_on_player(ObstacleKind::Wall);
        rig.step();
        assert_eq!(rig.state.phase, GamePhase::Playing);
        assert!(rig.state.obstacles.is_empty());
    }

    #[test]
    fn test_coin_multiplier() {
        let mut rig = Rig::new(EngineConfig::default());
        rig.state.combo = 5;
        rig.state.combo_timer = 2.0;
        rig.state.multiplier = 1.5;
        rig.collectible_on_player(CollectibleKind::Coin);
        let before = rig.state.score;
        rig.step();
        assert_eq!(rig.state.coins, 1);
        assert_eq!(rig.state.combo, 6);
        // 10 * 1.5 plus one passive point
        assert_eq!(rig.state.score - before, 16);
    }

    #[test]
    fn test_combo_lapses() {
        let mut rig = Rig::new(EngineConfig::default());
        rig.collectible_on_player(CollectibleKind::Coin);
        rig.step();
        assert_eq!(rig.state.combo, 1);
        let ticks = (rig.config.scoring.combo_timeout / REFERENCE_FRAME_DT).ceil() as usize + 1;
        let mut broke = false;
        for _ in 0..ticks {
            rig.step();
            broke |= rig
                .state
                .events
                .iter()
                .any(|e| matches!(e, GameEvent::ComboBroken { combo: 1 }));
        }
        assert!(broke);
        assert_eq!(rig.state.combo, 0);
        assert_eq!(rig.state.best_combo, 1);
        assert_eq!(rig.state.multiplier, 1.0);
    }

    #[test]
    fn test_entities_leave_through_bottom() {
        let mut rig = Rig::new(EngineConfig::default());
        let y = rig.config.world_height - 1.0;
        spawn_collectible(&mut rig.state, &rig.config, CollectibleKind::Coin, 0, y + 12.0);
        rig.step();
        assert!(rig.state.collectibles.is_empty());
        assert!(rig.state.events.is_empty());
        assert_eq!(rig.state.coins, 0);
    }

    #[test]
    fn test_fresh_spawns_skip_collision() {
        // Single lane, player's feet at the top edge: walls spawn on top of them
        let config = EngineConfig {
            lane_count: 1,
            player_offset: 630.0,
            obstacles: ObstacleKind::ALL
                .iter()
                .map(|&kind| ObstacleRule {
                    weight: if kind == ObstacleKind::Wall { 1.0 } else { 0.0 },
                    ..ObstacleRule::default_for(kind)
                })
                .collect(),
            ..EngineConfig::default()
        };
        let mut rig = Rig::new(config);
        rig.config.obstacle_schedule = SpawnSchedule {
            base_interval: 0.01,
            min_interval: 0.01,
            decay_rate: 1.0,
        };

        rig.step();
        assert_eq!(rig.state.obstacles.len(), 1);
        assert_eq!(rig.state.obstacles[0].kind, ObstacleKind::Wall);
        assert_eq!(rig.state.phase, GamePhase::Playing);

        rig.step();
        assert_eq!(rig.state.phase, GamePhase::GameOver);
        assert_eq!(rig.state.game_over_reason, Some(GameOverReason::Lethal));
    }

    #[test]
    fn test_overtaken_by_hazard() {
        let mut rig = Rig::new(EngineConfig::escape());
        rig.state.hazard_gap = Some(0.01);
        rig.step();
        assert_eq!(rig.state.phase, GamePhase::GameOver);
        assert_eq!(rig.state.game_over_reason, Some(GameOverReason::Overtaken));
    }

    #[test]
    fn test_hits_feed_the_hazard() {
        let mut rig = Rig::new(EngineConfig::escape());
        let start = rig.state.hazard_gap.unwrap();
        rig.obstacle_on_player(ObstacleKind::Barrier);
        rig.step();
        let gap = rig.state.hazard_gap.unwrap();
        assert!(gap < start - 49.0);
    }

    #[test]
    fn test_boost_recovers_gap_twice_as_fast() {
        let escape = EngineConfig::escape().escape.unwrap();
        let drift = |boosting: bool| {
            let mut rig = Rig::new(EngineConfig::escape());
            rig.state.hazard_gap = Some(100.0);
            if boosting {
                rig.state.player.boost_timer = 10.0;
            }
            for _ in 0..50 {
                rig.step();
            }
            rig.state.hazard_gap.unwrap() - 100.0
        };
        let secs = 50.0 * REFERENCE_FRAME_DT;
        let walking = drift(false);
        let boosting = drift(true);
        assert!((walking - (escape.recovery_rate - escape.creep_rate) * secs).abs() < 1e-2);
        assert!((boosting - (2.0 * escape.recovery_rate - escape.creep_rate) * secs).abs() < 1e-2);
        assert!(boosting - walking > 0.0);
    }

    #[test]
    fn test_gap_capped_at_max() {
        let mut rig = Rig::new(EngineConfig::escape());
        let max_gap = rig.config.escape.unwrap().max_gap;
        rig.state.hazard_gap = Some(max_gap - 0.01);
        rig.state.player.boost_timer = 10.0;
        for _ in 0..20 {
            rig.step();
            assert!(rig.state.hazard_gap.unwrap() <= max_gap);
        }
        assert_eq!(rig.state.hazard_gap, Some(max_gap));
    }

    #[test]
    fn test_energy_regenerates_unless_boosting() {
        let mut rig = Rig::new(EngineConfig::default());
        rig.state.player.energy.drain(50.0);
        for _ in 0..50 {
            rig.step();
        }
        let expected = 50.0 + rig.config.player.energy_regen * 50.0 * REFERENCE_FRAME_DT;
        assert!((rig.state.player.energy.value() - expected).abs() < 1e-2);

        let mut rig = Rig::new(EngineConfig::default());
        rig.state.player.energy.drain(50.0);
        rig.state.player.boost_timer = 10.0;
        for _ in 0..50 {
            rig.step();
        }
        assert_eq!(rig.state.player.energy.value(), 50.0);
    }

    #[test]
    fn test_energy_pickup() {
        let mut rig = Rig::new(EngineConfig::default());
        rig.state.player.energy.drain(80.0);
        rig.collectible_on_player(CollectibleKind::Energy);
        rig.step();
        let regen = rig.config.player.energy_regen * REFERENCE_FRAME_DT;
        assert!((rig.state.player.energy.value() - (20.0 + regen + 30.0)).abs() < 1e-2);

        // Tops out at the maximum
        rig.state.player.energy.add(100.0);
        rig.state.player.energy.drain(5.0);
        rig.collectible_on_player(CollectibleKind::Energy);
        rig.step();
        let energy = &rig.state.player.energy;
        assert_eq!(energy.value(), energy.max());
    }

    #[test]
    fn test_key_pickup() {
        let mut rig = Rig::new(EngineConfig::default());
        let id = rig.collectible_on_player(CollectibleKind::Key);
        rig.step();
        assert_eq!(rig.state.keys, 1);
        assert_eq!(rig.state.coins, 0);
        assert!(rig.state.events.iter().any(|e| matches!(
            e,
            GameEvent::Collected { id: picked, kind: CollectibleKind::Key, .. } if *picked == id
        )));
    }

    #[test]
    fn test_particles_fade() {
        let mut rig = Rig::new(EngineConfig::default());
        rig.collectible_on_player(CollectibleKind::Gem);
        rig.step();
        assert_eq!(rig.state.particles.len(), BURST_PARTICLES);
        for _ in 0..60 {
            rig.step();
        }
        assert!(rig.state.particles.is_empty());
    }

    #[test]
    fn test_huge_dt_is_clamped() {
        let mut rig = Rig::new(EngineConfig::default());
        tick(&mut rig.state, &rig.config, &mut rig.spawner, &mut rig.rng, 5.0);
        let max_travel = rig.config.speed.base_speed * frames(crate::consts::MAX_FRAME_DT);
        assert!(rig.state.distance <= max_travel + 1e-3);
    }
}
