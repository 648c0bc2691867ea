//! Simulation engine
//!
//! Owns the `GameState` exclusively. Hosts drive it with `update(dt)` once per
//! display frame and forward input through the command methods. Commands are
//! always safe to call: a failed precondition is a silent no-op.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::command::Command;
use super::spawner::{Spawner, spawn_collectible, spawn_obstacle};
use super::state::{AbilityId, CollectibleKind, GamePhase, GameState, ObstacleKind};
use super::tick::tick;
use crate::tuning::{ConfigError, EngineConfig};

/// State-change subscriber; receives a read-only view once per tick
pub type StateListener = Box<dyn FnMut(&GameState)>;

pub struct SimulationEngine {
    config: EngineConfig,
    state: GameState,
    spawner: Spawner,
    rng: Pcg32,
    seed: u64,
    listener: Option<StateListener>,
}

impl SimulationEngine {
    /// Create an idle engine; call `start()` to begin a run. The config is
    /// validated here so `update` never has to.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    pub fn with_defaults() -> Self {
        Self::build(EngineConfig::default())
    }

    fn build(config: EngineConfig) -> Self {
        let seed = config.seed;
        Self {
            state: GameState::new(&config),
            spawner: Spawner::new(&config),
            rng: Pcg32::seed_from_u64(seed),
            seed,
            listener: None,
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Seed used by the current (or next) run
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Read-only view of the current state
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Owned copy of the current state
    pub fn snapshot(&self) -> GameState {
        self.state.clone()
    }

    /// Register the single state-change subscriber (replaces any previous one)
    pub fn on_state_change<F>(&mut self, listener: F)
    where
        F: FnMut(&GameState) + 'static,
    {
        self.listener = Some(Box::new(listener));
    }

    pub fn clear_listener(&mut self) {
        self.listener = None;
    }

    /// Rebuild the state and begin a run. Restarts cleanly from any phase.
    pub fn start(&mut self) {
        self.start_with_seed(self.seed);
    }

    pub fn start_with_seed(&mut self, seed: u64) {
        self.seed = seed;
        self.rng = Pcg32::seed_from_u64(seed);
        self.spawner.reset();
        self.state = GameState::new(&self.config);
        self.state.phase = GamePhase::Playing;
        log::info!("Run started (seed {seed:#x})");
        self.notify();
    }

    /// Advance the simulation by `dt` seconds. No-op unless playing and unpaused.
    pub fn update(&mut self, dt: f32) {
        if !self.accepts_input() {
            return;
        }
        tick(
            &mut self.state,
            &self.config,
            &mut self.spawner,
            &mut self.rng,
            dt,
        );
        self.notify();
    }

    /// Commands are only honoured during unpaused play
    fn accepts_input(&self) -> bool {
        self.state.is_playing() && !self.state.paused
    }

    pub fn move_left(&mut self) {
        if self.accepts_input() && self.state.player.lane > 0 {
            self.state.player.lane -= 1;
        }
    }

    pub fn move_right(&mut self) {
        if self.accepts_input() && self.state.player.lane + 1 < self.config.lane_count {
            self.state.player.lane += 1;
        }
    }

    pub fn jump(&mut self) {
        if !self.accepts_input() {
            return;
        }
        let player = &mut self.state.player;
        if player.grounded() && !player.is_sliding() {
            player.jumping = true;
            player.vy = self.config.player.jump_velocity;
        }
    }

    pub fn slide(&mut self) {
        if !self.accepts_input() {
            return;
        }
        let player = &mut self.state.player;
        if player.grounded() && !player.is_sliding() {
            player.slide_timer = self.config.player.slide_duration;
        }
    }

    pub fn duck(&mut self) {
        self.slide();
    }

    pub fn activate_ability(&mut self, ability: AbilityId) {
        if !self.accepts_input() {
            return;
        }
        let spec = *self.config.abilities.spec(ability);
        let player = &mut self.state.player;
        if player.is_active(ability) || player.cooldown(ability) > 0.0 {
            return;
        }
        if !player.energy.spend(spec.cost) {
            return;
        }
        match ability {
            AbilityId::Boost => {
                player.boost_timer = spec.duration;
                player.boost_cooldown = spec.cooldown;
            }
            AbilityId::Shield => {
                player.shield_timer = spec.duration;
                player.shield_cooldown = spec.cooldown;
            }
        }
        log::debug!("Activated {ability:?}");
    }

    /// Freeze or resume the run without touching its state
    pub fn set_paused(&mut self, paused: bool) {
        if self.state.is_playing() && self.state.paused != paused {
            self.state.paused = paused;
            log::info!("{}", if paused { "Paused" } else { "Resumed" });
        }
    }

    pub fn toggle_pause(&mut self) {
        self.set_paused(!self.state.paused);
    }

    pub fn apply(&mut self, command: Command) {
        match command {
            Command::MoveLeft => self.move_left(),
            Command::MoveRight => self.move_right(),
            Command::Jump => self.jump(),
            Command::Slide => self.slide(),
            Command::Ability(ability) => self.activate_ability(ability),
            Command::TogglePause => self.toggle_pause(),
        }
    }

    /// Place an obstacle by hand (tutorials, scripted sections). It takes part
    /// in collisions from the next update on.
    pub fn place_obstacle(&mut self, kind: ObstacleKind, lane: usize, y: f32) -> Option<u32> {
        if !self.state.is_playing() {
            return None;
        }
        Some(spawn_obstacle(&mut self.state, &self.config, kind, lane, y))
    }

    pub fn place_collectible(&mut self, kind: CollectibleKind, lane: usize, y: f32) -> Option<u32> {
        if !self.state.is_playing() {
            return None;
        }
        Some(spawn_collectible(&mut self.state, &self.config, kind, lane, y))
    }

    fn notify(&mut self) {
        if let Some(listener) = self.listener.as_mut() {
            listener(&self.state);
        }
    }
}

impl Default for SimulationEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}
