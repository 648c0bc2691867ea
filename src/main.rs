//! Lane Rush entry point
//!
//! The browser build is driven from JS through `lane_rush::web`. Natively this
//! binary runs a headless autopilot through the engine at a fixed 60 Hz and
//! reports the result.
//!
//! Usage: `lane-rush [config.json] [seconds]`

#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use lane_rush::sim::{Command, GameState, Obstacle};
    use lane_rush::tuning::{Evasion, HitOutcome};
    use lane_rush::{AbilityId, EngineConfig};

    /// Reference frames of warning before an obstacle reaches the player
    const JUMP_LEAD: f32 = 6.0;
    const SLIDE_LEAD: f32 = 4.0;
    const DODGE_LEAD: f32 = 30.0;

    /// Gap between an obstacle's near edge and the top of the player box
    fn gap(obstacle: &Obstacle, state: &GameState, config: &EngineConfig) -> f32 {
        let player_top = config.feet_y() - state.player.tall;
        player_top - (obstacle.pos.y + obstacle.size.y / 2.0)
    }

    /// Whether `lane` has an unavoidable hazard coming within `reach` units
    fn lane_blocked(lane: usize, reach: f32, state: &GameState, config: &EngineConfig) -> bool {
        state.obstacles.iter().any(|o| {
            let g = gap(o, state, config);
            o.lane == lane
                && g > -o.size.y
                && g < reach
                && config.obstacle_rule(o.kind).evaded_by.is_none()
        })
    }

    /// Step one lane towards `target`
    fn steer(from: usize, target: usize) -> Option<Command> {
        match target.cmp(&from) {
            std::cmp::Ordering::Less => Some(Command::MoveLeft),
            std::cmp::Ordering::Greater => Some(Command::MoveRight),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Pick at most one command for this frame
    pub fn decide(state: &GameState, config: &EngineConfig) -> Option<Command> {
        let player = &state.player;
        let speed = state.speed.max(1.0);

        // Nearest threat in our lane
        let threat = state
            .obstacles
            .iter()
            .filter(|o| o.lane == player.lane)
            .map(|o| (o, gap(o, state, config)))
            .filter(|(o, g)| *g > -o.size.y && *g < speed * DODGE_LEAD)
            .min_by(|a, b| a.1.total_cmp(&b.1));

        if let Some((obstacle, g)) = threat {
            let rule = config.obstacle_rule(obstacle.kind);
            match rule.evaded_by {
                Some(Evasion::Jump) if g < speed * JUMP_LEAD => return Some(Command::Jump),
                Some(Evasion::Slide) if g < speed * SLIDE_LEAD => return Some(Command::Slide),
                Some(Evasion::Boost)
                    if !player.is_boosting()
                        && player.cooldown(AbilityId::Boost) <= 0.0
                        && player.energy.value() >= config.abilities.boost.cost =>
                {
                    return Some(Command::Ability(AbilityId::Boost));
                }
                Some(Evasion::Jump | Evasion::Slide) => return None,
                _ => {}
            }

            // Lethal walls are worth a shield when no lane is free
            let reach = speed * DODGE_LEAD;
            let free = (0..state.lane_count)
                .filter(|&lane| !lane_blocked(lane, reach, state, config))
                .min_by_key(|&lane| lane.abs_diff(player.lane));
            return match free {
                Some(lane) => steer(player.lane, lane),
                None if rule.outcome == HitOutcome::Lethal
                    && player.cooldown(AbilityId::Shield) <= 0.0
                    && player.energy.value() >= config.abilities.shield.cost =>
                {
                    Some(Command::Ability(AbilityId::Shield))
                }
                None => None,
            };
        }

        // Nothing to avoid: drift towards the closest pickup whose lane is clear
        let reach = speed * DODGE_LEAD;
        state
            .collectibles
            .iter()
            .filter(|c| !c.collected && c.pos.y < config.feet_y())
            .filter(|c| !lane_blocked(c.lane, reach, state, config))
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
            .and_then(|c| steer(player.lane, c.lane))
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn load_config(path: &str) -> Result<lane_rush::EngineConfig, Box<dyn std::error::Error>> {
    let json = std::fs::read_to_string(path)?;
    Ok(lane_rush::EngineConfig::from_json(&json)?)
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::cell::Cell;
    use std::rc::Rc;

    use lane_rush::platform::FramePump;
    use lane_rush::{BestScore, EngineConfig, GamePhase, SimulationEngine};

    env_logger::init();
    log::info!("Lane Rush (native, headless) starting...");

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => match load_config(&path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("Failed to load config {path}: {e}");
                std::process::exit(1);
            }
        },
        None => EngineConfig::default(),
    };
    let limit: f64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(180.0);

    let mut engine = match SimulationEngine::new(config) {
        Ok(engine) => engine,
        Err(e) => {
            log::error!("Invalid config: {e}");
            std::process::exit(1);
        }
    };
    let snapshots = Rc::new(Cell::new(0u64));
    let counter = Rc::clone(&snapshots);
    engine.on_state_change(move |_| counter.set(counter.get() + 1));

    let mut pump = FramePump::new();
    let mut best = BestScore::load();
    engine.start();

    // Fixed 60 Hz clock standing in for requestAnimationFrame
    let mut now = 0.0f64;
    while engine.state().phase == GamePhase::Playing && now < limit {
        if let Some(command) = autopilot::decide(engine.state(), engine.config()) {
            engine.apply(command);
        }
        let dt = pump.frame(now);
        engine.update(dt);
        now += 1.0 / 60.0;
    }

    let state = engine.state();
    log::info!(
        "Run finished after {:.1}s: phase {:?}, reason {:?}, {} snapshots",
        state.elapsed,
        state.phase,
        state.game_over_reason,
        snapshots.get()
    );
    println!(
        "score {} | distance {:.0} | coins {} | keys {} | best combo {} | health {:.0}/{:.0}",
        state.score,
        state.distance,
        state.coins,
        state.keys,
        state.best_combo,
        state.player.health.value(),
        state.player.health.max(),
    );
    if best.record(state.score) {
        best.save();
        println!("new best score!");
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is lane_rush::web::init, this is just to satisfy the compiler
}
