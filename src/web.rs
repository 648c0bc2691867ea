//! Browser bindings
//!
//! A thin `wasm-bindgen` surface over `SimulationEngine`. The JS side owns the
//! canvas and the `requestAnimationFrame` loop: it forwards timestamps and key
//! events here and receives each new state as a JSON string.

use wasm_bindgen::prelude::*;

use crate::platform::FramePump;
use crate::sim::{AbilityId, Command, GamePhase, SimulationEngine};
use crate::{BestScore, EngineConfig};

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Lane Rush starting...");
}

#[wasm_bindgen]
pub struct WebEngine {
    engine: SimulationEngine,
    pump: FramePump,
    best: BestScore,
    /// Set once the current run's score has been offered to `best`
    recorded: bool,
}

#[wasm_bindgen]
impl WebEngine {
    /// Build an engine from an optional JSON config; missing fields take defaults
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<WebEngine, JsError> {
        let config = match config_json {
            Some(json) => EngineConfig::from_json(&json)?,
            None => EngineConfig::default(),
        };
        Ok(Self {
            engine: SimulationEngine::new(config)?,
            pump: FramePump::new(),
            best: BestScore::load(),
            recorded: false,
        })
    }

    /// Begin a run. Without a seed the configured one is reused. The seed is
    /// a `BigInt` on the JS side.
    pub fn start(&mut self, seed: Option<u64>) {
        match seed {
            Some(seed) => self.engine.start_with_seed(seed),
            None => self.engine.start(),
        }
        self.pump.resume();
        self.recorded = false;
    }

    /// Advance by the time since the previous frame (`requestAnimationFrame` ms)
    pub fn frame(&mut self, time_ms: f64) {
        let dt = self.pump.frame(time_ms / 1000.0);
        self.engine.update(dt);
        self.record_if_over();
    }

    /// Advance by an explicit delta in seconds
    pub fn update(&mut self, dt: f32) {
        self.engine.update(dt);
        self.record_if_over();
    }

    /// Apply a DOM key value. Returns false for unmapped keys.
    pub fn key(&mut self, key: &str) -> bool {
        match Command::from_key(key) {
            Some(command) => {
                self.apply(command);
                true
            }
            None => false,
        }
    }

    #[wasm_bindgen(js_name = moveLeft)]
    pub fn move_left(&mut self) {
        self.engine.move_left();
    }

    #[wasm_bindgen(js_name = moveRight)]
    pub fn move_right(&mut self) {
        self.engine.move_right();
    }

    pub fn jump(&mut self) {
        self.engine.jump();
    }

    pub fn slide(&mut self) {
        self.engine.slide();
    }

    pub fn boost(&mut self) {
        self.engine.activate_ability(AbilityId::Boost);
    }

    pub fn shield(&mut self) {
        self.engine.activate_ability(AbilityId::Shield);
    }

    #[wasm_bindgen(js_name = setPaused)]
    pub fn set_paused(&mut self, paused: bool) {
        self.engine.set_paused(paused);
        if !paused {
            self.pump.resume();
        }
    }

    /// Register the render callback; it receives the state as a JSON string
    #[wasm_bindgen(js_name = onStateChange)]
    pub fn on_state_change(&mut self, callback: js_sys::Function) {
        self.engine.on_state_change(move |state| match serde_json::to_string(state) {
            Ok(json) => {
                if let Err(e) = callback.call1(&JsValue::NULL, &JsValue::from_str(&json)) {
                    log::warn!("State listener threw: {e:?}");
                }
            }
            Err(e) => log::error!("Failed to serialize state: {e}"),
        });
    }

    #[wasm_bindgen(js_name = clearListener)]
    pub fn clear_listener(&mut self) {
        self.engine.clear_listener();
    }

    #[wasm_bindgen(js_name = stateJson)]
    pub fn state_json(&self) -> Result<String, JsError> {
        Ok(serde_json::to_string(self.engine.state())?)
    }

    pub fn phase(&self) -> String {
        format!("{:?}", self.engine.state().phase)
    }

    pub fn score(&self) -> f64 {
        self.engine.state().score as f64
    }

    #[wasm_bindgen(js_name = bestScore)]
    pub fn best_score(&self) -> f64 {
        self.best.best() as f64
    }

    pub fn fps(&self) -> u32 {
        self.pump.fps()
    }
}

impl WebEngine {
    fn apply(&mut self, command: Command) {
        self.engine.apply(command);
        if command == Command::TogglePause && !self.engine.state().paused {
            self.pump.resume();
        }
    }

    fn record_if_over(&mut self) {
        let state = self.engine.state();
        if state.phase == GamePhase::GameOver && !self.recorded {
            self.recorded = true;
            if self.best.record(state.score) {
                self.best.save();
            }
        }
    }
}
