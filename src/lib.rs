//! Lane Rush - a generic lane-runner arcade simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, spawning, collisions, game state)
//! - `tuning`: Data-driven game balance and entity rule tables
//! - `platform`: Host frame pump (delta clamping, frame rate)
//! - `highscores`: Single best-score record kept by the host
//! - `web`: wasm-bindgen surface for a JS render adapter (wasm32 only)

pub mod highscores;
pub mod platform;
pub mod sim;
pub mod tuning;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use highscores::BestScore;
pub use sim::{AbilityId, Command, GamePhase, GameState, SimulationEngine};
pub use tuning::{ConfigError, EngineConfig, FailurePolicy};

/// Game configuration constants
pub mod consts {
    /// Reference frame length (seconds). Speeds are expressed in world units per
    /// reference frame, matching the 60 Hz canvas games they were tuned for.
    pub const REFERENCE_FRAME_DT: f32 = 0.016;
    /// Largest delta a single update will integrate (seconds)
    pub const MAX_FRAME_DT: f32 = 0.05;

    /// Maximum live particles
    pub const MAX_PARTICLES: usize = 256;
    /// Particles emitted per pickup / evasion
    pub const BURST_PARTICLES: usize = 8;

    /// Default world dimensions (canvas pixels)
    pub const WORLD_WIDTH: f32 = 360.0;
    pub const WORLD_HEIGHT: f32 = 640.0;
    pub const LANE_COUNT: usize = 3;
}

/// Canonical x coordinate of a lane's centre
#[inline]
pub fn lane_center_x(lane: usize, lane_count: usize, world_width: f32) -> f32 {
    let lane_width = world_width / lane_count.max(1) as f32;
    lane_width * (lane as f32 + 0.5)
}

/// Convert a frame delta (seconds) into reference frames
#[inline]
pub fn frames(dt: f32) -> f32 {
    dt / consts::REFERENCE_FRAME_DT
}

/// Sanitize a host-supplied delta: negative or NaN become zero, large stalls are clamped
#[inline]
pub fn clamp_dt(dt: f32) -> f32 {
    if dt.is_finite() && dt > 0.0 {
        dt.min(consts::MAX_FRAME_DT)
    } else {
        0.0
    }
}
