//! Platform abstraction layer
//!
//! The engine never reads a clock. Hosts feed timestamps from
//! `requestAnimationFrame` (web) or `Instant` (native) into a `FramePump`,
//! which turns them into clamped deltas for `SimulationEngine::update`.

use crate::clamp_dt;
use crate::consts::REFERENCE_FRAME_DT;

/// Frames averaged for the FPS readout
const FPS_WINDOW: usize = 60;

/// Host-side frame pacing: delta clamping and FPS tracking
#[derive(Debug, Clone)]
pub struct FramePump {
    last_time: Option<f64>,
    frame_times: [f64; FPS_WINDOW],
    frame_index: usize,
    frames_seen: usize,
    fps: u32,
}

impl Default for FramePump {
    fn default() -> Self {
        Self::new()
    }
}

impl FramePump {
    pub fn new() -> Self {
        Self {
            last_time: None,
            frame_times: [0.0; FPS_WINDOW],
            frame_index: 0,
            frames_seen: 0,
            fps: 0,
        }
    }

    /// Record a frame at `now` (seconds) and return the delta to simulate.
    /// The first frame after construction or `resume` yields one reference frame.
    pub fn frame(&mut self, now: f64) -> f32 {
        let dt = match self.last_time {
            Some(last) => (now - last) as f32,
            None => REFERENCE_FRAME_DT,
        };
        self.last_time = Some(now);

        // Track frame times for FPS
        self.frame_times[self.frame_index] = now;
        self.frame_index = (self.frame_index + 1) % FPS_WINDOW;
        self.frames_seen = (self.frames_seen + 1).min(FPS_WINDOW);

        // Oldest recorded frame sits at the next write slot once the ring is full
        let oldest = if self.frames_seen == FPS_WINDOW {
            self.frame_times[self.frame_index]
        } else {
            self.frame_times[0]
        };
        let elapsed = now - oldest;
        if self.frames_seen > 1 && elapsed > 0.0 {
            self.fps = ((self.frames_seen - 1) as f64 / elapsed).round() as u32;
        }

        clamp_dt(dt)
    }

    /// Forget the last timestamp (after a pause or hidden tab) so the next
    /// frame does not integrate the whole gap
    pub fn resume(&mut self) {
        self.last_time = None;
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }
}
