//! Best score record
//!
//! Persisted to LocalStorage on the web, kept in memory natively.

use serde::{Deserialize, Serialize};

/// Highest score reached across runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestScore {
    pub score: u64,
}

impl BestScore {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "lane_rush_best_score";

    pub fn new() -> Self {
        Self { score: 0 }
    }

    /// Keep `score` if it beats the record. Returns true on a new best.
    pub fn record(&mut self, score: u64) -> bool {
        if score > self.score {
            log::info!("New best score {score} (was {})", self.score);
            self.score = score;
            true
        } else {
            false
        }
    }

    pub fn best(&self) -> u64 {
        self.score
    }

    /// Load the best score from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage
            && let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY)
            && let Ok(best) = serde_json::from_str::<BestScore>(&json)
        {
            log::info!("Loaded best score {}", best.score);
            return best;
        }

        log::info!("No best score found, starting fresh");
        Self::new()
    }

    /// Save the best score to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage
            && let Ok(json) = serde_json::to_string(self)
        {
            if storage.set_item(Self::STORAGE_KEY, &json).is_err() {
                log::warn!("Failed to save best score");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
