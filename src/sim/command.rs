//! Input commands
//!
//! Hosts translate raw device events into `Command`s; the engine applies them
//! immediately and they take effect on the next update.

use serde::{Deserialize, Serialize};

use super::state::AbilityId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    MoveLeft,
    MoveRight,
    Jump,
    Slide,
    Ability(AbilityId),
    TogglePause,
}

impl Command {
    /// Map a DOM `KeyboardEvent.key` / `code` value to a command
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "a" | "A" | "KeyA" => Some(Command::MoveLeft),
            "ArrowRight" | "d" | "D" | "KeyD" => Some(Command::MoveRight),
            "ArrowUp" | "w" | "W" | "KeyW" | " " | "Space" => Some(Command::Jump),
            "ArrowDown" | "s" | "S" | "KeyS" => Some(Command::Slide),
            "Shift" | "ShiftLeft" | "e" | "E" | "KeyE" => Some(Command::Ability(AbilityId::Boost)),
            "q" | "Q" | "KeyQ" => Some(Command::Ability(AbilityId::Shield)),
            "p" | "P" | "KeyP" | "Escape" => Some(Command::TogglePause),
            _ => None,
        }
    }
}
