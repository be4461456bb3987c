//! Game events
//!
//! Emitted by the simulation as things happen and drained by the session
//! once per frame (logging, sound hooks, UI flashes).

use serde::{Deserialize, Serialize};

use super::state::ObstacleKind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A new run began (start -> playing)
    Started,
    /// Player left the ground
    Jumped,
    /// Player touched down after a jump
    Landed,
    ObstacleSpawned { id: u32, kind: ObstacleKind },
    /// Obstacle scrolled off the left edge and paid out
    ObstacleCleared { id: u32, score: u64 },
    /// Score milestone reached
    DifficultyIncreased { game_speed: f32, spawn_interval: u32 },
    /// Player hit an obstacle (playing -> game over)
    Crashed { score: u64 },
    /// A crash beat the stored record
    NewHighScore { score: u64, previous: u64 },
    /// Game over acknowledged (game over -> start)
    ReturnedToStart,
    Resized { width: f32, height: f32 },
}
