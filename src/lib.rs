//! Endless Runner - jump over obstacles for as long as you can
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, particles)
//! - `render`: Declarative draw commands and scene translation
//! - `clock`, `input`, `session`: Frame pacing and between-frame input delivery
//! - `persistence`: Key-value storage for the high score
//! - `config`: Data-driven tuning and visual settings
//! - `platform`: Browser glue (LocalStorage, Canvas 2D)

pub mod clock;
pub mod config;
pub mod input;
pub mod persistence;
pub mod platform;
pub mod render;
pub mod session;
pub mod sim;

pub use config::{RunnerConfig, Tuning, VisualSettings};
pub use session::{Hud, Session};
pub use sim::{Lifecycle, RunnerSimulation, RunnerState};

/// Game configuration constants
///
/// Every per-tick quantity below is tuned for a 60 Hz step.
pub mod consts {
    /// Fixed simulation timestep (60 Hz, matches a typical display refresh)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;
    /// Longest frame delta the clock will accept (tab switches, debugger pauses)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Play field sizing
    pub const MAX_FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 500.0;
    pub const VIEWPORT_MARGIN: f32 = 40.0;
    /// Distance from the ground line to the bottom of the field
    pub const GROUND_DEPTH: f32 = 100.0;
    pub const MIN_FIELD_WIDTH: f32 = 200.0;
    pub const MIN_FIELD_HEIGHT: f32 = 200.0;

    /// Player defaults
    pub const PLAYER_X: f32 = 100.0;
    pub const PLAYER_SIZE: f32 = 40.0;
    /// Downward acceleration per tick (pixels/tick²)
    pub const GRAVITY: f32 = 0.6;
    /// Vertical velocity applied on jump (negative is up)
    pub const JUMP_STRENGTH: f32 = -16.0;
    /// Rotation added per airborne tick (radians, visual only)
    pub const AIR_SPIN: f32 = 0.1;

    /// Scrolling and difficulty ramp
    pub const INITIAL_GAME_SPEED: f32 = 5.0;
    pub const SPEED_STEP: f32 = 0.5;
    pub const INITIAL_SPAWN_INTERVAL: u32 = 100;
    pub const SPAWN_INTERVAL_STEP: u32 = 5;
    pub const MIN_SPAWN_INTERVAL: u32 = 60;
    pub const SCORE_PER_OBSTACLE: u64 = 10;
    /// Difficulty increases each time the score hits a multiple of this
    pub const SCORE_MILESTONE: u64 = 100;

    /// Particles
    pub const PARTICLE_GRAVITY: f32 = 0.3;
    pub const MAX_PARTICLES: usize = 256;
    pub const JUMP_DUST_COUNT: usize = 8;
    pub const JUMP_DUST_LIFE: u32 = 30;
    pub const CRASH_BURST_COUNT: usize = 30;
    pub const CRASH_BURST_LIFE: u32 = 60;
}
