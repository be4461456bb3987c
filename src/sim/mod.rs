//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Injected, seedable RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod events;
pub mod particles;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Aabb, aabb_overlap};
pub use events::GameEvent;
pub use state::{
    Lifecycle, Obstacle, ObstacleKind, Particle, ParticleColor, PlayField, Player, RunnerState,
};
pub use tick::RunnerSimulation;
