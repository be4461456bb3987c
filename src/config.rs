//! Game tuning and visual preferences
//!
//! Defaults reproduce the classic feel. A JSON document may override any
//! subset of fields; missing fields fall back to the defaults.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Physics and difficulty tuning (all values per 60 Hz tick)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub gravity: f32,
    /// Negative is up
    pub jump_strength: f32,
    pub air_spin: f32,
    pub initial_game_speed: f32,
    pub speed_step: f32,
    pub initial_spawn_interval: u32,
    pub spawn_interval_step: u32,
    pub min_spawn_interval: u32,
    pub score_per_obstacle: u64,
    pub milestone: u64,
    pub particle_gravity: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            jump_strength: JUMP_STRENGTH,
            air_spin: AIR_SPIN,
            initial_game_speed: INITIAL_GAME_SPEED,
            speed_step: SPEED_STEP,
            initial_spawn_interval: INITIAL_SPAWN_INTERVAL,
            spawn_interval_step: SPAWN_INTERVAL_STEP,
            min_spawn_interval: MIN_SPAWN_INTERVAL,
            score_per_obstacle: SCORE_PER_OBSTACLE,
            milestone: SCORE_MILESTONE,
            particle_gravity: PARTICLE_GRAVITY,
        }
    }
}

impl Tuning {
    /// Replace values that would break the simulation with their defaults
    pub fn validated(self) -> Self {
        let defaults = Self::default();
        let positive = |v: f32, d: f32| if v.is_finite() && v > 0.0 { v } else { d };
        let non_negative = |v: f32, d: f32| if v.is_finite() && v >= 0.0 { v } else { d };

        let min_spawn_interval = self.min_spawn_interval.max(1);
        Self {
            gravity: positive(self.gravity, defaults.gravity),
            jump_strength: if self.jump_strength.is_finite() && self.jump_strength < 0.0 {
                self.jump_strength
            } else {
                defaults.jump_strength
            },
            air_spin: non_negative(self.air_spin, defaults.air_spin),
            initial_game_speed: positive(self.initial_game_speed, defaults.initial_game_speed),
            speed_step: non_negative(self.speed_step, defaults.speed_step),
            initial_spawn_interval: self.initial_spawn_interval.max(min_spawn_interval),
            spawn_interval_step: self.spawn_interval_step,
            min_spawn_interval,
            score_per_obstacle: if self.score_per_obstacle == 0 {
                defaults.score_per_obstacle
            } else {
                self.score_per_obstacle
            },
            milestone: if self.milestone == 0 {
                defaults.milestone
            } else {
                self.milestone
            },
            particle_gravity: non_negative(self.particle_gravity, defaults.particle_gravity),
        }
    }
}

/// Rendering preferences (never affect gameplay)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualSettings {
    /// Scrolling starfield behind the play field
    pub stars: bool,
    /// Draw jump dust and crash bursts
    pub particles: bool,
    /// Freeze the starfield and ground grid animation
    pub reduced_motion: bool,
}

impl Default for VisualSettings {
    fn default() -> Self {
        Self {
            stars: true,
            particles: true,
            reduced_motion: false,
        }
    }
}

/// Complete runner configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Fixed RNG seed (time-based when absent)
    pub seed: Option<u64>,
    pub tuning: Tuning,
    pub visuals: VisualSettings,
}

impl RunnerConfig {
    /// Storage key / file stem for the config document
    pub const STORAGE_KEY: &'static str = "endlessRunnerConfig";

    /// Parse a JSON document and sanitize the tuning values
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config.validated())
    }

    pub fn validated(mut self) -> Self {
        self.tuning = self.tuning.validated();
        self
    }

    /// Load config from a JSON file, falling back to defaults (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(config) => {
                    log::info!("Loaded config from {}", path.display());
                    config
                }
                Err(err) => {
                    log::warn!("Ignoring malformed config {}: {}", path.display(), err);
                    Self::default()
                }
            },
            Err(err) => {
                log::warn!("Could not read config {}: {}", path.display(), err);
                Self::default()
            }
        }
    }

    /// Load config from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(config) => {
                        log::info!("Loaded config from LocalStorage");
                        return config;
                    }
                    Err(err) => log::warn!("Ignoring malformed config: {}", err),
                }
            }
        }

        log::info!("Using default config");
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let tuning = Tuning::default();
        assert_eq!(tuning.gravity, 0.6);
        assert_eq!(tuning.jump_strength, -16.0);
        assert_eq!(tuning.initial_game_speed, 5.0);
        assert_eq!(tuning.initial_spawn_interval, 100);
        assert_eq!(tuning.min_spawn_interval, 60);
        assert_eq!(tuning.score_per_obstacle, 10);
        assert_eq!(tuning.milestone, 100);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = RunnerConfig::from_json(r#"{ "seed": 7, "tuning": { "gravity": 0.8 } }"#)
            .unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.tuning.gravity, 0.8);
        assert_eq!(config.tuning.jump_strength, JUMP_STRENGTH);
        assert!(config.visuals.stars);
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(RunnerConfig::from_json("{ not json").is_err());
        assert!(RunnerConfig::from_json(r#"{ "tuning": { "gravity": "heavy" } }"#).is_err());
    }

    #[test]
    fn test_validation_repairs_nonsense() {
        let tuning = Tuning {
            gravity: -1.0,
            jump_strength: 5.0,
            initial_game_speed: f32::NAN,
            min_spawn_interval: 0,
            initial_spawn_interval: 0,
            score_per_obstacle: 0,
            milestone: 0,
            ..Default::default()
        }
        .validated();

        assert_eq!(tuning.gravity, GRAVITY);
        assert_eq!(tuning.jump_strength, JUMP_STRENGTH);
        assert_eq!(tuning.initial_game_speed, INITIAL_GAME_SPEED);
        assert_eq!(tuning.min_spawn_interval, 1);
        assert_eq!(tuning.initial_spawn_interval, 1);
        assert_eq!(tuning.score_per_obstacle, SCORE_PER_OBSTACLE);
        assert_eq!(tuning.milestone, SCORE_MILESTONE);
    }

    #[test]
    fn test_initial_interval_never_below_floor() {
        let tuning = Tuning {
            initial_spawn_interval: 30,
            min_spawn_interval: 60,
            ..Default::default()
        }
        .validated();
        assert_eq!(tuning.initial_spawn_interval, 60);
    }
}
