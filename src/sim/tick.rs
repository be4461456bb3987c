//! Fixed timestep simulation tick
//!
//! [`RunnerSimulation`] owns the runner state, the RNG and the high-score
//! store, and is the only thing allowed to mutate them. Input is applied
//! through `on_jump` / `on_resize` between ticks, never during one.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::events::GameEvent;
use super::particles;
use super::spawner;
use super::state::{Lifecycle, PlayField, RunnerState};
use crate::config::Tuning;
use crate::persistence::{HighScoreStore, KeyValueStore};

/// The endless runner simulation
pub struct RunnerSimulation<S: KeyValueStore, R: Rng = Pcg32> {
    state: RunnerState,
    tuning: Tuning,
    rng: R,
    high_scores: HighScoreStore<S>,
    events: Vec<GameEvent>,
}

impl<S: KeyValueStore> RunnerSimulation<S, Pcg32> {
    /// Create a simulation with a seeded PCG generator
    pub fn new(tuning: Tuning, field: PlayField, store: S, seed: u64) -> Self {
        Self::with_rng(tuning, field, store, Pcg32::seed_from_u64(seed))
    }
}

impl<S: KeyValueStore, R: Rng> RunnerSimulation<S, R> {
    /// Create a simulation with an injected random source.
    ///
    /// The stored high score is read exactly once, here.
    pub fn with_rng(tuning: Tuning, field: PlayField, store: S, rng: R) -> Self {
        let tuning = tuning.validated();
        let high_scores = HighScoreStore::new(store);
        let high_score = high_scores.load();
        log::info!("Runner ready (high score {})", high_score);

        Self {
            state: RunnerState::new(field, &tuning, high_score),
            tuning,
            rng,
            high_scores,
            events: Vec::new(),
        }
    }

    pub fn state(&self) -> &RunnerState {
        &self.state
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.state.lifecycle
    }

    pub fn store(&self) -> &S {
        self.high_scores.store()
    }

    /// Take the events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Primary action: start, jump or acknowledge game over depending on phase
    pub fn on_jump(&mut self) {
        match self.state.lifecycle {
            Lifecycle::Start => {
                self.state.reset_session(&self.tuning);
                self.state.lifecycle = Lifecycle::Playing;
                log::info!("Run started");
                self.events.push(GameEvent::Started);
            }
            Lifecycle::Playing => {
                let player = &mut self.state.player;
                if player.is_jumping {
                    // No double jump
                    return;
                }
                player.vel_y = self.tuning.jump_strength;
                player.is_jumping = true;
                let feet = player.feet();
                particles::emit_jump_dust(&mut self.state.particles, &mut self.rng, feet);
                self.events.push(GameEvent::Jumped);
            }
            Lifecycle::GameOver => {
                let ground_y = self.state.field.ground_y;
                self.state.player.reset_pose(ground_y);
                self.state.lifecycle = Lifecycle::Start;
                self.events.push(GameEvent::ReturnedToStart);
            }
        }
    }

    /// Refit the play field to a new viewport.
    ///
    /// A grounded player is moved onto the new ground line. Obstacles already
    /// in flight keep their position.
    pub fn on_resize(&mut self, viewport_width: f32, viewport_height: f32) {
        let field = PlayField::from_viewport(viewport_width, viewport_height);
        self.state.field = field;
        if !self.state.player.is_jumping {
            let rest = self.state.player.resting_y(field.ground_y);
            self.state.player.pos.y = rest;
            self.state.player.vel_y = 0.0;
        }
        log::info!(
            "Play field resized to {}x{} (ground at {})",
            field.width,
            field.height,
            field.ground_y
        );
        self.events.push(GameEvent::Resized {
            width: field.width,
            height: field.height,
        });
    }

    /// Advance the simulation by one fixed step
    pub fn tick(&mut self) {
        self.state.frame = self.state.frame.wrapping_add(1);
        if self.state.lifecycle != Lifecycle::Playing {
            return;
        }

        // Player physics
        let ground_y = self.state.field.ground_y;
        let landed = self.state.player.integrate(
            self.tuning.gravity,
            self.tuning.air_spin,
            ground_y,
        );
        if landed {
            self.events.push(GameEvent::Landed);
        }

        // Obstacles
        spawner::advance_spawn_timer(&mut self.state, &mut self.rng, &mut self.events);
        let collided = spawner::scroll_obstacles(&mut self.state, &self.tuning, &mut self.events);
        if collided {
            self.crash();
        }

        // Particles
        particles::update(&mut self.state.particles, self.tuning.particle_gravity);
    }

    /// playing -> game over
    fn crash(&mut self) {
        let score = self.state.score;
        self.state.lifecycle = Lifecycle::GameOver;
        log::info!("Crashed with score {}", score);
        self.events.push(GameEvent::Crashed { score });

        let center = self.state.player.center();
        particles::emit_crash_burst(&mut self.state.particles, &mut self.rng, center);

        let previous = self.state.high_score;
        if score > previous {
            self.state.high_score = score;
            self.high_scores.save(score);
            log::info!("New high score: {} (was {})", score, previous);
            self.events.push(GameEvent::NewHighScore { score, previous });
        }
    }
}
