//! Frame driver
//!
//! A [`Session`] wires the input queue, the frame clock, the simulation and a
//! renderer together. The platform layer calls [`Session::frame`] from its
//! display-refresh callback and pushes input whenever it arrives.

use rand::Rng;
use rand_pcg::Pcg32;

use crate::clock::FrameClock;
use crate::config::VisualSettings;
use crate::input::{InputEvent, InputQueue};
use crate::persistence::KeyValueStore;
use crate::render::{Renderer, scene};
use crate::sim::{GameEvent, Lifecycle, RunnerSimulation};

/// What the UI layer shows around the canvas
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hud {
    pub lifecycle: Lifecycle,
    pub score: u64,
    pub high_score: u64,
    /// The run that just ended set the record
    pub new_high_score: bool,
    pub prompt: &'static str,
}

pub struct Session<S: KeyValueStore, R: Rng = Pcg32> {
    sim: RunnerSimulation<S, R>,
    clock: FrameClock,
    input: InputQueue,
    visuals: VisualSettings,
    events: Vec<GameEvent>,
}

impl<S: KeyValueStore, R: Rng> Session<S, R> {
    pub fn new(sim: RunnerSimulation<S, R>, visuals: VisualSettings) -> Self {
        Self::with_clock(sim, visuals, FrameClock::default())
    }

    pub fn with_clock(sim: RunnerSimulation<S, R>, visuals: VisualSettings, clock: FrameClock) -> Self {
        Self {
            sim,
            clock,
            input: InputQueue::new(),
            visuals,
            events: Vec::new(),
        }
    }

    /// Queue an input for the next frame boundary
    pub fn push_input(&mut self, event: InputEvent) {
        if self.clock.is_stopped() {
            return;
        }
        self.input.push(event);
    }

    /// Run one display frame.
    ///
    /// Applies queued input, runs as many fixed steps as `elapsed_secs` buys
    /// and hands the resulting draw list to `renderer`. Returns false once
    /// the session has been stopped.
    pub fn frame(&mut self, elapsed_secs: f32, renderer: &mut impl Renderer) -> bool {
        if self.clock.is_stopped() {
            return false;
        }

        for event in self.input.drain() {
            match event {
                InputEvent::Jump => self.sim.on_jump(),
                InputEvent::Resize { width, height } => self.sim.on_resize(width, height),
            }
        }

        let steps = self.clock.advance(elapsed_secs);
        for _ in 0..steps {
            self.sim.tick();
        }

        let events = self.sim.drain_events();
        for event in &events {
            log::trace!("{:?}", event);
        }
        self.events.extend(events);

        let commands = scene::build(self.sim.state(), &self.visuals);
        renderer.render(&commands);
        true
    }

    /// Tear down: no further ticks, input or persistence
    pub fn stop(&mut self) {
        self.clock.stop();
        self.input.clear();
        log::info!("Session stopped");
    }

    pub fn is_stopped(&self) -> bool {
        self.clock.is_stopped()
    }

    /// Events produced by frames since the last call
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn hud(&self) -> Hud {
        let state = self.sim.state();
        Hud {
            lifecycle: state.lifecycle,
            score: state.score,
            high_score: state.high_score,
            new_high_score: state.lifecycle == Lifecycle::GameOver
                && state.score > 0
                && state.score == state.high_score,
            prompt: state.lifecycle.prompt(),
        }
    }

    pub fn simulation(&self) -> &RunnerSimulation<S, R> {
        &self.sim
    }

    pub fn visuals(&self) -> &VisualSettings {
        &self.visuals
    }

    pub fn set_visuals(&mut self, visuals: VisualSettings) {
        self.visuals = visuals;
    }
}
