//! Frame clock
//!
//! Converts variable display-refresh deltas into whole fixed simulation
//! steps. Leftover time carries to the next frame; a frame that falls far
//! behind is capped instead of trying to catch up.

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};

/// Tolerance for float drift when comparing the accumulator to the step
const STEP_EPSILON: f32 = 1e-6;

#[derive(Debug, Clone)]
pub struct FrameClock {
    step: f32,
    max_substeps: u32,
    accumulator: f32,
    stopped: bool,
    total_steps: u64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(SIM_DT, MAX_SUBSTEPS)
    }
}

impl FrameClock {
    pub fn new(step: f32, max_substeps: u32) -> Self {
        Self {
            step: if step.is_finite() && step > 0.0 { step } else { SIM_DT },
            max_substeps: max_substeps.max(1),
            accumulator: 0.0,
            stopped: false,
            total_steps: 0,
        }
    }

    /// Fixed step length in seconds
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Feed the time since the previous frame; returns how many steps to run
    pub fn advance(&mut self, elapsed_secs: f32) -> u32 {
        if self.stopped {
            return 0;
        }

        let elapsed = if elapsed_secs.is_finite() {
            elapsed_secs.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        };
        self.accumulator += elapsed;

        let mut steps = 0;
        while self.accumulator + STEP_EPSILON >= self.step && steps < self.max_substeps {
            self.accumulator = (self.accumulator - self.step).max(0.0);
            steps += 1;
        }
        if steps == self.max_substeps {
            // Drop the backlog rather than spiral
            self.accumulator %= self.step;
        }

        self.total_steps += steps as u64;
        steps
    }

    /// Halt the clock for good; every later `advance` returns 0
    pub fn stop(&mut self) {
        if !self.stopped {
            log::debug!("Frame clock stopped after {} steps", self.total_steps);
        }
        self.stopped = true;
        self.accumulator = 0.0;
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Steps issued since creation
    pub fn total_steps(&self) -> u64 {
        self.total_steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_step_per_refresh() {
        let mut clock = FrameClock::default();
        for _ in 0..120 {
            assert_eq!(clock.advance(SIM_DT), 1);
        }
        assert_eq!(clock.total_steps(), 120);
    }

    #[test]
    fn test_accumulates_short_frames() {
        // 120 Hz display: one step every other frame
        let mut clock = FrameClock::default();
        let steps: u32 = (0..10).map(|_| clock.advance(SIM_DT / 2.0)).sum();
        assert_eq!(steps, 5);
    }

    #[test]
    fn test_multiple_steps_per_long_frame() {
        let mut clock = FrameClock::default();
        assert_eq!(clock.advance(SIM_DT * 3.0), 3);
    }

    #[test]
    fn test_substep_cap() {
        let mut clock = FrameClock::default();
        // A one-second hitch is clamped and capped
        assert_eq!(clock.advance(1.0), MAX_SUBSTEPS);
        // The backlog was dropped
        assert!(clock.advance(0.0) <= 1);
    }

    #[test]
    fn test_bad_deltas_ignored() {
        let mut clock = FrameClock::default();
        assert_eq!(clock.advance(-1.0), 0);
        assert_eq!(clock.advance(f32::NAN), 0);
        assert_eq!(clock.advance(f32::INFINITY), 0);
    }

    #[test]
    fn test_stop_halts_forever() {
        let mut clock = FrameClock::default();
        assert_eq!(clock.advance(SIM_DT), 1);
        clock.stop();
        assert!(clock.is_stopped());
        for _ in 0..10 {
            assert_eq!(clock.advance(SIM_DT), 0);
        }
        assert_eq!(clock.total_steps(), 1);
    }
}
