//! Input events and between-frame delivery
//!
//! Browser callbacks fire whenever they like; the queue holds their events
//! until the next frame boundary so a tick never sees a half-applied input.

use std::collections::VecDeque;

/// Pending events beyond this are dropped (oldest first)
const MAX_PENDING: usize = 32;

/// A discrete input from the player or the window
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Primary action (space / up / W / tap)
    Jump,
    /// Viewport size changed
    Resize { width: f32, height: f32 },
}

/// Key codes (`KeyboardEvent.code`) that act as jump
pub const JUMP_KEYS: [&str; 3] = ["Space", "ArrowUp", "KeyW"];

/// Map a keyboard code to an input event
pub fn event_for_key(code: &str) -> Option<InputEvent> {
    JUMP_KEYS.contains(&code).then_some(InputEvent::Jump)
}

/// FIFO of events waiting for the next frame
#[derive(Debug, Default)]
pub struct InputQueue {
    pending: VecDeque<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: InputEvent) {
        if self.pending.len() >= MAX_PENDING {
            log::debug!("Input queue full, dropping {:?}", self.pending.front());
            self.pending.pop_front();
        }
        self.pending.push_back(event);
    }

    /// Take every pending event in arrival order
    pub fn drain(&mut self) -> impl Iterator<Item = InputEvent> + '_ {
        self.pending.drain(..)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Forget everything pending (teardown)
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
