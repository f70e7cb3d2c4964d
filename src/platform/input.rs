//! Keyboard state folded into per-tick commands

use crate::sim::{Direction, TickInput};

/// Keys the game cares about. Hosts map their own key codes onto these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Fire,
    /// Leave the start screen
    Start,
    /// Go straight into a new match from game over
    Restart,
    /// Anything else; still counts as "press any key"
    Other,
}

impl Key {
    fn direction(self) -> Option<Direction> {
        match self {
            Key::Up => Some(Direction::Up),
            Key::Down => Some(Direction::Down),
            Key::Left => Some(Direction::Left),
            Key::Right => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Tracks held keys between ticks
#[derive(Debug, Clone, Default)]
pub struct InputTracker {
    /// Held directions, most recently pressed last
    held: Vec<Direction>,
    fire_held: bool,
    fire: bool,
    start: bool,
    acknowledge: bool,
    restart: bool,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: Key) {
        self.acknowledge = true;
        if let Some(direction) = key.direction() {
            self.held.retain(|d| *d != direction);
            self.held.push(direction);
            return;
        }
        match key {
            Key::Fire => {
                // Auto-repeat does not fire again
                if !self.fire_held {
                    self.fire = true;
                }
                self.fire_held = true;
            }
            Key::Start => self.start = true,
            Key::Restart => self.restart = true,
            _ => {}
        }
    }

    pub fn key_up(&mut self, key: Key) {
        if let Some(direction) = key.direction() {
            self.held.retain(|d| *d != direction);
        } else if key == Key::Fire {
            self.fire_held = false;
        }
    }

    /// Forget everything, e.g. when the window loses focus
    pub fn release_all(&mut self) {
        *self = Self::default();
    }

    /// Input for the next tick. One-shot actions are cleared once read.
    pub fn take_input(&mut self) -> TickInput {
        TickInput {
            direction: self.held.last().copied(),
            fire: std::mem::take(&mut self.fire),
            start: std::mem::take(&mut self.start),
            acknowledge: std::mem::take(&mut self.acknowledge),
            restart: std::mem::take(&mut self.restart),
        }
    }
}
