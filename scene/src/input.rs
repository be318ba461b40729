//! Directional input: the four "held" flags sampled once per frame.
//!
//! The host translates its own key or button events into [`HeldDirections`]
//! (or any other [`DirectionalInput`]) and hands it to the surface on each
//! frame. There is no event queue; only the state at tick time matters.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

/// One pan axis direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Map a keyboard key name to a direction.
    ///
    /// Accepts the W/A/S/D keys (either case) and the browser arrow key names.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "a" | "A" | "ArrowLeft" => Some(Self::Left),
            "d" | "D" | "ArrowRight" => Some(Self::Right),
            "w" | "W" | "ArrowUp" => Some(Self::Up),
            "s" | "S" | "ArrowDown" => Some(Self::Down),
            _ => None,
        }
    }
}

/// Source of "is this direction held right now" answers.
pub trait DirectionalInput {
    fn is_held(&self, direction: Direction) -> bool;
}

/// Plain held-flag set, one flag per direction.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeldDirections {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl HeldDirections {
    /// No direction held.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    pub fn set(&mut self, direction: Direction, held: bool) {
        match direction {
            Direction::Left => self.left = held,
            Direction::Right => self.right = held,
            Direction::Up => self.up = held,
            Direction::Down => self.down = held,
        }
    }

    /// Builder-style variant of [`HeldDirections::set`].
    #[must_use]
    pub fn with(mut self, direction: Direction) -> Self {
        self.set(direction, true);
        self
    }
}

impl DirectionalInput for HeldDirections {
    fn is_held(&self, direction: Direction) -> bool {
        match direction {
            Direction::Left => self.left,
            Direction::Right => self.right,
            Direction::Up => self.up,
            Direction::Down => self.down,
        }
    }
}
