//! Held-direction tracking for terminal environments.
//!
//! Terminals that report key releases (keyboard enhancement) get real held
//! state: a press marks its direction held and yields the command once,
//! further presses or repeats of that key are swallowed until it is released,
//! and the session turns the held state into repeated moves.
//!
//! Terminals without release events cannot tell a tap from a hold, so every
//! press yields its command and nothing is ever reported held. Holding a key
//! there repeats at the terminal's own auto-repeat rate.

use crossterm::event::KeyEvent;

use crate::map::handle_key_event;
use crate::types::{Command, HeldDirections};

/// Direction for horizontal movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalDirection {
    Left,
    Right,
    None,
}

/// Tracks which movement keys are currently held.
#[derive(Debug, Clone)]
pub struct HeldKeys {
    horizontal: HorizontalDirection,
    down_held: bool,
    key_releases: bool,
}

impl HeldKeys {
    /// Tracker for a terminal without key release events.
    pub fn new() -> Self {
        Self {
            horizontal: HorizontalDirection::None,
            down_held: false,
            key_releases: false,
        }
    }

    /// Set whether the terminal reports key releases.
    pub fn with_key_releases(mut self, key_releases: bool) -> Self {
        self.key_releases = key_releases;
        self
    }

    pub fn key_releases(&self) -> bool {
        self.key_releases
    }

    /// Handle a key press, returning the command to apply now (if any).
    ///
    /// Non-movement keys map straight through. With release events, a
    /// movement key that is already held yields nothing.
    pub fn handle_key_press(&mut self, key: KeyEvent) -> Option<Command> {
        let command = handle_key_event(key)?;
        if !self.key_releases {
            return Some(command);
        }
        match command {
            Command::MoveLeft => self.press_horizontal(HorizontalDirection::Left, command),
            Command::MoveRight => self.press_horizontal(HorizontalDirection::Right, command),
            Command::DropStep => {
                if self.down_held {
                    None
                } else {
                    self.down_held = true;
                    Some(command)
                }
            }
            _ => Some(command),
        }
    }

    fn press_horizontal(&mut self, dir: HorizontalDirection, command: Command) -> Option<Command> {
        if self.horizontal == dir {
            None
        } else {
            self.horizontal = dir;
            Some(command)
        }
    }

    pub fn handle_key_release(&mut self, key: KeyEvent) {
        match handle_key_event(key) {
            Some(Command::MoveLeft) => {
                if self.horizontal == HorizontalDirection::Left {
                    self.horizontal = HorizontalDirection::None;
                }
            }
            Some(Command::MoveRight) => {
                if self.horizontal == HorizontalDirection::Right {
                    self.horizontal = HorizontalDirection::None;
                }
            }
            Some(Command::DropStep) => {
                self.down_held = false;
            }
            _ => {}
        }
    }

    pub fn held(&self) -> HeldDirections {
        HeldDirections {
            left: self.horizontal == HorizontalDirection::Left,
            right: self.horizontal == HorizontalDirection::Right,
            down: self.down_held,
        }
    }

    /// Forget every held key, e.g. when focus is lost and releases will not arrive.
    pub fn reset(&mut self) {
        self.horizontal = HorizontalDirection::None;
        self.down_held = false;
    }
}

impl Default for HeldKeys {
    fn default() -> Self {
        Self::new()
    }
}
