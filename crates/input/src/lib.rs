//! Terminal input module.
//!
//! This crate is independent of any UI framework. It maps `crossterm` key
//! events into [`crate::types::Command`]s and tracks held movement keys on
//! terminals that report key releases.

pub mod handler;
pub mod map;

pub use tui_blockfall_types as types;

pub use handler::HeldKeys;
pub use map::{handle_key_event, should_quit};
