//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds the rules of the falling-block game and nothing else. It
//! does no I/O and never reads the system clock on its own: gravity arrives
//! as [`GameSession::on_tick`] calls, and the session hands interval changes
//! back to the caller's [`Clock`].
//!
//! # Module Structure
//!
//! - [`grid`]: fixed-size cell matrix with bounds-checked translation
//! - [`catalog`]: the seven piece templates and their preview glyphs
//! - [`board`]: settled and active layers, collision, rotation, row clearing
//! - [`session`]: round lifecycle, scoring, gravity speed, held-key repeat
//! - [`clock`]: the gravity tick source seam
//! - [`rng`]: seeded uniform piece selection
//! - [`scoring`]: points and interval per cleared-row count
//! - [`snapshot`]: plain-data view for renderers
//!
//! # Game Rules
//!
//! - The board is 12x22 including a wall column on each side and a floor row
//! - Pieces are drawn uniformly at random, with a one-piece preview
//! - Rotation is a plain 90° turn of the bounding box, with no wall kicks
//! - A piece that cannot fall lands immediately; there is no lock delay
//! - Clearing `n` rows at once scores `n²` and speeds gravity by `0.95^(n²)`
//! - The round ends when a landed piece leaves a block in the top row, or a
//!   new piece cannot be placed
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use tui_blockfall_core::{Clock, GameSession};
//! use tui_blockfall_core::types::Command;
//!
//! struct NoClock;
//! impl Clock for NoClock {
//!     fn set_interval(&mut self, _interval: Duration) {}
//! }
//!
//! let mut session = GameSession::new(12345, NoClock);
//! session.on_command(Command::MoveLeft);
//! session.on_command(Command::Rotate);
//! session.on_tick();
//!
//! assert!(session.playing());
//! assert_eq!(session.score(), 0);
//! ```

pub mod board;
pub mod catalog;
pub mod clock;
pub mod grid;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;

pub use tui_blockfall_types as types;

pub use board::{Board, MergeOutcome};
pub use catalog::{PieceCatalog, PieceTemplate};
pub use clock::{Clock, FrameClock};
pub use grid::{BoardGrid, Bounds, Grid, PreviewGrid};
pub use rng::SimpleRng;
pub use scoring::{line_clear_score, next_fall_interval};
pub use session::{GameSession, SessionConfig, SessionEvent, EVENT_CAPACITY};
pub use snapshot::GameSnapshot;
