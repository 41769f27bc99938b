//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal play. It avoids
//! widget/layout libraries and instead renders snapshots into a simple
//! framebuffer that is then flushed to the terminal.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Pure snapshot to framebuffer mapping, separately testable from terminal I/O
//! - Precise control over aspect ratio (2 chars wide per board cell)

pub mod fb;
pub mod game_view;
pub mod renderer;
pub mod throttle;

pub use tui_blockfall_core as core;
pub use tui_blockfall_types as types;

pub use fb::{FrameBuffer, Glyph, Rgb, Style};
pub use game_view::{tag_color, AnchorY, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
pub use throttle::RenderThrottle;
