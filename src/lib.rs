//! TUI Blockfall (workspace facade crate).
//!
//! Re-exports the workspace crates as `tui_blockfall::{core,input,term,types}`
//! and adds the pieces only the binaries need: environment configuration and
//! the JSONL session journal.

pub mod config;
pub mod journal;

pub use tui_blockfall_core as core;
pub use tui_blockfall_input as input;
pub use tui_blockfall_term as term;
pub use tui_blockfall_types as types;

pub use config::AppConfig;
pub use journal::Journal;
