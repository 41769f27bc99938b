//! Runtime configuration from environment variables.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `TUI_BLOCKFALL_SEED` | time-based |
//! | `TUI_BLOCKFALL_START_INTERVAL_MS` | 1000 |
//! | `TUI_BLOCKFALL_HOLD_THRESHOLD` | 200 |
//! | `TUI_BLOCKFALL_DOWN_HOLD_THRESHOLD` | 20 |
//! | `TUI_BLOCKFALL_LOG_PATH` | unset (no journal) |
//!
//! Values that do not parse fall back to the default.

use std::path::PathBuf;
use std::time::Duration;

use crate::core::SessionConfig;

pub const ENV_SEED: &str = "TUI_BLOCKFALL_SEED";
pub const ENV_START_INTERVAL_MS: &str = "TUI_BLOCKFALL_START_INTERVAL_MS";
pub const ENV_HOLD_THRESHOLD: &str = "TUI_BLOCKFALL_HOLD_THRESHOLD";
pub const ENV_DOWN_HOLD_THRESHOLD: &str = "TUI_BLOCKFALL_DOWN_HOLD_THRESHOLD";
pub const ENV_LOG_PATH: &str = "TUI_BLOCKFALL_LOG_PATH";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Fixed RNG seed; `None` picks one from the system time
    pub seed: Option<u32>,
    pub session: SessionConfig,
    /// JSONL journal destination
    pub log_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed: None,
            session: SessionConfig::default(),
            log_path: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key/value source (the environment, or a map in tests)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let parse = |key: &str| lookup(key).and_then(|s| s.trim().parse::<u64>().ok());

        let seed = parse(ENV_SEED).and_then(|v| u32::try_from(v).ok());

        // A zero gravity interval would never let the clock advance.
        let starting_interval = parse(ENV_START_INTERVAL_MS)
            .filter(|&ms| ms > 0)
            .map(Duration::from_millis)
            .unwrap_or(defaults.session.starting_interval);

        let hold_threshold = parse(ENV_HOLD_THRESHOLD)
            .and_then(|v| u32::try_from(v).ok())
            .unwrap_or(defaults.session.hold_threshold);
        let down_hold_threshold = parse(ENV_DOWN_HOLD_THRESHOLD)
            .and_then(|v| u32::try_from(v).ok())
            .unwrap_or(defaults.session.down_hold_threshold);

        let log_path = lookup(ENV_LOG_PATH)
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(PathBuf::from(s)) });

        Self {
            seed,
            session: SessionConfig {
                starting_interval,
                hold_threshold,
                down_hold_threshold,
                ..defaults.session
            },
            log_path,
        }
    }
}
