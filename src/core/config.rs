//! Runtime settings for the arena binaries
//!
//! Balance numbers are NOT here: they are fixed constants in `combat::constants`.
//! This only covers how a session is presented and seeded.

use crate::core::error::{ArenaError, Result};

/// Session configuration
#[derive(Debug, Clone)]
pub struct ArenaConfig {
    /// Display name of the boss robot
    pub boss_name: String,

    /// Seed for boss target selection
    ///
    /// `None` draws a fresh seed per battle.
    pub seed: Option<u64>,

    /// Wait for ENTER after each turn in the console game
    pub pause_between_turns: bool,

    /// `tracing` filter used when `RUST_LOG` is not set
    ///
    /// Kept at `warn` by default so log lines do not interleave with the menus.
    pub log_filter: String,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            boss_name: "Mega Boss".to_string(),
            seed: None,
            pause_between_turns: true,
            log_filter: "robot_arena=warn".to_string(),
        }
    }
}

impl ArenaConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.boss_name.trim().is_empty() {
            return Err(ArenaError::InvalidConfig("boss_name must not be blank".into()));
        }

        if self.log_filter.trim().is_empty() {
            return Err(ArenaError::InvalidConfig("log_filter must not be empty".into()));
        }

        Ok(())
    }
}

// === GLOBAL CONFIG ACCESS ===

use std::sync::OnceLock;

static CONFIG: OnceLock<ArenaConfig> = OnceLock::new();

/// Get the global arena config (initializes with defaults if not set)
pub fn config() -> &'static ArenaConfig {
    CONFIG.get_or_init(ArenaConfig::default)
}

/// Set the global arena config (can only be called once)
///
/// Returns Err if config was already set.
pub fn set_config(config: ArenaConfig) -> std::result::Result<(), ArenaConfig> {
    CONFIG.set(config)
}
