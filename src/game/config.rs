use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use super::direction::ReversalPolicy;

/// Fastest allowed tick interval
pub const MIN_TICK_INTERVAL_MS: u64 = 50;
/// Slowest allowed tick interval
pub const MAX_TICK_INTERVAL_MS: u64 = 1000;
/// Step used by the speed keys
pub const SPEED_STEP_MS: u64 = 25;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Side length of the square board
    pub board_size: usize,
    /// Points awarded for each food eaten
    pub food_reward: u32,
    /// Initial time between ticks in milliseconds
    pub tick_interval_ms: u64,
    /// What a 180-degree turn request does
    pub reversal: ReversalPolicy,
    /// Seed for food placement; random when absent
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: 20,
            food_reward: 10,
            tick_interval_ms: 200,
            reversal: ReversalPolicy::Ignore,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom board size
    pub fn new(board_size: usize) -> Self {
        Self {
            board_size,
            ..Default::default()
        }
    }

    /// Create a small board for testing
    pub fn small() -> Self {
        Self::new(10)
    }

    /// Load a configuration from a JSON file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let config: GameConfig = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            (5..=100).contains(&self.board_size),
            "Board size must be between 5 and 100, got {}",
            self.board_size
        );
        ensure!(
            (MIN_TICK_INTERVAL_MS..=MAX_TICK_INTERVAL_MS).contains(&self.tick_interval_ms),
            "Tick interval must be between {}ms and {}ms, got {}ms",
            MIN_TICK_INTERVAL_MS,
            MAX_TICK_INTERVAL_MS,
            self.tick_interval_ms
        );
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Clamp a requested tick interval into the supported range
    pub fn clamp_tick_interval(ms: u64) -> u64 {
        ms.clamp(MIN_TICK_INTERVAL_MS, MAX_TICK_INTERVAL_MS)
    }
}
