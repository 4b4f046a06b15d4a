// config.rs - Race configuration: JSON file, builder and CLI overrides

use std::path::Path;
use std::time::Duration;

use maze_race_solver::grid::{validate_dimensions, MIN_DIMENSION};
use maze_race_solver::{RaceBuilder, DEFAULT_MAZE_SIZE};
use serde::{Deserialize, Serialize};
use static_assertions::const_assert;

use crate::error_handling::{RaceError, Result};

/// Pause between ticks, matching the original 40ms animation cadence.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 40;
pub const DEFAULT_MAX_TICKS: u64 = 100_000;
pub const DEFAULT_CELL_PIXELS: u32 = 12;
pub const MAX_CELL_PIXELS: u32 = 64;

const_assert!(DEFAULT_MAZE_SIZE % 2 == 1);
const_assert!(DEFAULT_MAZE_SIZE >= MIN_DIMENSION);

/// Everything needed to set up and drive one race.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RaceConfig {
    /// Side length of the square maze. Odd, at least 5.
    pub maze_size: usize,
    pub tick_interval_ms: u64,
    /// Replays carving and classic shuffles when set.
    pub seed: Option<u64>,
    /// Upper bound on ticks before the runner gives up.
    pub max_ticks: u64,
    /// Side of one maze cell in exported PNG frames.
    pub cell_pixels: u32,
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self {
            maze_size: DEFAULT_MAZE_SIZE,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            seed: None,
            max_ticks: DEFAULT_MAX_TICKS,
            cell_pixels: DEFAULT_CELL_PIXELS,
        }
    }
}

impl RaceConfig {
    pub fn builder() -> RaceConfigBuilder {
        RaceConfigBuilder::new()
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn validate(&self) -> Result<()> {
        validate_dimensions(self.maze_size, self.maze_size)?;
        if self.tick_interval_ms == 0 {
            return Err(RaceError::config("tick_interval_ms must be positive"));
        }
        if self.max_ticks == 0 {
            return Err(RaceError::config("max_ticks must be positive"));
        }
        if !(1..=MAX_CELL_PIXELS).contains(&self.cell_pixels) {
            return Err(RaceError::config(format!(
                "cell_pixels must be within 1..={MAX_CELL_PIXELS}, got {}",
                self.cell_pixels
            )));
        }
        Ok(())
    }

    /// Parse and validate a JSON document. Missing fields take defaults.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: RaceConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = tokio::fs::read_to_string(path.as_ref()).await?;
        let config = Self::from_json(&text)?;
        log::debug!("Loaded {config:?} from {}", path.as_ref().display());
        Ok(config)
    }

    /// Race builder for this configuration's size and seed.
    pub fn race_builder(&self) -> RaceBuilder {
        let builder = RaceBuilder::new().size(self.maze_size);
        match self.seed {
            Some(seed) => builder.seed(seed),
            None => builder,
        }
    }
}

/// Builder pattern for race configuration
pub struct RaceConfigBuilder {
    config: RaceConfig,
}

impl RaceConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: RaceConfig::default(),
        }
    }

    pub fn from_config(config: RaceConfig) -> Self {
        Self { config }
    }

    pub fn maze_size(mut self, size: usize) -> Self {
        self.config.maze_size = size;
        self
    }

    pub fn tick_interval_ms(mut self, ms: u64) -> Self {
        self.config.tick_interval_ms = ms;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    pub fn max_ticks(mut self, ticks: u64) -> Self {
        self.config.max_ticks = ticks;
        self
    }

    pub fn cell_pixels(mut self, pixels: u32) -> Self {
        self.config.cell_pixels = pixels;
        self
    }

    pub fn build(self) -> Result<RaceConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for RaceConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
