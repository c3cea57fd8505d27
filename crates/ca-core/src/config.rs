//! Configuration types for the automata.

use crate::{Dimensions, Error, Position, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Environment variable naming an optional JSON config file
pub const CONFIG_ENV_VAR: &str = "CA_CONFIG";

/// Elementary (1-D) automaton parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementaryConfig {
    /// Number of cells in a row
    pub num_cells: usize,
    /// Number of rows in the history, including the initial row
    pub num_steps: usize,
    /// Next states for neighborhoods 000, 001, 010, ..., 111
    pub next_states: [u8; 8],
    /// Seed for the random initial row (entropy when absent)
    pub seed: Option<u64>,
}

impl Default for ElementaryConfig {
    fn default() -> Self {
        Self {
            num_cells: 200,
            num_steps: 100,
            next_states: [0, 1, 1, 0, 1, 0, 1, 0],
            seed: None,
        }
    }
}

impl ElementaryConfig {
    pub fn validate(&self) -> Result<()> {
        if self.num_cells < 3 {
            return Err(Error::Validation(format!(
                "num_cells must be at least 3, got {}",
                self.num_cells
            )));
        }
        if self.num_steps == 0 {
            return Err(Error::Validation("num_steps must be at least 1".to_string()));
        }
        if let Some(bad) = self.next_states.iter().find(|&&bit| bit > 1) {
            return Err(Error::Validation(format!(
                "next_states entries must be 0 or 1, got {}",
                bad
            )));
        }
        Ok(())
    }
}

/// Literal starting patterns for the Game of Life
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    Block,
    Blinker,
    Glider,
    GliderGun,
}

/// How the first Game of Life grid is produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InitialPattern {
    /// Each cell alive independently with the given probability
    Random { live_probability: f64 },
    /// A literal pattern stamped at `origin` on an otherwise dead grid
    Literal { pattern: PatternKind, origin: Position },
}

impl Default for InitialPattern {
    fn default() -> Self {
        InitialPattern::Random {
            live_probability: 0.1,
        }
    }
}

/// Cell update policy for the Game of Life
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UpdateMode {
    /// Every cell computed from the same frozen snapshot
    #[default]
    Synchronous,
    /// Cells updated in place in a seeded random order
    Asynchronous { seed: u64 },
}

/// Game of Life parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifeConfig {
    /// Size of the toroidal grid
    pub dimensions: Dimensions,
    /// Number of frames to display
    pub num_steps: usize,
    /// Seed for the random initial grid (entropy when absent)
    pub seed: Option<u64>,
    pub initial_pattern: InitialPattern,
    pub update_mode: UpdateMode,
    /// Log the population every this many steps
    pub log_interval: usize,
}

impl Default for LifeConfig {
    fn default() -> Self {
        Self {
            dimensions: Dimensions::square(50),
            num_steps: 300,
            seed: Some(23),
            initial_pattern: InitialPattern::default(),
            update_mode: UpdateMode::default(),
            log_interval: 50,
        }
    }
}

impl LifeConfig {
    pub fn validate(&self) -> Result<()> {
        self.dimensions.validate()?;
        if self.num_steps == 0 {
            return Err(Error::Validation("num_steps must be at least 1".to_string()));
        }
        if let InitialPattern::Random { live_probability } = self.initial_pattern {
            if !(0.0..=1.0).contains(&live_probability) {
                return Err(Error::Validation(format!(
                    "live_probability must be within [0, 1], got {}",
                    live_probability
                )));
            }
        }
        Ok(())
    }
}

/// Terminal rendering parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Pause between Game of Life frames (milliseconds)
    pub frame_delay_ms: u64,
    pub alive_char: char,
    pub dead_char: char,
    /// Redraw each frame in place instead of scrolling
    pub clear_screen: bool,
    /// How long the elementary raster stays up before the Game of Life
    /// frames start redrawing the screen (milliseconds)
    pub history_hold_ms: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            frame_delay_ms: 10,
            alive_char: '#',
            dead_char: '.',
            clear_screen: true,
            history_hold_ms: 5000,
        }
    }
}

/// Top-level configuration for the viewer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub elementary: ElementaryConfig,
    pub life: LifeConfig,
    pub render: RenderConfig,
}

impl RunConfig {
    pub fn validate(&self) -> Result<()> {
        self.elementary.validate()?;
        self.life.validate()?;
        Ok(())
    }

    /// Read a JSON config file; missing fields take their defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: RunConfig = serde_json::from_str(&text)?;
        config.validate()?;
        debug!(path = %path.display(), "Loaded configuration file");
        Ok(config)
    }

    /// Defaults, or the file named by `CA_CONFIG` when it is set
    pub fn load() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::from_json_file(Path::new(&path)),
            None => {
                debug!("No {} set, using default configuration", CONFIG_ENV_VAR);
                Ok(Self::default())
            }
        }
    }
}
