use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::grid::{Grid, GridSize};

/// Default playfield width in pixels.
pub const DEFAULT_WIDTH_PX: u32 = 500;

/// Default playfield height in pixels.
pub const DEFAULT_HEIGHT_PX: u32 = 500;

/// Edge length of one grid cell in pixels.
pub const DEFAULT_CELL_SIZE: u32 = 20;

/// Score at which a round is won.
pub const VICTORY_SCORE: u32 = 100;

/// Segment count of the snake at round start.
pub const INITIAL_SNAKE_LENGTH: usize = 3;

/// Column of the starting head, in cells (pixel x = 100 at the default cell size).
pub const INITIAL_HEAD_X: i32 = 5;

/// Row of the starting head, in cells (pixel y = 100 at the default cell size).
pub const INITIAL_HEAD_Y: i32 = 5;

/// Errors raised while loading or validating a [`SimConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Round-level tunables, loadable from a JSON file.
///
/// Missing fields fall back to the defaults above, so `{}` is a valid file.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub width_px: u32,
    pub height_px: u32,
    pub cell_size: u32,
    pub victory_score: u32,
    /// Fixed fruit RNG seed; `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width_px: DEFAULT_WIDTH_PX,
            height_px: DEFAULT_HEIGHT_PX,
            cell_size: DEFAULT_CELL_SIZE,
            victory_score: VICTORY_SCORE,
            seed: None,
        }
    }
}

impl SimConfig {
    /// Reads and validates a JSON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the pixel playfield divides into cells and can hold the
    /// starting snake.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cell_size == 0 {
            return Err(ConfigError::Invalid("cell_size must be positive".into()));
        }

        if self.victory_score == 0 {
            return Err(ConfigError::Invalid("victory_score must be positive".into()));
        }

        if self.width_px % self.cell_size != 0 || self.height_px % self.cell_size != 0 {
            return Err(ConfigError::Invalid(format!(
                "playfield {}x{} is not a multiple of cell size {}",
                self.width_px, self.height_px, self.cell_size
            )));
        }

        let size = self.grid_size()?;
        // The fixed start body spans columns 3..=5 of row 5.
        if i32::from(size.width) <= INITIAL_HEAD_X || i32::from(size.height) <= INITIAL_HEAD_Y {
            return Err(ConfigError::Invalid(format!(
                "grid {}x{} cannot hold the starting snake",
                size.width, size.height
            )));
        }

        Ok(())
    }

    /// Builds the cell grid described by this config.
    pub fn grid(&self) -> Result<Grid, ConfigError> {
        self.validate()?;
        let cell_size = u16::try_from(self.cell_size)
            .map_err(|_| ConfigError::Invalid("cell_size does not fit in 16 bits".into()))?;
        Ok(Grid::new(self.grid_size()?, cell_size))
    }

    fn grid_size(&self) -> Result<GridSize, ConfigError> {
        let cells = |px: u32| {
            u16::try_from(px / self.cell_size)
                .map_err(|_| ConfigError::Invalid(format!("{px}px is too many cells")))
        };

        Ok(GridSize {
            width: cells(self.width_px)?,
            height: cells(self.height_px)?,
        })
    }
}
