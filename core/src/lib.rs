#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use input::*;
pub use render::*;
pub use status::*;
pub use tile::*;
pub use types::*;

mod board;
mod cell;
mod engine;
mod error;
mod generator;
mod input;
mod render;
mod status;
mod tile;
mod types;

/// Board geometry, mine count and on-screen tile size, fixed for the
/// lifetime of an engine.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub rows: Coord,
    pub columns: Coord,
    pub mines: CellCount,
    pub cell_size: Pixel,
}

impl GameConfig {
    pub const DEFAULT_CELL_SIZE: Pixel = 15;

    pub const fn new_unchecked(rows: Coord, columns: Coord, mines: CellCount) -> Self {
        Self {
            rows,
            columns,
            mines,
            cell_size: Self::DEFAULT_CELL_SIZE,
        }
    }

    pub fn new(rows: Coord, columns: Coord, mines: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(rows, columns, mines);
        config.validate()?;
        Ok(config)
    }

    pub const fn with_cell_size(self, cell_size: Pixel) -> Self {
        Self { cell_size, ..self }
    }

    pub const fn beginner() -> Self {
        Self::new_unchecked(9, 9, 10)
    }

    pub const fn intermediate() -> Self {
        Self::new_unchecked(16, 16, 40)
    }

    pub const fn expert() -> Self {
        Self::new_unchecked(16, 30, 99)
    }

    pub const fn size(&self) -> Coord2 {
        (self.rows, self.columns)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.rows, self.columns)
    }

    /// Board extent in pixels, `(width, height)`.
    pub const fn pixel_size(&self) -> (Pixel, Pixel) {
        (
            (self.columns as Pixel).saturating_mul(self.cell_size),
            (self.rows as Pixel).saturating_mul(self.cell_size),
        )
    }

    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.columns == 0 || self.cell_size == 0 {
            return Err(GameError::EmptyBoard);
        }
        if self.mines >= self.total_cells() {
            return Err(GameError::TooManyMines);
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::intermediate()
    }
}
