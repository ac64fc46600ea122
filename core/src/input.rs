use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MouseButton {
    /// Uncovers the cell.
    Left,
    /// Toggles a flag on the cell.
    Right,
    /// Anything else, ignored.
    Other,
}

/// What a click did to the game.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Outside the board, unknown button, or nothing to do on that cell.
    Ignored,
    /// The previous game had ended, a fresh board was dealt instead.
    Restarted,
    Flagged,
    Unflagged,
    /// Flag refused, every mark is already in use.
    NoMarksLeft,
    Revealed,
    HitMine,
}

impl ClickOutcome {
    pub const fn needs_repaint(self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

impl GameConfig {
    /// Cell under the pixel `(x, y)`, relative to the board's top-left corner.
    pub fn cell_at_pixel(&self, x: Pixel, y: Pixel) -> Option<CellIndex> {
        if self.cell_size == 0 {
            return None;
        }

        let col = x / self.cell_size;
        let row = y / self.cell_size;
        if col >= Pixel::from(self.columns) || row >= Pixel::from(self.rows) {
            return None;
        }

        Some(row as usize * usize::from(self.columns) + col as usize)
    }

    /// Top-left pixel of the tile for `(row, col)`.
    pub fn tile_origin(&self, (row, col): Coord2) -> (Pixel, Pixel) {
        (
            Pixel::from(col) * self.cell_size,
            Pixel::from(row) * self.cell_size,
        )
    }
}
