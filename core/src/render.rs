use serde::{Deserialize, Serialize};

use crate::*;

/// Host drawing surface holding the 13 tile images.
pub trait TileRenderer {
    fn draw_tile(&mut self, tile: Tile, x: Pixel, y: Pixel);
}

impl<F: FnMut(Tile, Pixel, Pixel)> TileRenderer for F {
    fn draw_tile(&mut self, tile: Tile, x: Pixel, y: Pixel) {
        self(tile, x, y)
    }
}

/// Owned copy of everything a repaint needs, for hosts that draw off the
/// engine thread.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub board: Board,
    pub state: EngineState,
    pub mines_left: CellCount,
    pub cell_size: Pixel,
}

impl Snapshot {
    /// Draws the captured board without touching any game state.
    pub fn draw<R: TileRenderer + ?Sized>(&self, renderer: &mut R) {
        draw_board(&self.board, self.state.is_finished(), self.cell_size, renderer);
    }
}

/// Draws every cell in row-major order and returns how many safe cells are
/// still covered.
pub(crate) fn draw_board<R: TileRenderer + ?Sized>(
    board: &Board,
    finished: bool,
    cell_size: Pixel,
    renderer: &mut R,
) -> CellCount {
    let columns = usize::from(board.columns());
    let mut covered_safe = 0;

    for (index, cell) in board.iter().enumerate() {
        if cell.is_covered() && !cell.is_mine() {
            covered_safe += 1;
        }

        let x = (index % columns) as Pixel * cell_size;
        let y = (index / columns) as Pixel * cell_size;
        renderer.draw_tile(Tile::for_cell(cell, finished), x, y);
    }
    covered_safe
}
