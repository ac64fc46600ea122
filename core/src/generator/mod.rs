use crate::*;
pub use fixed::*;
pub use random::*;

mod fixed;
mod random;

/// Strategy that buries mines on a freshly reset board.
pub trait MineGenerator {
    fn place_mines(&mut self, board: &mut Board, mines: CellCount);
}

impl<G: MineGenerator + ?Sized> MineGenerator for &mut G {
    fn place_mines(&mut self, board: &mut Board, mines: CellCount) {
        (**self).place_mines(board, mines)
    }
}
