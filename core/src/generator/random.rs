use rand::{Rng, SeedableRng, rngs::SmallRng};

use super::*;

/// Purely random placement: draws uniform cell indices and rejects the ones
/// that already hold a mine until the requested count is reached.
#[derive(Clone, Debug)]
pub struct RandomMineGenerator {
    rng: SmallRng,
}

impl RandomMineGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Seeded from the operating system, different for every engine.
    pub fn from_entropy() -> Self {
        Self {
            rng: SmallRng::from_os_rng(),
        }
    }
}

impl MineGenerator for RandomMineGenerator {
    fn place_mines(&mut self, board: &mut Board, mines: CellCount) {
        let free_cells = board.free_cell_count();
        let mines = if mines > free_cells {
            log::warn!(
                "Minefield already full, requested {} but only fits {}",
                mines,
                free_cells
            );
            free_cells
        } else {
            mines
        };

        let mut placed = 0;
        while placed < mines {
            let position = self.rng.random_range(0..board.len());
            if board.place_mine(position) {
                placed += 1;
            }
        }
    }
}
