use alloc::vec::Vec;

use super::*;

/// Buries mines at the same explicit cells every game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixedMineGenerator {
    positions: Vec<CellIndex>,
}

impl FixedMineGenerator {
    pub fn new(positions: impl IntoIterator<Item = CellIndex>) -> Self {
        Self {
            positions: positions.into_iter().collect(),
        }
    }

    /// Layout given as `(row, col)` positions on a board shaped like `config`,
    /// which must name exactly `config.mines` distinct cells.
    pub fn from_coords(config: &GameConfig, coords: &[Coord2]) -> Result<Self> {
        let positions = coords
            .iter()
            .map(|&(row, col)| {
                if row < config.rows && col < config.columns {
                    Ok(usize::from(row) * usize::from(config.columns) + usize::from(col))
                } else {
                    Err(GameError::InvalidCoords)
                }
            })
            .collect::<Result<Vec<_>>>()?;

        let mut distinct = positions.clone();
        distinct.sort_unstable();
        distinct.dedup();
        let actual = distinct.len() as CellCount;
        if actual != config.mines {
            return Err(GameError::MineCountMismatch {
                expected: config.mines,
                actual,
            });
        }
        Ok(Self { positions })
    }

    pub fn positions(&self) -> &[CellIndex] {
        &self.positions
    }
}

impl MineGenerator for FixedMineGenerator {
    fn place_mines(&mut self, board: &mut Board, mines: CellCount) {
        let mut placed: CellCount = 0;
        for &position in &self.positions {
            if position >= board.len() {
                log::warn!("Ignoring mine outside the board at {}", position);
                continue;
            }
            if board.place_mine(position) {
                placed += 1;
            }
        }

        if placed != mines {
            log::warn!(
                "Fixed minefield count mismatch, actual: {}, requested: {}",
                placed,
                mines
            );
        }
    }
}
