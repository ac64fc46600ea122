use thiserror::Error;

use crate::CellCount;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Board needs at least one row, one column and a non-zero cell size")]
    EmptyBoard,
    #[error("Too many mines")]
    TooManyMines,
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
    #[error("Invalid cell code {0}")]
    InvalidCellCode(u8),
    #[error("Mine layout holds {actual} mines, expected {expected}")]
    MineCountMismatch { expected: CellCount, actual: CellCount },
}

pub type Result<T> = core::result::Result<T, GameError>;
