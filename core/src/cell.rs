use serde::{Deserialize, Serialize};

use crate::*;

/// Packed state of one cell.
///
/// The low decimal digit holds the adjacent-mine count, or `9` for a mine.
/// A covered cell carries an extra `10` and a flagged one another `10`:
///
/// | code     | meaning                  |
/// |----------|--------------------------|
/// | `0..=8`  | uncovered hint           |
/// | `9`      | uncovered mine           |
/// | `10..=18`| covered hint             |
/// | `19`     | covered mine             |
/// | `20..=28`| flagged hint             |
/// | `29`     | flagged mine             |
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Cell(u8);

impl Cell {
    const COVER: u8 = 10;
    const MARK: u8 = 10;
    const MINE_DIGIT: u8 = 9;
    const MAX_CODE: u8 = 29;

    pub const EMPTY: Self = Self(0);
    pub const MINE: Self = Self(Self::MINE_DIGIT);
    pub const COVERED_EMPTY: Self = Self(Self::COVER);
    pub const COVERED_MINE: Self = Self(Self::MINE_DIGIT + Self::COVER);
    pub const FLAGGED_MINE: Self = Self(Self::MINE_DIGIT + Self::COVER + Self::MARK);

    pub const fn from_code(code: u8) -> Result<Self> {
        if code > Self::MAX_CODE {
            Err(GameError::InvalidCellCode(code))
        } else {
            Ok(Self(code))
        }
    }

    pub const fn code(self) -> u8 {
        self.0
    }

    pub const fn is_covered(self) -> bool {
        self.0 >= Self::COVER
    }

    pub const fn is_flagged(self) -> bool {
        self.0 >= Self::COVER + Self::MARK
    }

    pub const fn is_mine(self) -> bool {
        self.0 % 10 == Self::MINE_DIGIT
    }

    /// An uncovered mine, only ever present once the game is lost.
    pub const fn is_exploded(self) -> bool {
        self.0 == Self::MINE_DIGIT
    }

    /// Covered, unflagged and safe: the cells a flood fill may open.
    pub const fn is_openable(self) -> bool {
        self.is_covered() && !self.is_flagged() && !self.is_mine()
    }

    pub const fn adjacent_mines(self) -> Option<u8> {
        if self.is_mine() {
            None
        } else {
            Some(self.0 % 10)
        }
    }

    pub(crate) fn add_adjacent_mine(&mut self) {
        debug_assert!(
            !self.is_mine() && self.0 % 10 < 8,
            "cell {} cannot count another mine",
            self.0
        );
        self.0 += 1;
    }

    pub(crate) fn bury_mine(&mut self) {
        *self = Self::COVERED_MINE;
    }

    pub(crate) fn uncover(&mut self) {
        debug_assert!(self.is_covered() && !self.is_flagged(), "cell {} is not closed", self.0);
        self.0 -= Self::COVER;
    }

    pub(crate) fn flag(&mut self) {
        debug_assert!(
            self.is_covered() && !self.is_flagged(),
            "cell {} cannot be flagged",
            self.0
        );
        self.0 += Self::MARK;
    }

    pub(crate) fn unflag(&mut self) {
        debug_assert!(self.is_flagged(), "cell {} is not flagged", self.0);
        self.0 -= Self::MARK;
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::COVERED_EMPTY
    }
}

impl TryFrom<u8> for Cell {
    type Error = GameError;

    fn try_from(code: u8) -> Result<Self> {
        Self::from_code(code)
    }
}

impl From<Cell> for u8 {
    fn from(cell: Cell) -> Self {
        cell.code()
    }
}
