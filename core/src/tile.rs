use serde::{Deserialize, Serialize};

use crate::*;

/// Image the host draws for one cell. [`Tile::id`] indexes the host's
/// 13 loaded tile images.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tile {
    /// Uncovered safe cell with its adjacent-mine count, `0` drawn blank.
    Hint(u8),
    Mine,
    Cover,
    Mark,
    /// Flag left on a safe cell once the game is lost.
    WrongMark,
}

impl Tile {
    pub const COUNT: usize = 13;

    pub const fn id(self) -> u8 {
        use Tile::*;
        match self {
            Hint(count) => count,
            Mine => 9,
            Cover => 10,
            Mark => 11,
            WrongMark => 12,
        }
    }

    pub const fn from_id(id: u8) -> Option<Self> {
        use Tile::*;
        Some(match id {
            0..=8 => Hint(id),
            9 => Mine,
            10 => Cover,
            11 => Mark,
            12 => WrongMark,
            _ => return None,
        })
    }

    /// Tile for `cell`; `finished` switches to the end-of-game view that
    /// exposes mines and wrong flags.
    pub const fn for_cell(cell: Cell, finished: bool) -> Self {
        use Tile::*;

        if !cell.is_covered() {
            return if cell.is_mine() { Mine } else { Hint(cell.code()) };
        }

        match (finished, cell.is_flagged(), cell.is_mine()) {
            (false, true, _) => Mark,
            (false, false, _) => Cover,
            (true, false, true) => Mine,
            (true, true, true) => Mark,
            (true, true, false) => WrongMark,
            (true, false, false) => Cover,
        }
    }
}
