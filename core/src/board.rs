use alloc::vec::Vec;
use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Row-major minefield of packed [`Cell`] codes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawBoard", into = "RawBoard")]
pub struct Board {
    field: Array2<Cell>,
}

/// Serialised form of a [`Board`], checked by [`Board::from_codes`] on load.
#[derive(Clone, Debug, Serialize, Deserialize)]
struct RawBoard {
    rows: Coord,
    columns: Coord,
    codes: Vec<u8>,
}

impl TryFrom<RawBoard> for Board {
    type Error = GameError;

    fn try_from(raw: RawBoard) -> Result<Self> {
        Self::from_codes(raw.rows, raw.columns, &raw.codes)
    }
}

impl From<Board> for RawBoard {
    fn from(board: Board) -> Self {
        Self {
            rows: board.rows(),
            columns: board.columns(),
            codes: board.codes(),
        }
    }
}

impl Board {
    /// Board of `rows × columns` covered empty cells.
    pub fn new(rows: Coord, columns: Coord) -> Self {
        Self {
            field: Array2::from_elem((rows, columns).to_nd_index(), Cell::COVERED_EMPTY),
        }
    }

    /// Imports raw cell codes in row-major order.
    pub fn from_codes(rows: Coord, columns: Coord, codes: &[u8]) -> Result<Self> {
        if rows == 0 || columns == 0 {
            return Err(GameError::EmptyBoard);
        }

        let cells = codes
            .iter()
            .map(|&code| Cell::from_code(code))
            .collect::<Result<Vec<_>>>()?;
        let field = Array2::from_shape_vec((usize::from(rows), usize::from(columns)), cells)
            .map_err(|_| GameError::InvalidBoardShape)?;

        Ok(Self { field })
    }

    /// Raw cell codes in row-major order.
    pub fn codes(&self) -> Vec<u8> {
        self.field.iter().map(|cell| cell.code()).collect()
    }

    pub fn rows(&self) -> Coord {
        self.field.nrows() as Coord
    }

    pub fn columns(&self) -> Coord {
        self.field.ncols() as Coord
    }

    pub fn size(&self) -> Coord2 {
        (self.rows(), self.columns())
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.rows(), self.columns())
    }

    pub fn len(&self) -> usize {
        self.field.len()
    }

    pub fn is_empty(&self) -> bool {
        self.field.is_empty()
    }

    pub fn position(&self, index: CellIndex) -> Coord2 {
        let columns = self.field.ncols();
        ((index / columns) as Coord, (index % columns) as Coord)
    }

    pub fn index_of(&self, (row, col): Coord2) -> Result<CellIndex> {
        let (rows, columns) = self.size();
        if row < rows && col < columns {
            Ok(usize::from(row) * usize::from(columns) + usize::from(col))
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn cell(&self, index: CellIndex) -> Option<Cell> {
        (index < self.len()).then(|| self[index])
    }

    /// Cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        self.field.iter().copied()
    }

    pub fn iter_neighbors(&self, index: CellIndex) -> NeighborIter {
        NeighborIter::new(index, self.columns(), self.len())
    }

    /// Number of mines among the neighbours of `index`, counted from scratch.
    pub fn adjacent_mine_count(&self, index: CellIndex) -> u8 {
        self.iter_neighbors(index)
            .filter(|&neighbor| self[neighbor].is_mine())
            .count() as u8
    }

    pub fn mine_count(&self) -> CellCount {
        self.count_where(Cell::is_mine)
    }

    pub fn flagged_count(&self) -> CellCount {
        self.count_where(Cell::is_flagged)
    }

    pub fn covered_count(&self) -> CellCount {
        self.count_where(Cell::is_covered)
    }

    /// Safe cells still waiting to be uncovered, flagged or not.
    pub fn covered_safe_count(&self) -> CellCount {
        self.count_where(|cell| cell.is_covered() && !cell.is_mine())
    }

    pub fn has_exploded(&self) -> bool {
        self.field.iter().any(|cell| cell.is_exploded())
    }

    /// Covers every cell again and clears all mines and counts.
    pub fn reset(&mut self) {
        self.field.fill(Cell::COVERED_EMPTY);
    }

    /// Buries a mine at `index` and bumps the count of every safe neighbour.
    ///
    /// Returns `false` without touching the board when `index` is off the
    /// board or the cell already holds a mine.
    pub fn place_mine(&mut self, index: CellIndex) -> bool {
        match self.cell(index) {
            Some(cell) if !cell.is_mine() => {}
            _ => return false,
        }

        self.cell_mut(index).bury_mine();
        for neighbor in self.iter_neighbors(index) {
            let cell = self.cell_mut(neighbor);
            if matches!(cell.adjacent_mines(), Some(count) if count < 8) {
                cell.add_adjacent_mine();
            }
        }
        true
    }

    /// Cells that could still take a mine.
    pub fn free_cell_count(&self) -> CellCount {
        self.count_where(|cell| !cell.is_mine())
    }

    /// Uncovers a closed, unflagged cell and returns its new value.
    ///
    /// An empty cell opens its whole zero region along with the numbered
    /// border around it. Flagged cells and mines are never opened by the fill.
    /// Returns `None` and leaves the board alone when `index` is off the board
    /// or the cell is already uncovered or flagged.
    pub fn reveal(&mut self, index: CellIndex) -> Option<Cell> {
        match self.cell(index) {
            Some(cell) if cell.is_covered() && !cell.is_flagged() => {}
            _ => return None,
        }

        let cell = self.cell_mut(index);
        cell.uncover();
        let cell = *cell;

        if cell == Cell::EMPTY {
            let opened = self.flood_fill(index);
            log::trace!("flood fill from {:?} opened {} cells", self.position(index), opened);
        }
        Some(cell)
    }

    pub(crate) fn flag(&mut self, index: CellIndex) {
        self.cell_mut(index).flag();
    }

    pub(crate) fn unflag(&mut self, index: CellIndex) {
        self.cell_mut(index).unflag();
    }

    fn flood_fill(&mut self, start: CellIndex) -> CellCount {
        let mut opened = 0;
        let mut pending = Vec::from([start]);

        while let Some(index) = pending.pop() {
            for neighbor in self.iter_neighbors(index) {
                let cell = self.cell_mut(neighbor);
                if !cell.is_openable() {
                    continue;
                }

                cell.uncover();
                opened += 1;
                if *cell == Cell::EMPTY {
                    pending.push(neighbor);
                }
            }
        }
        opened
    }

    fn count_where(&self, predicate: impl Fn(Cell) -> bool) -> CellCount {
        self.field.iter().filter(|&&cell| predicate(cell)).count() as CellCount
    }

    fn cell_mut(&mut self, index: CellIndex) -> &mut Cell {
        let nd_index = self.position(index).to_nd_index();
        &mut self.field[nd_index]
    }
}

impl Index<CellIndex> for Board {
    type Output = Cell;

    fn index(&self, index: CellIndex) -> &Self::Output {
        &self.field[self.position(index).to_nd_index()]
    }
}
