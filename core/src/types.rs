/// Row or column coordinate, also used for the board dimensions.
pub type Coord = u16;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u32;

/// Row-major position of a cell, `row * columns + col`.
pub type CellIndex = usize;

/// Two-dimensional position `(row, col)`.
pub type Coord2 = (Coord, Coord);

/// Host pixel coordinate or length.
pub type Pixel = u32;

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    a as CellCount * b as CellCount
}

/// `(row, col)` offsets of the eight surrounding cells.
const DISPLACEMENTS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Walks the in-bounds neighbours of a cell on the linear row-major array.
///
/// A neighbour `center + dr * columns + dc` is kept only when it lies inside
/// `0..total` and its column `col + dc` lies inside `0..columns`, so nothing
/// wraps across a row edge.
#[derive(Clone, Debug)]
pub struct NeighborIter {
    center: CellIndex,
    columns: usize,
    total: usize,
    index: u8,
}

impl NeighborIter {
    pub fn new(center: CellIndex, columns: Coord, total: usize) -> Self {
        Self {
            center,
            columns: columns.into(),
            total,
            index: 0,
        }
    }

    fn offset(&self, (dr, dc): (isize, isize)) -> Option<CellIndex> {
        let col = (self.center % self.columns).checked_add_signed(dc)?;
        if col >= self.columns {
            return None;
        }

        let delta = dr.checked_mul(self.columns.try_into().ok()?)? + dc;
        let neighbor = self.center.checked_add_signed(delta)?;
        (neighbor < self.total).then_some(neighbor)
    }
}

impl Iterator for NeighborIter {
    type Item = CellIndex;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(&delta) = DISPLACEMENTS.get(usize::from(self.index)) {
            self.index += 1;
            if let Some(neighbor) = self.offset(delta) {
                return Some(neighbor);
            }
        }
        None
    }
}
