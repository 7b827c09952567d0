use serde::{Deserialize, Serialize};

/// Single coordinate axis used for grid size and positions.
pub type Coord = u8;

/// Count type used for word lengths and total-cell counts.
pub type CellCount = u16;

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Position of a cell on the square grid, `(row, col)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GridPos {
    pub row: Coord,
    pub col: Coord,
}

impl GridPos {
    pub const fn new(row: Coord, col: Coord) -> Self {
        Self { row, col }
    }

    /// Row-major index of this position on a grid of `size` columns.
    pub const fn index(self, size: Coord) -> usize {
        self.row as usize * size as usize + self.col as usize
    }

    pub const fn from_index(index: usize, size: Coord) -> Self {
        let size = size as usize;
        Self::new((index / size) as Coord, (index % size) as Coord)
    }

    pub const fn in_bounds(self, size: Coord) -> bool {
        self.row < size && self.col < size
    }

    /// Chebyshev distance of exactly one, all eight directions.
    pub fn is_adjacent(self, other: GridPos) -> bool {
        self.row.abs_diff(other.row).max(self.col.abs_diff(other.col)) == 1
    }

    pub fn iter_neighbors(self, size: Coord) -> NeighborIter {
        NeighborIter::new(self, size)
    }

    pub(crate) fn to_nd_index(self) -> [usize; 2] {
        [self.row.into(), self.col.into()]
    }
}

impl From<(Coord, Coord)> for GridPos {
    fn from((row, col): (Coord, Coord)) -> Self {
        Self::new(row, col)
    }
}

// Row-major order; the daily generator depends on it.
const DISPLACEMENTS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Applies `delta` to `pos`, returning a value only when it remains in bounds.
fn apply_delta(pos: GridPos, delta: (i8, i8), size: Coord) -> Option<GridPos> {
    let row = pos.row.checked_add_signed(delta.0)?;
    let col = pos.col.checked_add_signed(delta.1)?;
    let next = GridPos::new(row, col);
    next.in_bounds(size).then_some(next)
}

#[derive(Debug)]
pub struct NeighborIter {
    center: GridPos,
    size: Coord,
    index: u8,
}

impl NeighborIter {
    fn new(center: GridPos, size: Coord) -> Self {
        Self {
            center,
            size,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = GridPos;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let delta = *DISPLACEMENTS.get(usize::from(self.index))?;
            self.index += 1;

            if let Some(next) = apply_delta(self.center, delta, self.size) {
                return Some(next);
            }
        }
    }
}
