use core::ops::{Index, IndexMut};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// A single lettered cell of the grid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub id: usize,
    pub pos: GridPos,
    pub letter: char,
    /// Lies on the embedded path.
    pub is_target: bool,
    /// Eliminated by the countdown.
    pub is_hidden_noise: bool,
}

impl Cell {
    pub fn new(pos: GridPos, size: Coord, letter: char, is_target: bool) -> Self {
        Self {
            id: pos.index(size),
            pos,
            letter,
            is_target,
            is_hidden_noise: false,
        }
    }

    pub const fn is_noise(&self) -> bool {
        !self.is_target
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            id: 0,
            pos: GridPos::new(0, 0),
            letter: ' ',
            is_target: false,
            is_hidden_noise: false,
        }
    }
}

/// Square letter grid, stored row-major.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    cells: Array2<Cell>,
}

impl Grid {
    /// Builds a grid by asking `letter_at` for each position in row-major order.
    pub fn from_fn(size: Coord, mut letter_at: impl FnMut(GridPos) -> (char, bool)) -> Self {
        let dim = usize::from(size);
        let mut cells: Array2<Cell> = Array2::default((dim, dim));
        for row in 0..size {
            for col in 0..size {
                let pos = GridPos::new(row, col);
                let (letter, is_target) = letter_at(pos);
                cells[pos.to_nd_index()] = Cell::new(pos, size, letter, is_target);
            }
        }
        Self { cells }
    }

    pub fn size(&self) -> Coord {
        // grids are built from a `Coord` size
        self.cells.dim().0 as Coord
    }

    pub fn contains(&self, pos: GridPos) -> bool {
        pos.in_bounds(self.size())
    }

    pub fn get(&self, pos: GridPos) -> Option<&Cell> {
        self.contains(pos).then(|| &self.cells[pos.to_nd_index()])
    }

    pub fn letter_at(&self, pos: GridPos) -> Option<char> {
        self.get(pos).map(|cell| cell.letter)
    }

    /// Cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn letters(&self) -> String {
        self.iter().map(|cell| cell.letter).collect()
    }

    pub fn hidden_count(&self) -> usize {
        self.iter().filter(|cell| cell.is_hidden_noise).count()
    }
}

impl Index<GridPos> for Grid {
    type Output = Cell;

    fn index(&self, pos: GridPos) -> &Self::Output {
        &self.cells[pos.to_nd_index()]
    }
}

impl IndexMut<GridPos> for Grid {
    fn index_mut(&mut self, pos: GridPos) -> &mut Self::Output {
        &mut self.cells[pos.to_nd_index()]
    }
}

/// A generated grid together with the path that spells the target word.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Puzzle {
    pub grid: Grid,
    pub path: EmbeddedPath,
}

impl Puzzle {
    /// Assigns `letters` along `path` and asks `noise` for every other cell.
    pub(crate) fn fill(
        size: Coord,
        letters: &[char],
        path: EmbeddedPath,
        mut noise: impl FnMut() -> char,
    ) -> Self {
        let grid = Grid::from_fn(size, |pos| match path.position(pos) {
            Some(index) => (letters[index], true),
            None => (noise(), false),
        });
        Self { grid, path }
    }

    /// Degenerate grid used when generation gives up: the alphabet in
    /// row-major order and a path over the first cells in the same order.
    pub fn placeholder(config: &RoundConfig) -> Self {
        let size = config.grid_size;
        let total = usize::from(config.total_cells());
        let length = usize::from(config.word_length).min(total);
        let path = EmbeddedPath::new_unchecked(
            (0..length).map(|i| GridPos::from_index(i, size)).collect(),
        );
        let mut alphabet = ALPHABET.iter().copied().cycle();
        let grid = Grid::from_fn(size, |pos| {
            let letter = alphabet.next().unwrap_or('A');
            (letter, pos.index(size) < length)
        });
        Self { grid, path }
    }

    pub fn size(&self) -> Coord {
        self.grid.size()
    }
}
