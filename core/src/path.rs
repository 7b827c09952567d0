use core::ops::Index;
use serde::{Deserialize, Serialize};

use crate::*;

/// Ordered cells that spell the target word.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbeddedPath(Vec<GridPos>);

impl EmbeddedPath {
    pub(crate) fn new_unchecked(positions: Vec<GridPos>) -> Self {
        Self(positions)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> Option<GridPos> {
        self.0.first().copied()
    }

    pub fn contains(&self, pos: GridPos) -> bool {
        self.0.contains(&pos)
    }

    pub fn position(&self, pos: GridPos) -> Option<usize> {
        self.0.iter().position(|&p| p == pos)
    }

    pub fn as_slice(&self) -> &[GridPos] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = GridPos> + '_ {
        self.0.iter().copied()
    }

    /// Consecutive cells are adjacent and no cell repeats.
    pub fn is_valid_walk(&self) -> bool {
        let adjacent = self.0.windows(2).all(|pair| pair[0].is_adjacent(pair[1]));
        let distinct = self
            .0
            .iter()
            .enumerate()
            .all(|(i, pos)| !self.0[..i].contains(pos));
        adjacent && distinct
    }
}

impl Index<usize> for EmbeddedPath {
    type Output = GridPos;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

/// Result of feeding a position to the selection.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SelectOutcome {
    NoChange,
    Appended,
    Undone,
}

impl SelectOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Appended => true,
            Self::Undone => true,
        }
    }
}

/// Cells picked by the player this round. Append-only, except that the last
/// cell can be popped by tapping it again.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    positions: Vec<GridPos>,
    capacity: usize,
}

impl Selection {
    pub fn new(capacity: usize) -> Self {
        Self {
            positions: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.positions.len() >= self.capacity
    }

    pub fn last(&self) -> Option<GridPos> {
        self.positions.last().copied()
    }

    pub fn contains(&self, pos: GridPos) -> bool {
        self.positions.contains(&pos)
    }

    pub fn as_slice(&self) -> &[GridPos] {
        &self.positions
    }

    pub fn clear(&mut self) {
        self.positions.clear();
    }

    /// Tap rules: the last cell undoes, any other selected cell is ignored,
    /// a new cell is appended when valid.
    pub fn tap(&mut self, pos: GridPos) -> SelectOutcome {
        if self.last() == Some(pos) {
            self.positions.pop();
            return SelectOutcome::Undone;
        }
        if self.contains(pos) {
            return SelectOutcome::NoChange;
        }
        self.extend(pos)
    }

    /// Drag rule: append when valid, never undo.
    pub fn extend(&mut self, pos: GridPos) -> SelectOutcome {
        if !self.can_append(pos) {
            return SelectOutcome::NoChange;
        }
        self.positions.push(pos);
        SelectOutcome::Appended
    }

    pub fn can_append(&self, pos: GridPos) -> bool {
        if self.is_full() {
            return false;
        }
        match self.last() {
            None => true,
            Some(last) => last.is_adjacent(pos) && !self.contains(pos),
        }
    }
}
