use serde::{Deserialize, Serialize};

pub use cell::*;
pub use collab::*;
pub use daily::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use path::*;
pub use scoring::*;
pub use types::*;
pub use words::*;

mod cell;
mod collab;
mod daily;
mod engine;
mod error;
mod generator;
mod path;
mod scoring;
mod types;
mod words;

/// Letters used to fill noise cells.
pub const ALPHABET: [char; 26] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S',
    'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
];

/// Per-round constants.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoundConfig {
    pub grid_size: Coord,
    pub word_length: CellCount,
    pub total_seconds: u32,
    /// Seconds between two noise eliminations.
    pub elimination_interval: u32,
    /// Remaining seconds at which the starting cell is revealed.
    pub auto_hint_at: u32,
    pub hint_cost: u32,
    /// Walks tried by the random generator before falling back.
    pub generation_attempts: u32,
    pub leaderboard_id: String,
}

impl RoundConfig {
    pub fn new(
        grid_size: Coord,
        word_length: CellCount,
        total_seconds: u32,
        elimination_interval: u32,
        auto_hint_at: u32,
    ) -> Self {
        let grid_size = grid_size.max(1);
        let word_length = word_length.clamp(1, mult(grid_size, grid_size));
        let total_seconds = total_seconds.max(1);
        let elimination_interval = elimination_interval.max(1);
        let auto_hint_at = auto_hint_at.min(total_seconds);
        Self {
            grid_size,
            word_length,
            total_seconds,
            elimination_interval,
            auto_hint_at,
            ..Self::default()
        }
    }

    /// Re-applies the clamping of [`RoundConfig::new`], keeping the other fields.
    pub fn sanitized(self) -> Self {
        Self {
            hint_cost: self.hint_cost,
            generation_attempts: self.generation_attempts,
            leaderboard_id: self.leaderboard_id,
            ..Self::new(
                self.grid_size,
                self.word_length,
                self.total_seconds,
                self.elimination_interval,
                self.auto_hint_at,
            )
        }
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.grid_size, self.grid_size)
    }
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            grid_size: 4,
            word_length: 10,
            total_seconds: 90,
            elimination_interval: 10,
            auto_hint_at: 45,
            hint_cost: 5,
            generation_attempts: MAX_ATTEMPTS,
            leaderboard_id: "wordpath.best".into(),
        }
    }
}
