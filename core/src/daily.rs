use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::*;

/// Tries per calendar day that cost nothing.
pub const FREE_DAILY_TRIES: u32 = 1;

/// Coins charged for every try past the free ones.
pub const EXTRA_TRY_COST: u32 = 5;

/// Per-day bookkeeping of the daily challenge: the day's seed and word, how
/// many tries were spent and whether the challenge is over.
#[derive(Clone, Debug, PartialEq)]
pub struct DailyChallenge {
    day: NaiveDate,
    seed: i64,
    target_word: String,
    tries_used: u32,
    completed: bool,
    book: WordBook,
}

#[derive(Serialize, Deserialize)]
struct Saved {
    day: NaiveDate,
    tries_used: u32,
    completed: bool,
}

impl DailyChallenge {
    pub fn new(today: NaiveDate) -> Self {
        Self::with_book(today, WordBook::daily())
    }

    pub fn with_book(today: NaiveDate, book: WordBook) -> Self {
        let seed = daily_seed(today);
        Self {
            day: today,
            seed,
            target_word: book.for_seed(seed).into(),
            tries_used: 0,
            completed: false,
            book,
        }
    }

    pub fn day(&self) -> NaiveDate {
        self.day
    }

    pub fn day_key(&self) -> String {
        day_key(self.day)
    }

    pub fn seed(&self) -> i64 {
        self.seed
    }

    pub fn target_word(&self) -> &str {
        &self.target_word
    }

    pub fn tries_used(&self) -> u32 {
        self.tries_used
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn free_try_available(&self) -> bool {
        self.tries_used < FREE_DAILY_TRIES
    }

    /// Rolls over to `today` when the calendar day changed. Returns whether it did.
    pub fn refresh_if_new_day(&mut self, today: NaiveDate) -> bool {
        if today == self.day {
            return false;
        }
        log::info!("daily challenge rolls over to {}", day_key(today));
        *self = Self::with_book(today, core::mem::replace(&mut self.book, WordBook::daily()));
        true
    }

    /// Accounts for one more try today and returns the seed and word to play.
    ///
    /// The free try is used first, later ones are paid through `economy`. A
    /// failed charge leaves the tracker untouched.
    pub fn begin_attempt(
        &mut self,
        today: NaiveDate,
        economy: &mut dyn Economy,
    ) -> Result<(i64, String)> {
        self.refresh_if_new_day(today);
        if self.completed {
            return Err(RoundError::DailyCompleted);
        }
        if !self.free_try_available() {
            economy.spend_coins(EXTRA_TRY_COST)?;
        }
        self.tries_used += 1;
        Ok((self.seed, self.target_word.clone()))
    }

    /// The day's challenge is over, whatever the result.
    pub fn finish(&mut self) {
        self.completed = true;
    }

    pub fn to_blob(&self) -> String {
        let saved = Saved {
            day: self.day,
            tries_used: self.tries_used,
            completed: self.completed,
        };
        serde_json::to_string(&saved).unwrap_or_default()
    }

    /// Restores saved progress. Seed and word are recomputed from the saved
    /// day and `book`, which must be the book the progress was made with.
    pub fn from_blob(blob: &str, book: WordBook) -> serde_json::Result<Self> {
        let saved: Saved = serde_json::from_str(blob)?;
        Ok(Self {
            tries_used: saved.tries_used,
            completed: saved.completed,
            ..Self::with_book(saved.day, book)
        })
    }
}
