//! Contracts the round engine consumes from its host.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::*;

/// Where granted coins come from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoinSource {
    RoundWon,
    Share,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MissionEvent {
    RoundPlayed,
    HintUsed,
    Share,
}

pub trait Economy {
    /// Consumes one play attempt.
    fn start_game(&mut self) -> core::result::Result<(), EconomyError>;
    fn spend_coins(&mut self, amount: u32) -> core::result::Result<(), EconomyError>;
    fn add_coins(&mut self, amount: u32, source: CoinSource)
    -> core::result::Result<(), EconomyError>;
}

pub trait Leaderboard {
    fn submit(&mut self, score: u32, leaderboard_id: &str)
    -> core::result::Result<(), SubmitError>;
}

pub trait Missions {
    fn mark_progress(&mut self, event: MissionEvent);
}

pub trait Stats {
    fn register_game(&mut self, win: bool);
}

/// Host-side one-second scheduler. While scheduled, the host calls
/// [`RoundEngine::tick`] once per second.
pub trait Ticker {
    fn schedule(&mut self);
    fn cancel(&mut self);
}

// Shared handles let the host keep reading a collaborator it handed over.

impl<T: Economy + ?Sized> Economy for Rc<RefCell<T>> {
    fn start_game(&mut self) -> core::result::Result<(), EconomyError> {
        self.borrow_mut().start_game()
    }

    fn spend_coins(&mut self, amount: u32) -> core::result::Result<(), EconomyError> {
        self.borrow_mut().spend_coins(amount)
    }

    fn add_coins(
        &mut self,
        amount: u32,
        source: CoinSource,
    ) -> core::result::Result<(), EconomyError> {
        self.borrow_mut().add_coins(amount, source)
    }
}

impl<T: Leaderboard + ?Sized> Leaderboard for Rc<RefCell<T>> {
    fn submit(&mut self, score: u32, leaderboard_id: &str) -> core::result::Result<(), SubmitError> {
        self.borrow_mut().submit(score, leaderboard_id)
    }
}

impl<T: Missions + ?Sized> Missions for Rc<RefCell<T>> {
    fn mark_progress(&mut self, event: MissionEvent) {
        self.borrow_mut().mark_progress(event)
    }
}

impl<T: Stats + ?Sized> Stats for Rc<RefCell<T>> {
    fn register_game(&mut self, win: bool) {
        self.borrow_mut().register_game(win)
    }
}

impl<T: Ticker + ?Sized> Ticker for Rc<RefCell<T>> {
    fn schedule(&mut self) {
        self.borrow_mut().schedule()
    }

    fn cancel(&mut self) {
        self.borrow_mut().cancel()
    }
}

/// Everything the engine reports to or asks from the outside world.
pub struct Collaborators {
    pub economy: Box<dyn Economy>,
    pub leaderboard: Box<dyn Leaderboard>,
    pub missions: Box<dyn Missions>,
    pub stats: Box<dyn Stats>,
    pub ticker: Box<dyn Ticker>,
}

impl core::fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Collaborators").finish_non_exhaustive()
    }
}

/// Win/loss counters.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsTally {
    pub total_games: u32,
    pub total_wins: u32,
    pub total_losses: u32,
}

impl StatsTally {
    pub fn to_blob(&self) -> String {
        // plain integer struct, serialization cannot fail
        serde_json::to_string(self).unwrap_or_default()
    }

    pub fn from_blob(blob: &str) -> serde_json::Result<Self> {
        serde_json::from_str(blob)
    }
}

impl Stats for StatsTally {
    fn register_game(&mut self, win: bool) {
        self.total_games += 1;
        if win {
            self.total_wins += 1;
        } else {
            self.total_losses += 1;
        }
    }
}
