use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use wordpath_core::{
    CoinSource, Economy, EconomyError, Leaderboard, MissionEvent, Missions, SubmitError,
};

/// Attempts granted on a fresh profile and on each daily recharge.
pub const ATTEMPTS_ON_RECHARGE: u32 = 10;

/// Most coins that can be earned in one calendar day.
pub const DAILY_COINS_CAP: u32 = 20;

pub const STARTING_COINS: u32 = 20;

pub const ROUND_WON_COINS: u32 = 5;
pub const SHARE_COINS: u32 = 2;

/// Local player state: play attempts, coins and best scores.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalProfile {
    pub attempts: u32,
    pub coins: u32,
    pub earned_today: u32,
    pub day: Option<NaiveDate>,
    pub best: BTreeMap<String, u32>,
}

impl Default for LocalProfile {
    fn default() -> Self {
        Self {
            attempts: ATTEMPTS_ON_RECHARGE,
            coins: STARTING_COINS,
            earned_today: 0,
            day: None,
            best: BTreeMap::new(),
        }
    }
}

impl LocalProfile {
    /// Resets the daily counters when `today` is a new day. An empty
    /// attempts counter is recharged at the same time.
    pub fn refresh(&mut self, today: NaiveDate) {
        if self.day == Some(today) {
            return;
        }
        self.day = Some(today);
        self.earned_today = 0;
        if self.attempts == 0 {
            log::info!("attempts recharged");
            self.attempts = ATTEMPTS_ON_RECHARGE;
        }
    }

    /// Grants coins for a finished round: a win, then sharing it. Past the
    /// daily cap nothing more is granted. Returns the coins granted.
    pub fn reward_round(&mut self, won: bool, shared: bool) -> u32 {
        let grants = [
            (won, ROUND_WON_COINS, CoinSource::RoundWon),
            (shared, SHARE_COINS, CoinSource::Share),
        ];
        let mut granted = 0;
        for (due, amount, source) in grants {
            if !due {
                continue;
            }
            match self.add_coins(amount, source) {
                Ok(()) => granted += amount,
                Err(err) => log::info!("no coins for {:?}: {}", source, err),
            }
        }
        granted
    }
}

impl Economy for LocalProfile {
    fn start_game(&mut self) -> Result<(), EconomyError> {
        self.attempts = self
            .attempts
            .checked_sub(1)
            .ok_or(EconomyError::InsufficientAttempts)?;
        Ok(())
    }

    fn spend_coins(&mut self, amount: u32) -> Result<(), EconomyError> {
        self.coins = self
            .coins
            .checked_sub(amount)
            .ok_or(EconomyError::InsufficientCoins)?;
        Ok(())
    }

    fn add_coins(&mut self, amount: u32, source: CoinSource) -> Result<(), EconomyError> {
        let earned = self
            .earned_today
            .checked_add(amount)
            .filter(|&earned| earned <= DAILY_COINS_CAP)
            .ok_or(EconomyError::DailyCapReached)?;
        log::debug!("{} coins from {:?}", amount, source);
        self.coins = self.coins.saturating_add(amount);
        self.earned_today = earned;
        Ok(())
    }
}

impl Leaderboard for LocalProfile {
    fn submit(&mut self, score: u32, leaderboard_id: &str) -> Result<(), SubmitError> {
        let best = self.best.entry(leaderboard_id.into()).or_default();
        if score > *best {
            log::info!("new best on {}: {}", leaderboard_id, score);
            *best = score;
        }
        Ok(())
    }
}

/// Missions are tracked elsewhere, the terminal only reports them.
#[derive(Debug, Default)]
pub struct MissionLog;

impl Missions for MissionLog {
    fn mark_progress(&mut self, event: MissionEvent) {
        log::info!("mission progress: {:?}", event);
    }
}

/// JSON blobs in a directory, one per collaborator. Without a directory
/// nothing is read or written.
#[derive(Debug, Default)]
pub struct Store {
    dir: Option<PathBuf>,
}

impl Store {
    pub const PROFILE_KEY: &'static str = "profile";
    pub const STATS_KEY: &'static str = "stats";
    pub const DAILY_KEY: &'static str = "daily";

    pub fn new(dir: Option<PathBuf>) -> Self {
        Self { dir }
    }

    fn path(&self, key: &str) -> Option<PathBuf> {
        self.dir.as_ref().map(|dir| dir.join(format!("{key}.json")))
    }

    pub fn load(&self, key: &str) -> Option<String> {
        let path = self.path(key)?;
        match fs::read_to_string(&path) {
            Ok(blob) => Some(blob),
            Err(err) => {
                log::debug!("no saved {} at {}: {}", key, path.display(), err);
                None
            }
        }
    }

    pub fn save(&self, key: &str, blob: &str) -> anyhow::Result<()> {
        let Some(path) = self.path(key) else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        fs::write(&path, blob).with_context(|| format!("writing {}", path.display()))
    }

    pub fn load_profile(&self) -> LocalProfile {
        self.load(Self::PROFILE_KEY)
            .and_then(|blob| match serde_json::from_str(&blob) {
                Ok(profile) => Some(profile),
                Err(err) => {
                    log::error!("Could not read saved profile: {:?}", err);
                    None
                }
            })
            .unwrap_or_default()
    }

    pub fn save_profile(&self, profile: &LocalProfile) -> anyhow::Result<()> {
        self.save(Self::PROFILE_KEY, &serde_json::to_string(profile)?)
    }
}
