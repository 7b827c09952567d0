use std::collections::BTreeSet;

use chrono::NaiveDate;
use rand::prelude::*;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - Ready -> Running
/// - Running -> Finished
/// - Finished -> Running
/// - Running -> Running (restart)
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundStatus {
    Ready,
    Running,
    Finished { win: bool },
}

impl RoundStatus {
    pub const fn is_running(self) -> bool {
        matches!(self, Self::Running)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Finished { .. })
    }

    pub const fn is_won(self) -> bool {
        matches!(self, Self::Finished { win: true })
    }
}

impl Default for RoundStatus {
    fn default() -> Self {
        Self::Ready
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundOutcome {
    pub win: bool,
    pub score: u32,
    pub elapsed: u32,
    pub daily: bool,
    pub word: String,
}

/// Notifications sent to subscribers right after the state changed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RoundEvent {
    StatusChanged(RoundStatus),
    /// Grid replaced or a noise cell hidden.
    CellsChanged,
    SelectionChanged,
    Tick { seconds_left: u32 },
    /// Starting cell revealed by the countdown.
    AutoHint(GridPos),
    /// Path cell revealed by a paid hint.
    HintRevealed { index: usize, pos: GridPos },
    Finished(RoundOutcome),
}

pub type Listener = Box<dyn FnMut(&RoundEvent)>;

/// Owns one round at a time: the puzzle, the countdown and the player's
/// selection. All mutation goes through `&mut self`, so the host serializes
/// input events and timer ticks on a single thread.
pub struct RoundEngine {
    config: RoundConfig,
    words: WordBook,
    rng: SmallRng,
    collab: Collaborators,
    listeners: Vec<Listener>,
    status: RoundStatus,
    target_word: String,
    puzzle: Puzzle,
    seconds_left: u32,
    selection: Selection,
    auto_hint_revealed: bool,
    hinted: BTreeSet<usize>,
    score: u32,
    dragging: bool,
    daily: bool,
}

impl RoundEngine {
    pub fn new(
        config: RoundConfig,
        words: WordBook,
        collab: Collaborators,
        seed: u64,
    ) -> Result<Self> {
        let config = config.sanitized();
        let word_length = usize::from(config.word_length);
        if words.word_length() != word_length {
            return Err(GenerationError::WordDoesNotFit {
                len: words.word_length(),
            }
            .into());
        }

        Ok(Self {
            puzzle: Puzzle::placeholder(&config),
            seconds_left: config.total_seconds,
            selection: Selection::new(word_length),
            config,
            words,
            rng: SmallRng::seed_from_u64(seed),
            collab,
            listeners: Vec::new(),
            status: RoundStatus::Ready,
            target_word: String::new(),
            auto_hint_revealed: false,
            hinted: BTreeSet::new(),
            score: 0,
            dragging: false,
            daily: false,
        })
    }

    pub fn config(&self) -> &RoundConfig {
        &self.config
    }

    pub fn status(&self) -> RoundStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status.is_running()
    }

    pub fn target_word(&self) -> &str {
        &self.target_word
    }

    pub fn grid(&self) -> &Grid {
        &self.puzzle.grid
    }

    pub fn embedded_path(&self) -> &EmbeddedPath {
        &self.puzzle.path
    }

    pub fn seconds_left(&self) -> u32 {
        self.seconds_left
    }

    pub fn elapsed(&self) -> u32 {
        self.config.total_seconds - self.seconds_left
    }

    pub fn selection(&self) -> &[GridPos] {
        self.selection.as_slice()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_daily(&self) -> bool {
        self.daily
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn auto_hint_revealed(&self) -> bool {
        self.auto_hint_revealed
    }

    /// Starting cell, once the countdown has revealed it.
    pub fn auto_hint_position(&self) -> Option<GridPos> {
        self.auto_hint_revealed
            .then(|| self.puzzle.path.first())
            .flatten()
    }

    /// Path indices revealed by paid hints.
    pub fn hinted_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.hinted.iter().copied()
    }

    pub fn outcome(&self) -> Option<RoundOutcome> {
        match self.status {
            RoundStatus::Finished { win } => Some(RoundOutcome {
                win,
                score: self.score,
                elapsed: self.elapsed(),
                daily: self.daily,
                word: self.target_word.clone(),
            }),
            _ => None,
        }
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&RoundEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Starts a standard round with a random word. Consumes one attempt from
    /// the economy; if that fails nothing changes.
    pub fn start_round(&mut self) -> Result<()> {
        self.collab.economy.start_game()?;

        let word = self.words.choose(&mut self.rng).to_owned();
        let generator = RandomPathGenerator::new(self.rng.random())
            .with_max_attempts(self.config.generation_attempts);
        let puzzle = match generator.generate(&word, self.config.grid_size) {
            Ok(puzzle) => puzzle,
            Err(err) => {
                log::warn!("{}, playing placeholder grid for {}", err, word);
                Puzzle::placeholder(&self.config)
            }
        };

        self.begin(word, puzzle, false);
        Ok(())
    }

    /// Starts a round on the deterministic puzzle for `seed`. Does not touch
    /// the economy.
    pub fn start_daily(&mut self, seed: i64, word: &str) -> Result<()> {
        let word = word.trim().to_uppercase();
        let len = word.chars().count();
        if len != usize::from(self.config.word_length) {
            return Err(GenerationError::WordDoesNotFit { len }.into());
        }
        let puzzle = SeededPathGenerator::new(seed).generate(&word, self.config.grid_size)?;

        self.begin(word, puzzle, true);
        Ok(())
    }

    /// Spends one try of `challenge` and starts its round.
    pub fn start_daily_challenge(
        &mut self,
        challenge: &mut DailyChallenge,
        today: NaiveDate,
    ) -> Result<()> {
        challenge.refresh_if_new_day(today);
        let len = challenge.target_word().chars().count();
        if len != usize::from(self.config.word_length) {
            return Err(GenerationError::WordDoesNotFit { len }.into());
        }
        let (seed, word) = challenge.begin_attempt(today, &mut *self.collab.economy)?;
        self.start_daily(seed, &word)
    }

    fn begin(&mut self, word: String, puzzle: Puzzle, daily: bool) {
        self.collab.ticker.cancel();

        self.target_word = word;
        self.puzzle = puzzle;
        self.daily = daily;
        self.selection.clear();
        self.hinted.clear();
        self.auto_hint_revealed = false;
        self.dragging = false;
        self.score = 0;
        self.seconds_left = self.config.total_seconds;
        self.status = RoundStatus::Running;

        self.collab.ticker.schedule();
        log::info!(
            "{} round started ({} seconds)",
            if daily { "daily" } else { "standard" },
            self.seconds_left
        );

        self.emit(RoundEvent::CellsChanged);
        self.emit(RoundEvent::SelectionChanged);
        self.emit(RoundEvent::StatusChanged(self.status));
    }

    /// One second of countdown. Ignored unless running.
    pub fn tick(&mut self) {
        if !self.status.is_running() {
            return;
        }

        self.seconds_left = self.seconds_left.saturating_sub(1);
        self.emit(RoundEvent::Tick {
            seconds_left: self.seconds_left,
        });

        let elapsed = self.elapsed();
        if elapsed > 0 && elapsed % self.config.elimination_interval == 0 {
            self.eliminate_noise_cell();
        }

        if self.seconds_left == 0 {
            self.stop_round(false);
            return;
        }

        if !self.auto_hint_revealed && self.seconds_left == self.config.auto_hint_at {
            self.auto_hint_revealed = true;
            if let Some(start) = self.puzzle.path.first() {
                log::debug!("auto hint reveals {:?}", start);
                self.emit(RoundEvent::AutoHint(start));
            }
        }
    }

    /// Hides one random noise cell that is neither on the path nor hidden yet.
    fn eliminate_noise_cell(&mut self) -> Option<GridPos> {
        let candidates: Vec<GridPos> = self
            .puzzle
            .grid
            .iter()
            .filter(|cell| !cell.is_hidden_noise && !self.puzzle.path.contains(cell.pos))
            .map(|cell| cell.pos)
            .collect();
        let pos = *candidates.choose(&mut self.rng)?;

        self.puzzle.grid[pos].is_hidden_noise = true;
        log::debug!("noise cell {:?} hidden at {}s", pos, self.elapsed());
        self.emit(RoundEvent::CellsChanged);
        Some(pos)
    }

    /// Ends the running round and reports it. Ignored unless running.
    pub fn stop_round(&mut self, win: bool) {
        if !self.status.is_running() {
            return;
        }

        self.status = RoundStatus::Finished { win };
        self.collab.ticker.cancel();
        self.dragging = false;

        self.collab.missions.mark_progress(MissionEvent::RoundPlayed);
        self.collab.stats.register_game(win);
        if win {
            let board = &self.config.leaderboard_id;
            if let Err(err) = self.collab.leaderboard.submit(self.score, board) {
                log::warn!("{}", err);
            }
        } else if !self.selection.is_empty() {
            self.selection.clear();
            self.emit(RoundEvent::SelectionChanged);
        }

        log::info!(
            "round finished: {} with {} points after {}s",
            if win { "won" } else { "lost" },
            self.score,
            self.elapsed()
        );
        self.emit(RoundEvent::StatusChanged(self.status));
        if let Some(outcome) = self.outcome() {
            self.emit(RoundEvent::Finished(outcome));
        }
    }

    /// Charges the hint cost and reveals one path cell that is neither
    /// revealed nor selected yet. Returns the revealed path index.
    ///
    /// Nothing is charged when no cell is left to reveal or the round is not
    /// running.
    pub fn use_hint(&mut self) -> Result<Option<usize>> {
        if !self.status.is_running() {
            return Ok(None);
        }

        let eligible: Vec<usize> = self
            .puzzle
            .path
            .iter()
            .enumerate()
            .filter(|&(index, pos)| !self.hinted.contains(&index) && !self.selection.contains(pos))
            .map(|(index, _)| index)
            .collect();
        if eligible.is_empty() {
            return Ok(None);
        }

        self.collab.economy.spend_coins(self.config.hint_cost)?;

        let Some(&index) = eligible.choose(&mut self.rng) else {
            return Ok(None);
        };
        self.hinted.insert(index);
        self.collab.missions.mark_progress(MissionEvent::HintUsed);

        let pos = self.puzzle.path[index];
        log::debug!("hint reveals path index {} at {:?}", index, pos);
        self.emit(RoundEvent::HintRevealed { index, pos });
        Ok(Some(index))
    }

    /// Tap on a cell: undo the last one, ignore other selected ones, append
    /// a valid new one.
    pub fn tap(&mut self, pos: GridPos) -> SelectOutcome {
        if !self.accepts_input_at(pos) {
            return SelectOutcome::NoChange;
        }
        let outcome = self.selection.tap(pos);
        log::trace!("tap {:?}: {:?}", pos, outcome);
        self.after_select(outcome);
        outcome
    }

    pub fn begin_drag(&mut self) {
        if self.status.is_running() {
            self.dragging = true;
        }
    }

    /// Drag over a cell: append it when valid, never undo.
    pub fn drag_over(&mut self, pos: GridPos) -> SelectOutcome {
        if !self.dragging || !self.accepts_input_at(pos) {
            return SelectOutcome::NoChange;
        }
        let outcome = self.selection.extend(pos);
        log::trace!("drag over {:?}: {:?}", pos, outcome);
        self.after_select(outcome);
        outcome
    }

    pub fn end_drag(&mut self) {
        self.dragging = false;
        if self.status.is_running() {
            self.evaluate_if_complete();
        }
    }

    pub fn reset_selection(&mut self) {
        self.dragging = false;
        if !self.selection.is_empty() {
            self.selection.clear();
            self.emit(RoundEvent::SelectionChanged);
        }
    }

    /// Summary of a finished round for sharing. Counts as a share action.
    pub fn share_text(&mut self) -> Option<String> {
        let outcome = self.outcome()?;
        self.collab.missions.mark_progress(MissionEvent::Share);

        let kind = if outcome.daily { "Daily" } else { "Round" };
        Some(if outcome.win {
            format!(
                "WordPath {}: {} found in {}s, {} points",
                kind,
                outcome.word,
                outcome.elapsed,
                outcome.score
            )
        } else {
            format!("WordPath {}: {} got away", kind, outcome.word)
        })
    }

    fn accepts_input_at(&self, pos: GridPos) -> bool {
        self.status.is_running() && self.puzzle.grid.contains(pos)
    }

    fn after_select(&mut self, outcome: SelectOutcome) {
        if outcome.has_update() {
            self.emit(RoundEvent::SelectionChanged);
        }
        if outcome == SelectOutcome::Appended {
            self.evaluate_if_complete();
        }
    }

    fn evaluate_if_complete(&mut self) {
        if self.selection.len() != usize::from(self.config.word_length) {
            return;
        }

        let formed: String = self
            .selection
            .as_slice()
            .iter()
            .filter_map(|&pos| self.puzzle.grid.letter_at(pos))
            .collect();
        if formed == self.target_word {
            self.score = score_for_elapsed(self.elapsed());
            self.stop_round(true);
        } else {
            log::debug!("selection spells {}, clearing", formed);
            self.selection.clear();
            self.emit(RoundEvent::SelectionChanged);
        }
    }

    fn emit(&mut self, event: RoundEvent) {
        for listener in &mut self.listeners {
            listener(&event);
        }
    }
}

impl core::fmt::Debug for RoundEngine {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RoundEngine")
            .field("status", &self.status)
            .field("target_word", &self.target_word)
            .field("seconds_left", &self.seconds_left)
            .field("selection", &self.selection)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Wallet {
        attempts: u32,
        coins: u32,
        spent: u32,
    }

    impl Economy for Wallet {
        fn start_game(&mut self) -> core::result::Result<(), EconomyError> {
            self.attempts = self
                .attempts
                .checked_sub(1)
                .ok_or(EconomyError::InsufficientAttempts)?;
            Ok(())
        }

        fn spend_coins(&mut self, amount: u32) -> core::result::Result<(), EconomyError> {
            self.coins = self
                .coins
                .checked_sub(amount)
                .ok_or(EconomyError::InsufficientCoins)?;
            self.spent += amount;
            Ok(())
        }

        fn add_coins(
            &mut self,
            amount: u32,
            _source: CoinSource,
        ) -> core::result::Result<(), EconomyError> {
            self.coins += amount;
            Ok(())
        }
    }

    #[derive(Default)]
    struct Board {
        submitted: Vec<(u32, String)>,
        offline: bool,
    }

    impl Leaderboard for Board {
        fn submit(
            &mut self,
            score: u32,
            leaderboard_id: &str,
        ) -> core::result::Result<(), SubmitError> {
            if self.offline {
                return Err(SubmitError("offline".into()));
            }
            self.submitted.push((score, leaderboard_id.into()));
            Ok(())
        }
    }

    #[derive(Default)]
    struct Progress(Vec<MissionEvent>);

    impl Missions for Progress {
        fn mark_progress(&mut self, event: MissionEvent) {
            self.0.push(event);
        }
    }

    #[derive(Default)]
    struct Clock {
        active: bool,
        scheduled: u32,
        cancelled: u32,
        scheduled_while_active: bool,
    }

    impl Ticker for Clock {
        fn schedule(&mut self) {
            self.scheduled_while_active |= self.active;
            self.active = true;
            self.scheduled += 1;
        }

        fn cancel(&mut self) {
            self.active = false;
            self.cancelled += 1;
        }
    }

    struct Fakes {
        wallet: Rc<RefCell<Wallet>>,
        board: Rc<RefCell<Board>>,
        progress: Rc<RefCell<Progress>>,
        stats: Rc<RefCell<StatsTally>>,
        clock: Rc<RefCell<Clock>>,
        events: Rc<RefCell<Vec<RoundEvent>>>,
    }

    fn engine_with(config: RoundConfig) -> (RoundEngine, Fakes) {
        let fakes = Fakes {
            wallet: Rc::new(RefCell::new(Wallet {
                attempts: 3,
                coins: 20,
                spent: 0,
            })),
            board: Default::default(),
            progress: Default::default(),
            stats: Default::default(),
            clock: Default::default(),
            events: Default::default(),
        };
        let collab = Collaborators {
            economy: Box::new(fakes.wallet.clone()),
            leaderboard: Box::new(fakes.board.clone()),
            missions: Box::new(fakes.progress.clone()),
            stats: Box::new(fakes.stats.clone()),
            ticker: Box::new(fakes.clock.clone()),
        };
        let mut engine = RoundEngine::new(config, WordBook::standard(), collab, 11).unwrap();
        let events = fakes.events.clone();
        engine.subscribe(move |event| events.borrow_mut().push(event.clone()));
        (engine, fakes)
    }

    fn engine() -> (RoundEngine, Fakes) {
        engine_with(RoundConfig::default())
    }

    fn pos(row: Coord, col: Coord) -> GridPos {
        GridPos::new(row, col)
    }

    /// Daily puzzle for seed 20251110: A(1,0) L(0,0) G(0,1) O(1,2) R(2,1)
    /// I(3,0) T(2,0) M(3,1) O(2,2) S(2,3) over "LGOT AGOD TROS IMYL".
    fn known_daily(engine: &mut RoundEngine) -> Vec<GridPos> {
        engine.start_daily(20251110, "algoritmos").unwrap();
        engine.embedded_path().iter().collect()
    }

    fn ticks(engine: &mut RoundEngine, count: u32) {
        for _ in 0..count {
            engine.tick();
        }
    }

    #[test]
    fn starts_ready_and_ignores_input() {
        let (mut engine, fakes) = engine();

        assert_eq!(engine.status(), RoundStatus::Ready);
        assert_eq!(engine.tap(pos(0, 0)), SelectOutcome::NoChange);
        engine.tick();
        assert_eq!(engine.seconds_left(), 90);
        assert_eq!(engine.use_hint(), Ok(None));
        assert_eq!(fakes.wallet.borrow().spent, 0);
    }

    #[test]
    fn start_round_embeds_a_word_from_the_book() {
        let (mut engine, fakes) = engine();

        engine.start_round().unwrap();

        assert_eq!(engine.status(), RoundStatus::Running);
        assert_eq!(engine.seconds_left(), 90);
        assert!(!engine.is_daily());
        assert!(WordBook::standard().contains(engine.target_word()));
        assert!(engine.embedded_path().is_valid_walk());
        let spelled: String = engine
            .embedded_path()
            .iter()
            .map(|p| engine.grid()[p].letter)
            .collect();
        assert_eq!(spelled, engine.target_word());
        assert_eq!(fakes.wallet.borrow().attempts, 2);
        assert!(fakes.clock.borrow().active);
        assert_eq!(
            fakes.events.borrow().last(),
            Some(&RoundEvent::StatusChanged(RoundStatus::Running))
        );
    }

    #[test]
    fn start_round_without_attempts_changes_nothing() {
        let (mut engine, fakes) = engine();
        fakes.wallet.borrow_mut().attempts = 0;

        let err = engine.start_round().unwrap_err();

        assert_eq!(err, RoundError::Economy(EconomyError::InsufficientAttempts));
        assert_eq!(engine.status(), RoundStatus::Ready);
        assert_eq!(fakes.clock.borrow().scheduled, 0);
        assert!(fakes.events.borrow().is_empty());
    }

    #[test]
    fn failed_generation_falls_back_to_placeholder() {
        let config = RoundConfig {
            generation_attempts: 0,
            ..RoundConfig::default()
        };
        let (mut engine, _fakes) = engine_with(config);

        engine.start_round().unwrap();

        assert!(engine.is_running());
        assert_eq!(engine.grid().letters(), "ABCDEFGHIJKLMNOP");
        assert_eq!(engine.embedded_path().len(), 10);
    }

    #[test]
    fn daily_round_is_deterministic_and_free() {
        let (mut engine, fakes) = engine();

        let path = known_daily(&mut engine);
        let letters = engine.grid().letters();
        engine.start_daily(20251110, "ALGORITMOS").unwrap();

        assert!(engine.is_daily());
        assert_eq!(engine.target_word(), "ALGORITMOS");
        assert_eq!(engine.embedded_path().as_slice(), path.as_slice());
        assert_eq!(engine.grid().letters(), letters);
        assert_eq!(letters, "LGOTAGODTROSIMYL");
        assert_eq!(fakes.wallet.borrow().attempts, 3);
    }

    #[test]
    fn daily_word_of_wrong_length_is_rejected() {
        let (mut engine, fakes) = engine();

        let err = engine.start_daily(1, "CORTO").unwrap_err();

        assert_eq!(err, RoundError::Generation(GenerationError::WordDoesNotFit { len: 5 }));
        assert_eq!(engine.status(), RoundStatus::Ready);
        assert_eq!(fakes.clock.borrow().scheduled, 0);
    }

    #[test]
    fn tapping_the_path_wins_with_time_based_score() {
        let (mut engine, fakes) = engine();
        let path = known_daily(&mut engine);
        ticks(&mut engine, 12);

        for &p in &path {
            engine.tap(p);
        }

        assert_eq!(engine.status(), RoundStatus::Finished { win: true });
        assert_eq!(engine.score(), score_for_elapsed(12));
        assert_eq!(engine.score(), 260);
        assert_eq!(
            fakes.board.borrow().submitted,
            [(260, String::from("wordpath.best"))]
        );
        assert_eq!(fakes.stats.borrow().total_wins, 1);
        assert_eq!(fakes.progress.borrow().0, [MissionEvent::RoundPlayed]);
        assert!(!fakes.clock.borrow().active);
        assert_eq!(
            fakes.events.borrow().last(),
            Some(&RoundEvent::Finished(RoundOutcome {
                win: true,
                score: 260,
                elapsed: 12,
                daily: true,
                word: "ALGORITMOS".into(),
            }))
        );
    }

    #[test]
    fn wrong_full_selection_is_cleared() {
        let (mut engine, _fakes) = engine();
        let mut path = known_daily(&mut engine);
        // ends on D instead of S
        path[9] = pos(1, 3);

        for &p in &path {
            engine.tap(p);
        }

        assert!(engine.is_running());
        assert!(engine.selection().is_empty());
    }

    #[test]
    fn tap_undo_and_ignore_rules() {
        let (mut engine, _fakes) = engine();
        known_daily(&mut engine);
        let (a, b, c) = (pos(1, 0), pos(0, 0), pos(0, 1));

        engine.tap(a);
        engine.tap(b);
        assert_eq!(engine.tap(b), SelectOutcome::Undone);
        assert_eq!(engine.selection(), [a]);

        engine.tap(b);
        engine.tap(c);
        assert_eq!(engine.tap(a), SelectOutcome::NoChange);
        assert_eq!(engine.tap(pos(3, 3)), SelectOutcome::NoChange);
        assert_eq!(engine.tap(pos(4, 0)), SelectOutcome::NoChange);
        assert_eq!(engine.selection(), [a, b, c]);
    }

    #[test]
    fn dragging_along_the_path_wins() {
        let (mut engine, _fakes) = engine();
        let path = known_daily(&mut engine);

        assert_eq!(engine.drag_over(path[0]), SelectOutcome::NoChange);
        engine.begin_drag();
        for &p in &path[..9] {
            engine.drag_over(p);
            // revisiting during a drag never undoes
            engine.drag_over(p);
        }
        assert_eq!(engine.selection().len(), 9);
        engine.drag_over(path[9]);

        assert!(engine.status().is_won());
        assert_eq!(engine.score(), 300);
        engine.end_drag();
        assert!(!engine.is_dragging());
    }

    #[test]
    fn auto_hint_reveals_start_once() {
        let (mut engine, fakes) = engine();
        let path = known_daily(&mut engine);

        ticks(&mut engine, 44);
        assert_eq!(engine.auto_hint_position(), None);
        engine.tick();
        assert_eq!(engine.seconds_left(), 45);
        assert_eq!(engine.auto_hint_position(), Some(path[0]));
        ticks(&mut engine, 10);

        let auto_hints = fakes
            .events
            .borrow()
            .iter()
            .filter(|event| matches!(event, RoundEvent::AutoHint(_)))
            .count();
        assert_eq!(auto_hints, 1);
    }

    #[test]
    fn eliminations_follow_interval_and_spare_the_path() {
        let (mut engine, _fakes) = engine();
        known_daily(&mut engine);

        ticks(&mut engine, 9);
        assert_eq!(engine.grid().hidden_count(), 0);
        engine.tick();
        assert_eq!(engine.grid().hidden_count(), 1);

        ticks(&mut engine, 70);
        // only six noise cells on a 4x4 grid
        assert_eq!(engine.grid().hidden_count(), 6);
        for cell in engine.grid().iter() {
            assert_eq!(cell.is_hidden_noise, !engine.embedded_path().contains(cell.pos));
        }
    }

    #[test]
    fn full_round_triggers_nine_eliminations_then_times_out() {
        let config = RoundConfig::new(5, 10, 90, 10, 45);
        let (mut engine, fakes) = engine_with(config);
        engine.start_daily(20251110, "ALGORITMOS").unwrap();
        engine.tap(engine.embedded_path()[0]);

        ticks(&mut engine, 95);

        let hides = fakes
            .events
            .borrow()
            .iter()
            .filter(|event| **event == RoundEvent::CellsChanged)
            .count();
        // one extra CellsChanged comes from starting the round
        assert_eq!(hides, 1 + 9);
        assert_eq!(engine.grid().hidden_count(), 9);
        assert!(engine.grid().iter().all(|cell| !(cell.is_hidden_noise && cell.is_target)));

        assert_eq!(engine.status(), RoundStatus::Finished { win: false });
        assert_eq!(engine.seconds_left(), 0);
        assert!(engine.selection().is_empty());
        assert_eq!(fakes.stats.borrow().total_losses, 1);
        assert!(fakes.board.borrow().submitted.is_empty());
        assert!(!fakes.clock.borrow().active);
    }

    #[test]
    fn hints_are_paid_and_skip_selected_cells() {
        let (mut engine, fakes) = engine();
        let path = known_daily(&mut engine);
        fakes.wallet.borrow_mut().coins = 100;
        for &p in &path[..3] {
            engine.tap(p);
        }

        let mut revealed = Vec::new();
        while let Some(index) = engine.use_hint().unwrap() {
            revealed.push(index);
        }

        revealed.sort_unstable();
        assert_eq!(revealed, (3..10).collect::<Vec<_>>());
        assert_eq!(fakes.wallet.borrow().spent, 7 * 5);
        assert_eq!(
            fakes
                .progress
                .borrow()
                .0
                .iter()
                .filter(|&&event| event == MissionEvent::HintUsed)
                .count(),
            7
        );
    }

    #[test]
    fn hint_without_coins_changes_nothing() {
        let (mut engine, fakes) = engine();
        known_daily(&mut engine);
        fakes.wallet.borrow_mut().coins = 4;

        let err = engine.use_hint().unwrap_err();

        assert_eq!(err, RoundError::Economy(EconomyError::InsufficientCoins));
        assert_eq!(engine.hinted_indices().count(), 0);
        assert!(fakes.progress.borrow().0.is_empty());
    }

    #[test]
    fn restart_cancels_previous_timer_and_resets() {
        let (mut engine, fakes) = engine();
        known_daily(&mut engine);
        engine.tap(pos(1, 0));
        ticks(&mut engine, 50);

        engine.start_round().unwrap();

        assert_eq!(engine.seconds_left(), 90);
        assert!(engine.selection().is_empty());
        assert!(!engine.auto_hint_revealed());
        assert_eq!(engine.grid().hidden_count(), 0);
        let clock = fakes.clock.borrow();
        assert_eq!(clock.scheduled, 2);
        assert!(!clock.scheduled_while_active);
    }

    #[test]
    fn stopping_twice_reports_once() {
        let (mut engine, fakes) = engine();
        known_daily(&mut engine);

        engine.stop_round(false);
        engine.stop_round(true);

        assert_eq!(engine.status(), RoundStatus::Finished { win: false });
        assert_eq!(fakes.stats.borrow().total_games, 1);
    }

    #[test]
    fn failed_submission_is_not_fatal() {
        let (mut engine, fakes) = engine();
        fakes.board.borrow_mut().offline = true;
        let path = known_daily(&mut engine);

        for &p in &path {
            engine.tap(p);
        }

        assert!(engine.status().is_won());
        assert_eq!(fakes.stats.borrow().total_wins, 1);
    }

    #[test]
    fn share_only_after_finish() {
        let (mut engine, fakes) = engine();
        let path = known_daily(&mut engine);
        assert_eq!(engine.share_text(), None);

        for &p in &path {
            engine.tap(p);
        }

        assert_eq!(
            engine.share_text().as_deref(),
            Some("WordPath Daily: ALGORITMOS found in 0s, 300 points")
        );
        assert_eq!(
            fakes.progress.borrow().0,
            [MissionEvent::RoundPlayed, MissionEvent::Share]
        );
    }

    #[test]
    fn daily_challenge_spends_tries() {
        let (mut engine, fakes) = engine();
        let today = NaiveDate::from_ymd_opt(2025, 11, 10).unwrap();
        let mut challenge = DailyChallenge::new(today);

        engine.start_daily_challenge(&mut challenge, today).unwrap();
        assert_eq!(engine.target_word(), "ALMACENADO");
        assert_eq!(fakes.wallet.borrow().spent, 0);

        engine.start_daily_challenge(&mut challenge, today).unwrap();
        assert_eq!(fakes.wallet.borrow().spent, EXTRA_TRY_COST);

        challenge.finish();
        let err = engine
            .start_daily_challenge(&mut challenge, today)
            .unwrap_err();
        assert_eq!(err, RoundError::DailyCompleted);
        assert_eq!(fakes.wallet.borrow().attempts, 3);
    }

    #[test]
    fn book_and_config_lengths_must_agree() {
        let collab = Collaborators {
            economy: Box::new(Rc::new(RefCell::new(Wallet::default()))),
            leaderboard: Box::new(Rc::new(RefCell::new(Board::default()))),
            missions: Box::new(Rc::new(RefCell::new(Progress::default()))),
            stats: Box::new(Rc::new(RefCell::new(StatsTally::default()))),
            ticker: Box::new(Rc::new(RefCell::new(Clock::default()))),
        };
        let book = WordBook::new(vec!["PERRO"], 5).unwrap();

        let err = RoundEngine::new(RoundConfig::default(), book, collab, 0).unwrap_err();
        assert_eq!(err, RoundError::Generation(GenerationError::WordDoesNotFit { len: 5 }));
    }
}
