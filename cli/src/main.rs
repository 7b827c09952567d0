use std::cell::RefCell;
use std::fs;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use wordpath_core::{
    Collaborators, DailyChallenge, GridPos, PuzzleGenerator, RandomPathGenerator, RoundConfig,
    RoundEngine, RoundEvent, SeededPathGenerator, StatsTally, WordBook, daily_seed, day_key,
    score_for_elapsed,
};

use crate::profile::{MissionLog, Store};
use crate::render::{format_pos, render_grid};
use crate::ticker::IntervalTicker;

mod profile;
mod render;
mod ticker;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// JSON file with round settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory where profile, stats and daily progress are kept
    #[arg(long)]
    state_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the daily puzzle
    Daily {
        /// Day to print instead of today
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Bracket the cells of the hidden word
        #[arg(long)]
        reveal: bool,
    },
    /// Print the score for finishing after the given seconds
    Score { elapsed: u32 },
    /// Print a random puzzle
    Generate {
        #[arg(short, long)]
        word: Option<String>,

        /// Force a seed instead of random
        #[arg(short, long)]
        seed: Option<u64>,
    },
    /// Play a round on the one-second scheduler
    Simulate {
        /// Force a seed instead of random
        #[arg(short, long)]
        seed: Option<u64>,

        /// Trace the hidden word once this many seconds have passed
        #[arg(long)]
        solve_at: Option<u32>,

        /// Buy a hint once this many seconds have passed
        #[arg(long)]
        hint_at: Option<u32>,

        /// Play today's daily challenge
        #[arg(long)]
        daily: bool,

        /// Do not sleep between ticks
        #[arg(long)]
        fast: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let config = load_config(args.config.as_ref())?;
    log::debug!("config: {:?}", config);
    let store = Store::new(args.state_dir);

    match args.command {
        Command::Daily { date, reveal } => print_daily(&config, date, reveal),
        Command::Score { elapsed } => {
            println!("{}", score_for_elapsed(elapsed));
            Ok(())
        }
        Command::Generate { word, seed } => print_random(&config, word, seed),
        Command::Simulate {
            seed,
            solve_at,
            hint_at,
            daily,
            fast,
        } => simulate(
            config,
            &store,
            Plan {
                seed: seed.unwrap_or_else(rand::random),
                solve_at,
                hint_at,
                daily,
                fast,
            },
        ),
    }
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<RoundConfig> {
    let Some(path) = path else {
        return Ok(RoundConfig::default());
    };
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let config: RoundConfig =
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
    Ok(config.sanitized())
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn print_daily(config: &RoundConfig, date: Option<NaiveDate>, reveal: bool) -> anyhow::Result<()> {
    let date = date.unwrap_or_else(today);
    let seed = daily_seed(date);
    let word = WordBook::daily().for_seed(seed).to_owned();
    let puzzle = SeededPathGenerator::new(seed).generate(&word, config.grid_size)?;

    println!("{} seed {}", day_key(date), seed);
    if reveal {
        println!("word: {}", word);
    }
    print!("{}", render_grid(&puzzle.grid, |pos| reveal && puzzle.path.contains(pos)));
    Ok(())
}

fn print_random(
    config: &RoundConfig,
    word: Option<String>,
    seed: Option<u64>,
) -> anyhow::Result<()> {
    let seed = seed.unwrap_or_else(rand::random);
    let word = match word {
        Some(word) => word.to_uppercase(),
        None => WordBook::standard().choose(&mut SmallRng::seed_from_u64(seed)).to_owned(),
    };
    let puzzle = RandomPathGenerator::new(seed)
        .with_max_attempts(config.generation_attempts)
        .generate(&word, config.grid_size)?;

    println!("{} seed {}", word, seed);
    print!("{}", render_grid(&puzzle.grid, |pos| puzzle.path.contains(pos)));
    Ok(())
}

struct Plan {
    seed: u64,
    solve_at: Option<u32>,
    hint_at: Option<u32>,
    daily: bool,
    fast: bool,
}

fn simulate(config: RoundConfig, store: &Store, plan: Plan) -> anyhow::Result<()> {
    let today = today();
    let profile = Rc::new(RefCell::new(store.load_profile()));
    profile.borrow_mut().refresh(today);
    let stats = Rc::new(RefCell::new(
        store
            .load(Store::STATS_KEY)
            .and_then(|blob| StatsTally::from_blob(&blob).ok())
            .unwrap_or_default(),
    ));
    let ticker = IntervalTicker::default();

    let collab = Collaborators {
        economy: Box::new(profile.clone()),
        leaderboard: Box::new(profile.clone()),
        missions: Box::new(MissionLog),
        stats: Box::new(stats.clone()),
        ticker: Box::new(ticker.clone()),
    };
    let mut engine = RoundEngine::new(config, WordBook::standard(), collab, plan.seed)?;
    engine.subscribe(|event| match event {
        RoundEvent::AutoHint(pos) => println!("auto hint: word starts at {}", format_pos(*pos)),
        RoundEvent::HintRevealed { index, pos } => {
            println!("hint: letter {} is at {}", index + 1, format_pos(*pos))
        }
        RoundEvent::Finished(outcome) if outcome.win => {
            println!("found {} in {}s for {} points", outcome.word, outcome.elapsed, outcome.score)
        }
        RoundEvent::Finished(outcome) => println!("time is up, the word was {}", outcome.word),
        _ => (),
    });

    let mut challenge = if plan.daily {
        let mut challenge = store
            .load(Store::DAILY_KEY)
            .and_then(|blob| DailyChallenge::from_blob(&blob, WordBook::daily()).ok())
            .unwrap_or_else(|| DailyChallenge::new(today));
        engine.start_daily_challenge(&mut challenge, today)?;
        Some(challenge)
    } else {
        engine.start_round()?;
        None
    };
    print!("{}", render_grid(engine.grid(), |_| false));

    play(&mut engine, &ticker, &plan);

    let shared = match engine.share_text() {
        Some(share) => {
            println!("{}", share);
            true
        }
        None => false,
    };
    let granted = profile
        .borrow_mut()
        .reward_round(engine.status().is_won(), shared);
    if granted > 0 {
        println!("earned {} coins", granted);
    }
    let tally = *stats.borrow();
    println!(
        "games {} wins {} losses {}",
        tally.total_games, tally.total_wins, tally.total_losses
    );

    if let Some(challenge) = challenge.as_mut() {
        challenge.finish();
        store.save(Store::DAILY_KEY, &challenge.to_blob())?;
    }
    store.save(Store::STATS_KEY, &tally.to_blob())?;
    store.save_profile(&profile.borrow())?;
    Ok(())
}

/// Ticks the round until the ticker is cancelled, following the plan at
/// every elapsed second starting from 0.
fn play(engine: &mut RoundEngine, ticker: &IntervalTicker, plan: &Plan) {
    follow_plan(engine, plan);
    while ticker.wait(plan.fast) {
        let hidden = engine.grid().hidden_count();
        engine.tick();

        if engine.grid().hidden_count() != hidden {
            println!("{}s left", engine.seconds_left());
            print!("{}", render_grid(engine.grid(), |_| false));
        }
        follow_plan(engine, plan);
    }
}

fn follow_plan(engine: &mut RoundEngine, plan: &Plan) {
    if !engine.is_running() {
        return;
    }
    let elapsed = engine.elapsed();
    if plan.hint_at == Some(elapsed) {
        match engine.use_hint() {
            Ok(Some(_)) => (),
            Ok(None) => println!("no hint left"),
            Err(err) => println!("hint refused: {}", err),
        }
    }
    if plan.solve_at == Some(elapsed) {
        let path: Vec<GridPos> = engine.embedded_path().iter().collect();
        for pos in path {
            engine.tap(pos);
        }
    }
}
