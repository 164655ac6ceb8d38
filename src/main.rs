//! Komi: a territorial capture game.
//!
//! ## Usage
//!
//! - `komi` / `komi play` - Play on the console against the computer or a friend
//! - `komi selfplay` - Let the computer play both seats and print the game

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::info;

use komi::board::Seat;
use komi::config::{GameConfig, PlayerConfig, Settings};
use komi::console::ConsoleSession;
use komi::constants::{DEFAULT_SETTINGS_FILE, max_game_len};
use komi::evaluator::Evaluator;
use komi::game::Game;
use komi::scheduler::{FixedDelay, TurnScheduler};

/// Komi: a territorial capture game with a computer opponent
#[derive(Parser)]
#[command(name = "komi")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Settings file (defaults to Komi.toml in the working directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play on the console using the text command protocol
    Play(GameArgs),
    /// Let the computer play both seats
    Selfplay {
        #[command(flatten)]
        game: GameArgs,
        /// Seed for the move shuffle, for reproducible games
        #[arg(long)]
        seed: Option<u64>,
    },
}

/// Overrides for values from the settings file.
#[derive(Args)]
struct GameArgs {
    /// Board width
    #[arg(long)]
    width: Option<usize>,
    /// Board height
    #[arg(long)]
    height: Option<usize>,
    /// Captured stones needed to win
    #[arg(long)]
    score_limit: Option<u32>,
    /// Whether the computer holds the first seat
    #[arg(long)]
    first_computer: Option<bool>,
    /// Whether the computer holds the second seat
    #[arg(long)]
    second_computer: Option<bool>,
}

impl GameArgs {
    fn apply(&self, settings: &mut Settings) {
        if let Some(width) = self.width {
            settings.game.width = width;
        }
        if let Some(height) = self.height {
            settings.game.height = height;
        }
        if let Some(limit) = self.score_limit {
            settings.game.score_limit = limit;
        }
        if let Some(first) = self.first_computer {
            settings.players.first_computer = first;
        }
        if let Some(second) = self.second_computer {
            settings.players.second_computer = second;
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let settings_path = cli
        .config
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_FILE));
    let mut settings = Settings::load_or_default(&settings_path);

    match cli.command {
        Some(Commands::Play(args)) => {
            args.apply(&mut settings);
            run_console(&settings)
        }
        Some(Commands::Selfplay { game, seed }) => {
            game.apply(&mut settings);
            run_selfplay(&settings, seed)
        }
        None => run_console(&settings),
    }
}

fn game_config(settings: &Settings) -> GameConfig {
    let mut config = settings.game_config();
    config.coerce_score_limit();
    config
}

fn run_console(settings: &Settings) -> Result<()> {
    let config = game_config(settings);
    let game = Game::new(&config).context("invalid game configuration")?;
    info!(
        "New {}x{} game, first to {} captures",
        config.width, config.height, config.score_limit
    );

    let scheduler = TurnScheduler::new(game, Evaluator::new(settings.evaluator))
        .with_pacing(FixedDelay(settings.computer_delay()));
    let mut session = ConsoleSession::new(scheduler);

    let opening = session.start();
    if !opening.is_empty() {
        println!("{opening}\n");
    }

    let stdin = io::stdin();
    session
        .run(stdin.lock(), io::stdout())
        .context("console session failed")
}

fn run_selfplay(settings: &Settings, seed: Option<u64>) -> Result<()> {
    let config = game_config(settings)
        .with_player(Seat::First, PlayerConfig::computer())
        .with_player(Seat::Second, PlayerConfig::computer());
    let game = Game::new(&config).context("invalid game configuration")?;
    let evaluator = match seed {
        Some(seed) => Evaluator::with_seed(settings.evaluator, seed),
        None => Evaluator::new(settings.evaluator),
    };

    let mut scheduler = TurnScheduler::new(game, evaluator);
    scheduler.subscribe(|game, report| {
        let (x, y) = game.board().coord(report.cell);
        println!(
            "Turn {}: {} plays ({x}, {y})  X {} - O {}",
            game.turn(),
            report.seat.glyph(),
            game.score(Seat::First),
            game.score(Seat::Second)
        );
        println!("{}", game.board());
    });

    let turns = scheduler.request_computer_turn().len();
    let game = scheduler.game();
    match game.winner() {
        Some(winner) => println!("{} wins after {turns} turns", winner.glyph()),
        None => println!(
            "No winner after {turns} turns (limit {})",
            max_game_len(config.width, config.height)
        ),
    }
    Ok(())
}
