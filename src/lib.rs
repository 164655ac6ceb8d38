//! Komi: a territorial capture game on a rectangular grid.
//!
//! Players take turns placing stones on empty cells. A group of stones that
//! no longer touches an empty cell is removed, and every removed stone scores
//! a point for the opponent. The first player to reach the score limit wins.
//! A computer opponent picks its moves with a lexicographic heuristic.
//!
//! ## Modules
//!
//! - [`board`] - Cells, seats, and the adjacency table
//! - [`liberty`] - Which stones are left without liberties, also for hypothetical moves
//! - [`game`] - Game state and turn application
//! - [`evaluator`] - Move scoring and selection for the computer
//! - [`scheduler`] - Sequencing of human and computer turns
//! - [`config`] - Game configuration and the `Komi.toml` settings file
//! - [`console`] - Text command front end
//! - [`constants`] - Limits and defaults
//! - [`error`] - Configuration errors
//!
//! ## Example
//!
//! ```
//! use komi::config::GameConfig;
//! use komi::evaluator::Evaluator;
//! use komi::game::Game;
//! use komi::scheduler::TurnScheduler;
//!
//! let game = Game::new(&GameConfig::new(5, 5, 3).versus_computer(true)).unwrap();
//! let mut scheduler = TurnScheduler::new(game, Evaluator::default());
//!
//! // The computer answers before `human_turn` returns.
//! let cell = scheduler.game().cell_at(2, 2).unwrap();
//! assert!(scheduler.human_turn(cell).is_applied());
//! assert_eq!(scheduler.game().turn(), 2);
//! println!("{}", scheduler.game().board());
//! ```

pub mod board;
pub mod config;
pub mod console;
pub mod constants;
pub mod error;
pub mod evaluator;
pub mod game;
pub mod liberty;
pub mod scheduler;
