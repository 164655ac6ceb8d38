//! Board dimension limits, game defaults, and pacing.
//!
//! Dimensions and the score limit are chosen per game at runtime and
//! validated against these bounds when a game is created.

use std::ops::RangeInclusive;

// =============================================================================
// Board Geometry
// =============================================================================

/// Allowed width of a board, in cells.
pub const WIDTH_RANGE: RangeInclusive<usize> = 4..=32;

/// Allowed height of a board, in cells.
pub const HEIGHT_RANGE: RangeInclusive<usize> = 4..=32;

pub const DEFAULT_WIDTH: usize = 5;
pub const DEFAULT_HEIGHT: usize = 5;

// =============================================================================
// Scoring
// =============================================================================

/// Default number of captured stones needed to win.
pub const DEFAULT_SCORE_LIMIT: u32 = 5;

/// Largest score limit accepted for a `width` x `height` board.
///
/// A quarter of the board keeps games finishing well before it fills up.
pub fn max_score_limit(width: usize, height: usize) -> u32 {
    ((width * height) / 4).max(1) as u32
}

/// Upper bound on turns in one uninterrupted chain of computer moves.
///
/// Captures free cells again, so two computer seats could in principle
/// keep playing forever.
pub fn max_game_len(width: usize, height: usize) -> usize {
    width * height * 3
}

// =============================================================================
// Players
// =============================================================================

pub const FIRST_PLAYER_NAME: &str = "First player";
pub const SECOND_PLAYER_NAME: &str = "Second player";
pub const COMPUTER_NAME: &str = "Computer";

// =============================================================================
// Pacing
// =============================================================================

/// Pause before a computer move in interactive play, in milliseconds.
pub const DEFAULT_COMPUTER_DELAY_MS: u64 = 500;

/// Settings file looked up in the working directory.
pub const DEFAULT_SETTINGS_FILE: &str = "Komi.toml";
