//! Errors raised when a game is configured.
//!
//! Rejected moves are not errors; see [`crate::game::TurnOutcome`].

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("width {width} is outside the allowed range {min}..={max}")]
    Width { width: usize, min: usize, max: usize },
    #[error("height {height} is outside the allowed range {min}..={max}")]
    Height { height: usize, min: usize, max: usize },
    #[error("score limit {limit} is outside the allowed range 1..={max} for this board")]
    ScoreLimit { limit: u32, max: u32 },
}
