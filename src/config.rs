//! Game configuration and the optional `Komi.toml` settings file.
//!
//! [`GameConfig`] is what a game is created from and is validated up front.
//! [`Settings`] is the file-backed layer on top of it: every key is optional
//! and falls back to the defaults in [`crate::constants`].

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use log::warn;
use serde::Deserialize;

use crate::board::Seat;
use crate::constants::{
    COMPUTER_NAME, DEFAULT_COMPUTER_DELAY_MS, DEFAULT_HEIGHT, DEFAULT_SCORE_LIMIT, DEFAULT_WIDTH,
    FIRST_PLAYER_NAME, HEIGHT_RANGE, SECOND_PLAYER_NAME, WIDTH_RANGE, max_score_limit,
};
use crate::error::ConfigError;
use crate::evaluator::EvaluatorConfig;

/// How one seat is filled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerConfig {
    pub name: String,
    pub is_computer: bool,
}

impl PlayerConfig {
    pub fn first_human() -> Self {
        Self {
            name: FIRST_PLAYER_NAME.to_string(),
            is_computer: false,
        }
    }

    pub fn second_human() -> Self {
        Self {
            name: SECOND_PLAYER_NAME.to_string(),
            is_computer: false,
        }
    }

    pub fn computer() -> Self {
        Self {
            name: COMPUTER_NAME.to_string(),
            is_computer: true,
        }
    }

    /// Default filling of `seat`, human or computer.
    pub fn for_seat(seat: Seat, is_computer: bool) -> Self {
        match (seat, is_computer) {
            (_, true) => Self::computer(),
            (Seat::First, false) => Self::first_human(),
            (Seat::Second, false) => Self::second_human(),
        }
    }
}

/// Everything needed to create a [`crate::game::Game`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub width: usize,
    pub height: usize,
    pub score_limit: u32,
    /// Indexed by [`Seat::index`].
    pub players: [PlayerConfig; 2],
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT, DEFAULT_SCORE_LIMIT).versus_computer(true)
    }
}

impl GameConfig {
    /// A game between two human seats.
    pub fn new(width: usize, height: usize, score_limit: u32) -> Self {
        Self {
            width,
            height,
            score_limit,
            players: [PlayerConfig::first_human(), PlayerConfig::second_human()],
        }
    }

    /// Hand the second seat to the computer, or back to a human.
    pub fn versus_computer(self, enabled: bool) -> Self {
        self.with_player(Seat::Second, PlayerConfig::for_seat(Seat::Second, enabled))
    }

    pub fn with_player(mut self, seat: Seat, player: PlayerConfig) -> Self {
        self.players[seat.index()] = player;
        self
    }

    pub fn player(&self, seat: Seat) -> &PlayerConfig {
        &self.players[seat.index()]
    }

    pub fn max_score_limit(&self) -> u32 {
        max_score_limit(self.width, self.height)
    }

    /// Check dimensions and score limit.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !WIDTH_RANGE.contains(&self.width) {
            return Err(ConfigError::Width {
                width: self.width,
                min: *WIDTH_RANGE.start(),
                max: *WIDTH_RANGE.end(),
            });
        }
        if !HEIGHT_RANGE.contains(&self.height) {
            return Err(ConfigError::Height {
                height: self.height,
                min: *HEIGHT_RANGE.start(),
                max: *HEIGHT_RANGE.end(),
            });
        }
        let max = self.max_score_limit();
        if self.score_limit < 1 || self.score_limit > max {
            return Err(ConfigError::ScoreLimit {
                limit: self.score_limit,
                max,
            });
        }
        Ok(())
    }

    /// Pull the score limit back into range after the dimensions changed.
    pub fn coerce_score_limit(&mut self) {
        let max = self.max_score_limit();
        let clamped = self.score_limit.clamp(1, max);
        if clamped != self.score_limit {
            warn!(
                "Score limit {} does not fit a {}x{} board, using {}",
                self.score_limit, self.width, self.height, clamped
            );
            self.score_limit = clamped;
        }
    }
}

// =============================================================================
// Settings file
// =============================================================================

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct GameSettings {
    pub width: usize,
    pub height: usize,
    pub score_limit: u32,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            score_limit: DEFAULT_SCORE_LIMIT,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PlayerSettings {
    pub first_computer: bool,
    pub second_computer: bool,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            first_computer: false,
            second_computer: true,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PacingSettings {
    pub computer_delay_ms: u64,
}

impl Default for PacingSettings {
    fn default() -> Self {
        Self {
            computer_delay_ms: DEFAULT_COMPUTER_DELAY_MS,
        }
    }
}

/// Contents of a `Komi.toml` file.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Settings {
    pub game: GameSettings,
    pub players: PlayerSettings,
    pub evaluator: EvaluatorConfig,
    pub pacing: PacingSettings,
}

impl Settings {
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file {}", path.display()))?;
        Self::from_toml(&contents)
            .with_context(|| format!("failed to parse settings file {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Load `path`, falling back to built-in defaults if it is missing or malformed.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        Self::from_file(path).unwrap_or_else(|e| {
            warn!("{e:#}, using built-in defaults");
            Self::default()
        })
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new(self.game.width, self.game.height, self.game.score_limit)
            .with_player(
                Seat::First,
                PlayerConfig::for_seat(Seat::First, self.players.first_computer),
            )
            .with_player(
                Seat::Second,
                PlayerConfig::for_seat(Seat::Second, self.players.second_computer),
            )
    }

    pub fn computer_delay(&self) -> Duration {
        Duration::from_millis(self.pacing.computer_delay_ms)
    }
}
