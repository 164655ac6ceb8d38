//! Game state and turn application.
//!
//! A [`Game`] owns the board, both players, and the score limit. Turns go
//! through [`Game::apply_turn`], which places a stone, resolves captures on
//! both sides, scores them, and decides whether the game is over.
//!
//! Capture resolution order: the mover's captures of the opponent are
//! resolved first, then whatever the mover is left without liberties. When
//! both players reach the limit on the same turn, the mover wins.

use log::{debug, info, trace};

use crate::board::{Board, CellId, Occupant, Seat};
use crate::config::{GameConfig, PlayerConfig};
use crate::error::ConfigError;
use crate::liberty::cells_without_liberties;

/// Identifier a renderer maps to an actual colour.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlayerColor {
    Primary,
    Secondary,
}

impl PlayerColor {
    fn for_seat(seat: Seat) -> Self {
        match seat {
            Seat::First => PlayerColor::Primary,
            Seat::Second => PlayerColor::Secondary,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Player {
    pub name: String,
    pub color: PlayerColor,
    pub is_computer: bool,
    score: u32,
}

impl Player {
    fn new(seat: Seat, config: &PlayerConfig) -> Self {
        Self {
            name: config.name.clone(),
            color: PlayerColor::for_seat(seat),
            is_computer: config.is_computer,
            score: 0,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }
}

/// Why a turn was not applied.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RejectReason {
    /// The cell already holds a stone.
    Occupied,
    /// The game already has a winner.
    Concluded,
    /// The cell id is not on this board.
    OutOfBounds,
    /// The active seat is computer-controlled.
    ComputerTurn,
}

/// What an accepted turn did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnReport {
    pub seat: Seat,
    pub cell: CellId,
    /// Opponent stones removed, credited to `seat`.
    pub captured: Vec<CellId>,
    /// The mover's own stones removed, credited to the opponent.
    pub lost: Vec<CellId>,
    /// Set if this turn ended the game.
    pub winner: Option<Seat>,
}

impl TurnReport {
    /// Stones that left the board this turn.
    pub fn removed(&self) -> usize {
        self.captured.len() + self.lost.len()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    Applied(TurnReport),
    Rejected(RejectReason),
}

impl TurnOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, TurnOutcome::Applied(_))
    }

    pub fn report(&self) -> Option<&TurnReport> {
        match self {
            TurnOutcome::Applied(report) => Some(report),
            TurnOutcome::Rejected(_) => None,
        }
    }
}

/// One cell as seen by a renderer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CellView {
    pub x: usize,
    pub y: usize,
    pub occupant: Occupant,
}

#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    players: [Player; 2],
    score_limit: u32,
    current: Seat,
    winner: Option<Seat>,
    /// Number of accepted turns.
    turn: usize,
}

impl Game {
    /// Create an empty game, with the first seat to move.
    pub fn new(config: &GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            board: Board::new(config.width, config.height),
            players: [
                Player::new(Seat::First, config.player(Seat::First)),
                Player::new(Seat::Second, config.player(Seat::Second)),
            ],
            score_limit: config.score_limit,
            current: Seat::First,
            winner: None,
            turn: 0,
        })
    }

    /// The configuration this game was created from, for restarting it.
    pub fn configuration(&self) -> GameConfig {
        let player_config = |seat: Seat| {
            let p = self.player(seat);
            PlayerConfig {
                name: p.name.clone(),
                is_computer: p.is_computer,
            }
        };
        GameConfig {
            width: self.board.width(),
            height: self.board.height(),
            score_limit: self.score_limit,
            players: [player_config(Seat::First), player_config(Seat::Second)],
        }
    }

    /// The current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The player holding `seat`.
    pub fn player(&self, seat: Seat) -> &Player {
        &self.players[seat.index()]
    }

    /// Stones captured so far by `seat`.
    pub fn score(&self, seat: Seat) -> u32 {
        self.player(seat).score
    }

    /// The seat whose turn it is.
    pub fn current_seat(&self) -> Seat {
        self.current
    }

    pub fn current_player(&self) -> &Player {
        self.player(self.current)
    }

    pub fn score_limit(&self) -> u32 {
        self.score_limit
    }

    /// Number of turns applied so far.
    pub fn turn(&self) -> usize {
        self.turn
    }

    /// Whether someone has reached the score limit.
    pub fn is_concluded(&self) -> bool {
        self.winner.is_some()
    }

    pub fn winner(&self) -> Option<Seat> {
        self.winner
    }

    pub fn winning_player(&self) -> Option<&Player> {
        self.winner.map(|seat| self.player(seat))
    }

    /// Shorthand for `self.board().cell_at(x, y)`.
    pub fn cell_at(&self, x: usize, y: usize) -> Option<CellId> {
        self.board.cell_at(x, y)
    }

    /// Rows of cells, top to bottom.
    pub fn cells_view(&self) -> Vec<Vec<CellView>> {
        (0..self.board.height())
            .map(|y| {
                (0..self.board.width())
                    .map(|x| {
                        let id = y * self.board.width() + x;
                        CellView {
                            x,
                            y,
                            occupant: self.board.occupant_of(id),
                        }
                    })
                    .collect()
            })
            .collect()
    }

    /// Place the active seat's stone on `cell` and resolve the consequences.
    ///
    /// Occupied cells, off-board ids, and finished games are rejected without
    /// touching any state.
    pub fn apply_turn(&mut self, cell: CellId) -> TurnOutcome {
        if let Some(reason) = self.check_turn(cell) {
            trace!("Rejected turn at {cell}: {reason:?}");
            return TurnOutcome::Rejected(reason);
        }

        let mover = self.current;
        self.board.set(cell, Occupant::Owned(mover));

        let captured = self.resolve_captures(mover);
        let lost = self.resolve_captures(mover.opponent());
        self.turn += 1;

        let (x, y) = self.board.coord(cell);
        debug!(
            "Turn {}: {} plays ({x}, {y}), captures {}, loses {}",
            self.turn,
            self.player(mover).name,
            captured.len(),
            lost.len()
        );

        match self.winner {
            Some(winner) => info!(
                "{} wins {}-{}",
                self.player(winner).name,
                self.score(winner),
                self.score(winner.opponent())
            ),
            None => self.current = mover.opponent(),
        }

        TurnOutcome::Applied(TurnReport {
            seat: mover,
            cell,
            captured,
            lost,
            winner: self.winner,
        })
    }

    fn check_turn(&self, cell: CellId) -> Option<RejectReason> {
        if self.winner.is_some() {
            Some(RejectReason::Concluded)
        } else if cell >= self.board.len() {
            Some(RejectReason::OutOfBounds)
        } else if !self.board.is_empty(cell) {
            Some(RejectReason::Occupied)
        } else {
            None
        }
    }

    /// Remove the opponent's stones without liberties and credit `player`.
    fn resolve_captures(&mut self, player: Seat) -> Vec<CellId> {
        let to_clear = cells_without_liberties(&self.board, player.opponent(), None);
        for &id in &to_clear {
            self.board.set(id, Occupant::Empty);
        }
        let p = &mut self.players[player.index()];
        p.score += to_clear.len() as u32;
        if self.winner.is_none() && p.score >= self.score_limit {
            self.winner = Some(player);
        }
        to_clear
    }
}
