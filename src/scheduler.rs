//! Sequencing of human and computer turns.
//!
//! The scheduler owns the [`Game`] and is the only thing that mutates it.
//! Human moves are applied synchronously. Whenever the seat to move next is
//! computer-controlled, a computer turn is queued and then run: the
//! [`Pacing`] policy is consulted first, the queued turn is checked for
//! staleness, and the evaluator's choice goes through the same
//! [`Game::apply_turn`] entry point as a human move.

use std::thread;
use std::time::Duration;

use log::trace;

use crate::board::{CellId, Seat};
use crate::constants::max_game_len;
use crate::error::ConfigError;
use crate::evaluator::Evaluator;
use crate::game::{Game, RejectReason, TurnOutcome, TurnReport};

/// Called before every computer move.
pub trait Pacing {
    fn pause(&self);
}

/// No delay at all.
pub struct Immediate;

impl Pacing for Immediate {
    fn pause(&self) {}
}

/// Sleep for a fixed time, so computer moves are visibly separate.
pub struct FixedDelay(pub Duration);

impl Pacing for FixedDelay {
    fn pause(&self) {
        thread::sleep(self.0);
    }
}

type Observer = Box<dyn FnMut(&Game, &TurnReport)>;

/// A computer turn that has been queued but not yet run.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct PendingTurn {
    seat: Seat,
    turn: usize,
}

pub struct TurnScheduler {
    game: Game,
    evaluator: Evaluator,
    pacing: Box<dyn Pacing>,
    observers: Vec<Observer>,
    pending: Option<PendingTurn>,
}

impl TurnScheduler {
    /// Create a scheduler for `game` that plays computer moves immediately.
    pub fn new(game: Game, evaluator: Evaluator) -> Self {
        Self {
            game,
            evaluator,
            pacing: Box::new(Immediate),
            observers: Vec::new(),
            pending: None,
        }
    }

    /// Set the pause taken before each computer move.
    pub fn with_pacing(mut self, pacing: impl Pacing + 'static) -> Self {
        self.pacing = Box::new(pacing);
        self
    }

    /// Register a callback run after every applied turn.
    pub fn subscribe(&mut self, observer: impl FnMut(&Game, &TurnReport) + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// The game being played.
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// The evaluator's pick for the active seat, without playing it.
    pub fn suggest(&mut self) -> Option<CellId> {
        if self.game.is_concluded() {
            return None;
        }
        self.evaluator
            .choose(self.game.board(), self.game.current_seat())
    }

    /// Apply a move on behalf of the active (human) seat.
    ///
    /// If the move is accepted and the next seat belongs to the computer,
    /// its turns are played before this returns.
    pub fn human_turn(&mut self, cell: CellId) -> TurnOutcome {
        if self.game.current_player().is_computer && !self.game.is_concluded() {
            trace!("Ignoring human move on a computer turn");
            return TurnOutcome::Rejected(RejectReason::ComputerTurn);
        }
        let outcome = self.game.apply_turn(cell);
        if let TurnOutcome::Applied(report) = &outcome {
            self.notify(report);
            self.queue_computer_turn();
            self.run_pending();
        }
        outcome
    }

    /// Queue and run computer turns if the active seat is computer-controlled.
    ///
    /// Used to start a game whose first seat is the computer.
    pub fn request_computer_turn(&mut self) -> Vec<TurnReport> {
        self.queue_computer_turn();
        self.run_pending()
    }

    /// Queue a computer turn for the active seat, if it is computer-controlled
    /// and the game is still going.
    fn queue_computer_turn(&mut self) -> bool {
        if self.game.is_concluded() || !self.game.current_player().is_computer {
            return false;
        }
        self.pending = Some(PendingTurn {
            seat: self.game.current_seat(),
            turn: self.game.turn(),
        });
        true
    }

    /// Run queued computer turns until a human seat is up or the game ends.
    fn run_pending(&mut self) -> Vec<TurnReport> {
        let board = self.game.board();
        let limit = max_game_len(board.width(), board.height());
        let mut reports = Vec::new();
        while reports.len() < limit {
            match self.step() {
                Some(report) => reports.push(report),
                None => break,
            }
        }
        reports
    }

    /// Run the queued computer turn, if any, and queue the next one.
    ///
    /// A queued turn whose seat or turn number no longer matches the game is
    /// dropped without effect.
    pub fn step(&mut self) -> Option<TurnReport> {
        let pending = self.pending.take()?;
        self.pacing.pause();

        if self.game.is_concluded()
            || self.game.current_seat() != pending.seat
            || self.game.turn() != pending.turn
        {
            trace!("Dropping stale computer turn for {:?}", pending.seat);
            return None;
        }

        let cell = self
            .evaluator
            .choose(self.game.board(), pending.seat)?;
        let report = self.game.apply_turn(cell).report().cloned()?;
        self.notify(&report);
        self.queue_computer_turn();
        Some(report)
    }

    /// Start over with the same configuration.
    pub fn restart(&mut self) -> Result<Vec<TurnReport>, ConfigError> {
        self.game = Game::new(&self.game.configuration())?;
        self.pending = None;
        Ok(self.request_computer_turn())
    }

    fn notify(&mut self, report: &TurnReport) {
        for observer in &mut self.observers {
            observer(&self.game, report);
        }
    }
}
