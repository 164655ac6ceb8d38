//! Move selection for computer-controlled seats.
//!
//! Every empty cell is scored with a [`MoveScore`] computed from hypothetical
//! liberty queries, and the best one is played. Candidates are shuffled
//! before comparison so that equally good moves are picked at random.
//!
//! The comparison is strictly lexicographic:
//!
//! 1. captures gained (more is better)
//! 2. potential losses if the opponent took the cell instead (fewer is better)
//! 3. own stones left without liberties by the move (fewer is better)
//! 4. local safety: neighbours that are empty or friendly (more is better)
//! 5. inherent liberties: own stones touching an empty cell (more is better,
//!    optional)

use std::cmp::Ordering;

use log::debug;
use serde::Deserialize;

use crate::board::{Board, CellId, Occupant, Seat};
use crate::liberty::{Hypothetical, count_without_liberties, has_empty_neighbor, occupant_under};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EvaluatorConfig {
    /// Break remaining ties by counting own stones that touch an empty cell.
    pub inherent_liberties: bool,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            inherent_liberties: true,
        }
    }
}

/// Metrics of one candidate move. Greater compares as better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveScore {
    pub captures: usize,
    pub potential_losses: usize,
    pub suicides: usize,
    pub local_safety: usize,
    pub inherent_liberties: usize,
}

impl Ord for MoveScore {
    fn cmp(&self, other: &Self) -> Ordering {
        self.captures
            .cmp(&other.captures)
            .then_with(|| other.potential_losses.cmp(&self.potential_losses))
            .then_with(|| other.suicides.cmp(&self.suicides))
            .then_with(|| self.local_safety.cmp(&other.local_safety))
            .then_with(|| self.inherent_liberties.cmp(&other.inherent_liberties))
    }
}

impl PartialOrd for MoveScore {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

pub struct Evaluator {
    config: EvaluatorConfig,
    rng: fastrand::Rng,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new(EvaluatorConfig::default())
    }
}

impl Evaluator {
    pub fn new(config: EvaluatorConfig) -> Self {
        Self {
            config,
            rng: fastrand::Rng::new(),
        }
    }

    /// An evaluator whose tie-breaking shuffle is reproducible.
    pub fn with_seed(config: EvaluatorConfig, seed: u64) -> Self {
        Self {
            config,
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    pub fn config(&self) -> EvaluatorConfig {
        self.config
    }

    /// Score `cell` as a move by `seat`. The board is not modified.
    pub fn score(&self, board: &Board, seat: Seat, cell: CellId) -> MoveScore {
        let opponent = seat.opponent();
        let mine = Some(Hypothetical::new(seat, cell));
        let theirs = Some(Hypothetical::new(opponent, cell));

        let local_safety = board
            .neighbors_of(cell)
            .iter()
            .filter(|&&n| board.occupant_of(n) != Occupant::Owned(opponent))
            .count();

        let inherent_liberties = if self.config.inherent_liberties {
            board
                .cells()
                .filter(|&id| {
                    occupant_under(board, id, mine) == Occupant::Owned(seat)
                        && has_empty_neighbor(board, id, mine)
                })
                .count()
        } else {
            0
        };

        MoveScore {
            captures: count_without_liberties(board, opponent, mine),
            potential_losses: count_without_liberties(board, seat, theirs),
            suicides: count_without_liberties(board, seat, mine),
            local_safety,
            inherent_liberties,
        }
    }

    /// All empty cells with their scores, best first.
    ///
    /// Cells that score the same keep their shuffled order.
    pub fn rank(&mut self, board: &Board, seat: Seat) -> Vec<(CellId, MoveScore)> {
        let mut candidates: Vec<CellId> = board.empty_cells().collect();
        self.rng.shuffle(&mut candidates);
        let mut ranked: Vec<(CellId, MoveScore)> = candidates
            .into_iter()
            .map(|cell| (cell, self.score(board, seat, cell)))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }

    /// The best move for `seat`, or `None` if the board is full.
    pub fn choose(&mut self, board: &Board, seat: Seat) -> Option<CellId> {
        let mut candidates: Vec<CellId> = board.empty_cells().collect();
        self.rng.shuffle(&mut candidates);

        let mut best: Option<(CellId, MoveScore)> = None;
        for cell in candidates {
            let score = self.score(board, seat, cell);
            if best.is_none_or(|(_, b)| score > b) {
                best = Some((cell, score));
            }
        }

        best.map(|(cell, score)| {
            let (x, y) = board.coord(cell);
            debug!("{seat:?} chooses ({x}, {y}) with {score:?}");
            cell
        })
    }
}
