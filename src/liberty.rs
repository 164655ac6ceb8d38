//! Liberty computation.
//!
//! A stone is safe if it touches an empty cell, or touches a safe stone of
//! the same owner. Safety is propagated from the stones that touch empty
//! cells inward through friendly stones with a worklist; whatever is never
//! reached has no liberties and is captured.
//!
//! Every query can be asked under a [`Hypothetical`] move, which treats one
//! empty cell as already owned by some seat without touching the board.
//! The move evaluator relies on this to score candidates.

use std::collections::VecDeque;

use crate::board::{Board, CellId, Occupant, Seat};

/// A stone that is considered placed for the duration of a query.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Hypothetical {
    pub seat: Seat,
    pub cell: CellId,
}

impl Hypothetical {
    pub fn new(seat: Seat, cell: CellId) -> Self {
        Self { seat, cell }
    }
}

/// Occupant of `id`, with the pending stone (if any) layered on top of the board.
#[inline]
pub fn occupant_under(board: &Board, id: CellId, pending: Option<Hypothetical>) -> Occupant {
    match pending {
        Some(h) if h.cell == id => Occupant::Owned(h.seat),
        _ => board.occupant_of(id),
    }
}

/// Does `id` touch at least one empty cell?
#[inline]
pub fn has_empty_neighbor(board: &Board, id: CellId, pending: Option<Hypothetical>) -> bool {
    board
        .neighbors_of(id)
        .iter()
        .any(|&n| occupant_under(board, n, pending).is_empty())
}

/// Stones of `seat` that have no path through friendly stones to an empty cell.
///
/// Returned in ascending [`CellId`] order. With `pending` set, the pending
/// cell counts as owned by `pending.seat`, including when that stone is
/// itself the one left without liberties.
pub fn cells_without_liberties(
    board: &Board,
    seat: Seat,
    pending: Option<Hypothetical>,
) -> Vec<CellId> {
    let own = Occupant::Owned(seat);
    let mut unchecked = vec![false; board.len()];
    let mut queue = VecDeque::new();

    for id in board.cells() {
        if occupant_under(board, id, pending) != own {
            continue;
        }
        if has_empty_neighbor(board, id, pending) {
            queue.push_back(id);
        } else {
            unchecked[id] = true;
        }
    }

    // Only stones of `seat` are ever queued, so a queued stone frees exactly
    // its unchecked neighbours.
    while let Some(id) = queue.pop_front() {
        for &n in board.neighbors_of(id) {
            if unchecked[n] {
                unchecked[n] = false;
                queue.push_back(n);
            }
        }
    }

    let captured: Vec<CellId> = board.cells().filter(|&id| unchecked[id]).collect();
    debug_assert!(
        captured
            .iter()
            .all(|&id| !group_reaches_empty(board, id, pending)),
        "liberty propagation marked a connected stone as captured"
    );
    captured
}

/// Number of `seat`'s stones that would be left without liberties.
pub fn count_without_liberties(board: &Board, seat: Seat, pending: Option<Hypothetical>) -> usize {
    cells_without_liberties(board, seat, pending).len()
}

/// Flood fill from `start` through same-owner stones, looking for any empty cell.
///
/// Independent of the worklist above; used to cross-check its result.
fn group_reaches_empty(board: &Board, start: CellId, pending: Option<Hypothetical>) -> bool {
    let color = occupant_under(board, start, pending);
    if color.is_empty() {
        return true;
    }
    let mut stack = vec![start];
    let mut visited = vec![false; board.len()];

    while let Some(id) = stack.pop() {
        if visited[id] {
            continue;
        }
        visited[id] = true;
        for &n in board.neighbors_of(id) {
            match occupant_under(board, n, pending) {
                Occupant::Empty => return true,
                c if c == color && !visited[n] => stack.push(n),
                _ => {}
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a board from rows of `X`, `O` and `.`.
    fn board_from(rows: &[&str]) -> Board {
        let height = rows.len();
        let width = rows[0].len();
        let mut board = Board::new(width, height);
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                let occupant = match ch {
                    'X' => Occupant::Owned(Seat::First),
                    'O' => Occupant::Owned(Seat::Second),
                    _ => Occupant::Empty,
                };
                board.set(board.cell_at(x, y).unwrap(), occupant);
            }
        }
        board
    }

    fn at(board: &Board, x: usize, y: usize) -> CellId {
        board.cell_at(x, y).unwrap()
    }

    #[test]
    fn test_empty_board_has_no_captures() {
        let board = Board::new(5, 5);
        assert!(cells_without_liberties(&board, Seat::First, None).is_empty());
        assert!(cells_without_liberties(&board, Seat::Second, None).is_empty());
    }

    #[test]
    fn test_surrounded_single_stone() {
        let board = board_from(&[
            ".X...", //
            "XOX..", //
            ".X...", //
            ".....", //
        ]);
        let o = at(&board, 1, 1);
        assert_eq!(cells_without_liberties(&board, Seat::Second, None), vec![o]);
        assert!(cells_without_liberties(&board, Seat::First, None).is_empty());
    }

    #[test]
    fn test_safety_propagates_through_group() {
        // The O chain touches an empty cell only at its far end.
        let board = board_from(&[
            "XXXXX", //
            "OOOO.", //
            "XXXX.", //
            ".....", //
        ]);
        assert!(cells_without_liberties(&board, Seat::Second, None).is_empty());

        let closed = board_from(&[
            "XXXXX", //
            "OOOOX", //
            "XXXX.", //
            ".....", //
        ]);
        assert_eq!(
            cells_without_liberties(&closed, Seat::Second, None),
            vec![5, 6, 7, 8]
        );
    }

    #[test]
    fn test_hypothetical_fills_last_liberty() {
        let board = board_from(&[
            ".X...", //
            "XO...", //
            ".X...", //
            ".....", //
        ]);
        let o = at(&board, 1, 1);
        assert!(cells_without_liberties(&board, Seat::Second, None).is_empty());

        let pending = Hypothetical::new(Seat::First, at(&board, 2, 1));
        assert_eq!(
            cells_without_liberties(&board, Seat::Second, Some(pending)),
            vec![o]
        );
        // The board itself is untouched.
        assert!(board.is_empty(at(&board, 2, 1)));
    }

    #[test]
    fn test_hypothetical_self_capture_includes_placed_stone() {
        let board = board_from(&[
            ".O...", //
            "O....", //
            ".....", //
            ".....", //
        ]);
        let corner = at(&board, 0, 0);
        let pending = Hypothetical::new(Seat::First, corner);
        assert_eq!(
            cells_without_liberties(&board, Seat::First, Some(pending)),
            vec![corner]
        );
    }

    #[test]
    fn test_hypothetical_stone_connects_to_safe_group() {
        // X at (0,0) joins the X at (0,1), which still has a liberty below.
        let board = board_from(&[
            ".O...", //
            "XO...", //
            ".....", //
            ".....", //
        ]);
        let pending = Hypothetical::new(Seat::First, at(&board, 0, 0));
        assert!(cells_without_liberties(&board, Seat::First, Some(pending)).is_empty());
    }

    #[test]
    fn test_opponent_hypothetical_removes_liberty() {
        // If O took (2,0), the X pair would be left with nothing.
        let board = board_from(&[
            "XX.O", //
            "OOO.", //
            "....", //
            "....", //
        ]);
        assert!(cells_without_liberties(&board, Seat::First, None).is_empty());
        let pending = Hypothetical::new(Seat::Second, at(&board, 2, 0));
        assert_eq!(
            count_without_liberties(&board, Seat::First, Some(pending)),
            2
        );
    }

    #[test]
    fn test_stone_touching_empty_is_never_captured() {
        let board = board_from(&[
            "XOXO", //
            "OXOX", //
            "XOX.", //
            "OXOX", //
        ]);
        for seat in [Seat::First, Seat::Second] {
            for id in cells_without_liberties(&board, seat, None) {
                assert!(!has_empty_neighbor(&board, id, None));
            }
        }
    }
}
