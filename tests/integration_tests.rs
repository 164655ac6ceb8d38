//! Integration tests for komi
//!
//! Scenarios are played through the public API only: games are set up by
//! alternating moves from the first seat, as a real game would be.

use komi::board::{CellId, Occupant, Seat};
use komi::config::{GameConfig, PlayerConfig};
use komi::evaluator::{Evaluator, EvaluatorConfig};
use komi::game::{Game, RejectReason, TurnOutcome, TurnReport};
use komi::liberty::{Hypothetical, cells_without_liberties, has_empty_neighbor};
use komi::scheduler::TurnScheduler;

// =============================================================================
// Helper functions
// =============================================================================

fn new_game(width: usize, height: usize, limit: u32) -> Game {
    Game::new(&GameConfig::new(width, height, limit)).unwrap()
}

fn cell(game: &Game, x: usize, y: usize) -> CellId {
    game.cell_at(x, y).unwrap()
}

/// Play a sequence of `(x, y)` moves, alternating seats, and return the last report.
fn play_moves(game: &mut Game, moves: &[(usize, usize)]) -> TurnReport {
    let mut last = None;
    for &(x, y) in moves {
        let target = cell(game, x, y);
        match game.apply_turn(target) {
            TurnOutcome::Applied(report) => last = Some(report),
            TurnOutcome::Rejected(reason) => panic!("({x}, {y}) rejected: {reason:?}"),
        }
    }
    last.expect("no moves played")
}

/// Everything a turn may change.
fn snapshot(game: &Game) -> (String, u32, u32, Seat, usize, Option<Seat>) {
    (
        game.board().to_string(),
        game.score(Seat::First),
        game.score(Seat::Second),
        game.current_seat(),
        game.turn(),
        game.winner(),
    )
}

fn stone_count(game: &Game) -> usize {
    let board = game.board();
    board.cells().filter(|&id| !board.is_empty(id)).count()
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_group_of_three_captured_at_last_liberty() {
    // O holds (1,1), (2,1), (1,2); X closes every liberty except (2,2).
    let mut game = new_game(5, 5, 5);
    play_moves(
        &mut game,
        &[
            (1, 0), (1, 1),
            (0, 1), (2, 1),
            (2, 0), (1, 2),
            (3, 1), (4, 4),
            (0, 2), (4, 3),
            (1, 3), (3, 4),
        ],
    );
    assert_eq!(game.score(Seat::First), 0);
    assert_eq!(game.current_seat(), Seat::First);

    let report = play_moves(&mut game, &[(2, 2)]);
    let mut expected = vec![cell(&game, 1, 1), cell(&game, 2, 1), cell(&game, 1, 2)];
    expected.sort();
    assert_eq!(report.captured, expected);
    assert!(report.lost.is_empty());
    assert_eq!(game.score(Seat::First), 3);
    assert_eq!(game.score(Seat::Second), 0);
    for id in expected {
        assert_eq!(game.board().occupant_of(id), Occupant::Empty);
    }
    assert!(!game.is_concluded());
    assert_eq!(game.current_seat(), Seat::Second);
}

#[test]
fn test_self_capture_scores_for_opponent() {
    let mut game = new_game(5, 5, 5);
    let report = play_moves(&mut game, &[(4, 4), (1, 0), (4, 3), (0, 1), (0, 0)]);
    assert_eq!(report.seat, Seat::First);
    assert_eq!(report.lost, vec![cell(&game, 0, 0)]);
    assert!(report.captured.is_empty());
    assert_eq!(game.score(Seat::Second), 1);
    assert_eq!(game.score(Seat::First), 0);
    assert!(game.board().is_empty(cell(&game, 0, 0)));
}

#[test]
fn test_reaching_limit_ends_game() {
    let mut game = new_game(4, 4, 1);
    let report = play_moves(&mut game, &[(1, 0), (0, 0), (0, 1)]);
    assert_eq!(report.winner, Some(Seat::First));
    assert!(game.is_concluded());
    assert_eq!(game.winner(), Some(Seat::First));

    let before = snapshot(&game);
    for id in game.board().cells().collect::<Vec<_>>() {
        assert_eq!(
            game.apply_turn(id),
            TurnOutcome::Rejected(RejectReason::Concluded)
        );
    }
    assert_eq!(snapshot(&game), before);
}

#[test]
fn test_occupied_cell_changes_nothing() {
    let mut game = new_game(5, 5, 3);
    play_moves(&mut game, &[(2, 2), (3, 3)]);
    let before = snapshot(&game);
    assert_eq!(
        game.apply_turn(cell(&game, 3, 3)),
        TurnOutcome::Rejected(RejectReason::Occupied)
    );
    assert_eq!(snapshot(&game), before);
}

#[test]
fn test_evaluator_prefers_two_captures_over_one() {
    // After these moves X can take a pair at (2,3) or a single stone at (3,4).
    let mut game = new_game(5, 5, 6);
    play_moves(
        &mut game,
        &[
            (1, 1), (1, 2),
            (2, 1), (2, 2),
            (0, 2), (4, 4),
            (3, 2), (0, 0),
            (1, 3), (4, 0),
            (4, 3), (3, 0),
        ],
    );
    assert_eq!(game.current_seat(), Seat::First);
    assert_eq!(game.turn(), 12);

    for seed in 0..16 {
        let mut evaluator = Evaluator::with_seed(EvaluatorConfig::default(), seed);
        assert_eq!(
            evaluator.choose(game.board(), Seat::First),
            Some(cell(&game, 2, 3))
        );
    }
}

#[test]
fn test_evaluator_avoids_suicide_when_possible() {
    let mut game = new_game(5, 5, 5);
    play_moves(&mut game, &[(1, 0), (4, 4), (0, 1)]);
    assert_eq!(game.current_seat(), Seat::Second);
    let corner = cell(&game, 0, 0);
    let evaluator = Evaluator::default();
    assert_eq!(evaluator.score(game.board(), Seat::Second, corner).suicides, 1);
    for seed in 0..16 {
        let mut evaluator = Evaluator::with_seed(EvaluatorConfig::default(), seed);
        assert_ne!(evaluator.choose(game.board(), Seat::Second), Some(corner));
    }
}

#[test]
fn test_scheduler_against_computer() {
    let game = Game::new(&GameConfig::new(6, 6, 4).versus_computer(true)).unwrap();
    let mut scheduler =
        TurnScheduler::new(game, Evaluator::with_seed(EvaluatorConfig::default(), 11));

    let mut x = 0;
    while !scheduler.game().is_concluded() && x < 6 {
        let target = scheduler.game().cell_at(x, 0).unwrap();
        x += 1;
        let before = scheduler.game().turn();
        if scheduler.human_turn(target).is_applied() {
            let after = scheduler.game().turn();
            if scheduler.game().is_concluded() {
                assert!(after >= before + 1);
            } else {
                // One human move plus exactly one computer reply.
                assert_eq!(after, before + 2);
                assert_eq!(scheduler.game().current_seat(), Seat::First);
            }
        }
    }
}

#[test]
fn test_computer_first_seat() {
    let config = GameConfig::new(5, 5, 3).with_player(Seat::First, PlayerConfig::computer());
    let game = Game::new(&config).unwrap();
    let mut scheduler = TurnScheduler::new(game, Evaluator::default());
    assert_eq!(scheduler.request_computer_turn().len(), 1);
    assert_eq!(scheduler.game().current_seat(), Seat::Second);
    // A second request does nothing: the human is up.
    assert!(scheduler.request_computer_turn().is_empty());
}

// =============================================================================
// Properties over random games
// =============================================================================

#[test]
fn test_random_game_invariants() {
    for seed in 0..40u64 {
        let mut rng = fastrand::Rng::with_seed(seed);
        let width = rng.usize(4..=8);
        let height = rng.usize(4..=8);
        let limit = rng.u32(1..=((width * height / 4) as u32));
        let mut game = new_game(width, height, limit);

        for _ in 0..width * height * 2 {
            let target = rng.usize(0..game.board().len());
            let before = snapshot(&game);
            let stones_before = stone_count(&game);
            let total_before = game.score(Seat::First) + game.score(Seat::Second);
            let mover = game.current_seat();

            match game.apply_turn(target) {
                TurnOutcome::Rejected(_) => {
                    assert_eq!(snapshot(&game), before, "seed {seed}");
                }
                TurnOutcome::Applied(report) => {
                    assert_eq!(report.seat, mover);
                    let total_after = game.score(Seat::First) + game.score(Seat::Second);
                    assert!(game.score(Seat::First) >= before.1);
                    assert!(game.score(Seat::Second) >= before.2);
                    assert_eq!(total_after - total_before, report.removed() as u32);
                    assert_eq!(stone_count(&game), stones_before + 1 - report.removed());

                    if game.is_concluded() {
                        assert_eq!(report.winner, game.winner());
                        let winner = game.winner().unwrap();
                        assert!(game.score(winner) >= limit);
                    } else {
                        assert_eq!(game.current_seat(), mover.opponent());
                        assert!(game.score(Seat::First) < limit);
                        assert!(game.score(Seat::Second) < limit);
                    }

                    // Nothing left on the board lacks liberties.
                    for seat in [Seat::First, Seat::Second] {
                        assert!(
                            cells_without_liberties(game.board(), seat, None).is_empty(),
                            "seed {seed}"
                        );
                    }
                }
            }
        }
    }
}

#[test]
fn test_stone_touching_empty_never_without_liberties() {
    for seed in 0..20u64 {
        let mut rng = fastrand::Rng::with_seed(seed);
        let mut game = new_game(6, 6, 9);
        for _ in 0..30 {
            let _ = game.apply_turn(rng.usize(0..36));
        }

        let board = game.board();
        let empties: Vec<CellId> = board.empty_cells().collect();
        for seat in [Seat::First, Seat::Second] {
            for &pending_cell in &empties {
                for pending_seat in [Seat::First, Seat::Second] {
                    let pending = Some(Hypothetical::new(pending_seat, pending_cell));
                    for id in cells_without_liberties(board, seat, pending) {
                        assert!(!has_empty_neighbor(board, id, pending), "seed {seed}");
                    }
                }
            }
        }
    }
}
