//! Move selection scenarios and whole-tree properties of the search.

use std::collections::HashSet;
use strum::IntoEnumIterator;
use tictactoe_ai::{Board, Mark, Outcome, Searcher, Strategy, WIN_SCORE, select_move};

fn board(s: &str) -> Board {
    s.parse().expect("valid board")
}

/// Mark to move under X-first alternation.
fn side_to_move(board: &Board) -> Mark {
    if board.count(Mark::X) == board.count(Mark::O) {
        Mark::X
    } else {
        Mark::O
    }
}

/// Every position reachable from the empty board, terminal ones included.
fn reachable_positions() -> HashSet<Board> {
    fn walk(board: &mut Board, mark: Mark, seen: &mut HashSet<Board>) {
        if !seen.insert(*board) || board.evaluate().is_terminal() {
            return;
        }
        for index in board.empty_indices() {
            let mut trial = board.trial(index, mark).unwrap();
            walk(&mut trial, mark.opponent(), seen);
        }
    }

    let mut seen = HashSet::new();
    walk(&mut Board::new(), Mark::X, &mut seen);
    seen
}

#[test]
fn test_reachable_position_count() {
    let positions = reachable_positions();
    assert_eq!(positions.len(), 5478);
    let ongoing = positions
        .iter()
        .filter(|b| b.evaluate() == Outcome::Ongoing)
        .count();
    assert_eq!(ongoing, 4520);
}

#[test]
fn test_selected_cell_is_always_empty() {
    for position in reachable_positions() {
        if position.evaluate().is_terminal() {
            continue;
        }
        let ai = side_to_move(&position);
        let index = select_move(&position, ai, ai.opponent())
            .unwrap()
            .expect("ongoing board has a move");
        assert!(position.is_empty(index), "{} chose {}", position, index);
    }
}

#[test]
fn test_alpha_beta_matches_exhaustive_everywhere() {
    let exhaustive = Searcher::new(Strategy::Exhaustive);
    let pruned = Searcher::new(Strategy::AlphaBeta);
    for position in reachable_positions() {
        if position.evaluate().is_terminal() {
            continue;
        }
        let ai = side_to_move(&position);
        let full = exhaustive
            .search(&position, ai, ai.opponent())
            .unwrap()
            .unwrap();
        let cut = pruned
            .search(&position, ai, ai.opponent())
            .unwrap()
            .unwrap();
        assert_eq!(full.index, cut.index, "board {}", position);
        assert_eq!(full.score, cut.score, "board {}", position);
        assert!(cut.nodes <= full.nodes);
    }
}

#[test]
fn test_center_opening_gets_corner_reply() {
    let reply = select_move(&board("____X____"), Mark::O, Mark::X).unwrap();
    assert_eq!(reply, Some(0));
}

#[test]
fn test_edge_replies_to_center_lose() {
    let scores = Searcher::default()
        .move_scores(&board("____X____"), Mark::O, Mark::X)
        .unwrap();
    assert_eq!(scores.len(), 8);
    for score in scores {
        let corner = [0, 2, 6, 8].contains(&score.index);
        assert_eq!(score.score == 0, corner, "cell {}", score.index);
        assert!(score.score <= 0);
    }
}

#[test]
fn test_winning_beats_blocking() {
    // X threatens the top row, but O completes the middle row first
    let reply = select_move(&board("XX_OO____"), Mark::O, Mark::X).unwrap();
    assert_eq!(reply, Some(5));
}

#[test]
fn test_block_emerges_from_search() {
    let reply = select_move(&board("XX__O____"), Mark::O, Mark::X).unwrap();
    assert_eq!(reply, Some(2));
}

#[test]
fn test_last_two_cells_end_in_draw() {
    let mut position = board("OXOXXO__X");
    let reply = select_move(&position, Mark::O, Mark::X).unwrap().unwrap();
    assert_eq!(reply, 7);
    position.place(reply, Mark::O).unwrap();
    assert_eq!(position.evaluate(), Outcome::Ongoing);
    position.place(6, Mark::X).unwrap();
    assert_eq!(position.evaluate(), Outcome::Draw);
}

#[test]
fn test_depth_bias_prefers_faster_win() {
    let scores = Searcher::default()
        .move_scores(&board("XX_OO____"), Mark::O, Mark::X)
        .unwrap();
    let fork = scores.iter().find(|s| s.index == 2).unwrap();
    let finish = scores.iter().find(|s| s.index == 5).unwrap();
    assert_eq!(fork.score, WIN_SCORE - 2);
    assert_eq!(finish.score, WIN_SCORE);
}

#[test]
fn test_slower_loss_preferred() {
    // X threatens 8 down the right column; blocking only delays the loss
    let position = board("O_X__X___");
    let scores = Searcher::default()
        .move_scores(&position, Mark::O, Mark::X)
        .unwrap();
    for score in &scores {
        let expected = if score.index == 8 { 3 - WIN_SCORE } else { 1 - WIN_SCORE };
        assert_eq!(score.score, expected, "cell {}", score.index);
    }
    assert_eq!(select_move(&position, Mark::O, Mark::X).unwrap(), Some(8));
}

#[test]
fn test_strategies_agree_on_empty_board() {
    for strategy in Strategy::iter() {
        let report = Searcher::new(strategy)
            .search(&Board::new(), Mark::X, Mark::O)
            .unwrap()
            .unwrap();
        assert_eq!(report.index, 0, "{}", strategy);
        assert_eq!(report.score, 0, "{}", strategy);
    }
}
