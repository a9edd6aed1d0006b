//! Game rules for tic-tac-toe.
//!
//! Pure functions classifying a board. Rules are kept apart from board
//! storage so the search and the game session share one definition.

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::{PATTERN_COUNT, WIN_PATTERNS, WinPattern, WinningLine, winning_line};

use crate::types::{Board, Outcome};

/// Classifies a board.
///
/// Lines are scanned rows first, then columns, then diagonals; the first
/// completed line decides the winner. Without a completed line a full
/// board is a draw.
pub fn evaluate(board: &Board) -> Outcome {
    if let Some(line) = winning_line(board) {
        return Outcome::win_for(line.mark());
    }
    if is_full(board) {
        Outcome::Draw
    } else {
        Outcome::Ongoing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Mark;

    #[test]
    fn test_empty_board_is_ongoing() {
        assert_eq!(evaluate(&Board::new()), Outcome::Ongoing);
    }

    #[test]
    fn test_full_board_without_line_is_draw() {
        let board: Board = "XOXXOOOXX".parse().unwrap();
        assert_eq!(evaluate(&board), Outcome::Draw);
    }

    #[test]
    fn test_win_on_last_cell_is_not_draw() {
        let board: Board = "XOXOXOOXX".parse().unwrap();
        assert_eq!(evaluate(&board), Outcome::XWins);
    }

    #[test]
    fn test_evaluate_symmetric_under_relabel() {
        for s in ["XXX_OO___", "O__O__O__", "XOXXOOOXX", "__O_O_O__", "X___O____"] {
            let board: Board = s.parse().unwrap();
            let swapped = evaluate(&board.relabeled());
            let expected = match evaluate(&board) {
                Outcome::XWins => Outcome::OWins,
                Outcome::OWins => Outcome::XWins,
                other => other,
            };
            assert_eq!(swapped, expected, "board {}", s);
        }
    }

    #[test]
    fn test_scenario_board_fills_to_draw() {
        // O X O / X X O / _ _ X
        let mut board: Board = "OXOXXO__X".parse().unwrap();
        assert_eq!(evaluate(&board), Outcome::Ongoing);
        board.place(7, Mark::O).unwrap();
        board.place(6, Mark::X).unwrap();
        assert_eq!(winning_line(&board), None);
        assert_eq!(evaluate(&board), Outcome::Draw);
    }
}
