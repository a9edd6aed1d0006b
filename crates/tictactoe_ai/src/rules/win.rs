//! Win detection logic for tic-tac-toe.

use crate::types::{Board, Cell, Mark};
use serde::{Deserialize, Serialize};

/// Number of winning lines on the board.
pub const PATTERN_COUNT: usize = 8;

/// Three cell indices whose uniform occupation ends the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WinPattern {
    cells: [usize; 3],
}

impl WinPattern {
    const fn new(a: usize, b: usize, c: usize) -> Self {
        Self { cells: [a, b, c] }
    }

    /// Cell indices of the line.
    pub fn cells(&self) -> [usize; 3] {
        self.cells
    }

    /// Returns the mark filling all three cells, if one does.
    pub fn owner(&self, board: &Board) -> Option<Mark> {
        let [a, b, c] = self.cells;
        match board.get(a)? {
            Cell::Occupied(mark)
                if board.get(b) == Some(Cell::Occupied(mark))
                    && board.get(c) == Some(Cell::Occupied(mark)) =>
            {
                Some(mark)
            }
            _ => None,
        }
    }
}

/// Every winning line: rows, then columns, then diagonals.
pub const WIN_PATTERNS: [WinPattern; PATTERN_COUNT] = [
    // Rows
    WinPattern::new(0, 1, 2),
    WinPattern::new(3, 4, 5),
    WinPattern::new(6, 7, 8),
    // Columns
    WinPattern::new(0, 3, 6),
    WinPattern::new(1, 4, 7),
    WinPattern::new(2, 5, 8),
    // Diagonals
    WinPattern::new(0, 4, 8),
    WinPattern::new(2, 4, 6),
];

/// A completed line together with the mark that completed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WinningLine {
    pattern: WinPattern,
    mark: Mark,
}

impl WinningLine {
    /// The completed pattern.
    pub fn pattern(&self) -> WinPattern {
        self.pattern
    }

    /// The mark occupying the line.
    pub fn mark(&self) -> Mark {
        self.mark
    }
}

/// Returns the first completed line in scan order, if any.
pub fn winning_line(board: &Board) -> Option<WinningLine> {
    WIN_PATTERNS.iter().find_map(|pattern| {
        pattern.owner(board).map(|mark| WinningLine {
            pattern: *pattern,
            mark,
        })
    })
}
