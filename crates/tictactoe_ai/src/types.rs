//! Core domain types for tic-tac-toe.

use crate::error::{EngineError, InvalidMove};
use crate::rules;
use serde::{Deserialize, Serialize};
use std::ops::{Deref, DerefMut};
use std::str::FromStr;
use tracing::instrument;

/// Width and height of the board.
pub const BOARD_SIZE: usize = 3;

/// Number of cells on the board.
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// A player symbol.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Mark {
    /// Mark X (moves first).
    X,
    /// Mark O.
    O,
}

impl Mark {
    /// Returns the opposing mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

/// A cell on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// Empty cell.
    Empty,
    /// Cell occupied by a mark.
    Occupied(Mark),
}

impl Cell {
    /// Returns the mark in this cell, if any.
    pub fn mark(self) -> Option<Mark> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(mark) => Some(mark),
        }
    }
}

/// Classification of a board position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Moves remain and nobody has won.
    Ongoing,
    /// X completed a line.
    XWins,
    /// O completed a line.
    OWins,
    /// Board is full and nobody completed a line.
    Draw,
}

impl Outcome {
    /// Returns the winning outcome for a mark.
    pub fn win_for(mark: Mark) -> Self {
        match mark {
            Mark::X => Outcome::XWins,
            Mark::O => Outcome::OWins,
        }
    }

    /// Returns the winner if there is one.
    pub fn winner(self) -> Option<Mark> {
        match self {
            Outcome::XWins => Some(Mark::X),
            Outcome::OWins => Some(Mark::O),
            Outcome::Ongoing | Outcome::Draw => None,
        }
    }

    /// Returns true once no further moves may be made.
    pub fn is_terminal(self) -> bool {
        self != Outcome::Ongoing
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Ongoing => write!(f, "Ongoing"),
            Outcome::XWins => write!(f, "X wins"),
            Outcome::OWins => write!(f, "O wins"),
            Outcome::Draw => write!(f, "Draw"),
        }
    }
}

/// 3x3 tic-tac-toe board.
///
/// A plain value: copying a board yields an independent snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    /// Cells in row-major order (0-8).
    cells: [Cell; CELL_COUNT],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; CELL_COUNT],
        }
    }

    /// Builds a board from its cells in row-major order.
    pub fn from_cells(cells: [Cell; CELL_COUNT]) -> Self {
        Self { cells }
    }

    /// Gets the cell at the given index (0-8).
    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// Checks if a cell is empty. Out-of-range indices are never empty.
    pub fn is_empty(&self, index: usize) -> bool {
        matches!(self.get(index), Some(Cell::Empty))
    }

    /// Returns all cells.
    pub fn cells(&self) -> &[Cell; CELL_COUNT] {
        &self.cells
    }

    /// Places a mark on an empty cell.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidMove`] if the index is out of range
    /// or the cell is already occupied.
    #[instrument(level = "trace", skip(self))]
    pub fn place(&mut self, index: usize, mark: Mark) -> Result<(), EngineError> {
        match self.get(index) {
            None => Err(EngineError::invalid_move(index, InvalidMove::OutOfRange)),
            Some(Cell::Occupied(owner)) => {
                Err(EngineError::invalid_move(index, InvalidMove::Occupied(owner)))
            }
            Some(Cell::Empty) => {
                self.cells[index] = Cell::Occupied(mark);
                Ok(())
            }
        }
    }

    /// Resets a cell to empty.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidMove`] if the index is out of range.
    #[instrument(level = "trace", skip(self))]
    pub fn clear(&mut self, index: usize) -> Result<(), EngineError> {
        let cell = self
            .cells
            .get_mut(index)
            .ok_or_else(|| EngineError::invalid_move(index, InvalidMove::OutOfRange))?;
        *cell = Cell::Empty;
        Ok(())
    }

    /// Places a mark for the lifetime of the returned guard.
    ///
    /// The cell is cleared again when the guard is dropped.
    ///
    /// # Errors
    ///
    /// Fails exactly when [`Board::place`] would.
    pub fn trial(&mut self, index: usize, mark: Mark) -> Result<Trial<'_>, EngineError> {
        self.place(index, mark)?;
        Ok(Trial { board: self, index })
    }

    /// Classifies the position.
    pub fn evaluate(&self) -> Outcome {
        rules::evaluate(self)
    }

    /// Returns the first completed line, if any.
    pub fn winning_line(&self) -> Option<rules::WinningLine> {
        rules::winning_line(self)
    }

    /// Returns the indices of all empty cells in ascending order.
    pub fn empty_indices(&self) -> Vec<usize> {
        (0..CELL_COUNT).filter(|&i| self.is_empty(i)).collect()
    }

    /// Counts the cells holding a mark.
    pub fn count(&self, mark: Mark) -> usize {
        self.cells
            .iter()
            .filter(|c| **c == Cell::Occupied(mark))
            .count()
    }

    /// Returns the board with X and O swapped.
    pub fn relabeled(&self) -> Self {
        let mut cells = self.cells;
        for cell in &mut cells {
            if let Cell::Occupied(mark) = *cell {
                *cell = Cell::Occupied(mark.opponent());
            }
        }
        Self { cells }
    }

    /// Formats the board as a grid, numbering empty cells 1-9.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let index = row * BOARD_SIZE + col;
                let symbol = match self.cells[index] {
                    Cell::Empty => (index + 1).to_string(),
                    Cell::Occupied(mark) => mark.to_string(),
                };
                result.push_str(&symbol);
                if col < BOARD_SIZE - 1 {
                    result.push('|');
                }
            }
            if row < BOARD_SIZE - 1 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Compact notation: nine of `X`, `O`, `_` in row-major order.
impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for cell in &self.cells {
            let c = match cell {
                Cell::Empty => '_',
                Cell::Occupied(Mark::X) => 'X',
                Cell::Occupied(Mark::O) => 'O',
            };
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

/// Error parsing a board from compact notation.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum ParseBoardError {
    /// A character other than X, O, `_`, `.` or whitespace.
    #[display("Unexpected character {:?} in board", _0)]
    UnexpectedChar(char),
    /// Wrong number of cells.
    #[display("Expected 9 cells, found {}", _0)]
    WrongLength(usize),
}

impl std::error::Error for ParseBoardError {}

impl FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cells = Vec::with_capacity(CELL_COUNT);
        for c in s.chars().filter(|c| !c.is_whitespace() && *c != ',') {
            let cell = match c {
                'X' | 'x' => Cell::Occupied(Mark::X),
                'O' | 'o' => Cell::Occupied(Mark::O),
                '_' | '.' | '-' => Cell::Empty,
                other => return Err(ParseBoardError::UnexpectedChar(other)),
            };
            cells.push(cell);
        }
        let cells: [Cell; CELL_COUNT] = cells
            .try_into()
            .map_err(|v: Vec<Cell>| ParseBoardError::WrongLength(v.len()))?;
        Ok(Self { cells })
    }
}

/// A mark placed for the duration of a scope.
///
/// Derefs to the board with the mark in place; dropping the guard
/// empties the cell again, whichever way the scope is left.
#[derive(Debug)]
pub struct Trial<'a> {
    board: &'a mut Board,
    index: usize,
}

impl Trial<'_> {
    /// Index of the trial mark.
    pub fn index(&self) -> usize {
        self.index
    }
}

impl Deref for Trial<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for Trial<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for Trial<'_> {
    fn drop(&mut self) {
        // index was validated by place()
        self.board.cells[self.index] = Cell::Empty;
    }
}
