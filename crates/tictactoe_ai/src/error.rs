//! Error types for the board model and the search engine.

use crate::types::{Mark, Outcome};

/// Why a placement was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum InvalidMove {
    /// Index outside 0-8.
    #[display("index out of range (must be 0-8)")]
    OutOfRange,
    /// Cell already holds a mark.
    #[display("cell is already occupied by {}", _0)]
    Occupied(Mark),
}

/// A call made while its precondition does not hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Precondition {
    /// The board is already decided.
    #[display("game is already over ({})", _0)]
    GameOver(Outcome),
    /// AI and human were given the same mark.
    #[display("AI and human both play {}", _0)]
    MarksNotDistinct(Mark),
}

/// Error raised by the engine.
///
/// All variants are contract violations by the caller; none is transient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum EngineError {
    /// Placement on an occupied or out-of-range cell.
    #[display("Invalid move at {}: {}", index, reason)]
    InvalidMove {
        /// Requested cell index.
        index: usize,
        /// Reason for rejection.
        reason: InvalidMove,
    },

    /// Operation invoked while its precondition does not hold.
    #[display("Precondition violated: {}", _0)]
    PreconditionViolation(Precondition),

    /// A mark tried to move out of turn.
    #[display("It's not {}'s turn", _0)]
    WrongTurn(Mark),
}

impl EngineError {
    /// Creates an invalid move error.
    pub fn invalid_move(index: usize, reason: InvalidMove) -> Self {
        Self::InvalidMove { index, reason }
    }

    /// Creates a game-over precondition error.
    pub fn game_over(outcome: Outcome) -> Self {
        Self::PreconditionViolation(Precondition::GameOver(outcome))
    }
}

impl std::error::Error for EngineError {}
