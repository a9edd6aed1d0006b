//! Tic-tac-toe board model and minimax opponent.
//!
//! # Architecture
//!
//! - **Board model**: [`Board`] holds nine [`Cell`]s and classifies itself
//!   as an [`Outcome`] by scanning the eight [`WinPattern`]s.
//! - **Search engine**: [`select_move`] and [`Searcher`] score every legal
//!   continuation with depth-biased minimax and return the AI's cell.
//! - **Session**: [`Game`] sequences human and AI turns on one board.
//!
//! # Example
//!
//! ```
//! use tictactoe_ai::{Board, Mark, select_move};
//!
//! let mut board = Board::new();
//! board.place(4, Mark::X)?;
//! let reply = select_move(&board, Mark::O, Mark::X)?;
//! assert_eq!(reply, Some(0));
//! # Ok::<(), tictactoe_ai::EngineError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod config;
mod error;
mod game;
mod invariants;
mod position;
mod rules;
mod search;
mod types;

pub use action::Move;
pub use config::{ConfigError, EngineConfig};
pub use error::{EngineError, InvalidMove, Precondition};
pub use game::Game;
pub use invariants::{
    BalancedMarks, BoardInvariants, Invariant, InvariantSet, InvariantViolation, SingleWinner,
};
pub use position::Position;
pub use rules::{PATTERN_COUNT, WIN_PATTERNS, WinPattern, WinningLine, evaluate};
pub use search::{MoveScore, SearchReport, Searcher, Strategy, WIN_SCORE, select_move};
pub use types::{BOARD_SIZE, Board, CELL_COUNT, Cell, Mark, Outcome, ParseBoardError, Trial};
