//! A game between a human and the engine.
//!
//! The session owns the board and sequences turns; it does no rendering.
//! Callers apply the human's choice with [`Game::human_move`], let the
//! engine reply with [`Game::ai_move`] and show [`Game::status`].

use crate::action::Move;
use crate::config::{ConfigError, EngineConfig};
use crate::error::{EngineError, InvalidMove};
use crate::invariants::{BoardInvariants, InvariantSet};
use crate::position::Position;
use crate::rules::WinningLine;
use crate::search::Searcher;
use crate::types::{Board, Mark, Outcome};
use tracing::{debug, info, instrument, warn};

/// Game session state.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    to_move: Mark,
    outcome: Outcome,
    history: Vec<Move>,
    ai_mark: Mark,
    human_mark: Mark,
    searcher: Searcher,
}

impl Game {
    /// Starts a game with X to move.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if both players were given the same mark.
    #[instrument(skip(config))]
    pub fn new(config: &EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            board: Board::new(),
            to_move: Mark::X,
            outcome: Outcome::Ongoing,
            history: Vec::new(),
            ai_mark: *config.ai_mark(),
            human_mark: *config.human_mark(),
            searcher: config.searcher(),
        })
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the mark to move.
    pub fn to_move(&self) -> Mark {
        self.to_move
    }

    /// Returns the outcome so far.
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Returns the moves played, oldest first.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Returns the engine's mark.
    pub fn ai_mark(&self) -> Mark {
        self.ai_mark
    }

    /// Returns the human's mark.
    pub fn human_mark(&self) -> Mark {
        self.human_mark
    }

    /// True when the engine should move next.
    pub fn is_ai_turn(&self) -> bool {
        !self.outcome.is_terminal() && self.to_move == self.ai_mark
    }

    /// Returns the line that decided the game, if any.
    pub fn winning_line(&self) -> Option<WinningLine> {
        self.board.winning_line()
    }

    /// Applies the human's move.
    ///
    /// # Errors
    ///
    /// Fails if the game is over, it is the engine's turn, or the cell is
    /// out of range or occupied. The game is unchanged on error.
    #[instrument(skip(self), fields(mark = %self.human_mark))]
    pub fn human_move(&mut self, index: usize) -> Result<Outcome, EngineError> {
        self.apply(self.human_mark, index)
    }

    /// Lets the engine choose and apply its move.
    ///
    /// Returns the chosen index and the outcome after the move.
    ///
    /// # Errors
    ///
    /// Fails if the game is over or it is the human's turn.
    #[instrument(skip(self), fields(mark = %self.ai_mark))]
    pub fn ai_move(&mut self) -> Result<(usize, Outcome), EngineError> {
        self.ensure_turn(self.ai_mark)?;
        let report = self
            .searcher
            .search(&self.board, self.ai_mark, self.human_mark)?
            .ok_or(EngineError::game_over(self.outcome))?;
        let outcome = self.apply(self.ai_mark, report.index)?;
        Ok((report.index, outcome))
    }

    /// Clears the board and starts over with X to move.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        info!(moves = self.history.len(), "Resetting game");
        self.board = Board::new();
        self.to_move = Mark::X;
        self.outcome = Outcome::Ongoing;
        self.history.clear();
    }

    /// Status line for the current state.
    pub fn status(&self) -> String {
        match self.outcome {
            Outcome::Ongoing => format!("Next Player: {}", self.to_move),
            Outcome::Draw => "It's a Draw!".to_string(),
            Outcome::XWins | Outcome::OWins => {
                let winner = self.outcome.winner().unwrap_or(self.to_move);
                format!("{} Wins!", winner)
            }
        }
    }

    fn ensure_turn(&self, mark: Mark) -> Result<(), EngineError> {
        if self.outcome.is_terminal() {
            return Err(EngineError::game_over(self.outcome));
        }
        if mark != self.to_move {
            return Err(EngineError::WrongTurn(mark));
        }
        Ok(())
    }

    fn apply(&mut self, mark: Mark, index: usize) -> Result<Outcome, EngineError> {
        self.ensure_turn(mark)?;
        let position = Position::from_index(index)
            .ok_or(EngineError::invalid_move(index, InvalidMove::OutOfRange))?;

        self.board.place(index, mark)?;
        self.history.push(Move::new(mark, position));
        self.outcome = self.board.evaluate();
        if !self.outcome.is_terminal() {
            self.to_move = mark.opponent();
        }

        if cfg!(debug_assertions)
            && let Err(violations) = BoardInvariants::check_all(&self.board)
        {
            warn!(?violations, board = %self.board, "Board invariants violated");
            debug_assert!(violations.is_empty(), "board invariants violated");
        }

        debug!(%mark, index, outcome = %self.outcome, "Move applied");
        Ok(self.outcome)
    }
}
