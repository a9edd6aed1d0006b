//! Minimax move selection.
//!
//! Scores are taken from the AI's point of view: a line completed by the
//! AI at depth `d` scores `WIN_SCORE - d`, a line completed by the human
//! scores `d - WIN_SCORE` and a draw scores zero. Depth counts the plies
//! played after the candidate move, so faster wins and slower losses are
//! preferred.
//!
//! Candidates are tried in ascending cell order and only a strictly
//! higher score replaces the current best, so the lowest index wins ties.

use crate::error::{EngineError, Precondition};
use crate::types::{Board, Mark, Outcome};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

/// Score of a win decided on the AI's own move.
pub const WIN_SCORE: i32 = 10;

/// How the game tree is walked.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Strategy {
    /// Visit every continuation.
    #[default]
    Exhaustive,
    /// Skip branches that cannot change the chosen move.
    ///
    /// Selects the same cell as [`Strategy::Exhaustive`].
    AlphaBeta,
}

/// Result of a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchReport {
    /// Chosen cell index.
    pub index: usize,
    /// Minimax score of the chosen cell.
    pub score: i32,
    /// Positions scored during the search.
    pub nodes: u64,
}

/// Exact score of one candidate move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveScore {
    /// Candidate cell index.
    pub index: usize,
    /// Minimax score after playing the candidate.
    pub score: i32,
}

/// Move selector for the AI player.
///
/// Holds no state between searches; every call is a function of the
/// board it is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Searcher {
    strategy: Strategy,
}

impl Searcher {
    /// Creates a searcher using the given strategy.
    pub fn new(strategy: Strategy) -> Self {
        Self { strategy }
    }

    /// Returns the tree walking strategy.
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Picks the AI's move.
    ///
    /// Returns `Ok(None)` only for a board without empty cells, which an
    /// ongoing board never is.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::PreconditionViolation`] if the board is
    /// already decided or both sides were given the same mark.
    #[instrument(skip(self, board), fields(board = %board, strategy = %self.strategy))]
    pub fn search(
        &self,
        board: &Board,
        ai_mark: Mark,
        human_mark: Mark,
    ) -> Result<Option<SearchReport>, EngineError> {
        check_preconditions(board, ai_mark, human_mark)?;

        let mut scratch = *board;
        let mut frame = Frame::new(ai_mark, human_mark);
        let mut best: Option<(usize, i32)> = None;

        for index in board.empty_indices() {
            let mut trial = scratch.trial(index, ai_mark)?;
            let score = match self.strategy {
                Strategy::Exhaustive => frame.minimax(&mut trial, 0, false)?,
                Strategy::AlphaBeta => {
                    let alpha = best.map_or(i32::MIN, |(_, score)| score);
                    frame.alpha_beta(&mut trial, 0, false, alpha, i32::MAX)?
                }
            };
            trace!(index, score, "Scored candidate");

            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((index, score));
            }
        }

        let report = best.map(|(index, score)| SearchReport {
            index,
            score,
            nodes: frame.nodes,
        });
        match &report {
            Some(r) => debug!(index = r.index, score = r.score, nodes = r.nodes, "AI chose cell"),
            None => debug!("No empty cell to choose"),
        }
        Ok(report)
    }

    /// Scores every candidate move exactly, in ascending cell order.
    ///
    /// Always walks the full tree, whatever the strategy, since pruned
    /// branches only yield bounds.
    ///
    /// # Errors
    ///
    /// Same as [`Searcher::search`].
    #[instrument(skip(self, board), fields(board = %board))]
    pub fn move_scores(
        &self,
        board: &Board,
        ai_mark: Mark,
        human_mark: Mark,
    ) -> Result<Vec<MoveScore>, EngineError> {
        check_preconditions(board, ai_mark, human_mark)?;

        let mut scratch = *board;
        let mut frame = Frame::new(ai_mark, human_mark);
        let mut scores = Vec::new();
        for index in board.empty_indices() {
            let mut trial = scratch.trial(index, ai_mark)?;
            let score = frame.minimax(&mut trial, 0, false)?;
            scores.push(MoveScore { index, score });
        }
        debug!(candidates = scores.len(), nodes = frame.nodes, "Scored all candidates");
        Ok(scores)
    }
}

/// Picks the AI's move with exhaustive minimax.
///
/// # Errors
///
/// Same as [`Searcher::search`].
pub fn select_move(
    board: &Board,
    ai_mark: Mark,
    human_mark: Mark,
) -> Result<Option<usize>, EngineError> {
    Ok(Searcher::default()
        .search(board, ai_mark, human_mark)?
        .map(|report| report.index))
}

fn check_preconditions(board: &Board, ai_mark: Mark, human_mark: Mark) -> Result<(), EngineError> {
    if ai_mark == human_mark {
        return Err(EngineError::PreconditionViolation(
            Precondition::MarksNotDistinct(ai_mark),
        ));
    }
    let outcome = board.evaluate();
    if outcome.is_terminal() {
        return Err(EngineError::game_over(outcome));
    }
    Ok(())
}

/// Per-search bookkeeping shared by the recursive scorers.
struct Frame {
    ai_mark: Mark,
    human_mark: Mark,
    nodes: u64,
}

impl Frame {
    fn new(ai_mark: Mark, human_mark: Mark) -> Self {
        Self {
            ai_mark,
            human_mark,
            nodes: 0,
        }
    }

    fn mover(&self, maximizing: bool) -> Mark {
        if maximizing {
            self.ai_mark
        } else {
            self.human_mark
        }
    }

    /// Score of a decided board, `None` while play continues.
    fn terminal_score(&self, board: &Board, depth: i32) -> Option<i32> {
        match board.evaluate() {
            Outcome::Ongoing => None,
            Outcome::Draw => Some(0),
            won if won.winner() == Some(self.ai_mark) => Some(WIN_SCORE - depth),
            _ => Some(depth - WIN_SCORE),
        }
    }

    fn minimax(&mut self, board: &mut Board, depth: i32, maximizing: bool) -> Result<i32, EngineError> {
        self.nodes += 1;
        if let Some(score) = self.terminal_score(board, depth) {
            return Ok(score);
        }

        let mover = self.mover(maximizing);
        let mut best = if maximizing { i32::MIN } else { i32::MAX };
        for index in board.empty_indices() {
            let mut trial = board.trial(index, mover)?;
            let score = self.minimax(&mut trial, depth + 1, !maximizing)?;
            best = if maximizing {
                best.max(score)
            } else {
                best.min(score)
            };
        }
        Ok(best)
    }

    /// Fail-soft alpha-beta: exact inside `(alpha, beta)`, a bound outside.
    fn alpha_beta(
        &mut self,
        board: &mut Board,
        depth: i32,
        maximizing: bool,
        mut alpha: i32,
        mut beta: i32,
    ) -> Result<i32, EngineError> {
        self.nodes += 1;
        if let Some(score) = self.terminal_score(board, depth) {
            return Ok(score);
        }

        let mover = self.mover(maximizing);
        let mut best = if maximizing { i32::MIN } else { i32::MAX };
        for index in board.empty_indices() {
            let mut trial = board.trial(index, mover)?;
            let score = self.alpha_beta(&mut trial, depth + 1, !maximizing, alpha, beta)?;
            if maximizing {
                best = best.max(score);
                alpha = alpha.max(best);
            } else {
                best = best.min(score);
                beta = beta.min(best);
            }
            if alpha >= beta {
                break;
            }
        }
        Ok(best)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InvalidMove;
    use strum::IntoEnumIterator;

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    #[test]
    fn test_center_opening_answered_with_corner() {
        assert_eq!(select_move(&board("____X____"), Mark::O, Mark::X), Ok(Some(0)));
    }

    #[test]
    fn test_immediate_win_preferred_over_block() {
        // X threatens 2, O wins outright at 5
        assert_eq!(select_move(&board("XX_OO____"), Mark::O, Mark::X), Ok(Some(5)));
    }

    #[test]
    fn test_blocks_open_row() {
        assert_eq!(select_move(&board("XX__O____"), Mark::O, Mark::X), Ok(Some(2)));
    }

    #[test]
    fn test_shallower_win_scores_higher() {
        let scores = Searcher::default()
            .move_scores(&board("XX_OO____"), Mark::O, Mark::X)
            .unwrap();
        let score_of = |index| scores.iter().find(|m| m.index == index).unwrap().score;
        // 2 forks and wins two plies later, 5 wins at once
        assert_eq!(score_of(2), WIN_SCORE - 2);
        assert_eq!(score_of(5), WIN_SCORE);
    }

    #[test]
    fn test_block_in_nearly_full_board() {
        // O X O / X X O / _ _ X: X threatens column 1
        let report = Searcher::default()
            .search(&board("OXOXXO__X"), Mark::O, Mark::X)
            .unwrap()
            .unwrap();
        assert_eq!(report.index, 7);
        assert_eq!(report.score, 0);
    }

    #[test]
    fn test_ai_may_play_x() {
        // X completes the anti-diagonal at 6, which also stops O's column
        assert_eq!(select_move(&board("O_XOX____"), Mark::X, Mark::O), Ok(Some(6)));
    }

    #[test]
    fn test_terminal_board_rejected() {
        assert_eq!(
            select_move(&board("XXXOO____"), Mark::O, Mark::X),
            Err(EngineError::game_over(Outcome::XWins))
        );
        assert_eq!(
            select_move(&board("XOXXOOOXX"), Mark::O, Mark::X),
            Err(EngineError::game_over(Outcome::Draw))
        );
    }

    #[test]
    fn test_identical_marks_rejected() {
        assert_eq!(
            select_move(&Board::new(), Mark::O, Mark::O),
            Err(EngineError::PreconditionViolation(
                Precondition::MarksNotDistinct(Mark::O)
            ))
        );
    }

    #[test]
    fn test_repeated_searches_agree() {
        let position = board("X___O___X");
        for strategy in Strategy::iter() {
            let searcher = Searcher::new(strategy);
            let first = searcher.search(&position, Mark::O, Mark::X).unwrap();
            let second = searcher.search(&position, Mark::O, Mark::X).unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_alpha_beta_visits_fewer_nodes() {
        let exhaustive = Searcher::new(Strategy::Exhaustive)
            .search(&Board::new(), Mark::X, Mark::O)
            .unwrap()
            .unwrap();
        let pruned = Searcher::new(Strategy::AlphaBeta)
            .search(&Board::new(), Mark::X, Mark::O)
            .unwrap()
            .unwrap();
        assert_eq!(exhaustive.index, pruned.index);
        assert_eq!(exhaustive.score, pruned.score);
        assert!(pruned.nodes < exhaustive.nodes);
    }

    #[test]
    fn test_strategy_names() {
        assert_eq!(Strategy::AlphaBeta.to_string(), "alpha_beta");
        assert_eq!("exhaustive".parse::<Strategy>(), Ok(Strategy::Exhaustive));
    }

    #[test]
    fn test_invalid_move_reason_is_reported() {
        let mut b = board("X________");
        assert_eq!(
            b.place(0, Mark::O),
            Err(EngineError::invalid_move(0, InvalidMove::Occupied(Mark::X)))
        );
    }
}
