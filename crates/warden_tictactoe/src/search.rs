//! Perfect-play move selection via exhaustive minimax.
//!
//! Scores are from the computer's point of view: +1 win, -1 loss, 0 draw.
//! There is no depth discount, so a win now and a win in three plies score
//! the same; ties go to the first move in row-major order.

use super::rules::{is_full, legal_moves, winner};
use super::{Board, Move, NoMovesAvailable, Player};
use std::collections::HashMap;
use tracing::{debug, instrument};

/// Minimax value of a position.
pub type Score = i8;

/// The computer completes a line.
pub const WIN: Score = 1;
/// The board fills with no line.
pub const DRAW: Score = 0;
/// The opponent completes a line.
pub const LOSS: Score = -1;

/// Per-call search state. Dropped when the call returns.
struct Search {
    computer: Player,
    // Within one search the side to move is fixed by the number of marks,
    // so the board alone identifies a node.
    cache: HashMap<Board, Score>,
    nodes: u64,
}

impl Search {
    fn new(computer: Player) -> Self {
        Self {
            computer,
            cache: HashMap::new(),
            nodes: 0,
        }
    }

    fn terminal_score(&self, board: &Board) -> Option<Score> {
        match winner(board) {
            Some(player) if player == self.computer => Some(WIN),
            Some(_) => Some(LOSS),
            None if is_full(board) => Some(DRAW),
            None => None,
        }
    }

    fn minimax(&mut self, board: &mut Board, to_move: Player) -> Score {
        if let Some(score) = self.cache.get(board) {
            return *score;
        }
        self.nodes += 1;

        let score = match self.terminal_score(board) {
            Some(score) => score,
            None => {
                let maximizing = to_move == self.computer;
                let mut best = if maximizing { Score::MIN } else { Score::MAX };
                for mv in legal_moves(board) {
                    if board.apply(mv, to_move).is_err() {
                        continue;
                    }
                    let score = self.minimax(board, to_move.opponent());
                    board.undo(mv);
                    best = if maximizing {
                        best.max(score)
                    } else {
                        best.min(score)
                    };
                }
                best
            }
        };

        self.cache.insert(*board, score);
        score
    }

    /// Scores each legal root move with the computer to play.
    fn root(&mut self, board: &Board) -> Result<Vec<(Move, Score)>, NoMovesAvailable> {
        let moves = legal_moves(board);
        if moves.is_empty() {
            return Err(NoMovesAvailable);
        }

        let mut scratch = *board;
        let mut scored = Vec::with_capacity(moves.len());
        for mv in moves {
            if scratch.apply(mv, self.computer).is_err() {
                continue;
            }
            let score = self.minimax(&mut scratch, self.computer.opponent());
            scratch.undo(mv);
            scored.push((mv, score));
        }
        Ok(scored)
    }
}

/// Returns the minimax value of every legal move for `computer`, in
/// row-major order.
///
/// # Errors
///
/// Returns [`NoMovesAvailable`] if the board is full.
#[instrument(skip(board), fields(filled = board.filled()))]
pub fn move_scores(
    board: &Board,
    computer: Player,
) -> Result<Vec<(Move, Score)>, NoMovesAvailable> {
    let mut search = Search::new(computer);
    let scored = search.root(board)?;
    debug!(nodes = search.nodes, "Scored root moves");
    Ok(scored)
}

/// Returns the game-theoretically optimal move for `computer`.
///
/// Deterministic: the first move in row-major order with the highest
/// score wins. The caller's board is never modified.
///
/// # Errors
///
/// Returns [`NoMovesAvailable`] if the board is full.
#[instrument(skip(board), fields(filled = board.filled()))]
pub fn best_move(board: &Board, computer: Player) -> Result<Move, NoMovesAvailable> {
    let mut search = Search::new(computer);
    let mut best: Option<(Move, Score)> = None;
    for (mv, score) in search.root(board)? {
        if best.is_none_or(|(_, top)| score > top) {
            best = Some((mv, score));
        }
    }

    let (mv, score) = best.ok_or(NoMovesAvailable)?;
    debug!(%mv, score, nodes = search.nodes, "Best move chosen");
    Ok(mv)
}
