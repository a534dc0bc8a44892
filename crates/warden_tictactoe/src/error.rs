//! Error types for the game engine.

use super::{Move, Player};

/// A move the engine refused to apply.
///
/// Always recoverable: the coordinator reports it and asks again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum IllegalMove {
    /// The coordinate is not on the 3x3 board.
    #[display("Cell {} is off the board", _0)]
    OutOfRange(Move),

    /// The cell already holds a mark.
    #[display("{} is already taken", _0)]
    Occupied(Move),

    /// The match has already finished.
    #[display("Match is already over")]
    MatchOver,

    /// It is the other player's turn.
    #[display("It's not {}'s turn", _0)]
    WrongTurn(Player),
}

impl std::error::Error for IllegalMove {}

/// Search was asked for a move on a board with no empty cell.
///
/// Only reachable when the caller skips the terminal-state check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
#[display("No moves available: the board is full")]
pub struct NoMovesAvailable;

impl std::error::Error for NoMovesAvailable {}
