//! Tic-tac-toe engine for the Warden bot.
//!
//! # Architecture
//!
//! - **Board & rules**: a 3x3 [`Board`] with in-place [`Board::apply`] /
//!   [`Board::undo`], plus pure [`winner`], [`is_full`] and [`legal_moves`].
//! - **Match**: [`Match`] owns one board, enforces turn order and moves
//!   to a terminal [`MatchState`] exactly once.
//! - **Search**: [`best_move`] plays perfectly via exhaustive minimax;
//!   [`random_move`] backs the easy opponent. [`compute_move`] picks by
//!   [`Difficulty`].
//! - **Reporting**: [`report_match`] turns a finished match into
//!   [`PlayerResult`]s for a [`ResultReporter`].
//!
//! The crate holds no global state and performs no I/O. Randomness comes
//! from the caller.
//!
//! # Example
//!
//! ```
//! use warden_tictactoe::{compute_move, Difficulty, Match, MatchState, Move, Player};
//!
//! let mut game = Match::new(Player::X);
//! game.apply_move(Move::new(1, 1), Player::X)?;
//!
//! let mut rng = rand::thread_rng();
//! let reply = compute_move(game.board(), Player::O, Difficulty::Impossible, &mut rng)?;
//! assert_eq!(game.apply_move(reply, Player::O)?, MatchState::Ongoing);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod board;
mod contracts;
mod error;
mod game;
mod policy;
mod report;
mod rules;
mod search;
mod types;

pub use action::{Move, SIZE};
pub use board::{Board, ParseBoardError};
pub use contracts::{
    CellIsFree, Contract, InvariantViolation, LegalMove, MatchOngoing, MoveContract, PlayersTurn,
};
pub use error::{IllegalMove, NoMovesAvailable};
pub use game::{Match, MatchSnapshot, MatchState};
pub use policy::{Difficulty, compute_move, random_move};
pub use report::{
    Participant, PlayerOutcome, PlayerResult, ResultReporter, Seats, report_match, results_for,
};
pub use rules::{is_full, legal_moves, winner};
pub use search::{DRAW, LOSS, Score, WIN, best_move, move_scores};
pub use types::{Cell, Player};
