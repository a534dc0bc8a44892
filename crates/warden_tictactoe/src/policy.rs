//! Computer opponent difficulty.

use super::rules::legal_moves;
use super::search::best_move;
use super::{Board, Move, NoMovesAvailable, Player};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// How hard the computer plays.
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
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum Difficulty {
    /// Uniformly random legal moves.
    #[default]
    Easy,
    /// Perfect play via minimax; never loses.
    Impossible,
}

/// Picks a legal move uniformly at random.
///
/// # Errors
///
/// Returns [`NoMovesAvailable`] if the board is full.
#[instrument(skip(board, rng))]
pub fn random_move<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Result<Move, NoMovesAvailable> {
    legal_moves(board)
        .choose(rng)
        .copied()
        .ok_or(NoMovesAvailable)
}

/// Chooses the computer's move for `player` at the given difficulty.
///
/// `rng` is only consulted on [`Difficulty::Easy`].
///
/// # Errors
///
/// Returns [`NoMovesAvailable`] if the board is full.
#[instrument(skip(board, rng))]
pub fn compute_move<R: Rng + ?Sized>(
    board: &Board,
    player: Player,
    difficulty: Difficulty,
    rng: &mut R,
) -> Result<Move, NoMovesAvailable> {
    let mv = match difficulty {
        Difficulty::Easy => random_move(board, rng)?,
        Difficulty::Impossible => best_move(board, player)?,
    };
    debug!(%mv, %difficulty, "Computer move chosen");
    Ok(mv)
}
