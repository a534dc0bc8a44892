//! Draw detection logic for tic-tac-toe.

use super::super::Board;

/// Checks if the board is full (no empty cell left).
///
/// A full board with no winner is a draw; callers check [`winner`]
/// first.
///
/// [`winner`]: super::winner
pub fn is_full(board: &Board) -> bool {
    board.cells().all(|(_, cell)| !cell.is_empty())
}
