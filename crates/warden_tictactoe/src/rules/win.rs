//! Win detection logic for tic-tac-toe.

use super::super::{Board, Move, Player};

/// The eight winning lines: rows top to bottom, columns left to right,
/// then the main diagonal and the anti-diagonal.
const LINES: [[Move; 3]; 8] = [
    // Rows
    [Move::new(0, 0), Move::new(0, 1), Move::new(0, 2)],
    [Move::new(1, 0), Move::new(1, 1), Move::new(1, 2)],
    [Move::new(2, 0), Move::new(2, 1), Move::new(2, 2)],
    // Columns
    [Move::new(0, 0), Move::new(1, 0), Move::new(2, 0)],
    [Move::new(0, 1), Move::new(1, 1), Move::new(2, 1)],
    [Move::new(0, 2), Move::new(1, 2), Move::new(2, 2)],
    // Diagonals
    [Move::new(0, 0), Move::new(1, 1), Move::new(2, 2)],
    [Move::new(0, 2), Move::new(1, 1), Move::new(2, 0)],
];

/// Checks if there is a winner on the board.
///
/// Returns the owner of the first complete line, scanning rows, then
/// columns, then diagonals.
pub fn winner(board: &Board) -> Option<Player> {
    LINES.iter().find_map(|[a, b, c]| {
        let player = board.get(*a)?.player()?;
        (board.get(*b)?.player() == Some(player) && board.get(*c)?.player() == Some(player))
            .then_some(player)
    })
}
