//! Legal move enumeration.

use super::super::{Board, Move};

/// Returns every empty cell in row-major order.
///
/// Recomputed on each call; the board changes between calls.
pub fn legal_moves(board: &Board) -> Vec<Move> {
    board
        .cells()
        .filter(|(_, cell)| cell.is_empty())
        .map(|(mv, _)| mv)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_moves_empty_board() {
        assert_eq!(legal_moves(&Board::new()), Move::ALL.to_vec());
    }

    #[test]
    fn test_valid_moves_filters_occupied() {
        let board: Board = "X.. .O. ...".parse().unwrap();
        let moves = legal_moves(&board);
        assert_eq!(moves.len(), 7);
        assert!(!moves.contains(&Move::new(0, 0)));
        assert!(!moves.contains(&Move::new(1, 1)));
        assert_eq!(moves.first(), Some(&Move::new(0, 1)));
        assert_eq!(moves.last(), Some(&Move::new(2, 2)));
    }
}
