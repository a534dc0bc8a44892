//! The 3x3 board and its in-place move primitives.

use super::action::SIZE;
use super::{Cell, IllegalMove, Move, Player};
use serde::{Deserialize, Serialize};

/// 3x3 tic-tac-toe board.
///
/// Plain data: copying it is cheaper than sharing it, so search works on
/// its own copy and the real match keeps the authoritative one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Board {
    cells: [[Cell; SIZE]; SIZE],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a board from rows, top to bottom.
    pub fn from_rows(cells: [[Cell; SIZE]; SIZE]) -> Self {
        Self { cells }
    }

    /// Returns the cell at the given coordinate, or `None` if off the board.
    pub fn get(&self, mv: Move) -> Option<Cell> {
        self.cells.get(mv.row())?.get(mv.col()).copied()
    }

    /// Checks if the cell at the coordinate is on the board and empty.
    pub fn is_empty_at(&self, mv: Move) -> bool {
        matches!(self.get(mv), Some(Cell::Empty))
    }

    /// Places `player`'s mark on an empty cell.
    ///
    /// The only side effect is the single cell write.
    pub fn apply(&mut self, mv: Move, player: Player) -> Result<(), IllegalMove> {
        if !mv.in_range() {
            return Err(IllegalMove::OutOfRange(mv));
        }
        let cell = &mut self.cells[mv.row()][mv.col()];
        if !cell.is_empty() {
            return Err(IllegalMove::Occupied(mv));
        }
        *cell = Cell::Occupied(player);
        Ok(())
    }

    /// Resets a cell to empty. Out-of-range coordinates are ignored.
    pub fn undo(&mut self, mv: Move) {
        if mv.in_range() {
            self.cells[mv.row()][mv.col()] = Cell::Empty;
        }
    }

    /// Rows, top to bottom.
    pub fn rows(&self) -> &[[Cell; SIZE]; SIZE] {
        &self.cells
    }

    /// All cells paired with their coordinate, in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Move, Cell)> + '_ {
        Move::ALL.into_iter().map(|mv| (mv, self.cells[mv.row()][mv.col()]))
    }

    /// Number of cells holding `player`'s mark.
    pub fn count(&self, player: Player) -> usize {
        self.cells()
            .filter(|(_, cell)| *cell == Cell::Occupied(player))
            .count()
    }

    /// Number of occupied cells.
    pub fn filled(&self) -> usize {
        self.cells().filter(|(_, cell)| !cell.is_empty()).count()
    }

    /// Formats the board as a human-readable string.
    ///
    /// Empty cells show the number a human types to play there.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..SIZE {
            for col in 0..SIZE {
                let symbol = match self.cells[row][col] {
                    Cell::Empty => char::from_digit((row * SIZE + col + 1) as u32, 10).unwrap_or('?'),
                    Cell::Occupied(player) => player.symbol(),
                };
                result.push(symbol);
                if col < SIZE - 1 {
                    result.push('|');
                }
            }
            if row < SIZE - 1 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

/// Error parsing a board from its compact text form.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("Invalid board: {}", _0)]
pub struct ParseBoardError(String);

impl std::error::Error for ParseBoardError {}

impl std::str::FromStr for Board {
    type Err = ParseBoardError;

    /// Parses nine marks in row-major order: `X`, `O`, and `.` or `-` for
    /// empty. Whitespace and `|` separators are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let marks: Vec<char> = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '|')
            .collect();
        if marks.len() != SIZE * SIZE {
            return Err(ParseBoardError(format!(
                "expected 9 cells, found {}",
                marks.len()
            )));
        }

        let mut board = Board::new();
        for (mv, mark) in Move::ALL.into_iter().zip(marks) {
            board.cells[mv.row()][mv.col()] = match mark.to_ascii_uppercase() {
                'X' => Cell::Occupied(Player::X),
                'O' => Cell::Occupied(Player::O),
                '.' | '-' => Cell::Empty,
                other => return Err(ParseBoardError(format!("unexpected mark '{}'", other))),
            };
        }
        Ok(board)
    }
}
