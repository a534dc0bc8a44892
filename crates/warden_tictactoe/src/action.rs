//! Move coordinates for tic-tac-toe.
//!
//! A move is a bare (row, column) coordinate. Coordinates are not
//! range-checked on construction so that input from the host can be
//! carried to the engine and rejected there with a proper error.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Side length of the board.
pub const SIZE: usize = 3;

const LABELS: [&str; SIZE * SIZE] = [
    "Top-left",
    "Top-center",
    "Top-right",
    "Middle-left",
    "Center",
    "Middle-right",
    "Bottom-left",
    "Bottom-center",
    "Bottom-right",
];

/// A (row, column) coordinate on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    row: usize,
    col: usize,
}

impl Move {
    /// All 9 in-range moves in row-major order.
    pub const ALL: [Move; SIZE * SIZE] = [
        Move::new(0, 0),
        Move::new(0, 1),
        Move::new(0, 2),
        Move::new(1, 0),
        Move::new(1, 1),
        Move::new(1, 2),
        Move::new(2, 0),
        Move::new(2, 1),
        Move::new(2, 2),
    ];

    /// Creates a move without checking the coordinates.
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Row, counted from the top (0-based).
    pub fn row(self) -> usize {
        self.row
    }

    /// Column, counted from the left (0-based).
    pub fn col(self) -> usize {
        self.col
    }

    /// Returns true if the coordinate lies on the 3x3 board.
    pub fn in_range(self) -> bool {
        self.row < SIZE && self.col < SIZE
    }

    /// Row-major board index (0-8), if in range.
    pub fn index(self) -> Option<usize> {
        self.in_range().then_some(self.row * SIZE + self.col)
    }

    /// Creates a move from a row-major board index.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Human-readable label ("Top-left" ... "Bottom-right").
    pub fn label(self) -> Option<&'static str> {
        self.index().map(|i| LABELS[i])
    }

    /// Returns true for the four corner cells.
    pub fn is_corner(self) -> bool {
        self.in_range() && self.row != 1 && self.col != 1
    }

    /// Returns true for the center cell.
    pub fn is_center(self) -> bool {
        self.row == 1 && self.col == 1
    }

    /// Parses user input into a move.
    ///
    /// Accepts a cell number `1`-`9` (row-major, as printed on an empty
    /// board), a 0-based `row,col` pair, or a label such as `top-left`
    /// (case, spaces and dashes ignored). The returned move may still be
    /// out of range when given as a pair; the engine rejects it.
    #[instrument]
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();

        if let Ok(number) = input.parse::<usize>() {
            return number.checked_sub(1).and_then(Self::from_index);
        }

        if let Some((row, col)) = input.split_once([',', ' ']) {
            if let (Ok(row), Ok(col)) = (row.trim().parse(), col.trim().parse()) {
                return Some(Self::new(row, col));
            }
        }

        let wanted = normalize(input);
        LABELS
            .iter()
            .position(|label| normalize(label) == wanted)
            .and_then(Self::from_index)
    }
}

fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.label() {
            Some(label) => write!(f, "{} ({}, {})", label, self.row, self.col),
            None => write!(f, "({}, {})", self.row, self.col),
        }
    }
}
