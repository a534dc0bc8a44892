//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`](super::Board). Rules are kept apart
//! from board storage so the match lifecycle and the search can share
//! them.

mod draw;
mod moves;
mod win;

pub use draw::is_full;
pub use moves::legal_moves;
pub use win::winner;
