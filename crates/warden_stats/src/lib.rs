//! Persistence of tic-tac-toe results for the Warden bot.
//!
//! Stores one row per player per finished match in SQLite and derives
//! win/loss/draw totals and a wins leaderboard from them. Implements
//! [`warden_tictactoe::ResultReporter`] through [`StatsService`].

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod models;
mod repository;
mod schema; // Diesel generated schema - internal use only
mod service;

pub use error::{DbError, DbErrorKind};
pub use models::{
    AggregatedStats, GameStat, LeaderboardEntry, NewGameStat, NewUser, TICTACTOE, User,
    parse_outcome,
};
pub use repository::{GameRepository, MIGRATIONS};
pub use service::StatsService;
