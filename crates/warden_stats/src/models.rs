//! Database models and domain types.

use chrono::NaiveDateTime;
use derive_getters::Getters;
use derive_new::new;
use diesel::prelude::*;
use tracing::instrument;
use warden_tictactoe::{PlayerOutcome, PlayerResult};

use crate::{DbError, schema};

/// Game type stored for tic-tac-toe results.
pub const TICTACTOE: &str = "tictactoe";

/// User profile database model.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable, Getters)]
#[diesel(table_name = schema::users)]
pub struct User {
    id: i32,
    display_name: String,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

/// Insertable user model for creating new users.
#[derive(Debug, Clone, Insertable, new)]
#[diesel(table_name = schema::users)]
pub struct NewUser {
    display_name: String,
}

/// Game statistics database model.
#[derive(Debug, Clone, Queryable, Identifiable, Associations, Selectable, Getters)]
#[diesel(table_name = schema::game_stats)]
#[diesel(belongs_to(User))]
pub struct GameStat {
    id: i32,
    user_id: i32,
    opponent_name: String,
    game_type: String,
    outcome: String,
    played_at: NaiveDateTime,
    moves_count: i32,
}

impl GameStat {
    /// Parses the stored outcome string.
    #[instrument(skip(self), fields(outcome = %self.outcome))]
    pub fn parse_outcome(&self) -> Result<PlayerOutcome, DbError> {
        parse_outcome(&self.outcome)
    }
}

/// Insertable game stat model for recording new game results.
#[derive(Debug, Clone, Insertable, new, Getters)]
#[diesel(table_name = schema::game_stats)]
pub struct NewGameStat {
    user_id: i32,
    opponent_name: String,
    game_type: String,
    outcome: String,
    moves_count: i32,
}

impl NewGameStat {
    /// Builds the row for one reported tic-tac-toe result.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the move count does not fit the column.
    pub fn from_result(user_id: i32, result: &PlayerResult) -> Result<Self, DbError> {
        let moves_count = i32::try_from(result.moves).map_err(|_| {
            DbError::invalid_data(format!("Move count {} out of range", result.moves))
        })?;
        Ok(Self::new(
            user_id,
            result.opponent.clone(),
            TICTACTOE.to_string(),
            result.outcome.to_string(),
            moves_count,
        ))
    }
}

/// Parses an outcome as stored in the database (`win`, `loss`, `draw`).
///
/// # Errors
///
/// Returns [`DbError`] if the string is not a valid outcome value.
pub fn parse_outcome(s: &str) -> Result<PlayerOutcome, DbError> {
    s.parse()
        .map_err(|_| DbError::invalid_data(format!("Invalid outcome: '{}'", s)))
}

/// Aggregated statistics for a user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Getters, new)]
pub struct AggregatedStats {
    total_games: i32,
    wins: i32,
    losses: i32,
    draws: i32,
}

impl AggregatedStats {
    /// Counts one more result.
    pub fn add(&mut self, outcome: PlayerOutcome) {
        self.total_games += 1;
        match outcome {
            PlayerOutcome::Win => self.wins += 1,
            PlayerOutcome::Loss => self.losses += 1,
            PlayerOutcome::Draw => self.draws += 1,
        }
    }

    /// Calculates win rate as a percentage (0.0–100.0).
    pub fn win_rate(&self) -> f64 {
        if self.total_games == 0 {
            0.0
        } else {
            (self.wins as f64 / self.total_games as f64) * 100.0
        }
    }
}

/// One row of the leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Getters, new)]
pub struct LeaderboardEntry {
    display_name: String,
    stats: AggregatedStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_strings() {
        assert_eq!(parse_outcome("win").unwrap(), PlayerOutcome::Win);
        assert_eq!(parse_outcome("loss").unwrap(), PlayerOutcome::Loss);
        assert_eq!(parse_outcome("draw").unwrap(), PlayerOutcome::Draw);
        let err = parse_outcome("forfeit").unwrap_err();
        assert_eq!(err.kind, crate::DbErrorKind::InvalidData);
    }

    #[test]
    fn test_row_from_result() {
        let result = PlayerResult {
            player: "Ada".to_string(),
            opponent: "Bot (Easy)".to_string(),
            outcome: PlayerOutcome::Draw,
            moves: 9,
        };
        let row = NewGameStat::from_result(4, &result).unwrap();
        assert_eq!(*row.user_id(), 4);
        assert_eq!(row.outcome(), "draw");
        assert_eq!(row.game_type(), TICTACTOE);
        assert_eq!(*row.moves_count(), 9);

        let huge = PlayerResult {
            moves: usize::MAX,
            ..result
        };
        assert!(NewGameStat::from_result(4, &huge).is_err());
    }

    #[test]
    fn test_aggregate_counts_and_rate() {
        let mut stats = AggregatedStats::default();
        assert_eq!(stats.win_rate(), 0.0);

        stats.add(PlayerOutcome::Win);
        stats.add(PlayerOutcome::Draw);
        stats.add(PlayerOutcome::Loss);
        stats.add(PlayerOutcome::Win);

        assert_eq!(stats, AggregatedStats::new(4, 2, 1, 1));
        assert_eq!(stats.win_rate(), 50.0);
    }
}
