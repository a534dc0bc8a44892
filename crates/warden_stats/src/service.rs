//! Stats service: the collaborator finished matches are reported to.

use tracing::{debug, info, instrument};
use warden_tictactoe::{PlayerResult, ResultReporter};

use crate::{AggregatedStats, DbError, DbErrorKind, GameRepository, GameStat, LeaderboardEntry, User};

/// Service layer over [`GameRepository`].
///
/// Adds get-or-create semantics for players and converts engine results
/// into stored rows.
#[derive(Debug, Clone)]
pub struct StatsService {
    repository: GameRepository,
}

impl StatsService {
    /// Creates a new stats service backed by the given repository.
    #[instrument(skip(repository))]
    pub fn new(repository: GameRepository) -> Self {
        info!(path = %repository.db_path(), "Creating StatsService");
        Self { repository }
    }

    /// Opens the database at `db_path` and applies pending migrations.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the database cannot be opened or migrated.
    #[instrument]
    pub fn open(db_path: &str) -> Result<Self, DbError> {
        let repository = GameRepository::new(db_path.to_string())?;
        repository.run_migrations()?;
        Ok(Self::new(repository))
    }

    /// Returns the underlying repository.
    pub fn repository(&self) -> &GameRepository {
        &self.repository
    }

    /// Returns an existing user by name or creates one if not found.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn get_or_create_user(&self, display_name: &str) -> Result<User, DbError> {
        if let Some(user) = self.repository.get_user_by_name(display_name)? {
            debug!(user_id = user.id(), "Existing user found");
            return Ok(user);
        }

        info!(display_name, "Creating new user");
        self.repository.create_user(display_name.to_string())
    }

    /// Stores one player's result of a finished match.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self), fields(player = %result.player, outcome = %result.outcome))]
    pub fn record_result(&self, result: &PlayerResult) -> Result<GameStat, DbError> {
        self.record_results(std::slice::from_ref(result))?
            .pop()
            .ok_or_else(|| DbError::new(DbErrorKind::Query, "Insert returned no row"))
    }

    /// Stores every result of one match atomically.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if any row fails; nothing is stored then.
    #[instrument(skip(self, results), fields(count = results.len()))]
    pub fn record_results(&self, results: &[PlayerResult]) -> Result<Vec<GameStat>, DbError> {
        self.repository.record_results(results)
    }

    /// Aggregated stats for a player by name; all zeros if they never played.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn stats_for(&self, display_name: &str) -> Result<AggregatedStats, DbError> {
        match self.repository.get_user_by_name(display_name)? {
            Some(user) => self.repository.get_aggregated_stats(*user.id()),
            None => {
                debug!(display_name, "No such player");
                Ok(AggregatedStats::default())
            }
        }
    }

    /// Top players by wins.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn leaderboard(&self, limit: usize) -> Result<Vec<LeaderboardEntry>, DbError> {
        self.repository.leaderboard(limit)
    }
}

impl ResultReporter for StatsService {
    type Error = DbError;

    fn report(&mut self, result: &PlayerResult) -> Result<(), Self::Error> {
        self.record_result(result).map(|_| ())
    }

    fn report_all(&mut self, results: &[PlayerResult]) -> Result<(), Self::Error> {
        self.record_results(results).map(|_| ())
    }
}
