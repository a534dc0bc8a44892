//! Database repository for player profiles and game statistics.

use std::collections::HashMap;

use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info, instrument, warn};

use warden_tictactoe::PlayerResult;

use crate::models::parse_outcome;
use crate::{
    AggregatedStats, DbError, DbErrorKind, GameStat, LeaderboardEntry, NewGameStat, NewUser, User,
    schema,
};

/// Schema migrations shipped with the crate.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Database repository for user and game operations.
///
/// Opens a fresh connection per operation, so use a file path rather
/// than `":memory:"`.
#[derive(Debug, Clone)]
pub struct GameRepository {
    db_path: String,
}

impl GameRepository {
    /// Creates a new repository for the database at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the path is empty.
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub fn new(db_path: String) -> Result<Self, DbError> {
        if db_path.trim().is_empty() {
            return Err(DbError::new(DbErrorKind::InvalidInput, "Database path is empty"));
        }
        info!(path = %db_path, "Creating GameRepository");
        Ok(Self { db_path })
    }

    /// Returns the database path.
    pub fn db_path(&self) -> &str {
        &self.db_path
    }

    /// Establishes a database connection.
    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, DbError> {
        debug!(path = %self.db_path, "Establishing connection");
        SqliteConnection::establish(&self.db_path)
            .map_err(|e| {
                DbError::new(
                    DbErrorKind::Connection,
                    format!("Failed to connect to '{}': {}", self.db_path, e),
                )
            })
    }

    /// Applies any pending schema migrations. Creates the file if needed.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the connection or a migration fails.
    #[instrument(skip(self))]
    pub fn run_migrations(&self) -> Result<(), DbError> {
        let mut conn = self.connection()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| DbError::migration(e.to_string()))?;
        info!(count = applied.len(), "Migrations applied");
        Ok(())
    }

    /// Creates a new user profile.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the display name is already taken or a database error occurs.
    #[instrument(skip(self))]
    pub fn create_user(&self, display_name: String) -> Result<User, DbError> {
        debug!(display_name = %display_name, "Creating user");
        let mut conn = self.connection()?;
        insert_user(&mut conn, display_name)
    }

    /// Gets a user by display name. Returns `None` if not found.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn get_user_by_name(&self, display_name: &str) -> Result<Option<User>, DbError> {
        let mut conn = self.connection()?;
        find_user(&mut conn, display_name)
    }

    /// Lists all user profiles, ordered by creation.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn list_users(&self) -> Result<Vec<User>, DbError> {
        let mut conn = self.connection()?;

        let users = schema::users::table
            .order((schema::users::created_at.asc(), schema::users::id.asc()))
            .select(User::as_select())
            .load(&mut conn)?;

        debug!(count = users.len(), "Users loaded");
        Ok(users)
    }

    /// Records a completed game result.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self, stat), fields(user_id = stat.user_id(), outcome = %stat.outcome()))]
    pub fn record_game(&self, stat: NewGameStat) -> Result<GameStat, DbError> {
        let mut conn = self.connection()?;
        insert_game(&mut conn, &stat)
    }

    /// Records the results of one match in a single transaction, creating
    /// players that do not exist yet.
    ///
    /// Either every result is stored or none is.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if any row cannot be written; the transaction is
    /// rolled back.
    #[instrument(skip(self, results), fields(count = results.len()))]
    pub fn record_results(&self, results: &[PlayerResult]) -> Result<Vec<GameStat>, DbError> {
        let mut conn = self.connection()?;

        let stored = conn.transaction::<Vec<GameStat>, DbError, _>(|conn| {
            results
                .iter()
                .map(|result| {
                    let user = match find_user(conn, &result.player)? {
                        Some(user) => user,
                        None => insert_user(conn, result.player.clone())?,
                    };
                    insert_game(conn, &NewGameStat::from_result(*user.id(), result)?)
                })
                .collect()
        });

        match &stored {
            Ok(rows) => info!(count = rows.len(), "Match results committed"),
            Err(e) => warn!(error = %e, "Match results rolled back"),
        }
        stored
    }

    /// Gets all game stats for a user, most recent first.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn get_user_stats(&self, user_id: i32) -> Result<Vec<GameStat>, DbError> {
        let mut conn = self.connection()?;

        let stats = schema::game_stats::table
            .filter(schema::game_stats::user_id.eq(user_id))
            .order((
                schema::game_stats::played_at.desc(),
                schema::game_stats::id.desc(),
            ))
            .select(GameStat::as_select())
            .load(&mut conn)?;

        debug!(user_id, count = stats.len(), "User stats loaded");
        Ok(stats)
    }

    /// Gets aggregated win/loss/draw counts for a user.
    ///
    /// Rows with an unknown outcome are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn get_aggregated_stats(&self, user_id: i32) -> Result<AggregatedStats, DbError> {
        let mut conn = self.connection()?;

        let outcomes: Vec<String> = schema::game_stats::table
            .filter(schema::game_stats::user_id.eq(user_id))
            .select(schema::game_stats::outcome)
            .load(&mut conn)?;

        let mut aggregated = AggregatedStats::default();
        for outcome in &outcomes {
            match parse_outcome(outcome) {
                Ok(outcome) => aggregated.add(outcome),
                Err(e) => warn!(error = %e, user_id, "Skipping stored result"),
            }
        }

        info!(
            user_id,
            total = aggregated.total_games(),
            wins = aggregated.wins(),
            losses = aggregated.losses(),
            draws = aggregated.draws(),
            win_rate = %format!("{:.1}%", aggregated.win_rate()),
            "Aggregated stats computed"
        );
        Ok(aggregated)
    }

    /// Returns the players with the most wins.
    ///
    /// Only players with at least one recorded game appear. Ties on wins
    /// are broken by display name.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn leaderboard(&self, limit: usize) -> Result<Vec<LeaderboardEntry>, DbError> {
        let mut conn = self.connection()?;

        let rows: Vec<(String, String)> = schema::game_stats::table
            .inner_join(schema::users::table)
            .select((schema::users::display_name, schema::game_stats::outcome))
            .load(&mut conn)?;

        let mut tallies: HashMap<String, AggregatedStats> = HashMap::new();
        for (name, outcome) in rows {
            match parse_outcome(&outcome) {
                Ok(outcome) => tallies.entry(name).or_default().add(outcome),
                Err(e) => warn!(error = %e, player = %name, "Skipping stored result"),
            }
        }

        let mut entries: Vec<LeaderboardEntry> = tallies
            .into_iter()
            .map(|(name, stats)| LeaderboardEntry::new(name, stats))
            .collect();
        entries.sort_by(|a, b| {
            b.stats()
                .wins()
                .cmp(a.stats().wins())
                .then_with(|| a.display_name().cmp(b.display_name()))
        });
        entries.truncate(limit);

        debug!(count = entries.len(), "Leaderboard built");
        Ok(entries)
    }
}

fn find_user(conn: &mut SqliteConnection, display_name: &str) -> Result<Option<User>, DbError> {
    let user = schema::users::table
        .filter(schema::users::display_name.eq(display_name))
        .select(User::as_select())
        .first(conn)
        .optional()?;

    debug!(display_name, found = user.is_some(), "User lookup finished");
    Ok(user)
}

fn insert_user(conn: &mut SqliteConnection, display_name: String) -> Result<User, DbError> {
    let user = diesel::insert_into(schema::users::table)
        .values(&NewUser::new(display_name))
        .returning(User::as_returning())
        .get_result(conn)?;

    info!(user_id = user.id(), display_name = %user.display_name(), "User created");
    Ok(user)
}

fn insert_game(conn: &mut SqliteConnection, stat: &NewGameStat) -> Result<GameStat, DbError> {
    let game_stat = diesel::insert_into(schema::game_stats::table)
        .values(stat)
        .returning(GameStat::as_returning())
        .get_result(conn)?;

    info!(
        stat_id = game_stat.id(),
        user_id = game_stat.user_id(),
        outcome = %game_stat.outcome(),
        "Game result recorded"
    );
    Ok(game_stat)
}
