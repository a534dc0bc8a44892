//! Host configuration loaded from TOML.

use std::path::Path;

use derive_getters::Getters;
use derive_more::{Display, Error};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};
use warden_tictactoe::Difficulty;

/// Environment variable that overrides the database path.
pub const DB_ENV_VAR: &str = "WARDEN_DB";

/// Configuration for the warden host.
///
/// Every field has a default, so an empty file (or no file) is valid.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct WardenConfig {
    /// SQLite database holding player stats.
    #[serde(default = "default_db_path")]
    db_path: String,

    /// Difficulty used by `play` when none is given on the command line.
    #[serde(default)]
    difficulty: Difficulty,

    /// Rows shown by `leaderboard` when no limit is given.
    #[serde(default = "default_leaderboard_size")]
    leaderboard_size: usize,

    /// Seed for the computer's random source; entropy when unset.
    #[serde(default)]
    rng_seed: Option<u64>,
}

fn default_db_path() -> String {
    "warden.db".to_string()
}

fn default_leaderboard_size() -> usize {
    10
}

impl Default for WardenConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            difficulty: Difficulty::default(),
            leaderboard_size: default_leaderboard_size(),
            rng_seed: None,
        }
    }
}

impl WardenConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(db_path = %config.db_path, difficulty = %config.difficulty, "Config loaded successfully");
        Ok(config)
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] on malformed TOML or bad values.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        if config.db_path.trim().is_empty() {
            return Err(ConfigError::new("db_path must not be empty".to_string()));
        }
        Ok(config)
    }

    /// Loads `path` if given, else the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a given file cannot be loaded.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                debug!("No config file given, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Applies database path overrides. The command-line flag beats the
    /// environment, which beats the file.
    #[instrument(skip(self))]
    pub fn with_db_override(mut self, env_db: Option<String>, cli_db: Option<String>) -> Self {
        if let Some(path) = cli_db.or(env_db).filter(|p| !p.trim().is_empty()) {
            debug!(from = %self.db_path, to = %path, "Overriding database path");
            self.db_path = path;
        }
        self
    }

    /// Builds the random source for the computer opponent.
    pub fn rng(&self) -> StdRng {
        match self.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
