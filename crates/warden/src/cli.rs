//! Command-line interface for warden.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use warden_tictactoe::Difficulty;

/// Warden - tic-tac-toe against a bot that never loses (on Impossible)
#[derive(Parser, Debug)]
#[command(name = "warden")]
#[command(about = "Play tic-tac-toe in the terminal and track results", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to the stats database (overrides config and WARDEN_DB)
    #[arg(long, global = true)]
    pub db: Option<String>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play against the computer
    Play {
        /// Your display name (stats are filed under it)
        #[arg(short, long)]
        name: String,

        /// Computer strength: easy or impossible (defaults to config)
        #[arg(short, long)]
        difficulty: Option<Difficulty>,

        /// Let the computer take X and open the match
        #[arg(long)]
        computer_first: bool,
    },

    /// Hot-seat match between two people at one terminal
    Versus {
        /// Name of the player taking X (moves first)
        #[arg(long)]
        x: String,

        /// Name of the player taking O
        #[arg(long)]
        o: String,
    },

    /// Show a player's results
    Stats {
        /// Display name to look up
        #[arg(short, long)]
        name: String,
    },

    /// Show the top players by wins
    Leaderboard {
        /// Number of rows (defaults to config)
        #[arg(short, long)]
        limit: Option<usize>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_play() {
        let cli = Cli::parse_from([
            "warden",
            "--db",
            "other.db",
            "play",
            "--name",
            "Ada",
            "--difficulty",
            "IMPOSSIBLE",
            "--computer-first",
        ]);
        assert_eq!(cli.db.as_deref(), Some("other.db"));
        match cli.command {
            Command::Play {
                name,
                difficulty,
                computer_first,
            } => {
                assert_eq!(name, "Ada");
                assert_eq!(difficulty, Some(Difficulty::Impossible));
                assert!(computer_first);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["warden", "leaderboard", "--config", "w.toml"]);
        assert_eq!(cli.config, Some(PathBuf::from("w.toml")));
        assert!(matches!(cli.command, Command::Leaderboard { limit: None }));
    }

    #[test]
    fn test_rejects_unknown_difficulty() {
        let result = Cli::try_parse_from(["warden", "play", "--name", "Ada", "-d", "medium"]);
        assert!(result.is_err());
    }
}
