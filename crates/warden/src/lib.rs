//! Terminal host for the Warden tic-tac-toe engine.
//!
//! # Architecture
//!
//! - **CLI**: [`Cli`] subcommands for playing the bot, hot-seat matches,
//!   per-player stats and the leaderboard.
//! - **Config**: [`WardenConfig`] from TOML, with database overrides from
//!   the environment and the command line.
//! - **Contestants**: [`HumanContestant`] reads moves from a [`Terminal`];
//!   [`ComputerContestant`] asks the engine.
//! - **Orchestrator**: [`Orchestrator`] alternates turns, re-prompts on
//!   illegal moves and reports finished matches to the stats store.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod cli;
mod config;
mod contestants;
mod orchestrator;
mod render;

pub use cli::{Cli, Command};
pub use config::{ConfigError, DB_ENV_VAR, WardenConfig};
pub use contestants::{ComputerContestant, Console, Contestant, HumanContestant, Terminal, Turn};
pub use orchestrator::{MatchEnd, Orchestrator};
pub use render::{leaderboard_table, stats_summary};
