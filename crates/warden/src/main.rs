//! Warden - terminal tic-tac-toe with persistent stats.

use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info, instrument};
use tracing_subscriber::EnvFilter;
use warden::{
    Cli, Command, Console, DB_ENV_VAR, MatchEnd, Orchestrator, WardenConfig, leaderboard_table,
    stats_summary,
};
use warden_stats::StatsService;
use warden_tictactoe::{Difficulty, Participant};

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Logs go to stderr so they never interleave with the board.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let config = WardenConfig::load(cli.config.as_deref())?
        .with_db_override(std::env::var(DB_ENV_VAR).ok(), cli.db);
    debug!(?config, "Configuration resolved");

    match cli.command {
        Command::Play {
            name,
            difficulty,
            computer_first,
        } => run_play(&config, &name, difficulty.unwrap_or(*config.difficulty()), computer_first),
        Command::Versus { x, o } => run_versus(&config, &x, &o),
        Command::Stats { name } => run_stats(&config, &name),
        Command::Leaderboard { limit } => {
            run_leaderboard(&config, limit.unwrap_or(*config.leaderboard_size()))
        }
    }
}

fn open_stats(config: &WardenConfig) -> Result<StatsService> {
    StatsService::open(config.db_path())
        .with_context(|| format!("Failed to open stats database '{}'", config.db_path()))
}

/// Plays matches on stdin/stdout, offering rematches, and records them.
fn run_match(config: &WardenConfig, mut orchestrator: Orchestrator) -> Result<()> {
    let mut stats = open_stats(config)?;
    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout());

    let ends = orchestrator.run_series(&mut console, &mut stats)?;
    if !ends.iter().any(|end| matches!(end, MatchEnd::Finished { .. })) {
        debug!("Nothing recorded");
        return Ok(());
    }

    let seats = orchestrator.seats();
    for participant in [&seats.x, &seats.o] {
        if let Participant::Human { name } = participant {
            let totals = stats.stats_for(name)?;
            println!("{}", stats_summary(name, &totals));
        }
    }
    Ok(())
}

/// Human against the computer.
#[instrument(skip(config))]
fn run_play(config: &WardenConfig, name: &str, difficulty: Difficulty, computer_first: bool) -> Result<()> {
    info!("Starting match against the computer");
    let orchestrator = Orchestrator::versus_computer(name, difficulty, computer_first, config.rng());
    run_match(config, orchestrator)
}

/// Two humans at one terminal.
#[instrument(skip(config))]
fn run_versus(config: &WardenConfig, x: &str, o: &str) -> Result<()> {
    if x == o {
        anyhow::bail!("Players need different names (both are '{}')", x);
    }
    info!("Starting hot-seat match");
    run_match(config, Orchestrator::hot_seat(x, o))
}

#[instrument(skip(config))]
fn run_stats(config: &WardenConfig, name: &str) -> Result<()> {
    let stats = open_stats(config)?.stats_for(name)?;
    println!("{}", stats_summary(name, &stats));
    Ok(())
}

#[instrument(skip(config))]
fn run_leaderboard(config: &WardenConfig, limit: usize) -> Result<()> {
    let entries = open_stats(config)?.leaderboard(limit)?;
    println!("{}", leaderboard_table(&entries));
    Ok(())
}
