//! Text output for the `stats` and `leaderboard` commands.

use warden_stats::{AggregatedStats, LeaderboardEntry};

/// Formats one player's totals.
pub fn stats_summary(name: &str, stats: &AggregatedStats) -> String {
    if *stats.total_games() == 0 {
        return format!("{}: no games yet", name);
    }
    format!(
        "{}: Wins {} · Draws {} · Losses {} · Games {} · Win rate {:.1}%",
        name,
        stats.wins(),
        stats.draws(),
        stats.losses(),
        stats.total_games(),
        stats.win_rate()
    )
}

/// Formats the leaderboard as a ranked table.
pub fn leaderboard_table(entries: &[LeaderboardEntry]) -> String {
    if entries.is_empty() {
        return "No games recorded yet.".to_string();
    }

    let width = entries
        .iter()
        .map(|e| e.display_name().chars().count())
        .max()
        .unwrap_or(0)
        .max("Player".len());

    let mut lines = vec![format!(
        "{:>3}  {:<width$}  {:>4}  {:>5}  {:>6}",
        "#", "Player", "Wins", "Draws", "Losses"
    )];
    for (rank, entry) in entries.iter().enumerate() {
        let stats = entry.stats();
        lines.push(format!(
            "{:>3}  {:<width$}  {:>4}  {:>5}  {:>6}",
            rank + 1,
            entry.display_name(),
            stats.wins(),
            stats.draws(),
            stats.losses()
        ));
    }
    lines.join("\n")
}
