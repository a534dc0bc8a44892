//! Tests for match orchestration over a scripted terminal.

use std::convert::Infallible;
use std::io::Cursor;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tempfile::NamedTempFile;
use warden::{Console, MatchEnd, Orchestrator};
use warden_stats::StatsService;
use warden_tictactoe::{
    Difficulty, MatchState, Participant, Player, PlayerOutcome, PlayerResult, ResultReporter,
};

type ScriptedConsole = Console<Cursor<Vec<u8>>, Vec<u8>>;

fn console(script: &str) -> ScriptedConsole {
    Console::new(Cursor::new(script.as_bytes().to_vec()), Vec::new())
}

fn printed(console: &ScriptedConsole) -> String {
    String::from_utf8_lossy(console.output()).into_owned()
}

/// Cell numbers 1-9 over and over; a human following it always ends up
/// playing the first free cell it reaches.
fn every_cell(times: usize) -> String {
    (0..times)
        .flat_map(|_| 1..=9)
        .map(|n| format!("{}\n", n))
        .collect()
}

#[derive(Default)]
struct Collector {
    results: Vec<PlayerResult>,
}

impl ResultReporter for Collector {
    type Error = Infallible;

    fn report(&mut self, result: &PlayerResult) -> Result<(), Self::Error> {
        self.results.push(result.clone());
        Ok(())
    }
}

#[test]
fn test_hot_seat_win_with_reprompt() {
    // O first tries the occupied center and is asked again.
    let mut term = console("5\n5\n1\n3\n2\n7\n");
    let mut reporter = Collector::default();
    let mut orchestrator = Orchestrator::hot_seat("Ada", "Bea");

    let end = orchestrator.run(&mut term, &mut reporter).unwrap();
    let MatchEnd::Finished { game, results } = end else {
        panic!("match should finish");
    };

    assert_eq!(game.state(), MatchState::Won(Player::X));
    assert_eq!(game.history().len(), 5);
    assert_eq!(results, reporter.results);
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].player, "Ada");
    assert_eq!(results[0].outcome, PlayerOutcome::Win);
    assert_eq!(results[1].player, "Bea");
    assert_eq!(results[1].outcome, PlayerOutcome::Loss);
    assert_eq!(results[1].opponent, "Ada");

    let out = printed(&term);
    assert!(out.contains("Illegal move:"));
    assert!(out.contains("Ada (X) wins!"));
}

#[test]
fn test_out_of_range_pair_is_reprompted() {
    let mut term = console("3,3\nquit\n");
    let mut reporter = Collector::default();
    let mut orchestrator = Orchestrator::hot_seat("Ada", "Bea");

    let end = orchestrator.run(&mut term, &mut reporter).unwrap();
    assert!(matches!(end, MatchEnd::Abandoned { .. }));
    assert!(printed(&term).contains("Illegal move:"));
}

#[test]
fn test_quit_records_nothing() {
    let mut term = console("quit\n");
    let mut reporter = Collector::default();
    let mut orchestrator =
        Orchestrator::versus_computer("Ada", Difficulty::Impossible, false, StdRng::seed_from_u64(3));

    let end = orchestrator.run(&mut term, &mut reporter).unwrap();
    let MatchEnd::Abandoned { game } = end else {
        panic!("match should be abandoned");
    };
    assert!(game.history().is_empty());
    assert!(reporter.results.is_empty());
    assert!(printed(&term).contains("No result recorded"));
}

#[test]
fn test_impossible_bot_is_never_beaten() {
    let mut term = console(&every_cell(5));
    let mut reporter = Collector::default();
    let mut orchestrator =
        Orchestrator::versus_computer("Ada", Difficulty::Impossible, false, StdRng::seed_from_u64(3));

    let end = orchestrator.run(&mut term, &mut reporter).unwrap();
    let MatchEnd::Finished { results, .. } = end else {
        panic!("match should finish");
    };

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].player, "Ada");
    assert_eq!(results[0].opponent, "Bot (Impossible)");
    assert_ne!(results[0].outcome, PlayerOutcome::Win);
}

#[test]
fn test_computer_first_takes_x() {
    let mut term = console(&every_cell(5));
    let mut reporter = Collector::default();
    let mut orchestrator =
        Orchestrator::versus_computer("Ada", Difficulty::Easy, true, StdRng::seed_from_u64(11));

    assert!(orchestrator.seats().x.is_computer());
    assert_eq!(orchestrator.seats().o, Participant::human("Ada"));

    let end = orchestrator.run(&mut term, &mut reporter).unwrap();
    let MatchEnd::Finished { game, results } = end else {
        panic!("match should finish");
    };
    assert_eq!(game.first_player(), Player::X);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].opponent, "Bot (Easy)");
    assert!(printed(&term).contains("Bot (Easy) plays"));
}

#[test]
fn test_finished_match_lands_in_stats() {
    let db_file = NamedTempFile::new().expect("Failed to create temp file");
    let db_path = db_file.path().to_str().expect("Invalid path");
    let mut stats = StatsService::open(db_path).expect("Failed to open stats");

    // Blocked at every turn; ends in a draw.
    let mut term = console("1\n5\n9\n2\n8\n7\n3\n6\n4\n");
    let mut orchestrator = Orchestrator::hot_seat("Ada", "Bea");
    let end = orchestrator.run(&mut term, &mut stats).unwrap();

    let MatchEnd::Finished { game, .. } = end else {
        panic!("match should finish");
    };
    assert_eq!(game.state(), MatchState::Draw);
    assert!(printed(&term).contains("It's a draw."));

    for name in ["Ada", "Bea"] {
        let totals = stats.stats_for(name).unwrap();
        assert_eq!(*totals.total_games(), 1);
        assert_eq!(*totals.draws(), 1);
    }
}

#[test]
fn test_rematch_keeps_seats_and_records_each_match() {
    // X wins via the anti-diagonal, rematch, then a draw, then decline.
    let script = "5\n1\n3\n2\n7\ny\n1\n5\n9\n2\n8\n7\n3\n6\n4\nn\n";
    let mut term = console(script);
    let mut reporter = Collector::default();
    let mut orchestrator = Orchestrator::hot_seat("Ada", "Bea");

    let ends = orchestrator.run_series(&mut term, &mut reporter).unwrap();
    let states: Vec<MatchState> = ends
        .iter()
        .map(|end| match end {
            MatchEnd::Finished { game, .. } | MatchEnd::Abandoned { game } => game.state(),
        })
        .collect();
    assert_eq!(states, [MatchState::Won(Player::X), MatchState::Draw]);

    let players: Vec<&str> = reporter.results.iter().map(|r| r.player.as_str()).collect();
    assert_eq!(players, ["Ada", "Bea", "Ada", "Bea"]);
    assert_eq!(printed(&term).matches("Play again? [y/N]").count(), 2);
}

#[test]
fn test_rematch_declined_by_end_of_input() {
    let mut term = console("5\n1\n3\n2\n7\n");
    let mut reporter = Collector::default();
    let mut orchestrator = Orchestrator::hot_seat("Ada", "Bea");

    let ends = orchestrator.run_series(&mut term, &mut reporter).unwrap();
    assert_eq!(ends.len(), 1);
    assert_eq!(reporter.results.len(), 2);
}

#[test]
fn test_abandoned_match_ends_series_without_asking() {
    let mut term = console("quit\ny\n");
    let mut reporter = Collector::default();
    let mut orchestrator = Orchestrator::hot_seat("Ada", "Bea");

    let ends = orchestrator.run_series(&mut term, &mut reporter).unwrap();
    assert!(matches!(ends.as_slice(), [MatchEnd::Abandoned { .. }]));
    assert!(!printed(&term).contains("Play again?"));
}
