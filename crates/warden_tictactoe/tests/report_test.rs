//! Tests for turning finished matches into per-player results.

use warden_tictactoe::{
    Difficulty, Match, Move, Participant, Player, PlayerOutcome, PlayerResult, ResultReporter,
    Seats, report_match, results_for,
};

#[derive(Default)]
struct Collector {
    results: Vec<PlayerResult>,
}

impl ResultReporter for Collector {
    type Error = String;

    fn report(&mut self, result: &PlayerResult) -> Result<(), Self::Error> {
        self.results.push(result.clone());
        Ok(())
    }
}

struct Failing;

impl ResultReporter for Failing {
    type Error = String;

    fn report(&mut self, result: &PlayerResult) -> Result<(), Self::Error> {
        Err(format!("store offline for {}", result.player))
    }
}

fn x_wins() -> Match {
    Match::replay(
        Player::X,
        &[
            Move::new(0, 0),
            Move::new(1, 1),
            Move::new(0, 1),
            Move::new(2, 0),
            Move::new(0, 2),
        ],
    )
    .expect("Valid replay")
}

fn drawn() -> Match {
    Match::replay(
        Player::X,
        &[
            Move::new(0, 0),
            Move::new(1, 1),
            Move::new(0, 2),
            Move::new(0, 1),
            Move::new(2, 1),
            Move::new(1, 0),
            Move::new(1, 2),
            Move::new(2, 2),
            Move::new(2, 0),
        ],
    )
    .expect("Valid replay")
}

#[test]
fn test_pvp_win_records_both_sides() {
    let seats = Seats::new(Participant::human("Ada"), Participant::human("Grace"));
    let results = results_for(&x_wins(), &seats);

    assert_eq!(
        results,
        vec![
            PlayerResult {
                player: "Ada".to_string(),
                opponent: "Grace".to_string(),
                outcome: PlayerOutcome::Win,
                moves: 5,
            },
            PlayerResult {
                player: "Grace".to_string(),
                opponent: "Ada".to_string(),
                outcome: PlayerOutcome::Loss,
                moves: 5,
            },
        ]
    );
}

#[test]
fn test_pvp_draw_records_draw_for_both() {
    let seats = Seats::new(Participant::human("Ada"), Participant::human("Grace"));
    let outcomes: Vec<_> = results_for(&drawn(), &seats)
        .into_iter()
        .map(|r| r.outcome)
        .collect();
    assert_eq!(outcomes, vec![PlayerOutcome::Draw, PlayerOutcome::Draw]);
}

#[test]
fn test_computer_loss_only_records_human() {
    let seats = Seats::new(
        Participant::Computer(Difficulty::Impossible),
        Participant::human("Ada"),
    );
    let results = results_for(&x_wins(), &seats);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].player, "Ada");
    assert_eq!(results[0].opponent, "Bot (Impossible)");
    assert_eq!(results[0].outcome, PlayerOutcome::Loss);
}

#[test]
fn test_ongoing_match_reports_nothing() {
    let seats = Seats::new(Participant::human("Ada"), Participant::human("Grace"));
    let game = Match::new(Player::X);
    let mut collector = Collector::default();

    let reported = report_match(&game, &seats, &mut collector).expect("Report");
    assert!(reported.is_empty());
    assert!(collector.results.is_empty());
}

#[test]
fn test_report_match_forwards_results() {
    let seats = Seats::new(Participant::human("Ada"), Participant::Computer(Difficulty::Easy));
    let mut collector = Collector::default();

    let reported = report_match(&x_wins(), &seats, &mut collector).expect("Report");
    assert_eq!(reported, collector.results);
    assert_eq!(collector.results[0].outcome, PlayerOutcome::Win);
    assert_eq!(collector.results[0].opponent, "Bot (Easy)");
}

#[test]
fn test_report_match_propagates_store_errors() {
    let seats = Seats::new(Participant::human("Ada"), Participant::human("Grace"));
    let result = report_match(&drawn(), &seats, &mut Failing);
    assert_eq!(result, Err("store offline for Ada".to_string()));
}

/// Buffers results and commits a whole match at once, or nothing.
#[derive(Default)]
struct Batching {
    committed: Vec<Vec<PlayerResult>>,
    fail_on: Option<String>,
}

impl ResultReporter for Batching {
    type Error = String;

    fn report(&mut self, result: &PlayerResult) -> Result<(), Self::Error> {
        self.report_all(std::slice::from_ref(result))
    }

    fn report_all(&mut self, results: &[PlayerResult]) -> Result<(), Self::Error> {
        if let Some(bad) = &self.fail_on {
            if results.iter().any(|r| &r.player == bad) {
                return Err(format!("rejected batch containing {}", bad));
            }
        }
        self.committed.push(results.to_vec());
        Ok(())
    }
}

#[test]
fn test_report_match_hands_over_whole_match() {
    let seats = Seats::new(Participant::human("Ada"), Participant::human("Grace"));
    let mut store = Batching::default();

    report_match(&x_wins(), &seats, &mut store).expect("Report");
    assert_eq!(store.committed.len(), 1);
    let players: Vec<&str> = store.committed[0].iter().map(|r| r.player.as_str()).collect();
    assert_eq!(players, ["Ada", "Grace"]);
}

#[test]
fn test_failed_batch_leaves_nothing_committed() {
    let seats = Seats::new(Participant::human("Ada"), Participant::human("Grace"));
    let mut store = Batching {
        fail_on: Some("Grace".to_string()),
        ..Batching::default()
    };

    let result = report_match(&x_wins(), &seats, &mut store);
    assert_eq!(result, Err("rejected batch containing Grace".to_string()));
    assert!(store.committed.is_empty());
}

#[test]
fn test_default_batch_reports_in_seat_order() {
    let seats = Seats::new(Participant::human("Ada"), Participant::human("Grace"));
    let mut collector = Collector::default();
    let results = results_for(&drawn(), &seats);

    collector.report_all(&results).expect("Report");
    assert_eq!(collector.results, results);
}
