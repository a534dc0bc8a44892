//! Reporting finished matches to a stats collaborator.
//!
//! The engine never owns counters. It turns a finished match into plain
//! per-player results and hands them to whatever implements
//! [`ResultReporter`].

use super::{Difficulty, Match, MatchState, Player};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Who sits in a seat.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Participant {
    /// A person, identified by display name.
    Human {
        /// Display name the stats are filed under.
        name: String,
    },
    /// The built-in computer opponent.
    Computer(Difficulty),
}

impl Participant {
    /// Creates a human participant.
    pub fn human(name: impl Into<String>) -> Self {
        Participant::Human { name: name.into() }
    }

    /// Name shown to other players and stored as the opponent name.
    pub fn label(&self) -> String {
        match self {
            Participant::Human { name } => name.clone(),
            Participant::Computer(difficulty) => format!("Bot ({})", difficulty),
        }
    }

    /// Returns true for the computer opponent.
    pub fn is_computer(&self) -> bool {
        matches!(self, Participant::Computer(_))
    }
}

/// Seat assignment for a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seats {
    /// Plays X.
    pub x: Participant,
    /// Plays O.
    pub o: Participant,
}

impl Seats {
    /// Creates a seat assignment.
    pub fn new(x: Participant, o: Participant) -> Self {
        Self { x, o }
    }

    /// Returns the participant playing `player`.
    pub fn get(&self, player: Player) -> &Participant {
        match player {
            Player::X => &self.x,
            Player::O => &self.o,
        }
    }
}

/// Result of a match from one player's point of view.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PlayerOutcome {
    /// The player completed a line.
    Win,
    /// The opponent completed a line.
    Loss,
    /// Nobody completed a line.
    Draw,
}

impl PlayerOutcome {
    /// Outcome for `player` given the final match state; `None` while the
    /// match is ongoing.
    pub fn for_player(state: MatchState, player: Player) -> Option<Self> {
        match state {
            MatchState::Ongoing => None,
            MatchState::Draw => Some(PlayerOutcome::Draw),
            MatchState::Won(winner) if winner == player => Some(PlayerOutcome::Win),
            MatchState::Won(_) => Some(PlayerOutcome::Loss),
        }
    }
}

/// One human participant's result, ready to be recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerResult {
    /// The human's display name.
    pub player: String,
    /// The opponent's label (a name, or the bot and its difficulty).
    pub opponent: String,
    /// How it went for `player`.
    pub outcome: PlayerOutcome,
    /// Moves played in the match by both sides.
    pub moves: usize,
}

/// Builds one result per human participant of a finished match.
///
/// The computer has no stats, so a match against it yields a single
/// result. Returns an empty list while the match is ongoing.
#[instrument(skip(game))]
pub fn results_for(game: &Match, seats: &Seats) -> Vec<PlayerResult> {
    [Player::X, Player::O]
        .into_iter()
        .filter_map(|player| {
            let Participant::Human { name } = seats.get(player) else {
                return None;
            };
            let outcome = PlayerOutcome::for_player(game.state(), player)?;
            Some(PlayerResult {
                player: name.clone(),
                opponent: seats.get(player.opponent()).label(),
                outcome,
                moves: game.history().len(),
            })
        })
        .collect()
}

/// Receives per-player results; implemented by the stats store.
pub trait ResultReporter {
    /// Error raised by the underlying store.
    type Error;

    /// Records one player's result.
    fn report(&mut self, result: &PlayerResult) -> Result<(), Self::Error>;

    /// Records all results of one match.
    ///
    /// The default reports them one by one and stops at the first error,
    /// so earlier results stay recorded. Stores that can write atomically
    /// should override it.
    fn report_all(&mut self, results: &[PlayerResult]) -> Result<(), Self::Error> {
        for result in results {
            self.report(result)?;
        }
        Ok(())
    }
}

/// Reports every human participant's result of a finished match in one
/// [`ResultReporter::report_all`] call.
///
/// Returns the results that were reported; the reporter is not called
/// for an ongoing match.
///
/// # Errors
///
/// Returns the error from `reporter`.
#[instrument(skip(game, reporter))]
pub fn report_match<R: ResultReporter>(
    game: &Match,
    seats: &Seats,
    reporter: &mut R,
) -> Result<Vec<PlayerResult>, R::Error> {
    let results = results_for(game, seats);
    if results.is_empty() {
        debug!(state = %game.state(), "Nothing to report");
        return Ok(results);
    }
    reporter.report_all(&results)?;
    info!(count = results.len(), state = %game.state(), "Results reported");
    Ok(results)
}
