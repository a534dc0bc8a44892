//! Turn coordination between two contestants.

use anyhow::{Context, Result, bail};
use rand::rngs::StdRng;
use tracing::{debug, info, instrument, warn};
use warden_tictactoe::{
    Difficulty, Match, MatchState, Participant, Player, PlayerResult, ResultReporter, Seats,
    report_match,
};

use crate::contestants::{ComputerContestant, Contestant, HumanContestant, Terminal, Turn};

/// How a match left the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchEnd {
    /// Played to a result; holds what was reported.
    Finished {
        /// The terminal match.
        game: Match,
        /// Results handed to the reporter.
        results: Vec<PlayerResult>,
    },
    /// A contestant quit; nothing was reported.
    Abandoned {
        /// The match as it stood.
        game: Match,
    },
}

/// Runs one match between two contestants, X moving first.
pub struct Orchestrator {
    seats: Seats,
    player_x: Box<dyn Contestant>,
    player_o: Box<dyn Contestant>,
}

impl Orchestrator {
    /// Creates an orchestrator. `seats` describes the contestants for
    /// reporting; `player_x` and `player_o` make the moves.
    pub fn new(seats: Seats, player_x: Box<dyn Contestant>, player_o: Box<dyn Contestant>) -> Self {
        Self {
            seats,
            player_x,
            player_o,
        }
    }

    /// A human against the computer. With `computer_first` the computer
    /// takes X and opens.
    pub fn versus_computer(
        name: &str,
        difficulty: Difficulty,
        computer_first: bool,
        rng: StdRng,
    ) -> Self {
        let human: (Participant, Box<dyn Contestant>) =
            (Participant::human(name), Box::new(HumanContestant::new(name)));
        let computer: (Participant, Box<dyn Contestant>) = (
            Participant::Computer(difficulty),
            Box::new(ComputerContestant::new(difficulty, rng)),
        );
        let ((x, player_x), (o, player_o)) = if computer_first {
            (computer, human)
        } else {
            (human, computer)
        };
        Self::new(Seats::new(x, o), player_x, player_o)
    }

    /// Two humans sharing one terminal.
    pub fn hot_seat(x: &str, o: &str) -> Self {
        Self::new(
            Seats::new(Participant::human(x), Participant::human(o)),
            Box::new(HumanContestant::new(x)),
            Box::new(HumanContestant::new(o)),
        )
    }

    /// Returns the seat assignment.
    pub fn seats(&self) -> &Seats {
        &self.seats
    }

    fn contestant(&mut self, player: Player) -> &mut dyn Contestant {
        match player {
            Player::X => self.player_x.as_mut(),
            Player::O => self.player_o.as_mut(),
        }
    }

    /// Plays the match to the end, then reports results.
    ///
    /// Illegal moves from a human are explained and asked for again.
    ///
    /// # Errors
    ///
    /// Fails on terminal I/O errors, on an illegal move from the computer,
    /// or if the reporter fails.
    #[instrument(skip_all, fields(x = %self.seats.x.label(), o = %self.seats.o.label()))]
    pub fn run<R>(&mut self, terminal: &mut dyn Terminal, reporter: &mut R) -> Result<MatchEnd>
    where
        R: ResultReporter,
        R::Error: std::error::Error + Send + Sync + 'static,
    {
        info!("Starting match");
        let mut game = Match::new(Player::X);
        terminal.say(&game.board().display())?;

        while !game.state().is_terminal() {
            let player = game.to_move();
            debug!(%player, "Waiting for move");

            let turn = self.contestant(player).choose_move(&game, terminal)?;
            let mv = match turn {
                Turn::Play(mv) => mv,
                Turn::Quit => {
                    info!(%player, moves = game.history().len(), "Match abandoned");
                    terminal.say("Match abandoned. No result recorded.")?;
                    return Ok(MatchEnd::Abandoned { game });
                }
            };

            match game.apply_move(mv, player) {
                Ok(_) => {
                    terminal.say("")?;
                    terminal.say(&game.board().display())?;
                }
                Err(e) if self.seats.get(player).is_computer() => {
                    bail!("Computer chose an illegal move: {}", e);
                }
                Err(e) => {
                    warn!(error = %e, "Illegal move");
                    terminal.say(&format!("Illegal move: {}. Try again.", e))?;
                }
            }
        }

        terminal.say(&self.announcement(game.state()))?;

        let results = report_match(&game, &self.seats, reporter).context("Failed to record results")?;
        info!(state = %game.state(), reported = results.len(), "Match finished");
        Ok(MatchEnd::Finished { game, results })
    }

    /// Plays matches with the same seats and contestants until a rematch
    /// is declined or a match is abandoned. The computer keeps its random
    /// source across matches.
    ///
    /// # Errors
    ///
    /// Fails like [`Orchestrator::run`]; matches finished before the error
    /// stay reported.
    #[instrument(skip_all)]
    pub fn run_series<R>(
        &mut self,
        terminal: &mut dyn Terminal,
        reporter: &mut R,
    ) -> Result<Vec<MatchEnd>>
    where
        R: ResultReporter,
        R::Error: std::error::Error + Send + Sync + 'static,
    {
        let mut ends = Vec::new();
        loop {
            let end = self.run(&mut *terminal, &mut *reporter)?;
            let finished = matches!(end, MatchEnd::Finished { .. });
            ends.push(end);

            if !finished || !wants_rematch(terminal)? {
                break;
            }
            info!(played = ends.len(), "Rematch");
        }
        Ok(ends)
    }

    fn announcement(&self, state: MatchState) -> String {
        match state {
            MatchState::Won(player) => format!("{} ({}) wins!", self.seats.get(player).label(), player),
            MatchState::Draw => "It's a draw.".to_string(),
            MatchState::Ongoing => state.to_string(),
        }
    }
}

fn wants_rematch(terminal: &mut dyn Terminal) -> Result<bool> {
    let answer = terminal.ask("Play again? [y/N] ")?;
    Ok(answer.is_some_and(|a| a.eq_ignore_ascii_case("y") || a.eq_ignore_ascii_case("yes")))
}
