//! Contestants: whoever (or whatever) picks the next move.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use tracing::{debug, instrument};
use warden_tictactoe::{Difficulty, Match, Move, best_move, compute_move};

/// Line-based terminal the match is played through.
pub trait Terminal {
    /// Prints one line.
    fn say(&mut self, line: &str) -> Result<()>;

    /// Prints `prompt` and reads a line. `None` means end of input.
    fn ask(&mut self, prompt: &str) -> Result<Option<String>>;
}

/// [`Terminal`] over any reader and writer (stdin/stdout, or buffers in tests).
#[derive(Debug)]
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Creates a console.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Returns the writer.
    pub fn output(&self) -> &W {
        &self.output
    }
}

impl<R: BufRead, W: Write> Terminal for Console<R, W> {
    fn say(&mut self, line: &str) -> Result<()> {
        writeln!(self.output, "{}", line).context("Failed to write to terminal")
    }

    fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{}", prompt).context("Failed to write to terminal")?;
        self.output.flush().context("Failed to flush terminal")?;

        // Raw bytes: a line that is not UTF-8 is bad input, not a dead terminal.
        let mut line = Vec::new();
        let read = self
            .input
            .read_until(b'\n', &mut line)
            .context("Failed to read from terminal")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&line).trim().to_string()))
    }
}

/// What a contestant decided to do on their turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    /// Play this move.
    Play(Move),
    /// Abandon the match.
    Quit,
}

/// Something that can take a turn.
pub trait Contestant {
    /// Display name.
    fn name(&self) -> &str;

    /// Picks a move for the player to move in `game`.
    fn choose_move(&mut self, game: &Match, terminal: &mut dyn Terminal) -> Result<Turn>;
}

/// A person typing moves.
///
/// Accepts a cell number, a `row,col` pair or a label. `hint` prints the
/// move perfect play would make; `quit` (or end of input) abandons.
#[derive(Debug, Clone)]
pub struct HumanContestant {
    name: String,
}

impl HumanContestant {
    /// Creates a human contestant.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Contestant for HumanContestant {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(skip(self, game, terminal), fields(player = %self.name))]
    fn choose_move(&mut self, game: &Match, terminal: &mut dyn Terminal) -> Result<Turn> {
        let prompt = format!("{} ({}), your move [1-9, hint, quit]: ", self.name, game.to_move());
        loop {
            let Some(input) = terminal.ask(&prompt)? else {
                debug!("End of input");
                return Ok(Turn::Quit);
            };

            if input.eq_ignore_ascii_case("quit") {
                return Ok(Turn::Quit);
            }

            if input.eq_ignore_ascii_case("hint") {
                let hint = best_move(game.board(), game.to_move())?;
                terminal.say(&format!("Hint: {}", hint))?;
                continue;
            }

            match Move::parse(&input) {
                Some(mv) => return Ok(Turn::Play(mv)),
                None => {
                    debug!(%input, "Unreadable move");
                    terminal.say(&format!(
                        "Could not read '{}'. Type a cell number 1-9, row,col or a label like top-left.",
                        input
                    ))?;
                }
            }
        }
    }
}

/// The built-in computer opponent.
#[derive(Debug, Clone)]
pub struct ComputerContestant {
    name: String,
    difficulty: Difficulty,
    rng: StdRng,
}

impl ComputerContestant {
    /// Creates a computer opponent drawing randomness from `rng`.
    pub fn new(difficulty: Difficulty, rng: StdRng) -> Self {
        Self {
            name: format!("Bot ({})", difficulty),
            difficulty,
            rng,
        }
    }
}

impl Contestant for ComputerContestant {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(skip(self, game, terminal), fields(difficulty = %self.difficulty))]
    fn choose_move(&mut self, game: &Match, terminal: &mut dyn Terminal) -> Result<Turn> {
        let mv = compute_move(game.board(), game.to_move(), self.difficulty, &mut self.rng)?;
        terminal.say(&format!("{} plays {}", self.name, mv))?;
        Ok(Turn::Play(mv))
    }
}
