//! Match lifecycle: one board, strict turn alternation, a terminal outcome.

use super::contracts::{Contract, MoveContract};
use super::rules::{is_full, winner};
use super::{Board, IllegalMove, Move, Player};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Where a match stands.
///
/// `Ongoing` is the only state with transitions out of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchState {
    /// Moves are still being accepted.
    Ongoing,
    /// A player completed a line.
    Won(Player),
    /// The board filled up with no line completed.
    Draw,
}

impl MatchState {
    /// Returns true once the match can accept no more moves.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, MatchState::Ongoing)
    }

    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Player> {
        match self {
            MatchState::Won(player) => Some(*player),
            MatchState::Ongoing | MatchState::Draw => None,
        }
    }
}

impl std::fmt::Display for MatchState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchState::Ongoing => write!(f, "In progress"),
            MatchState::Won(player) => write!(f, "Player {} wins", player),
            MatchState::Draw => write!(f, "Draw"),
        }
    }
}

/// A single game of tic-tac-toe.
///
/// Owned and mutated by the turn coordinator. Once terminal it refuses
/// every further move.
///
/// Serializes as a [`MatchSnapshot`]. Deserializing replays the history,
/// so a snapshot that could not have been played is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "MatchSnapshot", try_from = "MatchSnapshot")]
pub struct Match {
    pub(crate) board: Board,
    pub(crate) to_move: Player,
    first_player: Player,
    state: MatchState,
    history: Vec<Move>,
}

impl Match {
    /// Starts a match on an empty board with `first_player` to move.
    #[instrument]
    pub fn new(first_player: Player) -> Self {
        Self {
            board: Board::new(),
            to_move: first_player,
            first_player,
            state: MatchState::Ongoing,
            history: Vec::new(),
        }
    }

    /// Applies `player`'s move and advances the lifecycle.
    ///
    /// The winner check precedes the full-board check, so a move that
    /// fills the last cell and completes a line is a win.
    #[instrument(skip(self), fields(to_move = %self.to_move, filled = self.board.filled()))]
    pub fn apply_move(&mut self, mv: Move, player: Player) -> Result<MatchState, IllegalMove> {
        if let Err(e) = MoveContract::pre(self, &(mv, player)) {
            debug!(error = %e, "Move rejected");
            return Err(e);
        }

        #[cfg(debug_assertions)]
        let before = self.clone();

        self.board.apply(mv, player)?;
        self.history.push(mv);

        self.state = if let Some(winner) = winner(&self.board) {
            info!(%winner, moves = self.history.len(), "Match won");
            MatchState::Won(winner)
        } else if is_full(&self.board) {
            info!(moves = self.history.len(), "Match drawn");
            MatchState::Draw
        } else {
            self.to_move = self.to_move.opponent();
            MatchState::Ongoing
        };

        #[cfg(debug_assertions)]
        if let Err(violation) = MoveContract::post(&before, self) {
            panic!("{}", violation);
        }

        Ok(self.state)
    }

    /// Replays a sequence of moves from an empty board, alternating players.
    ///
    /// Stops with an error at the first illegal move, including any move
    /// after the match has finished.
    #[instrument]
    pub fn replay(first_player: Player, moves: &[Move]) -> Result<Self, IllegalMove> {
        let mut game = Self::new(first_player);
        for mv in moves {
            game.apply_move(*mv, game.to_move)?;
        }
        Ok(game)
    }

    /// Returns the match state.
    pub fn state(&self) -> MatchState {
        self.state
    }

    /// Returns the final state, or `None` while the match is ongoing.
    pub fn outcome(&self) -> Option<MatchState> {
        self.state.is_terminal().then_some(self.state)
    }

    /// Returns the board (read-only, for rendering and search).
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the player to move. After the match ends this is the player
    /// who made the final move.
    pub fn to_move(&self) -> Player {
        self.to_move
    }

    /// Returns the player who moved first.
    pub fn first_player(&self) -> Player {
        self.first_player
    }

    /// Returns the accepted moves in order.
    pub fn history(&self) -> &[Move] {
        &self.history
    }
}

/// Stored form of a [`Match`]: who opened and the moves played.
///
/// Board, turn and state are derived on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    /// Player who moved first.
    pub first_player: Player,
    /// Accepted moves in order.
    pub history: Vec<Move>,
}

impl From<Match> for MatchSnapshot {
    fn from(game: Match) -> Self {
        Self {
            first_player: game.first_player,
            history: game.history,
        }
    }
}

impl TryFrom<MatchSnapshot> for Match {
    type Error = IllegalMove;

    fn try_from(snapshot: MatchSnapshot) -> Result<Self, Self::Error> {
        Match::replay(snapshot.first_player, &snapshot.history)
    }
}
