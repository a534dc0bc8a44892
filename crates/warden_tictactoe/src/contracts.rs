//! Contract-based validation for match transitions.
//!
//! Preconditions decide whether a move is legal and are always checked.
//! Postconditions describe what every accepted move must preserve; the
//! match checks them in debug builds only.

use super::{IllegalMove, Match, Move, Player};
use tracing::{instrument, warn};

/// A broken postcondition. Indicates a bug in the engine, never bad input.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("Invariant violation: {}", _0)]
pub struct InvariantViolation(pub String);

impl std::error::Error for InvariantViolation {}

/// Preconditions and postconditions for a state transition.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), IllegalMove>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), InvariantViolation>;
}

// ─────────────────────────────────────────────────────────────
//  Move Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the match has not finished.
pub struct MatchOngoing;

impl MatchOngoing {
    /// Fails with [`IllegalMove::MatchOver`] on a terminal match.
    pub fn check(game: &Match) -> Result<(), IllegalMove> {
        if game.state().is_terminal() {
            Err(IllegalMove::MatchOver)
        } else {
            Ok(())
        }
    }
}

/// Precondition: it must be the player's turn.
pub struct PlayersTurn;

impl PlayersTurn {
    /// Fails with [`IllegalMove::WrongTurn`] naming the offending player.
    pub fn check(player: Player, game: &Match) -> Result<(), IllegalMove> {
        if player != game.to_move() {
            Err(IllegalMove::WrongTurn(player))
        } else {
            Ok(())
        }
    }
}

/// Precondition: the target cell is on the board and empty.
pub struct CellIsFree;

impl CellIsFree {
    /// Fails with [`IllegalMove::OutOfRange`] or [`IllegalMove::Occupied`].
    pub fn check(mv: Move, game: &Match) -> Result<(), IllegalMove> {
        if !mv.in_range() {
            Err(IllegalMove::OutOfRange(mv))
        } else if !game.board().is_empty_at(mv) {
            Err(IllegalMove::Occupied(mv))
        } else {
            Ok(())
        }
    }
}

/// Composite precondition for a legal move.
///
/// Order matters for the reported error: a finished match is reported as
/// such even if the cell is also taken.
pub struct LegalMove;

impl LegalMove {
    /// Validates all preconditions for a move.
    #[instrument(skip(game))]
    pub fn check(mv: Move, player: Player, game: &Match) -> Result<(), IllegalMove> {
        MatchOngoing::check(game)?;
        PlayersTurn::check(player, game)?;
        CellIsFree::check(mv, game)?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
//  Move Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for placing a mark.
///
/// Postconditions:
/// - exactly one previously empty cell became occupied, nothing else changed
/// - the first player has the same number of marks as the second, or one more
/// - history lists exactly the occupied cells
/// - the turn passed to the opponent while the match is ongoing
pub struct MoveContract;

impl Contract<Match, (Move, Player)> for MoveContract {
    fn pre(game: &Match, (mv, player): &(Move, Player)) -> Result<(), IllegalMove> {
        LegalMove::check(*mv, *player, game)
    }

    fn post(before: &Match, after: &Match) -> Result<(), InvariantViolation> {
        let mut violations = Vec::new();

        let changed: Vec<Move> = before
            .board()
            .cells()
            .zip(after.board().cells())
            .filter(|((_, a), (_, b))| a != b)
            .map(|((mv, _), _)| mv)
            .collect();
        let single_fill = matches!(changed.as_slice(), [mv] if before.board().is_empty_at(*mv));
        if !single_fill {
            violations.push(format!("expected one new mark, board changed at {:?}", changed));
        }

        let first = after.first_player();
        let leads = after.board().count(first) as isize;
        let trails = after.board().count(first.opponent()) as isize;
        if !(0..=1).contains(&(leads - trails)) {
            violations.push(format!("mark counts unbalanced: {} vs {}", leads, trails));
        }

        let history_ok = after.history().len() == after.board().filled()
            && after.history().iter().all(|mv| !after.board().is_empty_at(*mv));
        if !history_ok {
            violations.push(format!(
                "history has {} moves but board has {} marks",
                after.history().len(),
                after.board().filled()
            ));
        }

        if !after.state().is_terminal() && after.to_move() == before.to_move() {
            violations.push("turn did not pass to the opponent".to_string());
        }

        if violations.is_empty() {
            Ok(())
        } else {
            warn!(?violations, "Postcondition failed");
            Err(InvariantViolation(violations.join("; ")))
        }
    }
}
