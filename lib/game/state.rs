use crate::chess::{AppliedMove, Color, IllegalMove, Move, Outcome, Piece, Position, Rank, Role, Square};
use crate::game::MoveIntent;
use crate::rules::RulesOracle;
use derive_more::{Display, Error, From};
use std::collections::BTreeSet;
use tracing::{field::display, instrument, Span};

/// The rules oracle contradicted itself while a move was being applied.
///
/// Continuing from here could leave the board in an inconsistent state.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display(fmt = "rules oracle accepted move `{}` inconsistently in position `{}`", _0, _1)]
pub struct StateCorruption(pub Move, pub Position);

/// The reason why a [`MoveIntent`] was not applied.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error, From)]
pub enum MoveError {
    #[display(fmt = "the game has already ended in a {}", _0)]
    #[from(ignore)]
    GameHasEnded(#[error(not(source))] Outcome),

    #[display(fmt = "move `{}` requires a promotion piece", _0)]
    #[from(ignore)]
    PromotionRequired(#[error(not(source))] Move),

    #[display(fmt = "{}", _0)]
    Illegal(IllegalMove),

    #[display(fmt = "{}", _0)]
    Corrupted(StateCorruption),
}

/// The result of applying a [`MoveIntent`].
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Transition {
    /// What the move did.
    pub played: AppliedMove,
    /// The position after the move.
    pub position: Position,
}

/// The authoritative state of a game of chess.
///
/// The [`Position`] is only ever replaced by [`GameState::apply_move`].
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct GameState {
    initial: Position,
    position: Position,
    last_move: Option<Move>,
    in_check: Option<Color>,
    outcome: Option<Outcome>,
}

impl GameState {
    /// Starts a game from the given [`Position`], which need not be the standard one.
    pub fn new<O: RulesOracle + ?Sized>(oracle: &O, position: Position) -> Self {
        GameState {
            in_check: oracle.side_in_check(&position),
            outcome: oracle.is_terminal(&position),
            initial: position.clone(),
            position,
            last_move: None,
        }
    }

    /// The position the game started from.
    pub fn initial(&self) -> &Position {
        &self.initial
    }

    /// The current position.
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// The side to move.
    pub fn turn(&self) -> Color {
        self.position.turn()
    }

    /// The last move played, if any.
    pub fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    /// The side in check, if any.
    pub fn in_check(&self) -> Option<Color> {
        self.in_check
    }

    /// `Some(Outcome)` if the game has ended or `None`.
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Whether the game has ended.
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }

    /// Restarts the game from its initial position.
    pub fn reset<O: RulesOracle + ?Sized>(&mut self, oracle: &O) {
        *self = GameState::new(oracle, self.initial.clone());
    }

    /// The squares the piece on `whence` may move to.
    ///
    /// Empty if `whence` doesn't hold a piece of the side to move or if the game has ended.
    pub fn legal_destinations<O: RulesOracle + ?Sized>(
        &self,
        oracle: &O,
        whence: Square,
    ) -> BTreeSet<Square> {
        if self.is_terminal() || self.position.color_on(whence) != Some(self.turn()) {
            BTreeSet::new()
        } else {
            oracle.legal_moves(&self.position, whence)
        }
    }

    /// Whether `intent` moves a pawn to its last rank without saying what it promotes to.
    pub fn is_promotion_candidate(&self, intent: MoveIntent) -> bool {
        match self.position.piece_on(intent.from) {
            Some(Piece(c, Role::Pawn)) => {
                intent.promotion.is_none() && intent.to.rank() == Rank::last(c)
            }
            _ => false,
        }
    }

    /// Applies `intent` if legal, otherwise returns the reason why not.
    ///
    /// Nothing changes unless the move is accepted.
    #[instrument(level = "debug", skip(self, oracle), err,
        fields(pos = %self.position, outcome))]
    pub fn apply_move<O: RulesOracle + ?Sized>(
        &mut self,
        oracle: &O,
        intent: MoveIntent,
    ) -> Result<Transition, MoveError> {
        if let Some(o) = self.outcome {
            return Err(MoveError::GameHasEnded(o));
        }

        let m = Move::from(intent);

        if self.is_promotion_candidate(intent)
            && self
                .legal_destinations(oracle, m.whence())
                .contains(&m.whither())
        {
            return Err(MoveError::PromotionRequired(m));
        }

        let (played, next) = oracle.apply_move(&self.position, m)?;

        if next.turn() == self.turn()
            || !oracle
                .legal_moves(&self.position, m.whence())
                .contains(&m.whither())
        {
            return Err(StateCorruption(m, self.position.clone()).into());
        }

        let in_check = oracle.side_in_check(&next);
        let outcome = oracle.is_terminal(&next);

        if let Some(o) = outcome {
            Span::current().record("outcome", display(o));
        }

        self.position = next.clone();
        self.last_move = Some(m);
        self.in_check = in_check;
        self.outcome = outcome;

        Ok(Transition {
            played,
            position: next,
        })
    }
}
