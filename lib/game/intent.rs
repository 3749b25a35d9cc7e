use crate::chess::{Color, Move, Promotion, Square};
use crate::game::GameState;
use crate::rules::RulesOracle;
use derive_more::{Constructor, Display};
use serde::Serialize;

/// A candidate move expressed by the user.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Constructor)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[display(fmt = "{}", "Move::from(*self)")]
pub struct MoveIntent {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<Promotion>,
}

impl From<MoveIntent> for Move {
    fn from(i: MoveIntent) -> Self {
        Move(i.from, i.to, i.promotion)
    }
}

impl From<Move> for MoveIntent {
    fn from(m: Move) -> Self {
        MoveIntent::new(m.whence(), m.whither(), m.promotion())
    }
}

/// A pawn move waiting for the user to pick a promotion piece.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Serialize)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[display(fmt = "{}{}", from, to)]
pub struct PendingPromotion {
    pub from: Square,
    pub to: Square,
    pub color: Color,
}

impl PendingPromotion {
    /// The move that promotes to `p`.
    pub fn complete(self, p: Promotion) -> MoveIntent {
        MoveIntent::new(self.from, self.to, Some(p))
    }
}

/// What to do with a drag gesture.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Resolution {
    #[display(fmt = "apply {}", _0)]
    Apply(MoveIntent),
    #[display(fmt = "await promotion {}", _0)]
    AwaitPromotion(PendingPromotion),
    #[display(fmt = "reject")]
    Reject,
}

/// Turns a drag from `from` to `to` into a [`Resolution`].
///
/// Drags to squares outside the legal destinations of `from` are rejected,
/// pawns reaching their last rank suspend until a piece is chosen.
pub fn resolve<O: RulesOracle + ?Sized>(
    game: &GameState,
    oracle: &O,
    from: Square,
    to: Square,
) -> Resolution {
    if !game.legal_destinations(oracle, from).contains(&to) {
        return Resolution::Reject;
    }

    let intent = MoveIntent::new(from, to, None);

    if game.is_promotion_candidate(intent) {
        Resolution::AwaitPromotion(PendingPromotion {
            from,
            to,
            color: game.turn(),
        })
    } else {
        Resolution::Apply(intent)
    }
}
