use crate::chess::{AppliedMove, Color, IllegalMove, Move, Outcome, Position, Square};
use std::collections::BTreeSet;

mod standard;

pub use standard::*;

/// Trait for types that know the rules of chess.
///
/// Implementations are stateless, every query carries the [`Position`] it refers to.
#[cfg_attr(test, mockall::automock)]
pub trait RulesOracle {
    /// The squares the piece on `whence` may legally move to.
    ///
    /// Empty if there is no piece on `whence` or if it doesn't belong to the side to move.
    fn legal_moves(&self, pos: &Position, whence: Square) -> BTreeSet<Square>;

    /// Plays `m` if legal, returning what it did and the resulting [`Position`].
    fn apply_move(&self, pos: &Position, m: Move) -> Result<(AppliedMove, Position), IllegalMove>;

    /// `Some(Outcome)` if the game cannot continue from `pos`.
    fn is_terminal(&self, pos: &Position) -> Option<Outcome>;

    /// The side whose king is in check, if any.
    fn side_in_check(&self, pos: &Position) -> Option<Color>;
}
