use crate::chess::Color;
use derive_more::Display;
use serde::Serialize;

/// Why a game can no longer continue.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Serialize)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[serde(rename_all = "lowercase")]
pub enum Termination {
    #[display(fmt = "checkmate")]
    Checkmate,
    #[display(fmt = "stalemate")]
    Stalemate,
    #[display(fmt = "draw")]
    Draw,
}

/// One of the possible outcomes of a chess game.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Serialize)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    #[display(fmt = "checkmate by the {} player", _0)]
    Checkmate(Color),

    #[display(fmt = "stalemate")]
    Stalemate,

    #[display(fmt = "draw by insufficient material")]
    DrawByInsufficientMaterial,

    #[display(fmt = "draw by the 75-move rule")]
    DrawBy75MoveRule,

    #[display(fmt = "draw by threefold repetition")]
    DrawByThreefoldRepetition,
}

impl Outcome {
    /// Whether the outcome is a [draw] and neither side has won.
    ///
    /// [draw]: https://www.chessprogramming.org/Draw
    pub fn is_draw(&self) -> bool {
        !self.is_decisive()
    }

    /// Whether the outcome is a decisive and one of the sides has won.
    pub fn is_decisive(&self) -> bool {
        matches!(self, Outcome::Checkmate(_))
    }

    /// The winning side, if the outcome is [decisive](`Self::is_decisive`).
    pub fn winner(&self) -> Option<Color> {
        match *self {
            Outcome::Checkmate(c) => Some(c),
            _ => None,
        }
    }

    /// The broad reason why the game ended.
    pub fn reason(&self) -> Termination {
        match self {
            Outcome::Checkmate(_) => Termination::Checkmate,
            Outcome::Stalemate => Termination::Stalemate,
            Outcome::DrawByInsufficientMaterial
            | Outcome::DrawBy75MoveRule
            | Outcome::DrawByThreefoldRepetition => Termination::Draw,
        }
    }
}
