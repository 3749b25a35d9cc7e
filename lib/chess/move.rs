use crate::chess::{Promotion, Role, San, Square};
use bitflags::bitflags;
use derive_more::{DebugCustom, Display, Error};
use shakmaty as sm;
use std::str::FromStr;

/// A chess move in [pure coordinate notation].
///
/// [pure coordinate notation]: https://www.chessprogramming.org/Algebraic_Chess_Notation#Pure_coordinate_notation
#[derive(DebugCustom, Display, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[cfg_attr(test, filter(#self.0 != #self.1))]
#[debug(fmt = "Move({})", self)]
#[display(fmt = "{}{}{}", _0, _1, "_2.map(|p| p.to_string()).unwrap_or_default()")]
pub struct Move(pub Square, pub Square, pub Option<Promotion>);

impl Move {
    /// The source [`Square`].
    pub fn whence(&self) -> Square {
        self.0
    }

    /// The destination [`Square`].
    pub fn whither(&self) -> Square {
        self.1
    }

    /// The [`Promotion`] specifier, if any.
    pub fn promotion(&self) -> Option<Promotion> {
        self.2
    }
}

/// The reason why the string is not a valid move.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display(fmt = "failed to parse move")]
pub struct ParseMoveError;

impl FromStr for Move {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<sm::uci::Uci>() {
            Ok(sm::uci::Uci::Normal {
                from,
                to,
                promotion,
            }) => Ok(Move(
                from.into(),
                to.into(),
                promotion.map(Promotion::try_from).transpose().map_err(|_| ParseMoveError)?,
            )),

            _ => Err(ParseMoveError),
        }
    }
}

#[doc(hidden)]
impl From<Move> for sm::uci::Uci {
    fn from(m: Move) -> Self {
        sm::uci::Uci::Normal {
            from: m.whence().into(),
            to: m.whither().into(),
            promotion: m.promotion().map(Into::into),
        }
    }
}

bitflags! {
    /// Characteristics of a [`Move`] in the context of the position it was played in.
    #[derive(Default)]
    pub struct MoveKind: u8 {
        const CAPTURE =     0b00000001;
        const CASTLE =      0b00000010;
        const EN_PASSANT =  0b00000100;
        const PROMOTION =   0b00001000;
        const CHECK =       0b00010000;
        const CHECKMATE =   0b00100000;
    }
}

#[doc(hidden)]
impl From<&sm::Move> for MoveKind {
    fn from(m: &sm::Move) -> Self {
        let mut kind = Self::empty();

        if m.is_capture() {
            kind |= MoveKind::CAPTURE;
        }

        if m.is_castle() {
            kind |= MoveKind::CASTLE;
        }

        if m.is_en_passant() {
            kind |= MoveKind::EN_PASSANT;
        }

        if m.is_promotion() {
            kind |= MoveKind::PROMOTION;
        }

        kind
    }
}

/// A [`Move`] that was accepted and played, together with what it did on the board.
#[derive(Debug, Display, Clone, Eq, PartialEq)]
#[display(fmt = "{}", san)]
pub struct AppliedMove {
    /// The move in pure coordinate notation.
    pub r#move: Move,
    /// The [`Role`] of the piece that moved.
    pub role: Role,
    /// The [`Role`] of the piece captured, if any.
    pub capture: Option<Role>,
    /// What kind of move this was.
    pub kind: MoveKind,
    /// The move in standard algebraic notation.
    pub san: San,
}

impl AppliedMove {
    /// Whether this move captured a piece.
    pub fn is_capture(&self) -> bool {
        self.kind.contains(MoveKind::CAPTURE)
    }

    /// Whether this move castled the king.
    pub fn is_castle(&self) -> bool {
        self.kind.contains(MoveKind::CASTLE)
    }

    /// Whether this move promoted a pawn.
    pub fn is_promotion(&self) -> bool {
        self.kind.contains(MoveKind::PROMOTION)
    }

    /// Whether this move gives check.
    pub fn is_check(&self) -> bool {
        self.kind.contains(MoveKind::CHECK)
    }
}
