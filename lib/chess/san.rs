use derive_more::{DebugCustom, Display};
use shakmaty as sm;

/// A move in [standard algebraic notation], including the check or checkmate suffix.
///
/// [standard algebraic notation]: https://www.chessprogramming.org/Algebraic_Chess_Notation#Standard_Algebraic_Notation_.28SAN.29
#[derive(DebugCustom, Display, Clone, Eq, PartialEq)]
#[debug(fmt = "San({})", self)]
#[display(fmt = "{}", _0)]
pub struct San(sm::san::SanPlus);

impl San {
    /// Whether the move gives check, including checkmate.
    pub fn is_check(&self) -> bool {
        self.0.suffix.is_some()
    }

    /// Whether the move gives checkmate.
    pub fn is_checkmate(&self) -> bool {
        self.0.suffix == Some(sm::san::Suffix::Checkmate)
    }
}

#[doc(hidden)]
impl From<sm::san::SanPlus> for San {
    fn from(san: sm::san::SanPlus) -> Self {
        San(san)
    }
}

#[doc(hidden)]
impl From<San> for sm::san::SanPlus {
    fn from(san: San) -> Self {
        san.0
    }
}
