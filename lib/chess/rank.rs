use crate::chess::Color;
use derive_more::{Display, Error};
use shakmaty as sm;
use std::str::FromStr;

/// A row on the chess board.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum Rank {
    #[display(fmt = "1")]
    First,
    #[display(fmt = "2")]
    Second,
    #[display(fmt = "3")]
    Third,
    #[display(fmt = "4")]
    Fourth,
    #[display(fmt = "5")]
    Fifth,
    #[display(fmt = "6")]
    Sixth,
    #[display(fmt = "7")]
    Seventh,
    #[display(fmt = "8")]
    Eighth,
}

impl Rank {
    /// All ranks from `1` to `8`.
    pub const ALL: [Rank; 8] = [
        Rank::First,
        Rank::Second,
        Rank::Third,
        Rank::Fourth,
        Rank::Fifth,
        Rank::Sixth,
        Rank::Seventh,
        Rank::Eighth,
    ];

    /// The opponent's back rank from the point of view of `side`.
    ///
    /// This is where pawns of that color promote.
    pub fn last(side: Color) -> Self {
        match side {
            Color::White => Rank::Eighth,
            Color::Black => Rank::First,
        }
    }
}

/// The reason why parsing [`Rank`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display(fmt = "failed to parse rank, expected digit in the range `(1..=8)`")]
pub struct ParseRankError;

impl FromStr for Rank {
    type Err = ParseRankError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1" => Ok(Rank::First),
            "2" => Ok(Rank::Second),
            "3" => Ok(Rank::Third),
            "4" => Ok(Rank::Fourth),
            "5" => Ok(Rank::Fifth),
            "6" => Ok(Rank::Sixth),
            "7" => Ok(Rank::Seventh),
            "8" => Ok(Rank::Eighth),
            _ => Err(ParseRankError),
        }
    }
}

#[doc(hidden)]
impl From<sm::Rank> for Rank {
    fn from(r: sm::Rank) -> Self {
        match r {
            sm::Rank::First => Rank::First,
            sm::Rank::Second => Rank::Second,
            sm::Rank::Third => Rank::Third,
            sm::Rank::Fourth => Rank::Fourth,
            sm::Rank::Fifth => Rank::Fifth,
            sm::Rank::Sixth => Rank::Sixth,
            sm::Rank::Seventh => Rank::Seventh,
            sm::Rank::Eighth => Rank::Eighth,
        }
    }
}

#[doc(hidden)]
impl From<Rank> for sm::Rank {
    fn from(r: Rank) -> Self {
        match r {
            Rank::First => sm::Rank::First,
            Rank::Second => sm::Rank::Second,
            Rank::Third => sm::Rank::Third,
            Rank::Fourth => sm::Rank::Fourth,
            Rank::Fifth => sm::Rank::Fifth,
            Rank::Sixth => sm::Rank::Sixth,
            Rank::Seventh => sm::Rank::Seventh,
            Rank::Eighth => sm::Rank::Eighth,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    #[test]
    fn white_pawns_promote_on_the_eighth_rank() {
        assert_eq!(Rank::last(Color::White), Rank::Eighth);
    }

    #[test]
    fn black_pawns_promote_on_the_first_rank() {
        assert_eq!(Rank::last(Color::Black), Rank::First);
    }

    #[proptest]
    fn parsing_printed_rank_is_an_identity(r: Rank) {
        assert_eq!(r.to_string().parse(), Ok(r));
    }

    #[proptest]
    fn parsing_rank_fails_if_not_digit_between_1_and_8(
        #[filter(!('1'..='8').contains(&#c))] c: char,
    ) {
        assert_eq!(c.to_string().parse::<Rank>(), Err(ParseRankError));
    }

    #[proptest]
    fn rank_has_an_equivalent_shakmaty_representation(r: Rank) {
        assert_eq!(Rank::from(sm::Rank::from(r)), r);
    }
}
