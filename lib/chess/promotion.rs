use crate::chess::Role;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use shakmaty as sm;
use std::str::FromStr;

/// The piece a pawn may be promoted to.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Deserialize, Serialize)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[serde(rename_all = "lowercase")]
pub enum Promotion {
    #[display(fmt = "n")]
    Knight,
    #[display(fmt = "b")]
    Bishop,
    #[display(fmt = "r")]
    Rook,
    #[display(fmt = "q")]
    Queen,
}

impl Promotion {
    /// Every choice offered to the user, in the order a chooser presents them.
    pub const ALL: [Promotion; 4] = [
        Promotion::Queen,
        Promotion::Rook,
        Promotion::Knight,
        Promotion::Bishop,
    ];
}

/// The reason why parsing [`Promotion`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display(fmt = "failed to parse promotion, expected one of `[nbrq]`")]
pub struct ParsePromotionError;

impl FromStr for Promotion {
    type Err = ParsePromotionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "n" => Ok(Promotion::Knight),
            "b" => Ok(Promotion::Bishop),
            "r" => Ok(Promotion::Rook),
            "q" => Ok(Promotion::Queen),
            _ => Err(ParsePromotionError),
        }
    }
}

impl From<Promotion> for Role {
    fn from(p: Promotion) -> Self {
        match p {
            Promotion::Knight => Role::Knight,
            Promotion::Bishop => Role::Bishop,
            Promotion::Rook => Role::Rook,
            Promotion::Queen => Role::Queen,
        }
    }
}

#[doc(hidden)]
impl From<Promotion> for sm::Role {
    fn from(p: Promotion) -> Self {
        Role::from(p).into()
    }
}

#[doc(hidden)]
impl TryFrom<sm::Role> for Promotion {
    type Error = ParsePromotionError;

    fn try_from(r: sm::Role) -> Result<Self, Self::Error> {
        match r {
            sm::Role::Knight => Ok(Promotion::Knight),
            sm::Role::Bishop => Ok(Promotion::Bishop),
            sm::Role::Rook => Ok(Promotion::Rook),
            sm::Role::Queen => Ok(Promotion::Queen),
            _ => Err(ParsePromotionError),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    #[proptest]
    fn parsing_printed_promotion_is_an_identity(p: Promotion) {
        assert_eq!(p.to_string().parse(), Ok(p));
    }

    #[proptest]
    fn parsing_promotion_fails_if_not_one_of_nbrq(
        #[filter(!["n", "b", "r", "q"].contains(&#s.as_str()))] s: String,
    ) {
        assert_eq!(s.parse::<Promotion>(), Err(ParsePromotionError));
    }

    #[proptest]
    fn promotion_is_never_a_pawn_or_king(p: Promotion) {
        assert!(![Role::Pawn, Role::King].contains(&p.into()));
    }

    #[test]
    fn pawns_and_kings_are_not_promotions() {
        assert_eq!(
            Promotion::try_from(sm::Role::Pawn),
            Err(ParsePromotionError)
        );
        assert_eq!(
            Promotion::try_from(sm::Role::King),
            Err(ParsePromotionError)
        );
    }

    #[proptest]
    fn promotion_has_an_equivalent_shakmaty_representation(p: Promotion) {
        assert_eq!(Promotion::try_from(sm::Role::from(p)), Ok(p));
    }
}
