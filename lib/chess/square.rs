use crate::chess::{File, ParseFileError, ParseRankError, Rank};
use derive_more::{Display, Error, From};
use serde::{Serialize, Serializer};
use shakmaty as sm;
use std::str::FromStr;

/// A square on the chess board.
///
/// Squares are ordered rank by rank, from `a1` to `h8`.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[display(fmt = "{}{}", file, rank)]
pub struct Square {
    rank: Rank,
    file: File,
}

impl Square {
    /// Constructs [`Square`] from a pair of [`File`] and [`Rank`].
    pub fn new(file: File, rank: Rank) -> Self {
        Square { rank, file }
    }

    /// This square's [`File`].
    pub fn file(&self) -> File {
        self.file
    }

    /// This square's [`Rank`].
    pub fn rank(&self) -> Rank {
        self.rank
    }

    /// An iterator over all squares, from `a1` to `h8`.
    pub fn iter() -> impl DoubleEndedIterator<Item = Self> {
        Rank::ALL
            .into_iter()
            .flat_map(|r| File::ALL.into_iter().map(move |f| Square::new(f, r)))
    }
}

/// The reason why parsing [`Square`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error, From)]
pub enum ParseSquareError {
    #[display(fmt = "failed to parse square")]
    InvalidFile(ParseFileError),
    #[display(fmt = "failed to parse square")]
    InvalidRank(ParseRankError),
}

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let i = s.char_indices().nth(1).map_or_else(|| s.len(), |(i, _)| i);
        Ok(Square::new(s[..i].parse()?, s[i..].parse()?))
    }
}

impl Serialize for Square {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[doc(hidden)]
impl From<sm::Square> for Square {
    fn from(s: sm::Square) -> Self {
        Square::new(s.file().into(), s.rank().into())
    }
}

#[doc(hidden)]
impl From<Square> for sm::Square {
    fn from(s: Square) -> Self {
        sm::Square::from_coords(s.file().into(), s.rank().into())
    }
}
