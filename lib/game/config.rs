use crate::chess::Color;
use derive_more::{Display, Error, From};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Formatter};
use std::str::FromStr;

/// Which sides the user is allowed to move.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[serde(deny_unknown_fields, rename_all = "lowercase")]
pub enum Movable {
    #[display(fmt = "white")]
    White,
    #[display(fmt = "black")]
    Black,
    #[display(fmt = "both")]
    Both,
    #[display(fmt = "none")]
    None,
}

impl Default for Movable {
    fn default() -> Self {
        Movable::Both
    }
}

impl Movable {
    /// Whether pieces of `side` may be moved.
    pub fn allows(&self, side: Color) -> bool {
        match self {
            Movable::White => side == Color::White,
            Movable::Black => side == Color::Black,
            Movable::Both => true,
            Movable::None => false,
        }
    }
}

/// Configuration for a [`Session`](`crate::game::Session`).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[serde(deny_unknown_fields, default)]
pub struct SessionConfig {
    /// The side shown at the bottom of the board.
    pub orientation: Color,

    /// The sides the user is allowed to move.
    pub movable: Movable,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            orientation: Color::White,
            movable: Movable::Both,
        }
    }
}

impl SessionConfig {
    /// Only the side shown at the bottom of the board may be moved.
    pub fn oriented(orientation: Color) -> Self {
        let movable = match orientation {
            Color::White => Movable::White,
            Color::Black => Movable::Black,
        };

        SessionConfig {
            orientation,
            movable,
        }
    }
}

impl fmt::Display for SessionConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let s = ron::ser::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&s)
    }
}

/// The reason why parsing [`SessionConfig`] failed.
#[derive(Debug, Display, Eq, PartialEq, Error, From)]
#[display(fmt = "failed to parse session configuration")]
pub struct ParseSessionConfigError(ron::de::SpannedError);

impl FromStr for SessionConfig {
    type Err = ParseSessionConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ron::de::from_str(s)?)
    }
}
