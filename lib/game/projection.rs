use crate::chess::{Color, Outcome, Position, Promotion, Square};
use crate::game::{GameState, Movable, PendingPromotion, SessionConfig};
use crate::rules::RulesOracle;
use derive_more::{Display, Error};
use serde::Serialize;
use std::str::FromStr;
use std::collections::BTreeSet;
use std::fmt;

/// The square the user picked up and where its piece may go.
#[derive(Debug, Default, Clone, Eq, PartialEq, Serialize)]
pub struct SelectionView {
    pub selected: Option<Square>,
    pub legal_destinations: BTreeSet<Square>,
}

impl SelectionView {
    /// Selects `whence`, computing its legal destinations in the current position.
    pub fn new<O: RulesOracle + ?Sized>(game: &GameState, oracle: &O, whence: Square) -> Self {
        SelectionView {
            selected: Some(whence),
            legal_destinations: game.legal_destinations(oracle, whence),
        }
    }

    /// Selects `whence` without allowing it to move anywhere.
    pub fn inert(whence: Square) -> Self {
        SelectionView {
            selected: Some(whence),
            legal_destinations: BTreeSet::new(),
        }
    }
}

/// An annotation arrow the host draws on top of the board.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Serialize)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[cfg_attr(test, filter(#self.from != #self.to))]
#[display(fmt = "{}{}", from, to)]
pub struct Arrow {
    pub from: Square,
    pub to: Square,
}

/// The reason why parsing an [`Arrow`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display(fmt = "failed to parse arrow, expected two distinct squares like `e2e4`")]
pub struct ParseArrowError;

impl FromStr for Arrow {
    type Err = ParseArrowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !s.is_char_boundary(2) {
            return Err(ParseArrowError);
        }

        let (from, to) = s.split_at(2);
        match (from.parse(), to.parse()) {
            (Ok(from), Ok(to)) if from != to => Ok(Arrow { from, to }),
            _ => Err(ParseArrowError),
        }
    }
}

/// Everything a board renderer needs to draw the current state.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct RenderProjection {
    /// The side shown at the bottom of the board.
    pub orientation: Color,
    /// The sides whose pieces may be dragged.
    pub movable: Movable,
    pub position: Position,
    pub side_to_move: Color,
    pub in_check: Option<Color>,
    pub last_move: Option<(Square, Square)>,
    pub selected: Option<Square>,
    pub legal_destinations: BTreeSet<Square>,
    pub outcome: Option<Outcome>,
    /// The promotion awaiting a choice, if any.
    pub pending_promotion: Option<PendingPromotion>,
    /// The pieces offered while a promotion is pending, empty otherwise.
    pub promotion_choices: Vec<Promotion>,
    pub arrows: Vec<Arrow>,
}

impl fmt::Display for RenderProjection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = ron::ser::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&s)
    }
}

/// Derives what the board should display.
///
/// Pure with respect to its inputs. The board is oriented and configured
/// as in [`SessionConfig::default`], with no pending promotion or arrows.
pub fn project(game: &GameState, selection: &SelectionView) -> RenderProjection {
    let config = SessionConfig::default();

    RenderProjection {
        orientation: config.orientation,
        movable: config.movable,
        position: game.position().clone(),
        side_to_move: game.turn(),
        in_check: game.in_check(),
        last_move: game.last_move().map(|m| (m.whence(), m.whither())),
        selected: selection.selected,
        legal_destinations: selection.legal_destinations.clone(),
        outcome: game.outcome(),
        pending_promotion: None,
        promotion_choices: Vec::new(),
        arrows: Vec::new(),
    }
}
