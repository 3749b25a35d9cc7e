use crate::chess::{IllegalMove, Move, ParsePositionError, Position, Promotion, Square};
use crate::game::{intent, project, Arrow, GameState, MoveError, Notification, PendingPromotion};
use crate::game::{PromotionResolver, RenderProjection, Resolution, SelectionView};
use crate::game::{SessionConfig, StateCorruption};
use crate::rules::{RulesOracle, Standard};
use derive_more::Display;
use tracing::{debug, error, instrument, warn};

/// A user gesture on the board.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum Input {
    #[display(fmt = "select {}", _0)]
    Select(Square),
    #[display(fmt = "drop {} {}", _0, _1)]
    Drop(Square, Square),
    #[display(fmt = "promote {}", _0)]
    Promote(Promotion),
    #[display(fmt = "cancel")]
    Cancel,
}

/// An interactive game of chess.
///
/// Gestures are handled one at a time, each sees the state left by the previous one.
#[derive(Debug, Clone)]
pub struct Session<O = Standard> {
    oracle: O,
    config: SessionConfig,
    game: GameState,
    selection: SelectionView,
    promotion: PromotionResolver,
    arrows: Vec<Arrow>,
}

impl Session<Standard> {
    /// Starts a session under the standard rules from a position in FEN notation.
    pub fn from_fen(fen: &str, config: SessionConfig) -> Result<Self, ParsePositionError> {
        Ok(Session::new(Standard, fen.parse()?, config))
    }
}

impl Default for Session<Standard> {
    fn default() -> Self {
        Session::new(Standard, Position::default(), SessionConfig::default())
    }
}

impl<O: RulesOracle> Session<O> {
    pub fn new(oracle: O, position: Position, config: SessionConfig) -> Self {
        Session {
            game: GameState::new(&oracle, position),
            oracle,
            config,
            selection: SelectionView::default(),
            promotion: PromotionResolver::default(),
            arrows: Vec::new(),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The authoritative game state.
    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn selection(&self) -> &SelectionView {
        &self.selection
    }

    /// The promotion awaiting a choice, if any.
    pub fn pending_promotion(&self) -> Option<PendingPromotion> {
        self.promotion.pending()
    }

    /// What the board should display right now.
    pub fn projection(&self) -> RenderProjection {
        let pending_promotion = self.promotion.pending();

        RenderProjection {
            orientation: self.config.orientation,
            movable: self.config.movable,
            pending_promotion,
            promotion_choices: match pending_promotion {
                Some(_) => Promotion::ALL.to_vec(),
                None => Vec::new(),
            },
            arrows: self.arrows.clone(),
            ..project(&self.game, &self.selection)
        }
    }

    /// Replaces the annotation arrows drawn on the board.
    ///
    /// Arrows are kept across moves until replaced or the session is reset.
    pub fn annotate<I: IntoIterator<Item = Arrow>>(&mut self, arrows: I) {
        self.arrows = arrows.into_iter().collect();
    }

    /// Restarts from the initial position, discarding any selection or pending promotion.
    pub fn reset(&mut self) {
        self.game.reset(&self.oracle);
        self.selection = SelectionView::default();
        self.promotion = PromotionResolver::default();
        self.arrows.clear();
    }

    /// Handles a user gesture.
    ///
    /// A gesture other than [`Input::Promote`] or [`Input::Cancel`]
    /// abandons any pending promotion before it is handled.
    ///
    /// If the rules oracle contradicts itself, the session is reset before the error is returned.
    #[instrument(level = "debug", skip(self), err, fields(pos = %self.game.position()))]
    pub fn handle(&mut self, input: Input) -> Result<Vec<Notification>, StateCorruption> {
        let mut notifications = Vec::new();

        match self.dispatch(input, &mut notifications) {
            Ok(()) => Ok(notifications),
            Err(e) => {
                error!(%e, "resetting session");
                self.reset();
                Err(e)
            }
        }
    }

    fn dispatch(
        &mut self,
        input: Input,
        notifications: &mut Vec<Notification>,
    ) -> Result<(), StateCorruption> {
        match input {
            Input::Select(whence) => {
                notifications.extend(self.promotion.cancel());
                self.select(whence);
            }

            Input::Drop(whence, whither) => {
                notifications.extend(self.promotion.cancel());
                self.selection = SelectionView::default();
                self.drop_piece(whence, whither, notifications)?;
            }

            Input::Promote(p) => {
                self.selection = SelectionView::default();
                if let Some(n) = self.promotion.commit(&mut self.game, &self.oracle, p)? {
                    self.notify(n, notifications);
                } else {
                    debug!("no promotion pending");
                }
            }

            Input::Cancel => {
                if let Some(n) = self.promotion.cancel() {
                    notifications.push(n);
                } else if self.selection.selected.is_some() {
                    notifications.push(Notification::SelectionCleared);
                }

                self.selection = SelectionView::default();
            }
        }

        Ok(())
    }

    fn select(&mut self, whence: Square) {
        self.selection = if self.config.movable.allows(self.game.turn()) {
            SelectionView::new(&self.game, &self.oracle, whence)
        } else {
            SelectionView::inert(whence)
        };
    }

    fn drop_piece(
        &mut self,
        whence: Square,
        whither: Square,
        notifications: &mut Vec<Notification>,
    ) -> Result<(), StateCorruption> {
        if let Some(o) = self.game.outcome() {
            self.notify(
                Notification::MoveRejected(MoveError::GameHasEnded(o)),
                notifications,
            );

            return Ok(());
        }

        let resolution = if self.config.movable.allows(self.game.turn()) {
            intent::resolve(&self.game, &self.oracle, whence, whither)
        } else {
            Resolution::Reject
        };

        match resolution {
            Resolution::Reject => {
                let m = Move(whence, whither, None);
                let e = IllegalMove(m, self.game.position().clone());
                self.notify(Notification::MoveRejected(e.into()), notifications);
            }

            Resolution::AwaitPromotion(p) => {
                notifications.push(self.promotion.suspend(p));
            }

            Resolution::Apply(i) => match self.game.apply_move(&self.oracle, i) {
                Ok(t) => self.notify(Notification::MoveCompleted(t.played), notifications),
                Err(MoveError::Corrupted(e)) => return Err(e),
                Err(e) => self.notify(Notification::MoveRejected(e), notifications),
            },
        }

        Ok(())
    }

    fn notify(&self, n: Notification, notifications: &mut Vec<Notification>) {
        match &n {
            Notification::MoveRejected(e) => warn!(%e),
            n => debug!(%n),
        }

        let completed = matches!(n, Notification::MoveCompleted(_));
        notifications.push(n);

        if completed {
            if let Some(o) = self.game.outcome() {
                debug!(outcome = %o, "game over");
                notifications.push(Notification::GameOver(o));
            }
        }
    }
}
