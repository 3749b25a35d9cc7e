use crate::chess::Promotion;
use crate::game::{GameState, MoveError, Notification, PendingPromotion, StateCorruption};
use crate::rules::RulesOracle;
use std::mem;
use tracing::{debug, instrument};

/// The state of a [`PromotionResolver`].
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub enum PromotionState {
    #[default]
    Idle,
    AwaitingChoice(PendingPromotion),
}

/// Holds a pawn move back until the user picks a promotion piece.
///
/// At most one promotion is ever pending and the board is left untouched while it is.
#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct PromotionResolver {
    state: PromotionState,
}

impl PromotionResolver {
    pub fn state(&self) -> PromotionState {
        self.state
    }

    /// The promotion awaiting a choice, if any.
    pub fn pending(&self) -> Option<PendingPromotion> {
        match self.state {
            PromotionState::Idle => None,
            PromotionState::AwaitingChoice(p) => Some(p),
        }
    }

    /// Waits for the user to choose what `pending` promotes to.
    ///
    /// Replaces any promotion that was already pending.
    #[instrument(level = "debug", skip(self))]
    pub fn suspend(&mut self, pending: PendingPromotion) -> Notification {
        if let Some(p) = self.pending() {
            debug!(replaced = %p);
        }

        self.state = PromotionState::AwaitingChoice(pending);
        Notification::PromotionRequested(pending)
    }

    /// Applies the pending promotion with the chosen piece.
    ///
    /// Returns to idle whether or not the move is accepted.
    /// Nothing happens if no promotion is pending.
    #[instrument(level = "debug", skip(self, game, oracle), err)]
    pub fn commit<O: RulesOracle + ?Sized>(
        &mut self,
        game: &mut GameState,
        oracle: &O,
        choice: Promotion,
    ) -> Result<Option<Notification>, StateCorruption> {
        let pending = match mem::take(&mut self.state) {
            PromotionState::Idle => return Ok(None),
            PromotionState::AwaitingChoice(p) => p,
        };

        match game.apply_move(oracle, pending.complete(choice)) {
            Ok(t) => Ok(Some(Notification::MoveCompleted(t.played))),
            Err(MoveError::Corrupted(e)) => Err(e),
            Err(e) => Ok(Some(Notification::MoveRejected(e))),
        }
    }

    /// Abandons the pending promotion, if any.
    #[instrument(level = "debug", skip(self), ret)]
    pub fn cancel(&mut self) -> Option<Notification> {
        match mem::take(&mut self.state) {
            PromotionState::Idle => None,
            PromotionState::AwaitingChoice(_) => Some(Notification::SelectionCleared),
        }
    }
}
