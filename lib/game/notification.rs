use crate::chess::{AppliedMove, Outcome};
use crate::game::{MoveError, PendingPromotion};
use derive_more::Display;

/// Something the outer layer should react to, e.g. by playing a sound or opening a dialog.
#[derive(Debug, Display, Clone, Eq, PartialEq)]
pub enum Notification {
    #[display(fmt = "played {} ({})", "_0.san", "_0.r#move")]
    MoveCompleted(AppliedMove),

    #[display(fmt = "rejected: {}", _0)]
    MoveRejected(MoveError),

    #[display(fmt = "choose a piece to promote {} to", _0)]
    PromotionRequested(PendingPromotion),

    #[display(fmt = "selection cleared")]
    SelectionCleared,

    #[display(fmt = "game over: {}", _0)]
    GameOver(Outcome),
}
