use super::RulesOracle;
use crate::chess::{AppliedMove, Color, IllegalMove, Move, Outcome, Position, Square};
use std::collections::BTreeSet;

/// Standard chess rules.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct Standard;

impl RulesOracle for Standard {
    fn legal_moves(&self, pos: &Position, whence: Square) -> BTreeSet<Square> {
        pos.moves()
            .into_iter()
            .filter(|m| m.whence() == whence)
            .map(|m| m.whither())
            .collect()
    }

    fn apply_move(&self, pos: &Position, m: Move) -> Result<(AppliedMove, Position), IllegalMove> {
        pos.play(m)
    }

    fn is_terminal(&self, pos: &Position) -> Option<Outcome> {
        if pos.is_checkmate() {
            Some(Outcome::Checkmate(!pos.turn()))
        } else if pos.is_stalemate() {
            Some(Outcome::Stalemate)
        } else if pos.is_material_insufficient() {
            Some(Outcome::DrawByInsufficientMaterial)
        } else if pos.halfmoves() >= 150 {
            Some(Outcome::DrawBy75MoveRule)
        } else if pos.repetitions() >= 2 {
            Some(Outcome::DrawByThreefoldRepetition)
        } else {
            None
        }
    }

    fn side_in_check(&self, pos: &Position) -> Option<Color> {
        pos.is_check().then(|| pos.turn())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess::{Piece, Role};
    use proptest::sample::Selector;
    use test_strategy::proptest;

    #[proptest]
    fn legal_moves_are_empty_for_squares_not_holding_a_piece_of_the_side_to_move(
        #[by_ref] pos: Position,
        #[filter(#pos.color_on(#s) != Some(#pos.turn()))] s: Square,
    ) {
        assert!(Standard.legal_moves(&pos, s).is_empty());
    }

    #[proptest]
    fn legal_moves_can_all_be_applied(
        #[by_ref] pos: Position,
        #[filter(#pos.color_on(#s) == Some(#pos.turn()))] s: Square,
    ) {
        for whither in Standard.legal_moves(&pos, s) {
            let promotion = pos.moves().into_iter().find_map(|m| {
                (m.whence() == s && m.whither() == whither).then(|| m.promotion())
            });

            let m = Move(s, whither, promotion.flatten());
            assert!(Standard.apply_move(&pos, m).is_ok());
        }
    }

    #[proptest]
    fn applying_illegal_move_fails(
        #[by_ref] pos: Position,
        #[filter(!Standard.legal_moves(&#pos, #m.whence()).contains(&#m.whither()))] m: Move,
    ) {
        assert_eq!(
            Standard.apply_move(&pos, m).err(),
            Some(IllegalMove(m, pos.clone()))
        );
    }

    #[proptest]
    fn game_is_over_when_there_are_no_legal_moves(pos: Position) {
        if pos.moves().is_empty() {
            assert!(Standard.is_terminal(&pos).is_some());
        }
    }

    #[proptest]
    fn side_in_check_is_the_side_to_move(
        #[filter(!#pos.moves().is_empty())] pos: Position,
        selector: Selector,
    ) {
        let (applied, next) = Standard.apply_move(&pos, selector.select(pos.moves()))?;
        assert_eq!(applied.is_check(), Standard.side_in_check(&next) == Some(next.turn()));
    }

    #[test]
    fn fools_mate_is_checkmate_by_black() {
        let pos: Position = "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3"
            .parse()
            .unwrap();

        assert_eq!(Standard.is_terminal(&pos), Some(Outcome::Checkmate(Color::Black)));
        assert_eq!(Standard.side_in_check(&pos), Some(Color::White));
    }

    #[test]
    fn stalemate_is_terminal() {
        let pos: Position = "7k/5Q2/6K1/8/8/8/8/8 b - - 0 1".parse().unwrap();
        assert_eq!(Standard.is_terminal(&pos), Some(Outcome::Stalemate));
        assert_eq!(Standard.side_in_check(&pos), None);
    }

    #[test]
    fn bare_kings_are_a_draw() {
        let pos: Position = "8/8/4k3/8/8/4K3/8/8 w - - 0 1".parse().unwrap();
        assert_eq!(
            Standard.is_terminal(&pos),
            Some(Outcome::DrawByInsufficientMaterial)
        );
    }

    #[test]
    fn seventy_five_moves_without_progress_is_a_draw() {
        let pos: Position = "8/8/4k3/8/8/4K3/8/R7 w - - 150 100".parse().unwrap();
        assert_eq!(Standard.is_terminal(&pos), Some(Outcome::DrawBy75MoveRule));
    }

    #[test]
    fn threefold_repetition_is_a_draw() {
        let mut pos = Position::default();
        for m in ["g1f3", "g8f6", "f3g1", "f6g8", "g1f3", "g8f6", "f3g1"] {
            pos = Standard.apply_move(&pos, m.parse().unwrap()).unwrap().1;
            assert_eq!(Standard.is_terminal(&pos), None);
        }

        pos = Standard.apply_move(&pos, "f6g8".parse().unwrap()).unwrap().1;
        assert_eq!(
            Standard.is_terminal(&pos),
            Some(Outcome::DrawByThreefoldRepetition)
        );
    }

    #[test]
    fn castling_is_reported_as_a_two_square_king_move() {
        let pos: Position = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1".parse().unwrap();
        let e1 = "e1".parse().unwrap();
        let dests = Standard.legal_moves(&pos, e1);
        assert!(dests.contains(&"g1".parse().unwrap()));
        assert!(dests.contains(&"c1".parse().unwrap()));

        let (applied, next) = Standard.apply_move(&pos, "e1g1".parse().unwrap()).unwrap();
        assert!(applied.is_castle());
        assert_eq!(
            next.piece_on("f1".parse().unwrap()),
            Some(Piece(Color::White, Role::Rook))
        );
    }
}
