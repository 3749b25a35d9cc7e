use crate::chess::{AppliedMove, Color, Move, MoveKind, Piece, Promotion, Role, Square};
use derive_more::{DebugCustom, Display, Error, From};
use proptest::{prelude::*, sample::Selector, strategy::BoxedStrategy};
use serde::{Serialize, Serializer};
use shakmaty as sm;
use std::{num::NonZeroU32, str::FromStr};

/// Represents an illegal [`Move`] in a given [`Position`].
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display(fmt = "move `{}` is illegal in position `{}`", _0, _1)]
pub struct IllegalMove(pub Move, pub Position);

/// The current position on the chess board.
///
/// This type guarantees that it only holds valid positions.
/// Positions are never modified in place, playing a move produces a new one.
#[derive(DebugCustom, Display, Default, Clone)]
#[debug(fmt = "Position(\"{}\")", self)]
#[display(
    fmt = "{}",
    "sm::fen::Fen::from_position(self.0.clone(), sm::EnPassantMode::Legal)"
)]
pub struct Position(sm::Chess, Vec<u64>);

impl Eq for Position {}

/// Positions are equal if their boards, side to move, and rights are equal.
impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Arbitrary for Position {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (0..256usize, any::<Selector>())
            .prop_map(|(plies, selector)| {
                let mut pos = Position::default();
                for _ in 0..plies {
                    match selector.try_select(pos.moves()) {
                        None => break,
                        Some(m) => match pos.play(m) {
                            Ok((_, next)) => pos = next,
                            Err(_) => break,
                        },
                    }
                }

                pos
            })
            .no_shrink()
            .boxed()
    }
}

impl Position {
    /// The side to move.
    pub fn turn(&self) -> Color {
        sm::Position::turn(&self.0).into()
    }

    /// The number of halfmoves since the last capture or pawn advance.
    ///
    /// It resets to 0 whenever a piece is captured or a pawn is moved.
    pub fn halfmoves(&self) -> u32 {
        sm::Position::halfmoves(&self.0)
    }

    /// The current move number since the start of the game.
    ///
    /// It starts at 1, and is incremented after every move by black.
    pub fn fullmoves(&self) -> NonZeroU32 {
        sm::Position::fullmoves(&self.0)
    }

    /// The [`Piece`] on the given [`Square`], if any.
    pub fn piece_on(&self, s: Square) -> Option<Piece> {
        sm::Position::board(&self.0)
            .piece_at(s.into())
            .map(Piece::from)
    }

    /// The [`Role`] of the piece on the given [`Square`], if any.
    pub fn role_on(&self, s: Square) -> Option<Role> {
        self.piece_on(s).map(|p| p.role())
    }

    /// The [`Color`] of the piece on the given [`Square`], if any.
    pub fn color_on(&self, s: Square) -> Option<Color> {
        self.piece_on(s).map(|p| p.color())
    }

    /// An iterator over all pieces on the board.
    pub fn iter(&self) -> impl Iterator<Item = (Piece, Square)> {
        sm::Position::board(&self.0)
            .clone()
            .into_iter()
            .map(|(s, p)| (p.into(), s.into()))
    }

    /// Whether this position is a [check].
    ///
    /// [check]: https://www.chessprogramming.org/Check
    pub fn is_check(&self) -> bool {
        sm::Position::is_check(&self.0)
    }

    /// Whether this position is a [checkmate].
    ///
    /// [checkmate]: https://www.chessprogramming.org/Checkmate
    pub fn is_checkmate(&self) -> bool {
        sm::Position::is_checkmate(&self.0)
    }

    /// Whether this position is a [stalemate].
    ///
    /// [stalemate]: https://www.chessprogramming.org/Stalemate
    pub fn is_stalemate(&self) -> bool {
        sm::Position::is_stalemate(&self.0)
    }

    /// Whether this position has [insufficient material].
    ///
    /// [insufficient material]: https://www.chessprogramming.org/Material#InsufficientMaterial
    pub fn is_material_insufficient(&self) -> bool {
        sm::Position::is_insufficient_material(&self.0)
    }

    /// How many times this position was reached before since the last irreversible move.
    pub fn repetitions(&self) -> usize {
        let zobrist = self.zobrist();
        self.1.iter().filter(|&&z| z == zobrist).count()
    }

    /// The legal [`Move`]s in this position.
    ///
    /// Castling is reported as the king moving two squares towards the rook.
    pub fn moves(&self) -> Vec<Move> {
        sm::Position::legal_moves(&self.0)
            .iter()
            .filter_map(|m| match m.to_uci(sm::CastlingMode::Standard) {
                sm::uci::Uci::Normal {
                    from,
                    to,
                    promotion,
                } => Some(Move(
                    from.into(),
                    to.into(),
                    promotion.and_then(|r| Promotion::try_from(r).ok()),
                )),

                _ => None,
            })
            .collect()
    }

    /// Play a [`Move`] if legal in this position.
    ///
    /// Returns what the move did together with the resulting position, leaving this one untouched.
    pub fn play(&self, m: Move) -> Result<(AppliedMove, Position), IllegalMove> {
        let uci = sm::uci::Uci::from(m);
        let vm = match uci.to_move(&self.0) {
            // Castling is only accepted in the same notation reported by `moves`.
            Ok(vm)
                if sm::Position::is_legal(&self.0, &vm)
                    && vm.to_uci(sm::CastlingMode::Standard) == uci =>
            {
                vm
            }

            _ => return Err(IllegalMove(m, self.clone())),
        };

        let mut kind = MoveKind::from(&vm);
        let mut next = self.0.clone();
        let san = sm::san::SanPlus::from_move_and_play_unchecked(&mut next, &vm);

        match san.suffix {
            Some(sm::san::Suffix::Checkmate) => kind |= MoveKind::CHECK | MoveKind::CHECKMATE,
            Some(sm::san::Suffix::Check) => kind |= MoveKind::CHECK,
            None => {}
        }

        let history = if vm.is_zeroing() {
            Vec::new()
        } else {
            let mut history = self.1.clone();
            history.push(self.zobrist());
            history
        };

        let applied = AppliedMove {
            r#move: m,
            role: vm.role().into(),
            capture: vm.capture().map(Role::from),
            kind,
            san: san.into(),
        };

        Ok((applied, Position(next, history)))
    }

    fn zobrist(&self) -> u64 {
        sm::zobrist::ZobristHash::zobrist_hash::<u64>(&self.0)
    }
}

impl Serialize for Position {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// The reason why parsing the FEN string failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error, From)]
pub enum ParsePositionError {
    #[display(fmt = "{}", _0)]
    InvalidFen(InvalidFen),
    #[display(fmt = "{}", _0)]
    IllegalPosition(IllegalPosition),
}

/// The reason why the string is not valid FEN.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
pub enum InvalidFen {
    #[display(fmt = "syntax error at the piece placement field")]
    InvalidPlacement,
    #[display(fmt = "syntax error at the side to move field")]
    InvalidTurn,
    #[display(fmt = "syntax error at the castling rights field")]
    InvalidCastlingRights,
    #[display(fmt = "syntax error at the en passant square field")]
    InvalidEnPassantSquare,
    #[display(fmt = "syntax error at the halfmove clock field")]
    InvalidHalfmoveClock,
    #[display(fmt = "syntax error at the fullmove counter field")]
    InvalidFullmoves,
    #[display(fmt = "unspecified syntax error")]
    InvalidSyntax,
}

#[doc(hidden)]
impl From<sm::fen::ParseFenError> for InvalidFen {
    fn from(e: sm::fen::ParseFenError) -> Self {
        use InvalidFen::*;
        match e {
            sm::fen::ParseFenError::InvalidBoard => InvalidPlacement,
            sm::fen::ParseFenError::InvalidTurn => InvalidTurn,
            sm::fen::ParseFenError::InvalidCastling => InvalidCastlingRights,
            sm::fen::ParseFenError::InvalidEpSquare => InvalidEnPassantSquare,
            sm::fen::ParseFenError::InvalidHalfmoveClock => InvalidHalfmoveClock,
            sm::fen::ParseFenError::InvalidFullmoves => InvalidFullmoves,
            _ => InvalidSyntax,
        }
    }
}

/// The reason why the position represented by the FEN string is illegal.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
pub enum IllegalPosition {
    #[display(fmt = "at least one side has no king")]
    MissingKing,
    #[display(fmt = "at least one side has multiple kings")]
    TooManyKings,
    #[display(fmt = "there are pawns on the back-rank")]
    PawnsOnBackRank,
    #[display(fmt = "the player in check is not to move")]
    OppositeCheck,
    #[display(fmt = "invalid en passant square; wrong rank, occupied, or missing pushed pawn")]
    InvalidEnPassantSquare,
    #[display(fmt = "invalid castling rights")]
    InvalidCastlingRights,
    #[display(fmt = "no sequence of legal moves can reach this position")]
    Other,
}

#[doc(hidden)]
impl From<sm::PositionError<sm::Chess>> for IllegalPosition {
    fn from(e: sm::PositionError<sm::Chess>) -> Self {
        let kinds = e.kinds();

        if kinds.contains(sm::PositionErrorKinds::MISSING_KING) {
            IllegalPosition::MissingKing
        } else if kinds.contains(sm::PositionErrorKinds::TOO_MANY_KINGS) {
            IllegalPosition::TooManyKings
        } else if kinds.contains(sm::PositionErrorKinds::PAWNS_ON_BACKRANK) {
            IllegalPosition::PawnsOnBackRank
        } else if kinds.contains(sm::PositionErrorKinds::OPPOSITE_CHECK) {
            IllegalPosition::OppositeCheck
        } else if kinds.contains(sm::PositionErrorKinds::INVALID_EP_SQUARE) {
            IllegalPosition::InvalidEnPassantSquare
        } else if kinds.contains(sm::PositionErrorKinds::INVALID_CASTLING_RIGHTS) {
            IllegalPosition::InvalidCastlingRights
        } else {
            IllegalPosition::Other
        }
    }
}

impl FromStr for Position {
    type Err = ParsePositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fen: sm::fen::Fen = s.parse().map_err(InvalidFen::from)?;
        let chess: sm::Chess = sm::Setup::from(fen)
            .position(sm::CastlingMode::Standard)
            .map_err(IllegalPosition::from)?;

        Ok(Position(chess, Vec::new()))
    }
}

#[doc(hidden)]
impl From<sm::Chess> for Position {
    fn from(chess: sm::Chess) -> Self {
        Position(chess, Vec::new())
    }
}

#[doc(hidden)]
impl AsRef<sm::Chess> for Position {
    fn as_ref(&self) -> &sm::Chess {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    #[proptest]
    fn turn_returns_the_current_side_to_play(pos: Position) {
        assert_eq!(pos.turn(), sm::Position::turn(pos.as_ref()).into());
    }

    #[proptest]
    fn checkmate_implies_check(pos: Position) {
        assert!(!pos.is_checkmate() || pos.is_check());
    }

    #[proptest]
    fn checkmate_and_stalemate_are_mutually_exclusive(pos: Position) {
        assert!(!(pos.is_checkmate() && pos.is_stalemate()));
    }

    #[proptest]
    fn moves_are_played_by_the_side_to_move(pos: Position) {
        for m in pos.moves() {
            assert_eq!(pos.color_on(m.whence()), Some(pos.turn()));
        }
    }

    #[proptest]
    fn legal_move_produces_new_position_with_the_turn_flipped(
        #[filter(!#pos.moves().is_empty())] pos: Position,
        selector: Selector,
    ) {
        let before = pos.clone();
        let m = selector.select(pos.moves());
        let (applied, next) = pos.play(m)?;
        assert_eq!(applied.r#move, m);
        assert_eq!(next.turn(), !pos.turn());
        assert_eq!(pos, before);
    }

    #[proptest]
    fn illegal_move_fails_without_changing_position(
        #[by_ref] pos: Position,
        #[filter(#pos.play(#m).is_err())] m: Move,
    ) {
        let before = pos.clone();
        assert_eq!(pos.play(m).err(), Some(IllegalMove(m, before.clone())));
        assert_eq!(pos, before);
    }

    #[proptest]
    fn captures_reduce_material(
        #[filter(!#pos.moves().is_empty())] pos: Position,
        selector: Selector,
    ) {
        let (applied, next) = pos.play(selector.select(pos.moves()))?;
        if applied.is_capture() {
            assert!(next.iter().count() < pos.iter().count());
        } else {
            assert_eq!(next.iter().count(), pos.iter().count());
        }
    }

    #[proptest]
    fn castles_move_the_king_by_two_files(pos: Position) {
        for m in pos.moves() {
            let (applied, _) = pos.play(m)?;
            if applied.is_castle() {
                assert_eq!(pos.role_on(m.whence()), Some(Role::King));
                assert_eq!(m.whence().rank(), m.whither().rank());
                assert_eq!((m.whence().file() - m.whither().file()).abs(), 2);
            }
        }
    }

    #[proptest]
    fn promotions_replace_the_pawn(pos: Position) {
        for m in pos.moves() {
            if let Some(p) = m.promotion() {
                let (applied, next) = pos.play(m)?;
                assert!(applied.is_promotion());
                assert_eq!(next.piece_on(m.whither()), Some(Piece(pos.turn(), p.into())));
            }
        }
    }

    #[test]
    fn check_is_reported_by_the_applied_move() {
        let pos: Position = "4k3/8/8/8/8/8/8/R3K3 w Q - 0 1".parse().unwrap();
        let m = "a1a8".parse().unwrap();
        let (applied, next) = pos.play(m).unwrap();
        assert!(applied.is_check());
        assert!(next.is_check());
        assert_eq!(applied.san.to_string(), "Ra8+");
    }

    #[test]
    fn repeating_moves_is_tracked() {
        let mut pos = Position::default();
        for m in ["g1f3", "g8f6", "f3g1", "f6g8", "g1f3", "g8f6", "f3g1", "f6g8"] {
            pos = pos.play(m.parse().unwrap()).unwrap().1;
        }

        assert_eq!(pos.to_string(), Position::default().to_string().replace(" 0 1", " 8 5"));
        assert_eq!(pos.repetitions(), 2);
    }

    #[proptest]
    fn repetitions_are_keyed_by_the_zobrist_hash(pos: Position) {
        assert_eq!(
            pos.zobrist(),
            sm::zobrist::ZobristHash::zobrist_hash::<u64>(pos.as_ref())
        );
    }

    #[test]
    fn pawn_moves_forget_repetitions() {
        let mut pos = Position::default();
        for m in ["g1f3", "g8f6", "f3g1", "f6g8", "e2e4"] {
            pos = pos.play(m.parse().unwrap()).unwrap().1;
        }

        assert_eq!(pos.repetitions(), 0);
    }

    #[proptest]
    fn all_positions_can_be_represented_using_fen_notation(pos: Position) {
        assert_eq!(pos.to_string().parse(), Ok(pos));
    }

    #[proptest]
    fn parsing_invalid_fen_fails(
        pos: Position,
        #[strategy(..=#pos.to_string().len())] n: usize,
        #[strategy("[^[:ascii:]]+")] r: String,
    ) {
        assert!([&pos.to_string()[..n], &r].concat().parse::<Position>().is_err());
    }

    #[test]
    fn parsing_position_without_kings_fails() {
        assert_eq!(
            "8/8/8/8/8/8/8/8 w - - 0 1".parse::<Position>(),
            Err(IllegalPosition::MissingKing.into())
        );
    }

    #[proptest]
    fn position_serializes_to_fen(pos: Position) {
        assert_eq!(ron::ser::to_string(&pos)?, format!("\"{pos}\""));
    }
}
