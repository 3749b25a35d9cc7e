use anyhow::Error as Anyhow;
use lib::chess::{Color, Outcome, Promotion, Square};
use lib::game::{Input, Notification, Session, SessionConfig};
use pgn_reader::{BufferedReader, SanPlus, Skip, Visitor};
use shakmaty as sm;
use std::mem;

#[derive(Default)]
struct Moves(Vec<SanPlus>);

impl Visitor for Moves {
    type Result = Vec<SanPlus>;

    fn san(&mut self, san: SanPlus) {
        self.0.push(san);
    }

    fn begin_variation(&mut self) -> Skip {
        Skip(true)
    }

    fn end_game(&mut self) -> Self::Result {
        mem::take(&mut self.0)
    }
}

// Replays a game as the user would, by dragging pieces and picking promotions.
fn replay(pgn: &str) -> Result<(Session, Vec<Notification>), Anyhow> {
    let mut reader = BufferedReader::new_cursor(pgn.as_bytes());
    let moves = reader.read_game(&mut Moves::default())?.unwrap_or_default();

    let mut session = Session::default();
    let mut notifications = Vec::new();

    for san in moves {
        let chess: &sm::Chess = session.game().position().as_ref();
        let (whence, whither, promotion) = match san.san.to_move(chess)?.to_uci(sm::CastlingMode::Standard) {
            sm::uci::Uci::Normal {
                from,
                to,
                promotion,
            } => (Square::from(from), Square::from(to), promotion),
            uci => panic!("unexpected move `{}`", uci),
        };

        let mut ns = session.handle(Input::Drop(whence, whither))?;

        if let Some(p) = promotion {
            assert!(matches!(&ns[..], [Notification::PromotionRequested(_)]));
            ns = session.handle(Input::Promote(Promotion::try_from(p)?))?;
        }

        match ns.first() {
            Some(Notification::MoveCompleted(m)) => assert_eq!(m.san.to_string(), san.to_string()),
            n => panic!("expected `{}` to be played, got {:?}", san, n),
        }

        notifications.extend(ns);
    }

    Ok((session, notifications))
}

#[test]
fn replays_the_opera_game() -> Result<(), Anyhow> {
    let pgn = r#"
[Event "Paris"]
[White "Paul Morphy"]
[Black "Duke Karl / Count Isouard"]
[Result "1-0"]

1. e4 e5 2. Nf3 d6 3. d4 Bg4 {This is a weak move already.} 4. dxe5 Bxf3
5. Qxf3 dxe5 6. Bc4 Nf6 7. Qb3 Qe7 8. Nc3 c6 9. Bg5 b5 10. Nxb5 cxb5
11. Bxb5+ Nbd7 12. O-O-O Rd8 13. Rxd7 Rxd7 14. Rd1 Qe6 (14... Qb4 15. Bxf6) 15. Bxd7+ Nxd7
16. Qb8+ Nxb8 17. Rd8# 1-0
"#;

    let (session, notifications) = replay(pgn)?;

    assert_eq!(
        notifications.last(),
        Some(&Notification::GameOver(Outcome::Checkmate(Color::White)))
    );

    assert_eq!(session.game().outcome(), Some(Outcome::Checkmate(Color::White)));
    assert_eq!(session.game().in_check(), Some(Color::Black));
    assert_eq!(
        session.game().position().to_string(),
        "1n1Rkb1r/p4ppp/4q3/4p1B1/4P3/8/PPP2PPP/2K5 b k - 1 17"
    );

    Ok(())
}

#[test]
fn replays_underpromotion() -> Result<(), Anyhow> {
    let pgn = r#"
[FEN "8/1P5k/8/8/8/8/6p1/K7 w - - 0 1"]
[SetUp "1"]

1. b8=N g1=R+ 2. Ka2 *
"#;

    let mut reader = BufferedReader::new_cursor(pgn.as_bytes());
    let moves = reader.read_game(&mut Moves::default())?.unwrap_or_default();
    assert_eq!(moves.len(), 3);

    let fen = "8/1P5k/8/8/8/8/6p1/K7 w - - 0 1";
    let mut session = Session::from_fen(fen, SessionConfig::default())?;

    let sq = |s: &str| s.parse::<Square>();

    session.handle(Input::Drop(sq("b7")?, sq("b8")?))?;
    session.handle(Input::Promote(Promotion::Knight))?;
    session.handle(Input::Drop(sq("g2")?, sq("g1")?))?;
    let ns = session.handle(Input::Promote(Promotion::Rook))?;

    match &ns[..] {
        [Notification::MoveCompleted(m)] => assert_eq!(m.san.to_string(), moves[1].to_string()),
        n => panic!("unexpected notifications {:?}", n),
    }

    assert_eq!(session.game().in_check(), Some(Color::White));
    Ok(())
}
