use crate::io::{lines, send};
use anyhow::Error as Anyhow;
use clap::Parser;
use derive_more::{Display, Error, From};
use lib::chess::{ParsePromotionError, ParseSquareError, Position, Promotion};
use lib::game::{Arrow, Input, ParseArrowError, Session, SessionConfig};
use lib::rules::Standard;
use std::str::FromStr;
use tokio::io::{stdin, stdout};
use tracing::{error, info, instrument, warn};

/// Plays an interactive game of chess on the command line.
///
/// Reads commands from the standard input, one per line:
///
/// * `select <square>`
/// * `move <square> <square>`, also `move <square><square>`
/// * `promote <q|r|b|n>`
/// * `cancel`
/// * `arrows [<square><square>...]`, replaces the annotation arrows
/// * `show`
/// * `reset`
/// * `quit`
#[derive(Debug, Default, Parser)]
#[clap(disable_help_flag = true, disable_version_flag = true)]
pub struct Play {
    /// The session configuration in RON notation, e.g. `(orientation: black, movable: black)`.
    #[clap(short, long, default_value_t)]
    config: SessionConfig,

    /// The starting position in FEN notation.
    #[clap(default_value_t)]
    pos: Position,
}

#[derive(Debug, Display, Clone, Eq, PartialEq)]
enum Command {
    #[display(fmt = "{}", _0)]
    Gesture(Input),
    #[display(fmt = "arrows")]
    Annotate(Vec<Arrow>),
    #[display(fmt = "show")]
    Show,
    #[display(fmt = "reset")]
    Reset,
    #[display(fmt = "quit")]
    Quit,
}

/// The reason why parsing a [`Command`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error, From)]
enum ParseCommandError {
    #[display(fmt = "unknown command")]
    #[from(ignore)]
    Unknown,

    #[display(fmt = "{}", _0)]
    InvalidSquare(ParseSquareError),

    #[display(fmt = "{}", _0)]
    InvalidPromotion(ParsePromotionError),

    #[display(fmt = "{}", _0)]
    InvalidArrow(ParseArrowError),
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let words: Vec<&str> = s.split_whitespace().collect();

        let cmd = match &words[..] {
            ["select", s] => Command::Gesture(Input::Select(s.parse()?)),
            ["move", m] if m.len() == 4 && m.is_char_boundary(2) => {
                let (whence, whither) = m.split_at(2);
                Command::Gesture(Input::Drop(whence.parse()?, whither.parse()?))
            }
            ["move", whence, whither] => {
                Command::Gesture(Input::Drop(whence.parse()?, whither.parse()?))
            }
            ["promote", p] => Command::Gesture(Input::Promote(p.parse::<Promotion>()?)),
            ["cancel"] => Command::Gesture(Input::Cancel),
            ["arrows", arrows @ ..] => Command::Annotate(
                arrows
                    .iter()
                    .map(|a| a.parse())
                    .collect::<Result<_, ParseArrowError>>()?,
            ),
            ["show"] => Command::Show,
            ["reset"] => Command::Reset,
            ["quit"] => Command::Quit,
            _ => return Err(ParseCommandError::Unknown),
        };

        Ok(cmd)
    }
}

impl Play {
    #[instrument(level = "trace", skip(self), err)]
    pub async fn execute(self) -> Result<(), Anyhow> {
        let mut session = Session::new(Standard, self.pos, self.config);
        let (mut commands, reader) = lines(stdin());
        let mut stdout = stdout();

        info!(config = %session.config(), "session started");
        send(&mut stdout, session.projection()).await?;

        while let Some(line) = commands.recv().await {
            let cmd = match line.parse::<Command>() {
                Ok(cmd) => cmd,
                Err(e) => {
                    warn!(%line, "{}", e);
                    continue;
                }
            };

            match cmd {
                Command::Quit => break,
                Command::Show => {}
                Command::Reset => session.reset(),
                Command::Annotate(arrows) => session.annotate(arrows),
                Command::Gesture(i) => match session.handle(i) {
                    Ok(notifications) => {
                        for n in notifications {
                            send(&mut stdout, n).await?;
                        }
                    }

                    Err(e) => {
                        error!("{}", e);
                        send(&mut stdout, "session reset").await?;
                    }
                },
            }

            send(&mut stdout, session.projection()).await?;
        }

        drop(commands);
        if reader.is_finished() {
            reader.await??;
        }

        Ok(())
    }
}
