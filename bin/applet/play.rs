use crate::io::Io;
use anyhow::Error as Anyhow;
use clap::Parser;
use derive_more::Display;
use lib::chess::Position;
use lib::session::{Click, Options, Session};
use std::io::{stdin, stdout, Read, Write};
use tracing::{info, instrument};

/// An interactive game on the demonstration board.
#[derive(Debug, Default, Parser)]
#[clap(disable_help_flag = true, disable_version_flag = true)]
pub struct Play {
    /// Session options in RON notation, e.g. `(player: "Ana", hints: false)`.
    #[clap(short, long, default_value_t)]
    options: Options,
}

impl Play {
    #[instrument(level = "trace", skip(self), err)]
    pub fn execute(self) -> Result<(), Anyhow> {
        let io = Io::new(stdout(), stdin());
        Table::new(io, Session::new(self.options)).run()
    }
}

/// Line commands.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Parser)]
#[clap(
    name = "",
    multicall = true,
    arg_required_else_help = true,
    disable_help_flag = true,
    disable_version_flag = true
)]
enum Cmd {
    /// Click a square, selecting the piece there or moving the selected piece to it.
    #[display(fmt = "click {}", square)]
    Click {
        /// A square in algebraic notation, e.g. `a8`.
        square: Position,
    },

    /// Drop the current selection.
    #[display(fmt = "cancel")]
    Cancel,

    /// Set the board up again and clear the score.
    #[display(fmt = "reset")]
    Reset,

    /// Print the board.
    #[display(fmt = "board")]
    Board,

    /// Leave the game.
    #[display(fmt = "quit")]
    Quit,
}

struct Table<W: Write, R: Read> {
    io: Io<W, R>,
    session: Session,
}

impl<W: Write, R: Read> Table<W, R> {
    fn new(io: Io<W, R>, session: Session) -> Self {
        Table { io, session }
    }

    fn status(&mut self) -> Result<(), Anyhow> {
        let s = &self.session;
        let line = format!(
            "{} to move, {} moves played, {} has {} points",
            s.turn(),
            s.move_count(),
            s.player(),
            s.score()
        );

        Ok(self.io.send(line)?)
    }

    fn board(&mut self) -> Result<(), Anyhow> {
        self.io.send(self.session.board())?;
        self.status()
    }

    fn click(&mut self, square: Position) -> Result<(), Anyhow> {
        let click = self.session.click(square);
        self.io.send(click)?;

        match click {
            Click::Selected(_) => {
                let hints: Vec<_> = self.session.hints().map(|p| p.to_string()).collect();
                if !hints.is_empty() {
                    self.io.send(format!("hints: {}", hints.join(" ")))?;
                }
            }

            Click::Moved { captured, .. } => {
                if let Some(piece) = captured {
                    self.io.send(format!("captured {:#}", piece))?;
                }

                self.board()?;
            }

            Click::Ignored | Click::Rejected { .. } => {}
        }

        Ok(())
    }

    #[instrument(level = "debug", skip(self), err)]
    fn run(&mut self) -> Result<(), Anyhow> {
        info!(player = self.session.player(), "welcome");
        self.board()?;

        loop {
            self.io.prompt("> ")?;
            let line = match self.io.recv()? {
                Some(line) => line,
                None => break Ok(()),
            };

            match Cmd::try_parse_from(line.split_whitespace()) {
                Ok(Cmd::Click { square }) => self.click(square)?,
                Ok(Cmd::Cancel) => self.session.cancel(),
                Ok(Cmd::Reset) => {
                    self.session.reset();
                    self.board()?;
                }

                Ok(Cmd::Board) => self.board()?,
                Ok(Cmd::Quit) => break Ok(()),
                Err(e) => self.io.send(e)?,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lib::chess::{Color, Role};

    fn play(script: &str, options: Options) -> (Session, String) {
        let mut out = Vec::new();

        let session = {
            let io = Io::new(&mut out, script.as_bytes());
            let mut table = Table::new(io, Session::new(options));
            assert!(table.run().is_ok());
            table.session
        };

        (session, String::from_utf8_lossy(&out).into_owned())
    }

    #[test]
    fn commands_are_parsed_from_a_single_line() {
        assert_eq!(
            Cmd::try_parse_from("click a8".split_whitespace()).ok(),
            Some(Cmd::Click {
                square: Position::new(0, 0)
            })
        );

        assert_eq!(Cmd::try_parse_from(["cancel"]).ok(), Some(Cmd::Cancel));
        assert_eq!(Cmd::try_parse_from(["reset"]).ok(), Some(Cmd::Reset));
        assert_eq!(Cmd::try_parse_from(["board"]).ok(), Some(Cmd::Board));
        assert_eq!(Cmd::try_parse_from(["quit"]).ok(), Some(Cmd::Quit));
    }

    #[test]
    fn malformed_commands_are_rejected() {
        assert!(Cmd::try_parse_from(["click", "z9"]).is_err());
        assert!(Cmd::try_parse_from(["click"]).is_err());
        assert!(Cmd::try_parse_from(["castle"]).is_err());
    }

    #[test]
    fn printed_command_can_be_parsed_back() {
        let cmd = Cmd::Click {
            square: Position::new(7, 0),
        };

        let line = cmd.to_string();
        assert_eq!(Cmd::try_parse_from(line.split_whitespace()).ok(), Some(cmd));
    }

    #[test]
    fn clicking_twice_moves_a_piece() {
        let (session, out) = play("click a8\nclick a3\n", Options::default());

        assert_eq!(session.board()[Position::new(0, 5)].role, Role::Rook);
        assert_eq!(session.move_count(), 1);
        assert_eq!(session.turn(), Color::Black);
        assert_eq!(session.score(), 10);

        assert!(out.contains("selected a8"));
        assert!(out.contains("hints: "));
        assert!(out.contains("moved a8a3"));
        assert!(out.contains("black to move, 1 moves played, Player has 10 points"));
    }

    #[test]
    fn session_ends_on_quit() {
        let (session, _) = play("quit\nclick a8\nclick a3\n", Options::default());
        assert_eq!(session, Session::default());
    }

    #[test]
    fn cancel_drops_the_selection() {
        let (session, out) = play("click a8\ncancel\nclick a3\n", Options::default());
        assert_eq!(session.move_count(), 0);
        assert!(out.contains("nothing to select at that square"));
    }

    #[test]
    fn reset_restores_the_board() {
        let (session, _) = play("click a8\nclick a3\nreset\n", Options::default());
        assert_eq!(session, Session::default());
    }

    #[test]
    fn invalid_moves_are_reported() {
        let (session, out) = play("click a8\nclick b7\n", Options::default());
        assert_eq!(session.move_count(), 0);
        assert!(out.contains("cannot move a8b7"));
    }

    #[test]
    fn unknown_commands_do_not_end_the_session() {
        let (session, _) = play("castle\nclick a8\nclick a3\n", Options::default());
        assert_eq!(session.move_count(), 1);
    }

    #[test]
    fn options_are_honored() {
        let options = Options {
            player: "Ana".into(),
            points: 5,
            hints: false,
            ..Options::default()
        };

        let (session, out) = play("click a8\nclick a3\n", options);
        assert_eq!(session.score(), 5);
        assert!(!out.contains("hints: "));
        assert!(out.contains("Ana has 5 points"));
    }
}
