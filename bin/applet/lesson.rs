use anyhow::{Context, Error as Anyhow};
use clap::Parser;
use lib::chess::{Position, Role};
use lib::lesson::{knight_path, lone_moves, Lesson as Kind};
use std::io::{stdout, Write};
use tracing::instrument;

/// A drill on how the pieces move.
#[derive(Debug, Parser)]
#[clap(disable_help_flag = true, disable_version_flag = true)]
pub struct Lesson {
    /// One of `novice`, `adventurer` or `master`.
    lesson: Kind,

    /// The square the piece starts from, in algebraic notation.
    #[clap(long)]
    at: Option<Position>,

    /// The square the knight should reach, only used by the `master` lesson.
    #[clap(long)]
    to: Option<Position>,
}

impl Lesson {
    const CENTER: Position = Position::new(3, 3);
    const CORNER: Position = Position::new(0, 0);
    const OPPOSITE: Position = Position::new(7, 7);

    #[instrument(level = "trace", skip(self), err)]
    pub fn execute(self) -> Result<(), Anyhow> {
        self.teach(&mut stdout().lock())
    }

    fn teach<W: Write>(&self, out: &mut W) -> Result<(), Anyhow> {
        match self.lesson {
            Kind::Novice => {
                let at = self.at.unwrap_or(Self::CENTER);
                for role in Role::PIECES.into_iter().filter(Role::is_sliding) {
                    show(out, role, at)?;
                }
            }

            Kind::Adventurer => show(out, Role::Knight, self.at.unwrap_or(Self::CENTER))?,

            Kind::Master => {
                let from = self.at.unwrap_or(Self::CORNER);
                let to = self.to.unwrap_or(Self::OPPOSITE);
                let path = knight_path(from, to)
                    .with_context(|| format!("no knight path from {} to {}", from, to))?;

                let squares: Vec<_> = path.iter().map(Position::to_string).collect();
                writeln!(out, "knight from {} to {} in {} jumps", from, to, path.len() - 1)?;
                writeln!(out, "{}", squares.join(" -> "))?;
            }
        }

        Ok(())
    }
}

fn show<W: Write>(out: &mut W, role: Role, at: Position) -> Result<(), Anyhow> {
    let moves: Vec<_> = lone_moves(role, at).iter().map(Position::to_string).collect();
    writeln!(out, "{:?} at {} reaches {} squares", role, at, moves.len())?;
    writeln!(out, "{}", moves.join(" "))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn teach(args: &[&str]) -> Result<String, Anyhow> {
        let lesson = Lesson::try_parse_from([""].iter().chain(args))?;
        let mut out = Vec::new();
        lesson.teach(&mut out)?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn novice_lesson_shows_sliding_pieces() -> Result<(), Anyhow> {
        let out = teach(&["novice"])?;
        assert!(out.contains("Rook at d5 reaches 14 squares"));
        assert!(out.contains("Bishop at d5 reaches 13 squares"));
        assert!(out.contains("Queen at d5 reaches 27 squares"));
        Ok(())
    }

    #[test]
    fn adventurer_lesson_shows_knight_jumps() -> Result<(), Anyhow> {
        assert!(teach(&["adventurer"])?.contains("Knight at d5 reaches 8 squares"));
        assert!(teach(&["adventurer", "--at", "a8"])?.contains("Knight at a8 reaches 2 squares"));
        Ok(())
    }

    #[test]
    fn master_lesson_crosses_the_board() -> Result<(), Anyhow> {
        let out = teach(&["master"])?;
        assert!(out.contains("knight from a8 to h1 in 6 jumps"));
        assert!(out.lines().nth(1).map_or(false, |l| l.starts_with("a8 -> ")));
        Ok(())
    }

    #[test]
    fn master_lesson_accepts_custom_squares() -> Result<(), Anyhow> {
        let out = teach(&["master", "--at", "a8", "--to", "b6"])?;
        assert!(out.contains("knight from a8 to b6 in 1 jumps"));
        Ok(())
    }

    #[test]
    fn unknown_lessons_are_rejected() {
        assert!(teach(&["expert"]).is_err());
    }
}
