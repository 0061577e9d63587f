use crate::chess::{possible_moves, Board, Color, Piece, Position, Role};
use derive_more::{Display, Error};
use std::collections::{hash_map::Entry, HashMap, VecDeque};
use std::str::FromStr;
use tracing::instrument;

/// A teaching drill.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum Lesson {
    /// How rooks, bishops and queens slide.
    #[display(fmt = "novice")]
    Novice,
    /// How knights jump.
    #[display(fmt = "adventurer")]
    Adventurer,
    /// The shortest way for a knight to cross the board.
    #[display(fmt = "master")]
    Master,
}

/// The reason why parsing [`Lesson`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display(fmt = "expected one of `novice`, `adventurer` or `master`")]
pub struct ParseLessonError;

impl FromStr for Lesson {
    type Err = ParseLessonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "novice" => Ok(Lesson::Novice),
            "adventurer" => Ok(Lesson::Adventurer),
            "master" => Ok(Lesson::Master),
            _ => Err(ParseLessonError),
        }
    }
}

/// The destinations of a piece standing alone on the board.
pub fn lone_moves(role: Role, at: Position) -> Vec<Position> {
    let mut board = Board::empty();

    match board.place(Piece::new(role, Color::White, at)) {
        Ok(()) => possible_moves(&board, at).collect(),
        Err(_) => Vec::new(),
    }
}

/// The shortest sequence of knight jumps from `from` to `to`, both ends included.
///
/// Returns `None` if either position is out of bounds.
#[instrument(level = "debug", ret)]
pub fn knight_path(from: Position, to: Position) -> Option<Vec<Position>> {
    if !from.is_valid() || !to.is_valid() {
        return None;
    }

    let mut parents = HashMap::from([(from, from)]);
    let mut queue = VecDeque::from([from]);

    while let Some(p) = queue.pop_front() {
        if p == to {
            let mut path = vec![to];
            let mut q = to;
            while q != from {
                q = *parents.get(&q)?;
                path.push(q);
            }

            path.reverse();
            return Some(path);
        }

        for next in lone_moves(Role::Knight, p) {
            if let Entry::Vacant(e) = parents.entry(next) {
                e.insert(p);
                queue.push_back(next);
            }
        }
    }

    None
}
