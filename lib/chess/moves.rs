use crate::chess::{Board, Color, Piece, Position, Role};
use serde::{Deserialize, Serialize};
use std::iter::Chain;

const ROOK: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const BISHOP: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

#[rustfmt::skip]
const KNIGHT: [(i8, i8); 8] = [
    (2, 1), (2, -1), (-2, 1), (-2, -1),
    (1, 2), (1, -2), (-1, 2), (-1, -2),
];

#[rustfmt::skip]
const KING: [(i8, i8); 8] = [
    (0, 1), (0, -1), (1, 0), (-1, 0),
    (1, 1), (1, -1), (-1, 1), (-1, -1),
];

/// Which squares must be empty for a pawn to advance two squares from its starting row.
///
/// Real chess requires both the square skipped over and the destination to be empty.
/// [`DoubleStep::DestinationOnly`] is looser and lets pawns jump over a blocker.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[serde(rename_all = "snake_case")]
pub enum DoubleStep {
    /// The skipped square and the destination must both be empty.
    #[default]
    Unobstructed,
    /// Only the destination must be empty.
    DestinationOnly,
}

/// Destinations of a pawn, in the order: single step, double step, captures to the left and
/// to the right.
#[derive(Debug, Clone)]
pub struct Pawn<'a> {
    board: &'a Board,
    origin: Position,
    color: Color,
    policy: DoubleStep,
    stage: u8,
}

impl<'a> Pawn<'a> {
    /// Generates moves for `piece` as if it were a pawn.
    pub fn new(board: &'a Board, piece: &Piece, policy: DoubleStep) -> Self {
        Pawn {
            board,
            origin: piece.position,
            color: piece.color,
            policy,
            stage: 0,
        }
    }

    fn direction(&self) -> i8 {
        match self.color {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    fn starting_row(&self) -> i8 {
        match self.color {
            Color::White => 6,
            Color::Black => 1,
        }
    }

    fn single(&self) -> Option<Position> {
        let to = self.origin.offset(0, self.direction());
        Some(to).filter(|&to| self.board.is_empty(to))
    }

    fn double(&self) -> Option<Position> {
        if self.origin.y != self.starting_row() {
            return None;
        }

        let skipped = self.origin.offset(0, self.direction());
        let to = self.origin.offset(0, 2 * self.direction());

        let clear = match self.policy {
            DoubleStep::Unobstructed => self.board.is_empty(skipped),
            DoubleStep::DestinationOnly => true,
        };

        Some(to).filter(|&to| clear && self.board.is_empty(to))
    }

    fn capture(&self, dx: i8) -> Option<Position> {
        let to = self.origin.offset(dx, self.direction());
        match self.board.piece_at(to) {
            Ok(target) if target.is_enemy_of(self.color) => Some(to),
            _ => None,
        }
    }
}

impl Iterator for Pawn<'_> {
    type Item = Position;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let candidate = match self.stage {
                0 => self.single(),
                1 => self.double(),
                2 => self.capture(-1),
                3 => self.capture(1),
                _ => return None,
            };

            self.stage += 1;

            if candidate.is_some() {
                return candidate;
            }
        }
    }
}

/// Destinations of a piece that slides along a set of directions until blocked.
///
/// Empty squares are yielded and sliding continues, an enemy piece is yielded and stops the
/// slide, an allied piece or the edge of the board stops the slide.
#[derive(Debug, Clone)]
pub struct Slide<'a> {
    board: &'a Board,
    origin: Position,
    color: Color,
    directions: &'static [(i8, i8)],
    cursor: Option<Position>,
}

impl<'a> Slide<'a> {
    fn new(board: &'a Board, piece: &Piece, directions: &'static [(i8, i8)]) -> Self {
        Slide {
            board,
            origin: piece.position,
            color: piece.color,
            directions,
            cursor: None,
        }
    }

    /// Generates moves for `piece` as if it were a rook.
    pub fn rook(board: &'a Board, piece: &Piece) -> Self {
        Slide::new(board, piece, &ROOK)
    }

    /// Generates moves for `piece` as if it were a bishop.
    pub fn bishop(board: &'a Board, piece: &Piece) -> Self {
        Slide::new(board, piece, &BISHOP)
    }

    fn turn(&mut self) {
        self.directions = self.directions.get(1..).unwrap_or_default();
        self.cursor = None;
    }
}

impl Iterator for Slide<'_> {
    type Item = Position;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let &(dx, dy) = self.directions.first()?;
            let to = self.cursor.unwrap_or(self.origin).offset(dx, dy);

            match self.board.piece_at(to) {
                Ok(target) if target.is_empty() => {
                    self.cursor = Some(to);
                    return Some(to);
                }

                Ok(target) if target.is_enemy_of(self.color) => {
                    self.turn();
                    return Some(to);
                }

                _ => self.turn(),
            }
        }
    }
}

/// Destinations of a piece that jumps straight to a fixed set of offsets.
///
/// Every offset on the board that is not occupied by an allied piece is yielded.
#[derive(Debug, Clone)]
pub struct Leap<'a> {
    board: &'a Board,
    origin: Position,
    color: Color,
    offsets: &'static [(i8, i8)],
}

impl<'a> Leap<'a> {
    fn new(board: &'a Board, piece: &Piece, offsets: &'static [(i8, i8)]) -> Self {
        Leap {
            board,
            origin: piece.position,
            color: piece.color,
            offsets,
        }
    }

    /// Generates moves for `piece` as if it were a knight.
    pub fn knight(board: &'a Board, piece: &Piece) -> Self {
        Leap::new(board, piece, &KNIGHT)
    }

    /// Generates moves for `piece` as if it were a king.
    pub fn king(board: &'a Board, piece: &Piece) -> Self {
        Leap::new(board, piece, &KING)
    }
}

impl Iterator for Leap<'_> {
    type Item = Position;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((&(dx, dy), rest)) = self.offsets.split_first() {
            self.offsets = rest;
            let to = self.origin.offset(dx, dy);
            match self.board.piece_at(to) {
                Ok(target) if !target.is_ally_of(self.color) => return Some(to),
                _ => continue,
            }
        }

        None
    }
}

/// The destinations a piece may move to, in generation order.
///
/// This iterator is lazy and cheap to clone, a clone taken before iterating replays the same
/// sequence.
#[derive(Debug, Clone)]
pub enum Moves<'a> {
    Empty,
    Pawn(Pawn<'a>),
    Rook(Slide<'a>),
    Knight(Leap<'a>),
    Bishop(Slide<'a>),
    Queen(Chain<Slide<'a>, Slide<'a>>),
    King(Leap<'a>),
}

impl<'a> Moves<'a> {
    /// Dispatches move generation on the [`Role`] of `piece`.
    pub fn new(board: &'a Board, piece: &Piece, policy: DoubleStep) -> Self {
        match piece.role {
            Role::None => Moves::Empty,
            Role::Pawn => Moves::Pawn(Pawn::new(board, piece, policy)),
            Role::Rook => Moves::Rook(Slide::rook(board, piece)),
            Role::Knight => Moves::Knight(Leap::knight(board, piece)),
            Role::Bishop => Moves::Bishop(Slide::bishop(board, piece)),
            Role::Queen => Moves::Queen(Slide::rook(board, piece).chain(Slide::bishop(board, piece))),
            Role::King => Moves::King(Leap::king(board, piece)),
        }
    }
}

impl Iterator for Moves<'_> {
    type Item = Position;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Moves::Empty => None,
            Moves::Pawn(m) => m.next(),
            Moves::Rook(m) | Moves::Bishop(m) => m.next(),
            Moves::Knight(m) | Moves::King(m) => m.next(),
            Moves::Queen(m) => m.next(),
        }
    }
}
