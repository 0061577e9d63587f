use crate::chess::{Color, Piece, Position, Role};
use derive_more::{Display, Error};
use std::fmt;
use std::ops::{Index, IndexMut};
use tracing::{debug, instrument};

/// Represents an attempt to look up a [`Position`] that is not on the [`Board`].
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Error)]
#[display(fmt = "position `{}` is out of bounds", _0)]
pub struct OutOfBounds(#[error(not(source))] pub Position);

/// The chess board.
///
/// Every slot always holds a [`Piece`], empty slots hold one of [`Role::None`].
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Board {
    slots: [[Piece; 8]; 8],
    selected: Option<Position>,
    turn: Color,
    moves: u32,
}

impl Default for Board {
    /// A board set up with the demonstration [layout][`Board::LAYOUT`].
    fn default() -> Self {
        let mut board = Board::empty();
        board.reset();
        board
    }
}

impl Board {
    /// The pieces a freshly set up board starts with.
    pub const LAYOUT: [Piece; 4] = [
        Piece::new(Role::Rook, Color::White, Position::new(0, 0)),
        Piece::new(Role::Bishop, Color::White, Position::new(1, 1)),
        Piece::new(Role::Queen, Color::White, Position::new(2, 2)),
        Piece::new(Role::Knight, Color::White, Position::new(3, 3)),
    ];

    /// A board without any pieces, with white to move.
    pub fn empty() -> Self {
        let mut slots = [[Piece::default(); 8]; 8];

        for p in Position::iter() {
            slots[p.x as usize][p.y as usize] = Piece::empty(p);
        }

        Board {
            slots,
            selected: None,
            turn: Color::White,
            moves: 0,
        }
    }

    /// Sets up this board with the demonstration [layout][`Board::LAYOUT`].
    ///
    /// Clears every slot, the selection and the move counter, and hands the turn to white.
    #[instrument(level = "debug", skip(self))]
    pub fn reset(&mut self) {
        *self = Board::empty();

        for piece in Self::LAYOUT {
            self[piece.position] = piece;
        }
    }

    /// Puts a [`Piece`] on the slot it names, replacing whatever was there.
    pub fn place(&mut self, piece: Piece) -> Result<(), OutOfBounds> {
        if !piece.position.is_valid() {
            return Err(OutOfBounds(piece.position));
        }

        self[piece.position] = piece;
        Ok(())
    }

    /// The [`Piece`] at a given [`Position`].
    pub fn piece_at(&self, p: Position) -> Result<&Piece, OutOfBounds> {
        if p.is_valid() {
            Ok(&self[p])
        } else {
            Err(OutOfBounds(p))
        }
    }

    /// Whether the slot at a given [`Position`] exists and is empty.
    pub fn is_empty(&self, p: Position) -> bool {
        self.piece_at(p).map_or(false, Piece::is_empty)
    }

    /// An iterator over the actual pieces on the board.
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> + '_ {
        self.slots.iter().flatten().filter(|p| !p.is_empty())
    }

    /// The side expected to move next.
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// How many moves have been applied since the board was set up.
    pub fn move_count(&self) -> u32 {
        self.moves
    }

    /// The selected [`Position`], if any.
    pub fn selected(&self) -> Option<Position> {
        self.selected
    }

    /// Selects a [`Position`] if it holds an actual piece.
    ///
    /// Pieces of either color may be selected regardless of whose turn it is.
    /// Returns whether the selection succeeded, leaving the previous selection otherwise.
    #[instrument(level = "trace", skip(self), ret)]
    pub fn select(&mut self, p: Position) -> bool {
        match self.piece_at(p) {
            Ok(piece) if !piece.is_empty() => {
                self.selected = Some(p);
                true
            }

            _ => false,
        }
    }

    /// Clears the selection.
    pub fn deselect(&mut self) {
        self.selected = None;
    }

    /// Moves the piece at `from` to `to` without checking the rules of movement.
    ///
    /// Whatever occupied `to` is overwritten, the move counter is incremented and the turn
    /// passes to the other side. Returns the captured piece, if any.
    ///
    /// Prefer [`apply_move`][`crate::chess::apply_move`], which only accepts validated moves.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `to` is out of bounds or `from` does not hold an actual piece.
    /// In release builds that is a no-op.
    #[instrument(level = "debug", skip(self), ret)]
    pub fn apply_unchecked(&mut self, from: Position, to: Position) -> Option<Piece> {
        let piece = match self.piece_at(from) {
            Ok(&piece) if !piece.is_empty() && to.is_valid() => piece,
            _ => {
                debug_assert!(false, "cannot move from `{}` to `{}`", from, to);
                return None;
            }
        };

        let captured = self[to];

        self[to] = Piece {
            position: to,
            has_moved: true,
            ..piece
        };

        self[from] = Piece::empty(from);
        self.moves += 1;
        self.turn = !self.turn;

        debug!(piece = %piece, %from, %to, turn = %self.turn, moves = self.moves);

        Some(captured).filter(|p| !p.is_empty())
    }
}

/// Retrieves the [`Piece`] at a given [`Position`].
///
/// # Panics
///
/// Panics if the position is not [valid][`Position::is_valid`], see [`Board::piece_at`].
impl Index<Position> for Board {
    type Output = Piece;

    fn index(&self, p: Position) -> &Self::Output {
        &self.slots[p.x as usize][p.y as usize]
    }
}

impl IndexMut<Position> for Board {
    fn index_mut(&mut self, p: Position) -> &mut Self::Output {
        &mut self.slots[p.x as usize][p.y as usize]
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const FILES: &str = "abcdefgh";

        write!(f, "  ")?;
        for file in FILES.chars() {
            write!(f, "   {}", file)?;
        }

        writeln!(f)?;
        writeln!(f, "   +---+---+---+---+---+---+---+---+")?;

        for y in 0..Position::SIZE {
            let rank = Position::SIZE - y;
            write!(f, " {} |", rank)?;

            for x in 0..Position::SIZE {
                let p = Position::new(x, y);
                match self[p] {
                    piece if piece.is_empty() => write!(f, "   |")?,
                    piece if f.alternate() => write!(f, " {:#} |", piece)?,
                    piece => write!(f, " {} |", piece)?,
                }
            }

            writeln!(f, " {}", rank)?;
            writeln!(f, "   +---+---+---+---+---+---+---+---+")?;
        }

        write!(f, "  ")?;
        for file in FILES.chars() {
            write!(f, "   {}", file)?;
        }

        Ok(())
    }
}
