use crate::chess::{Color, Position, Role};
use std::fmt::{self, Write};

/// The content of a slot on the [`Board`][`crate::chess::Board`].
///
/// Empty slots hold a piece of [`Role::None`].
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub struct Piece {
    pub role: Role,
    pub color: Color,
    /// The slot this piece occupies.
    pub position: Position,
    /// Whether this piece has been moved since the board was set up.
    pub has_moved: bool,
}

impl Piece {
    /// Constructs a [`Piece`] that has not moved yet.
    pub const fn new(role: Role, color: Color, position: Position) -> Self {
        Piece {
            role,
            color,
            position,
            has_moved: false,
        }
    }

    /// The content of an empty slot at `position`.
    pub const fn empty(position: Position) -> Self {
        Piece::new(Role::None, Color::White, position)
    }

    /// Whether this is the content of an empty slot.
    pub fn is_empty(&self) -> bool {
        self.role == Role::None
    }

    /// Whether this is an actual piece of color `c`.
    pub fn is_ally_of(&self, c: Color) -> bool {
        !self.is_empty() && self.color == c
    }

    /// Whether this is an actual piece of the color opposite to `c`.
    pub fn is_enemy_of(&self, c: Color) -> bool {
        !self.is_empty() && self.color != c
    }

    fn figurine(&self) -> char {
        match (self.color, self.role) {
            (_, Role::None) => '·',
            (Color::White, Role::Pawn) => '♙',
            (Color::White, Role::Rook) => '♖',
            (Color::White, Role::Knight) => '♘',
            (Color::White, Role::Bishop) => '♗',
            (Color::White, Role::Queen) => '♕',
            (Color::White, Role::King) => '♔',
            (Color::Black, Role::Pawn) => '♟',
            (Color::Black, Role::Rook) => '♜',
            (Color::Black, Role::Knight) => '♞',
            (Color::Black, Role::Bishop) => '♝',
            (Color::Black, Role::Queen) => '♛',
            (Color::Black, Role::King) => '♚',
        }
    }
}

impl From<Piece> for char {
    fn from(p: Piece) -> char {
        let c = match p.role {
            Role::None => '.',
            Role::Pawn => 'p',
            Role::Rook => 'r',
            Role::Knight => 'n',
            Role::Bishop => 'b',
            Role::Queen => 'q',
            Role::King => 'k',
        };

        match p.color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }
}

/// Prints white pieces in upper case and black pieces in lower case.
///
/// The alternate format prints the figurine instead.
impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = if f.alternate() {
            self.figurine()
        } else {
            (*self).into()
        };

        f.write_char(c)
    }
}
