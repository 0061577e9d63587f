use derive_more::{Display, Error};
use std::{fmt, str::FromStr};

/// A pair of coordinates on the chess board.
///
/// `x` is the column, from left to right, and `y` is the row, from top to bottom, so that row
/// `0` is black's back rank. Coordinates outside of the board are representable, which allows
/// bounds to be queried with [`Position::is_valid`].
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub struct Position {
    #[cfg_attr(test, strategy(-2i8..10))]
    pub x: i8,
    #[cfg_attr(test, strategy(-2i8..10))]
    pub y: i8,
}

impl Position {
    /// The number of rows and columns on the board.
    pub const SIZE: i8 = 8;

    /// Constructs [`Position`] from a pair of coordinates.
    pub const fn new(x: i8, y: i8) -> Self {
        Position { x, y }
    }

    /// Whether both coordinates are in the range (0..=7).
    pub fn is_valid(&self) -> bool {
        (0..Self::SIZE).contains(&self.x) && (0..Self::SIZE).contains(&self.y)
    }

    /// The [`Position`] displaced by `dx` columns and `dy` rows.
    ///
    /// Displacing never wraps around, positions that fall off the board stay off the board.
    pub fn offset(&self, dx: i8, dy: i8) -> Self {
        Position::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }

    /// Returns an iterator over every valid [`Position`], column by column.
    pub fn iter() -> impl DoubleEndedIterator<Item = Self> + ExactSizeIterator {
        (0..Self::SIZE * Self::SIZE).map(|i| Position::new(i / Self::SIZE, i % Self::SIZE))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            let file = char::from(b'a' + self.x as u8);
            let rank = char::from(b'8' - self.y as u8);
            write!(f, "{}{}", file, rank)
        } else {
            write!(f, "({}, {})", self.x, self.y)
        }
    }
}

/// The reason why parsing [`Position`] failed.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Error)]
#[display(fmt = "expected a square in algebraic notation, e.g. `e4`")]
pub struct ParsePositionError;

impl FromStr for Position {
    type Err = ParsePositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.as_bytes() {
            &[file @ b'a'..=b'h', rank @ b'1'..=b'8'] => Ok(Position::new(
                (file - b'a') as i8,
                (b'8' - rank) as i8,
            )),
            _ => Err(ParsePositionError),
        }
    }
}
