use derive_more::{Display, Error};
use std::fmt::{self, Formatter, Write};
use std::str::FromStr;

/// The kind of a chess [`Piece`][`crate::chess::Piece`].
///
/// [`Role::None`] marks an empty slot on the board.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[repr(u8)]
pub enum Role {
    #[default]
    None,
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
}

impl Role {
    /// Every [`Role`] that stands for an actual piece.
    pub const PIECES: [Role; 6] = [
        Role::Pawn,
        Role::Rook,
        Role::Knight,
        Role::Bishop,
        Role::Queen,
        Role::King,
    ];

    /// Whether this role moves by sliding along lines until blocked.
    pub fn is_sliding(&self) -> bool {
        matches!(self, Role::Rook | Role::Bishop | Role::Queen)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Role::None => f.write_char('.'),
            Role::Pawn => f.write_char('p'),
            Role::Rook => f.write_char('r'),
            Role::Knight => f.write_char('n'),
            Role::Bishop => f.write_char('b'),
            Role::Queen => f.write_char('q'),
            Role::King => f.write_char('k'),
        }
    }
}

/// The reason why parsing [`Role`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display(fmt = "failed to parse piece")]
pub struct ParseRoleError;

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "." => Ok(Role::None),
            "p" => Ok(Role::Pawn),
            "r" => Ok(Role::Rook),
            "n" => Ok(Role::Knight),
            "b" => Ok(Role::Bishop),
            "q" => Ok(Role::Queen),
            "k" => Ok(Role::King),
            _ => Err(ParseRoleError),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    #[test]
    fn role_defaults_to_none() {
        assert_eq!(Role::default(), Role::None);
    }

    #[test]
    fn only_rook_bishop_and_queen_are_sliding() {
        let sliding: Vec<_> = Role::PIECES.into_iter().filter(Role::is_sliding).collect();
        assert_eq!(sliding, [Role::Rook, Role::Bishop, Role::Queen]);
    }

    #[proptest]
    fn parsing_printed_role_is_an_identity(r: Role) {
        assert_eq!(r.to_string().parse(), Ok(r));
    }

    #[proptest]
    fn parsing_role_fails_if_not_one_of_lowercase_prnbqk_or_dot(
        #[filter(!['.', 'p', 'r', 'n', 'b', 'q', 'k'].contains(&#c))] c: char,
    ) {
        assert_eq!(c.to_string().parse::<Role>(), Err(ParseRoleError));
    }

    #[proptest]
    fn parsing_role_fails_if_length_not_one(#[filter(#s.len() != 1)] s: String) {
        assert_eq!(s.parse::<Role>(), Err(ParseRoleError));
    }
}
