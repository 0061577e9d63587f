use crate::chess::{Board, DoubleStep, Moves, Piece, Position};
use derive_more::Display;
use tracing::instrument;

/// The movement rules a [`Board`] is played by.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub struct Rules {
    pub double_step: DoubleStep,
}

/// A move validated against the [`Board`] it borrows.
///
/// Since the board stays borrowed, it cannot change between validation and
/// [application][`apply_move`].
#[derive(Debug, Display)]
#[display(fmt = "{}{}", from, to)]
pub struct ValidMove<'a> {
    board: &'a mut Board,
    from: Position,
    to: Position,
}

impl ValidMove<'_> {
    /// Where the piece moves from.
    pub fn from(&self) -> Position {
        self.from
    }

    /// Where the piece moves to.
    pub fn to(&self) -> Position {
        self.to
    }

    /// The piece that moves.
    pub fn piece(&self) -> &Piece {
        &self.board[self.from]
    }
}

impl Rules {
    /// The destinations the piece at `origin` may move to, in generation order.
    ///
    /// Yields nothing if `origin` is empty or out of bounds.
    pub fn possible_moves<'a>(&self, board: &'a Board, origin: Position) -> Moves<'a> {
        match board.piece_at(origin) {
            Ok(piece) => Moves::new(board, piece, self.double_step),
            Err(_) => Moves::Empty,
        }
    }

    /// Whether the piece at `from` may move to `to`.
    #[instrument(level = "trace", skip(self, board), ret)]
    pub fn is_valid_move(&self, board: &Board, from: Position, to: Position) -> bool {
        let piece = match board.piece_at(from) {
            Ok(piece) if !piece.is_empty() => piece,
            _ => return false,
        };

        match board.piece_at(to) {
            Ok(target) if !target.is_ally_of(piece.color) => {}
            _ => return false,
        }

        self.possible_moves(board, from).any(|p| p == to)
    }

    /// Validates the move from `from` to `to`, returning it if valid.
    pub fn validate<'a>(
        &self,
        board: &'a mut Board,
        from: Position,
        to: Position,
    ) -> Option<ValidMove<'a>> {
        if self.is_valid_move(board, from, to) {
            Some(ValidMove { board, from, to })
        } else {
            None
        }
    }
}

/// The destinations the piece at `origin` may move to under the default [`Rules`].
pub fn possible_moves(board: &Board, origin: Position) -> Moves<'_> {
    Rules::default().possible_moves(board, origin)
}

/// The destinations the piece at `origin` may move to under a given [`DoubleStep`] policy.
pub fn possible_moves_with(board: &Board, origin: Position, policy: DoubleStep) -> Moves<'_> {
    Rules {
        double_step: policy,
    }
    .possible_moves(board, origin)
}

/// Whether the piece at `from` may move to `to` under the default [`Rules`].
pub fn is_valid_move(board: &Board, from: Position, to: Position) -> bool {
    Rules::default().is_valid_move(board, from, to)
}

/// Validates a move under the default [`Rules`].
pub fn validate(board: &mut Board, from: Position, to: Position) -> Option<ValidMove<'_>> {
    Rules::default().validate(board, from, to)
}

/// Plays a [`ValidMove`] on the board it was validated against.
///
/// Returns the captured piece, if any.
#[instrument(level = "debug", skip(m), fields(%m))]
pub fn apply_move(m: ValidMove<'_>) -> Option<Piece> {
    m.board.apply_unchecked(m.from, m.to)
}
