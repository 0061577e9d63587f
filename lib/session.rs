use crate::chess::{apply_move, Board, Color, Moves, Piece, Position};
use derive_more::Display;
use tracing::{debug, info, instrument};

mod options;

pub use options::*;

/// The outcome of [clicking][`Session::click`] a square.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Click {
    /// Nothing happened.
    #[display(fmt = "nothing to select at that square")]
    Ignored,

    /// A piece was selected.
    #[display(fmt = "selected {}", _0)]
    Selected(Position),

    /// The selected piece moved.
    #[display(fmt = "moved {}{}", from, to)]
    Moved {
        from: Position,
        to: Position,
        captured: Option<Piece>,
    },

    /// The selected piece cannot move there, the selection was dropped.
    #[display(fmt = "cannot move {}{}", from, to)]
    Rejected { from: Position, to: Position },
}

/// A game played on a single [`Board`].
///
/// Clicking an occupied square selects it, clicking again attempts to move the selected piece
/// there. The selection is dropped after every attempt, whether the move was valid or not.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Session {
    board: Board,
    options: Options,
    score: u32,
    hints: bool,
}

impl Default for Session {
    fn default() -> Self {
        Session::new(Options::default())
    }
}

impl Session {
    /// Starts a session on the demonstration board.
    pub fn new(options: Options) -> Self {
        Session {
            board: Board::default(),
            options,
            score: 0,
            hints: false,
        }
    }

    /// The current state of the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The configuration of this session.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// The name of the person playing.
    pub fn player(&self) -> &str {
        &self.options.player
    }

    /// Points accumulated since the last reset.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// The side expected to move next.
    pub fn turn(&self) -> Color {
        self.board.turn()
    }

    /// How many moves have been applied since the last reset.
    pub fn move_count(&self) -> u32 {
        self.board.move_count()
    }

    /// The destinations of the selected piece, if hints are being shown.
    pub fn hints(&self) -> Moves<'_> {
        match self.board.selected() {
            Some(p) if self.hints => self.options.rules().possible_moves(&self.board, p),
            _ => Moves::Empty,
        }
    }

    /// Clicks a square, either selecting a piece or moving the selected one.
    ///
    /// Positions off the board are ignored.
    #[instrument(level = "debug", skip(self), ret)]
    pub fn click(&mut self, p: Position) -> Click {
        if !p.is_valid() {
            return Click::Ignored;
        }

        let from = match self.board.selected() {
            Some(from) => from,
            None if self.board.select(p) => {
                self.hints = self.options.hints;
                return Click::Selected(p);
            }

            None => return Click::Ignored,
        };

        let rules = self.options.rules();
        let click = match rules.validate(&mut self.board, from, p) {
            Some(m) => {
                let captured = apply_move(m);
                self.score += self.options.points;
                info!(player = %self.options.player, score = self.score, %from, to = %p);
                Click::Moved {
                    from,
                    to: p,
                    captured,
                }
            }

            None => Click::Rejected { from, to: p },
        };

        self.cancel();
        click
    }

    /// Drops the selection, if any.
    pub fn cancel(&mut self) {
        self.board.deselect();
        self.hints = false;
    }

    /// Sets the board up again and clears the score.
    #[instrument(level = "debug", skip(self))]
    pub fn reset(&mut self) {
        self.board.reset();
        self.score = 0;
        self.hints = false;
        debug!("session was reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess::{DoubleStep, Role};
    use test_strategy::proptest;

    fn at(x: i8, y: i8) -> Position {
        Position::new(x, y)
    }

    #[test]
    fn new_session_starts_on_the_demonstration_board() {
        let session = Session::default();
        assert_eq!(session.board(), &Board::default());
        assert_eq!(session.score(), 0);
        assert_eq!(session.turn(), Color::White);
        assert_eq!(session.move_count(), 0);
        assert_eq!(session.player(), "Player");
        assert_eq!(session.hints().count(), 0);
    }

    #[proptest]
    fn clicking_an_empty_square_is_ignored(#[filter(Board::default().is_empty(#p))] p: Position) {
        let mut session = Session::default();
        assert_eq!(session.click(p), Click::Ignored);
        assert_eq!(session.board().selected(), None);
    }

    #[proptest]
    fn clicking_off_the_board_is_ignored(#[filter(!#p.is_valid())] p: Position) {
        let mut session = Session::default();
        session.click(at(0, 0));
        assert_eq!(session.click(p), Click::Ignored);
        assert_eq!(session.board().selected(), Some(at(0, 0)));
    }

    #[test]
    fn clicking_a_piece_selects_it_and_shows_hints() {
        let mut session = Session::default();
        assert_eq!(session.click(at(0, 0)), Click::Selected(at(0, 0)));
        assert_eq!(session.board().selected(), Some(at(0, 0)));
        assert_eq!(session.hints().count(), 14);
    }

    #[test]
    fn hints_can_be_disabled() {
        let mut session = Session::new(Options {
            hints: false,
            ..Options::default()
        });

        session.click(at(0, 0));
        assert_eq!(session.hints().count(), 0);
    }

    #[test]
    fn clicking_a_destination_moves_the_selected_piece() {
        let mut session = Session::default();
        session.click(at(0, 0));

        assert_eq!(
            session.click(at(0, 5)),
            Click::Moved {
                from: at(0, 0),
                to: at(0, 5),
                captured: None
            }
        );

        assert_eq!(session.board()[at(0, 5)].role, Role::Rook);
        assert_eq!(session.score(), 10);
        assert_eq!(session.move_count(), 1);
        assert_eq!(session.turn(), Color::Black);
        assert_eq!(session.board().selected(), None);
        assert_eq!(session.hints().count(), 0);
    }

    #[test]
    fn invalid_destination_drops_the_selection() {
        let mut session = Session::default();
        session.click(at(0, 0));

        assert_eq!(
            session.click(at(1, 1)),
            Click::Rejected {
                from: at(0, 0),
                to: at(1, 1)
            }
        );

        assert_eq!(session.board().selected(), None);
        assert_eq!(session.score(), 0);
        assert_eq!(session.move_count(), 0);
    }

    #[test]
    fn cancel_drops_the_selection() {
        let mut session = Session::default();
        session.click(at(3, 3));
        session.cancel();
        assert_eq!(session.board().selected(), None);
        assert_eq!(session.click(at(3, 3)), Click::Selected(at(3, 3)));
    }

    #[test]
    fn reset_restores_the_board_and_clears_the_score() {
        let mut session = Session::default();
        session.click(at(3, 3));
        session.click(at(5, 4));
        assert_eq!(session.score(), 10);

        session.reset();
        assert_eq!(session, Session::default());
    }

    #[test]
    fn pieces_may_be_moved_regardless_of_turn() {
        let mut session = Session::default();
        session.click(at(3, 3));
        session.click(at(5, 4));
        assert_eq!(session.turn(), Color::Black);

        session.click(at(2, 2));
        assert!(matches!(session.click(at(2, 7)), Click::Moved { .. }));
        assert_eq!(session.turn(), Color::White);
    }

    #[test]
    fn points_per_move_are_configurable() {
        let mut session = Session::new(Options {
            points: 3,
            ..Options::default()
        });

        session.click(at(0, 0));
        session.click(at(7, 0));
        session.click(at(7, 0));
        session.click(at(7, 7));
        assert_eq!(session.score(), 6);
    }

    #[proptest]
    fn every_hint_is_a_move_the_session_accepts(
        #[filter(!Board::default().is_empty(#p))] p: Position,
        s: DoubleStep,
    ) {
        let options = Options {
            double_step: s,
            ..Options::default()
        };

        let mut session = Session::new(options);
        session.click(p);

        for to in Vec::from_iter(session.hints()) {
            let mut attempt = session.clone();
            assert!(matches!(attempt.click(to), Click::Moved { .. }));
        }
    }

    #[test]
    fn clicks_are_displayed_in_algebraic_notation() {
        assert_eq!(Click::Selected(at(0, 0)).to_string(), "selected a8");

        let moved = Click::Moved {
            from: at(0, 0),
            to: at(0, 5),
            captured: None,
        };

        assert_eq!(moved.to_string(), "moved a8a3");
    }
}
