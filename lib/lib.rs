/// Chess domain types and movement rules.
pub mod chess;
/// Teaching drills built on top of the move generator.
pub mod lesson;
/// Interactive play on a single board.
pub mod session;
