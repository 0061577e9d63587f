mod board;
mod color;
mod moves;
mod piece;
mod position;
mod role;
mod rules;

pub use board::*;
pub use color::*;
pub use moves::*;
pub use piece::*;
pub use position::*;
pub use role::*;
pub use rules::*;
