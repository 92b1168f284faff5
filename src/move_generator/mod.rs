//! Chess move generation algorithms.

pub mod generator;
mod targets;


pub use generator::{ChessMoveList, MoveGenerator, PositionStatus};
pub use targets::is_square_attacked;
