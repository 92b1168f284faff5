//! The text boundary of the engine: FEN positions in and out, and the move
//! notation players type.

pub mod fen;
mod fen_serialize;
mod input;

pub use fen::{parse_fen, FenParseError, STARTING_POSITION_FEN};
pub use fen_serialize::to_fen;
pub use input::{InputError, MoveInput};
