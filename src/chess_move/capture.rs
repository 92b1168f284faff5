use core::fmt;

use crate::board::piece::Piece;

/// Represents a captured piece in chess. The color is implied: it is always
/// the opponent of the side making the move.
#[derive(PartialEq, Clone, Copy, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Capture(pub Piece);

impl fmt::Display for Capture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
