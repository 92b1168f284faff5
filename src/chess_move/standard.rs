use core::fmt;

use crate::board::{error::BoardError, piece::Piece, square::Square, Board};

use super::{expect_capture, piece_to_move, successor_state, Capture};

/// A normal move or capture by any piece, including single and double pawn
/// pushes. Pawn moves onto the last rank must be `PawnPromotionChessMove`s.
#[derive(PartialEq, Clone, Copy, Eq, PartialOrd, Ord, Hash)]
pub struct StandardChessMove {
    from_square: Square,
    to_square: Square,
    captures: Option<Capture>,
}

impl StandardChessMove {
    pub fn new(from_square: Square, to_square: Square, captures: Option<Capture>) -> Self {
        Self {
            from_square,
            to_square,
            captures,
        }
    }

    pub fn from_square(&self) -> Square {
        self.from_square
    }

    pub fn to_square(&self) -> Square {
        self.to_square
    }

    pub fn captures(&self) -> Option<Capture> {
        self.captures
    }

    pub fn apply(&self, board: &mut Board) -> Result<(), BoardError> {
        let StandardChessMove {
            from_square,
            to_square,
            captures,
        } = *self;

        let color = board.turn();
        let piece = piece_to_move(board, from_square)?;
        expect_capture(board, to_square, captures)?;

        if piece == Piece::Pawn && to_square.rank() == color.promotion_rank() {
            return Err(BoardError::MissingPromotionChoiceError);
        }

        let state = successor_state(
            board,
            piece,
            color,
            from_square,
            to_square,
            captures.is_some(),
        );

        board.remove(from_square);
        board.remove(to_square);
        board.put(to_square, piece, color)?;
        board.end_turn(state);

        Ok(())
    }

    pub fn undo(&self, board: &mut Board) -> Result<(), BoardError> {
        let StandardChessMove {
            from_square,
            to_square,
            captures,
        } = *self;

        let color = board.turn().opposite();
        let piece = match board.get(to_square) {
            Some((piece, c)) if c == color => piece,
            _ => return Err(BoardError::UndoMismatchError),
        };
        if board.is_occupied(from_square) {
            return Err(BoardError::UndoMismatchError);
        }

        board.revert_turn()?;
        board.remove(to_square);
        board.put(from_square, piece, color)?;
        if let Some(Capture(captured)) = captures {
            board.put(to_square, captured, color.opposite())?;
        }

        Ok(())
    }
}

impl fmt::Display for StandardChessMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let capture_msg = match self.captures {
            Some(capture) => format!(" (captures {})", capture),
            None => "".to_string(),
        };

        write!(
            f,
            "move {}{}{}",
            self.from_square, self.to_square, capture_msg
        )
    }
}

impl fmt::Debug for StandardChessMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format!("{}", self).fmt(f)
    }
}

#[macro_export]
macro_rules! std_move {
    ($from:expr, $to:expr, $capture:expr) => {
        $crate::chess_move::ChessMove::Standard(
            $crate::chess_move::StandardChessMove::new($from, $to, Some($capture)),
        )
    };
    ($from:expr, $to:expr) => {
        $crate::chess_move::ChessMove::Standard(
            $crate::chess_move::StandardChessMove::new($from, $to, None),
        )
    };
}
