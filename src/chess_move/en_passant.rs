use core::fmt;

use crate::board::{error::BoardError, piece::Piece, square::Square, Board, MoveState};

use super::{piece_to_move, Capture};

/// An en passant capture. The captured pawn is not on the destination
/// square: it stands beside the capturing pawn, on the same file as the
/// destination.
#[derive(PartialEq, Clone, Copy, Eq, PartialOrd, Ord, Hash)]
pub struct EnPassantChessMove {
    from_square: Square,
    to_square: Square,
}

impl EnPassantChessMove {
    pub fn new(from_square: Square, to_square: Square) -> Self {
        Self {
            from_square,
            to_square,
        }
    }

    pub fn from_square(&self) -> Square {
        self.from_square
    }

    pub fn to_square(&self) -> Square {
        self.to_square
    }

    pub fn captures(&self) -> Capture {
        Capture(Piece::Pawn)
    }

    /// The square of the pawn being captured.
    pub fn capture_square(&self) -> Square {
        // Same rank as the capturing pawn, same file as the target. Both
        // coordinates come from on-board squares, so this cannot fail.
        self.from_square
            .offset(
                self.to_square.file() as i8 - self.from_square.file() as i8,
                0,
            )
            .unwrap_or(self.to_square)
    }

    pub fn apply(&self, board: &mut Board) -> Result<(), BoardError> {
        let color = board.turn();
        if piece_to_move(board, self.from_square)? != Piece::Pawn {
            return Err(BoardError::FromSquareIsEmptyMoveApplicationError);
        }
        if board.en_passant_target() != Some(self.to_square) || board.is_occupied(self.to_square)
        {
            return Err(BoardError::EnPassantTargetMismatchError);
        }
        let capture_square = self.capture_square();
        if board.get(capture_square) != Some((Piece::Pawn, color.opposite())) {
            return Err(BoardError::UnexpectedCaptureResultError);
        }

        let state = MoveState {
            en_passant_target: None,
            castle_rights: board.castle_rights(),
            halfmove_clock: 0,
        };

        board.remove(self.from_square);
        board.remove(capture_square);
        board.put(self.to_square, Piece::Pawn, color)?;
        board.end_turn(state);

        Ok(())
    }

    pub fn undo(&self, board: &mut Board) -> Result<(), BoardError> {
        let color = board.turn().opposite();
        let capture_square = self.capture_square();
        if board.get(self.to_square) != Some((Piece::Pawn, color))
            || board.is_occupied(self.from_square)
            || board.is_occupied(capture_square)
        {
            return Err(BoardError::UndoMismatchError);
        }

        board.revert_turn()?;
        board.remove(self.to_square);
        board.put(self.from_square, Piece::Pawn, color)?;
        board.put(capture_square, Piece::Pawn, color.opposite())?;

        Ok(())
    }
}

impl fmt::Display for EnPassantChessMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "en passant {}{} (captures pawn on {})",
            self.from_square,
            self.to_square,
            self.capture_square()
        )
    }
}

impl fmt::Debug for EnPassantChessMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format!("{}", self).fmt(f)
    }
}

#[macro_export]
macro_rules! en_passant_move {
    ($from:expr, $to:expr) => {
        $crate::chess_move::ChessMove::EnPassant($crate::chess_move::EnPassantChessMove::new(
            $from, $to,
        ))
    };
}
