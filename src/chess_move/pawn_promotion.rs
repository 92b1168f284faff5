use core::fmt;

use crate::board::{error::BoardError, piece::Piece, square::Square, Board};

use super::{expect_capture, piece_to_move, successor_state, Capture};

/// Represents a pawn promotion chess move. The board logic is the same as a
/// standard pawn move, except the pawn is replaced with the promotion piece
/// on arrival.
#[derive(PartialEq, Clone, Copy, Eq, PartialOrd, Ord, Hash)]
pub struct PawnPromotionChessMove {
    from_square: Square,
    to_square: Square,
    captures: Option<Capture>,
    promote_to_piece: Piece,
}

impl PawnPromotionChessMove {
    pub fn new(
        from_square: Square,
        to_square: Square,
        captures: Option<Capture>,
        promote_to_piece: Piece,
    ) -> Self {
        Self {
            from_square,
            to_square,
            captures,
            promote_to_piece,
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

    pub fn promote_to_piece(&self) -> Piece {
        self.promote_to_piece
    }

    pub fn apply(&self, board: &mut Board) -> Result<(), BoardError> {
        let PawnPromotionChessMove {
            from_square,
            to_square,
            captures,
            promote_to_piece,
        } = *self;

        let color = board.turn();
        let piece = piece_to_move(board, from_square)?;
        if piece != Piece::Pawn || to_square.rank() != color.promotion_rank() {
            return Err(BoardError::InvalidPromotionContextError);
        }
        if !promote_to_piece.is_promotion_target() {
            return Err(BoardError::InvalidPromotionPieceError);
        }
        expect_capture(board, to_square, captures)?;

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
        board.put(to_square, promote_to_piece, color)?;
        board.end_turn(state);

        Ok(())
    }

    pub fn undo(&self, board: &mut Board) -> Result<(), BoardError> {
        let PawnPromotionChessMove {
            from_square,
            to_square,
            captures,
            promote_to_piece,
        } = *self;

        let color = board.turn().opposite();
        if board.get(to_square) != Some((promote_to_piece, color))
            || board.is_occupied(from_square)
        {
            return Err(BoardError::UndoMismatchError);
        }

        board.revert_turn()?;
        board.remove(to_square);
        board.put(from_square, Piece::Pawn, color)?;
        if let Some(Capture(captured)) = captures {
            board.put(to_square, captured, color.opposite())?;
        }

        Ok(())
    }
}

impl fmt::Display for PawnPromotionChessMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let captures_msg = match self.captures {
            Some(capture) => format!(" (captures {})", capture),
            None => "".to_string(),
        };

        write!(
            f,
            "promote {}{} to {}{}",
            self.from_square, self.to_square, self.promote_to_piece, captures_msg,
        )
    }
}

impl fmt::Debug for PawnPromotionChessMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format!("{}", self).fmt(f)
    }
}

#[macro_export]
macro_rules! promotion {
    ($from:expr, $to:expr, $capture:expr, $piece:expr) => {
        $crate::chess_move::ChessMove::PawnPromotion(
            $crate::chess_move::PawnPromotionChessMove::new($from, $to, $capture, $piece),
        )
    };
}
