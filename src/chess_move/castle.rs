use core::fmt;

use crate::board::{
    castle_rights::CastleRights, color::Color, error::BoardError, piece::Piece, square::*, Board,
    MoveState,
};

/// Represents a castle move in chess. This struct encapsulates the logic for applying
/// and undoing a castle move on a chess board.
/// The intended entry points for this struct are the `castle_kingside` and `castle_queenside`.
/// As such, the struct is not intended to be constructed directly.
#[derive(PartialEq, Clone, Copy, Eq, PartialOrd, Ord, Hash)]
pub struct CastleChessMove {
    /// The square the king is moving from
    from_square: Square,

    /// The square the king is moving to
    to_square: Square,
}

impl CastleChessMove {
    fn new(from_square: Square, to_square: Square) -> Self {
        Self {
            from_square,
            to_square,
        }
    }

    pub fn castle_kingside(color: Color) -> Self {
        match color {
            Color::White => Self::new(E1, G1),
            Color::Black => Self::new(E8, G8),
        }
    }

    pub fn castle_queenside(color: Color) -> Self {
        match color {
            Color::White => Self::new(E1, C1),
            Color::Black => Self::new(E8, C8),
        }
    }

    pub fn to_square(&self) -> Square {
        self.to_square
    }

    pub fn from_square(&self) -> Square {
        self.from_square
    }

    pub fn color(&self) -> Color {
        if self.from_square.rank() == Color::White.back_rank() {
            Color::White
        } else {
            Color::Black
        }
    }

    pub fn is_kingside(&self) -> bool {
        self.to_square.file() > self.from_square.file()
    }

    /// The rook's (from, to) squares for this castle.
    pub fn rook_squares(&self) -> (Square, Square) {
        match (self.color(), self.is_kingside()) {
            (Color::White, true) => (H1, F1),
            (Color::White, false) => (A1, D1),
            (Color::Black, true) => (H8, F8),
            (Color::Black, false) => (A8, D8),
        }
    }

    /// The castling right this move consumes.
    pub fn required_right(&self) -> CastleRights {
        if self.is_kingside() {
            CastleRights::kingside(self.color())
        } else {
            CastleRights::queenside(self.color())
        }
    }

    /// Squares between king and rook, all of which must be empty.
    pub fn path_squares(&self) -> &'static [Square] {
        match (self.color(), self.is_kingside()) {
            (Color::White, true) => &[F1, G1],
            (Color::White, false) => &[D1, C1, B1],
            (Color::Black, true) => &[F8, G8],
            (Color::Black, false) => &[D8, C8, B8],
        }
    }

    /// The square the king passes over, which may not be attacked.
    pub fn transit_square(&self) -> Square {
        self.rook_squares().1
    }

    pub fn apply(&self, board: &mut Board) -> Result<(), BoardError> {
        let color = self.color();
        let (rook_from, rook_to) = self.rook_squares();

        if board.turn() != color {
            return Err(BoardError::InvalidCastleStateError {
                msg: "castling side is not the side to move",
            });
        }

        if board.get(self.from_square) != Some((Piece::King, color)) {
            return Err(BoardError::InvalidCastleStateError {
                msg: "king_from is not a king",
            });
        }

        if board.get(rook_from) != Some((Piece::Rook, color)) {
            return Err(BoardError::InvalidCastleStateError {
                msg: "rook_from is not a rook",
            });
        }

        if self.path_squares().iter().any(|&sq| board.is_occupied(sq)) {
            return Err(BoardError::InvalidCastleStateError {
                msg: "path between king and rook is not empty",
            });
        }

        if !board.castle_rights().contains(self.required_right()) {
            return Err(BoardError::InvalidCastleStateError {
                msg: "castle right has been lost",
            });
        }

        let state = MoveState {
            en_passant_target: None,
            castle_rights: board.castle_rights().without(CastleRights::for_color(color)),
            halfmove_clock: board.halfmove_clock() + 1,
        };

        board.remove(self.from_square);
        board.remove(rook_from);
        board.put(self.to_square, Piece::King, color)?;
        board.put(rook_to, Piece::Rook, color)?;
        board.end_turn(state);

        Ok(())
    }

    pub fn undo(&self, board: &mut Board) -> Result<(), BoardError> {
        let color = self.color();
        let (rook_from, rook_to) = self.rook_squares();

        if board.get(self.to_square) != Some((Piece::King, color)) {
            return Err(BoardError::InvalidCastleStateError {
                msg: "king_to is not a king",
            });
        }

        if board.get(rook_to) != Some((Piece::Rook, color)) {
            return Err(BoardError::InvalidCastleStateError {
                msg: "rook_to is not a rook",
            });
        }

        if board.is_occupied(self.from_square) || board.is_occupied(rook_from) {
            return Err(BoardError::InvalidCastleStateError {
                msg: "king_from or rook_from is not empty",
            });
        }

        board.revert_turn()?;
        board.remove(self.to_square);
        board.remove(rook_to);
        board.put(self.from_square, Piece::King, color)?;
        board.put(rook_from, Piece::Rook, color)?;

        Ok(())
    }
}

impl fmt::Display for CastleChessMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = if self.is_kingside() {
            "kingside"
        } else {
            "queenside"
        };
        write!(
            f,
            "castle {} {}{}",
            side, self.from_square, self.to_square
        )
    }
}

impl fmt::Debug for CastleChessMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format!("{}", self).fmt(f)
    }
}

#[macro_export]
macro_rules! castle_kingside {
    ($color:expr) => {
        $crate::chess_move::ChessMove::Castle(
            $crate::chess_move::CastleChessMove::castle_kingside($color),
        )
    };
}

#[macro_export]
macro_rules! castle_queenside {
    ($color:expr) => {
        $crate::chess_move::ChessMove::Castle(
            $crate::chess_move::CastleChessMove::castle_queenside($color),
        )
    };
}
