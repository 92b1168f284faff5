//! Chess move values and the move applier.
//!
//! Every move variant applies itself to a `Board` in place and can be undone
//! exactly. Applying pushes a `MoveState` (en passant target, castling rights,
//! half-move clock) onto the board and passes the turn; undoing pops it again.

pub mod capture;
pub mod castle;
pub mod chess_move;
pub mod en_passant;
pub mod pawn_promotion;
pub mod standard;

pub use capture::Capture;
pub use castle::CastleChessMove;
pub use chess_move::{ChessMove, MoveKind};
pub use en_passant::EnPassantChessMove;
pub use pawn_promotion::PawnPromotionChessMove;
pub use standard::StandardChessMove;

use crate::board::{
    castle_rights::CastleRights, color::Color, error::BoardError, piece::Piece, square::Square,
    Board, MoveState,
};

/// Returns the piece on `from`, provided it belongs to the side to move.
fn piece_to_move(board: &Board, from_square: Square) -> Result<Piece, BoardError> {
    match board.get(from_square) {
        Some((piece, color)) if color == board.turn() => Ok(piece),
        _ => Err(BoardError::FromSquareIsEmptyMoveApplicationError),
    }
}

/// Checks that the target square holds exactly what the move expects to
/// capture: nothing, or an enemy piece of the recorded kind.
fn expect_capture(
    board: &Board,
    to_square: Square,
    captures: Option<Capture>,
) -> Result<(), BoardError> {
    let expected = captures.map(|Capture(piece)| (piece, board.turn().opposite()));
    if board.get(to_square) != expected {
        return Err(BoardError::UnexpectedCaptureResultError);
    }
    Ok(())
}

/// The irreversible state after `piece` of `color` moves from `from_square`
/// to `to_square`. Castling is handled by `CastleChessMove` itself.
fn successor_state(
    board: &Board,
    piece: Piece,
    color: Color,
    from_square: Square,
    to_square: Square,
    is_capture: bool,
) -> MoveState {
    let current = board.move_state();

    let en_passant_target = match piece {
        Piece::Pawn if (to_square.rank() as i8 - from_square.rank() as i8).abs() == 2 => {
            from_square.offset(0, color.pawn_direction())
        }
        _ => None,
    };

    let castle_rights = current.castle_rights.without(
        CastleRights::lost_by_touching(from_square) | CastleRights::lost_by_touching(to_square),
    );

    let halfmove_clock = if piece == Piece::Pawn || is_capture {
        0
    } else {
        current.halfmove_clock + 1
    };

    MoveState {
        en_passant_target,
        castle_rights,
        halfmove_clock,
    }
}
