use thiserror::Error;

use super::color::Color;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("Square is off the board: file {file}, rank {rank}")]
    SquareOutOfRangeError { file: u8, rank: u8 },
    #[error("Not an algebraic square: {input:?}")]
    InvalidAlgebraicSquareError { input: String },
    #[error("Cannot put a piece on a square that is already occupied")]
    SquareOccupiedBoardPutError,
    #[error("Position must have exactly one {color} king, found {king_count}")]
    CorruptPositionError { color: Color, king_count: usize },
    #[error("The side not to move ({color}) is in check")]
    OpponentInCheckError { color: Color },
    #[error("Move {chess_move} is not legal in this position")]
    IllegalMoveError { chess_move: String },
    #[error("This move is for a pawn on the final rank, it must be a promotion move")]
    MissingPromotionChoiceError,
    #[error("A promotion piece was given for a move that does not promote a pawn")]
    InvalidPromotionContextError,
    #[error("Pawns can only promote to a knight, bishop, rook, or queen")]
    InvalidPromotionPieceError,
    #[error("Cannot apply chess move, the `from` square is empty or holds the wrong side's piece")]
    FromSquareIsEmptyMoveApplicationError,
    #[error("Cannot apply chess move, the expected capture result is different than what is on the target square")]
    UnexpectedCaptureResultError,
    #[error("Invalid castle state: {msg}")]
    InvalidCastleStateError { msg: &'static str },
    #[error("En passant move does not target the position's en passant square")]
    EnPassantTargetMismatchError,
    #[error("Cannot undo chess move, the board does not hold the result of that move")]
    UndoMismatchError,
    #[error("There is no move to undo")]
    NoMoveToUndoError,
}
