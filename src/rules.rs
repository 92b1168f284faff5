//! The rules as seen from outside the engine: legal moves, check status, and
//! validated move application.
//!
//! Everything here works on the side to move. Unlike the raw
//! `ChessMove::apply`, `apply` only accepts moves from `legal_moves`.

use crate::board::{color::Color, error::BoardError, piece::Piece, square::Square, Board};
use crate::chess_move::{CastleChessMove, ChessMove};
use crate::move_generator::{ChessMoveList, MoveGenerator, PositionStatus};

/// All legal moves for the side to move. Fails if the position is corrupt.
pub fn legal_moves(board: &mut Board) -> Result<ChessMoveList, BoardError> {
    board.validate()?;
    Ok(MoveGenerator::new().generate_moves(board))
}

pub fn is_check(board: &Board) -> bool {
    MoveGenerator::new().is_in_check(board, board.turn())
}

/// Fails like `status` when the position is corrupt.
pub fn is_checkmate(board: &mut Board) -> Result<bool, BoardError> {
    Ok(status(board)? == PositionStatus::Checkmate)
}

pub fn is_stalemate(board: &mut Board) -> Result<bool, BoardError> {
    Ok(status(board)? == PositionStatus::Stalemate)
}

pub fn status(board: &mut Board) -> Result<PositionStatus, BoardError> {
    board.validate()?;
    Ok(MoveGenerator::new().status(board))
}

/// Applies `chess_move` in place, provided it is one of the legal moves.
pub fn apply(board: &mut Board, chess_move: &ChessMove) -> Result<(), BoardError> {
    if !legal_moves(board)?.contains(chess_move) {
        return Err(BoardError::IllegalMoveError {
            chess_move: chess_move.to_uci(),
        });
    }
    chess_move.apply(board)
}

/// Returns the successor position, leaving `board` untouched.
pub fn successor(board: &Board, chess_move: &ChessMove) -> Result<Board, BoardError> {
    let mut next = board.clone();
    apply(&mut next, chess_move)?;
    Ok(next)
}

/// Reverts `chess_move`, which must be the last move applied to `board`.
pub fn undo(board: &mut Board, chess_move: &ChessMove) -> Result<(), BoardError> {
    chess_move.undo(board)
}

/// Finds the legal move matching a from/to pair typed by a player.
///
/// A move onto the last rank needs a promotion piece, and a promotion piece
/// is only accepted for such a move.
pub fn resolve_move(
    board: &mut Board,
    from: Square,
    to: Square,
    promotion: Option<Piece>,
) -> Result<ChessMove, BoardError> {
    let candidates: Vec<ChessMove> = legal_moves(board)?
        .into_iter()
        .filter(|m| m.from_square() == from && m.to_square() == to)
        .collect();

    let illegal = || BoardError::IllegalMoveError {
        chess_move: format!("{}{}", from, to),
    };

    let first = *candidates.first().ok_or_else(illegal)?;
    let is_promotion = first.promotion().is_some();

    match (is_promotion, promotion) {
        (true, None) => Err(BoardError::MissingPromotionChoiceError),
        (true, Some(piece)) if !piece.is_promotion_target() => {
            Err(BoardError::InvalidPromotionPieceError)
        }
        (true, Some(piece)) => candidates
            .into_iter()
            .find(|m| m.promotion() == Some(piece))
            .ok_or_else(illegal),
        (false, Some(_)) => Err(BoardError::InvalidPromotionContextError),
        (false, None) => Ok(first),
    }
}

/// Finds the legal castle for the side to move.
pub fn resolve_castle(board: &mut Board, kingside: bool) -> Result<ChessMove, BoardError> {
    let color: Color = board.turn();
    let castle = ChessMove::Castle(if kingside {
        CastleChessMove::castle_kingside(color)
    } else {
        CastleChessMove::castle_queenside(color)
    });
    if legal_moves(board)?.contains(&castle) {
        Ok(castle)
    } else {
        Err(BoardError::IllegalMoveError {
            chess_move: castle.to_uci(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::square::*;
    use crate::input_handler::parse_fen;
    use crate::{castle_kingside, chess_position, std_move};

    fn play(board: &mut Board, moves: &[(Square, Square)]) {
        for &(from, to) in moves {
            let chess_move = resolve_move(board, from, to, None).unwrap();
            apply(board, &chess_move).unwrap();
        }
    }

    #[test]
    fn test_fools_mate() {
        let mut board = Board::starting_position();
        play(&mut board, &[(F2, F3), (E7, E5), (G2, G4), (D8, H4)]);

        assert!(is_check(&board));
        assert_eq!(Ok(true), is_checkmate(&mut board));
        assert_eq!(Ok(false), is_stalemate(&mut board));
        assert!(legal_moves(&mut board).unwrap().is_empty());
    }

    #[test]
    fn test_stalemate() {
        let mut board = parse_fen("7k/8/5KQ1/8/8/8/8/8 b - - 0 1").unwrap();
        assert!(!is_check(&board));
        assert_eq!(Ok(true), is_stalemate(&mut board));
        assert_eq!(Ok(false), is_checkmate(&mut board));
        assert!(legal_moves(&mut board).unwrap().is_empty());
    }

    #[test]
    fn test_status_queries_reject_kingless_board() {
        let mut board = Board::starting_position();
        board.remove(E8);
        let corrupt = Err(BoardError::CorruptPositionError {
            color: Color::Black,
            king_count: 0,
        });
        assert_eq!(corrupt, is_checkmate(&mut board));
        assert_eq!(corrupt, is_stalemate(&mut board));
    }

    #[test]
    fn test_apply_rejects_illegal_move() {
        let mut board = Board::starting_position();
        let original = board.clone();
        assert_eq!(
            Err(BoardError::IllegalMoveError {
                chess_move: "e2e5".to_string()
            }),
            apply(&mut board, &std_move!(E2, E5))
        );
        assert_eq!(original, board);
    }

    #[test]
    fn test_apply_rejects_move_into_check() {
        let mut board = chess_position! {
            ....k...
            ....r...
            ........
            ........
            ........
            ........
            ....N...
            ....K...
        };
        assert!(matches!(
            apply(&mut board, &std_move!(E2, C3)),
            Err(BoardError::IllegalMoveError { .. })
        ));
    }

    #[test]
    fn test_successor_leaves_original_untouched() {
        let board = Board::starting_position();
        let next = successor(&board, &std_move!(E2, E4)).unwrap();
        assert_eq!(Board::starting_position(), board);
        assert_eq!(Color::Black, next.turn());
        assert_eq!(Some(E3), next.en_passant_target());
    }

    #[test]
    fn test_resolve_promotion_requires_choice() {
        let mut board = parse_fen("4k3/1P6/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(
            Err(BoardError::MissingPromotionChoiceError),
            resolve_move(&mut board, B7, B8, None)
        );
        assert_eq!(
            Err(BoardError::InvalidPromotionPieceError),
            resolve_move(&mut board, B7, B8, Some(Piece::King))
        );
        let chess_move = resolve_move(&mut board, B7, B8, Some(Piece::Knight)).unwrap();
        assert_eq!(Some(Piece::Knight), chess_move.promotion());
    }

    #[test]
    fn test_resolve_rejects_promotion_on_normal_move() {
        let mut board = Board::starting_position();
        assert_eq!(
            Err(BoardError::InvalidPromotionContextError),
            resolve_move(&mut board, E2, E4, Some(Piece::Queen))
        );
    }

    #[test]
    fn test_resolve_castle() {
        let mut board = parse_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        assert_eq!(
            Ok(castle_kingside!(Color::White)),
            resolve_castle(&mut board, true)
        );

        let mut board = parse_fen("r3k2r/8/8/8/8/8/8/R3K2R w - - 0 1").unwrap();
        assert!(matches!(
            resolve_castle(&mut board, false),
            Err(BoardError::IllegalMoveError { .. })
        ));
    }

    #[test]
    fn test_corrupt_position_fails_fast() {
        let mut board = Board::starting_position();
        board.remove(E1);
        assert_eq!(
            Err(BoardError::CorruptPositionError {
                color: Color::White,
                king_count: 0
            }),
            legal_moves(&mut board).map(|moves| moves.len())
        );
    }

    #[test]
    fn test_apply_undo_round_trip_for_every_legal_move() {
        let fens = [
            crate::input_handler::STARTING_POSITION_FEN,
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
            "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
            "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
            "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3",
        ];
        for fen in fens.iter() {
            let mut board = parse_fen(fen).unwrap();
            let original = board.clone();
            let original_fen = crate::input_handler::to_fen(&board);
            for chess_move in legal_moves(&mut board).unwrap() {
                apply(&mut board, &chess_move).unwrap();
                assert_ne!(original, board, "{} changed nothing", chess_move);
                undo(&mut board, &chess_move).unwrap();
                assert_eq!(original, board, "{} did not undo cleanly", chess_move);
                assert_eq!(original_fen, crate::input_handler::to_fen(&board));
                assert_eq!(original.position_hash(), board.position_hash());
            }
        }
    }
}
