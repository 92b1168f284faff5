//! Chess-specific move ordering for improved alpha-beta pruning.

use std::cmp::Reverse;

use crate::alpha_beta_searcher::MoveOrderer;
use crate::board::piece::Piece;
use crate::board::Board;
use crate::chess_move::{Capture, ChessMove};
use crate::evaluate::material_value;

const CAPTURE_PRIORITY: i32 = 20_000;
const PROMOTION_PRIORITY: i32 = 10_000;
const CASTLE_PRIORITY: i32 = 50;

/// Chess move orderer. Captures come first, most valuable victim before
/// least valuable attacker (MVV-LVA), then promotions, castling, and the
/// remaining piece moves by type (rook, knight, bishop, pawn, other).
#[derive(Clone, Default, Debug)]
pub struct ChessMoveOrderer;

impl MoveOrderer<Board, ChessMove> for ChessMoveOrderer {
    #[inline]
    fn order_moves(&self, moves: &mut [ChessMove], state: &Board) {
        // Stable, so equally ranked moves keep the generator's order.
        moves.sort_by_key(|chess_move| Reverse(move_priority(chess_move, state)));
    }
}

fn move_priority(chess_move: &ChessMove, board: &Board) -> i32 {
    let promotion = chess_move
        .promotion()
        .map_or(0, |piece| material_value(piece) as i32);

    match (chess_move.captures(), chess_move) {
        (Some(Capture(victim)), _) => {
            let attacker = moving_piece(chess_move, board);
            CAPTURE_PRIORITY + 10 * material_value(victim) as i32 - attacker_rank(attacker)
                + promotion
        }
        (None, ChessMove::PawnPromotion(_)) => PROMOTION_PRIORITY + promotion,
        (None, ChessMove::Castle(_)) => CASTLE_PRIORITY,
        (None, _) => quiet_priority(moving_piece(chess_move, board)),
    }
}

fn moving_piece(chess_move: &ChessMove, board: &Board) -> Option<Piece> {
    match chess_move {
        ChessMove::Standard(m) => board.get(m.from_square()).map(|(piece, _)| piece),
        ChessMove::PawnPromotion(_) => Some(Piece::Pawn),
        ChessMove::EnPassant(_) => Some(Piece::Pawn),
        ChessMove::Castle(_) => Some(Piece::King),
    }
}

/// Cheaper attackers rank lower; the king counts as the most expensive.
fn attacker_rank(piece: Option<Piece>) -> i32 {
    match piece {
        Some(Piece::Pawn) => 1,
        Some(Piece::Knight) => 2,
        Some(Piece::Bishop) => 3,
        Some(Piece::Rook) => 4,
        Some(Piece::Queen) => 5,
        _ => 6,
    }
}

fn quiet_priority(piece: Option<Piece>) -> i32 {
    match piece {
        Some(Piece::Rook) => 4,
        Some(Piece::Knight) => 3,
        Some(Piece::Bishop) => 2,
        Some(Piece::Pawn) => 1,
        _ => 0,
    }
}
