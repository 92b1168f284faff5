//! FEN serialization - converts Board to FEN string.

use crate::board::{color::Color, square::Square, Board};

/// Converts a Board to FEN (Forsyth–Edwards Notation) string.
pub fn to_fen(board: &Board) -> String {
    let mut fen = String::new();

    // 1. Piece placement
    for rank in (0..8u8).rev() {
        let mut empty_count = 0;
        for square in (0..8u8).filter_map(|file| Square::new(file, rank).ok()) {
            if let Some((piece, color)) = board.get(square) {
                if empty_count > 0 {
                    fen.push_str(&empty_count.to_string());
                    empty_count = 0;
                }
                fen.push(piece.to_fen(color));
            } else {
                empty_count += 1;
            }
        }
        if empty_count > 0 {
            fen.push_str(&empty_count.to_string());
        }
        if rank > 0 {
            fen.push('/');
        }
    }

    // 2. Active color
    fen.push(' ');
    fen.push(match board.turn() {
        Color::White => 'w',
        Color::Black => 'b',
    });

    // 3. Castling rights
    fen.push(' ');
    fen.push_str(&board.castle_rights().to_string());

    // 4. En passant target square
    fen.push(' ');
    match board.en_passant_target() {
        Some(ep_square) => fen.push_str(&ep_square.to_algebraic()),
        None => fen.push('-'),
    }

    // 5. Halfmove clock
    fen.push(' ');
    fen.push_str(&board.halfmove_clock().to_string());

    // 6. Fullmove number
    fen.push(' ');
    fen.push_str(&board.fullmove_number().to_string());

    fen
}
