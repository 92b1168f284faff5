//! Static evaluation: material plus piece-square bonuses.

use crate::board::color::Color;
use crate::board::piece::Piece;
use crate::board::square::Square;
use crate::board::Board;
use crate::move_generator::{MoveGenerator, PositionStatus};

use self::evaluation_tables::BONUS_TABLES;

mod evaluation_tables;

pub use self::evaluation_tables::{material_value, MATERIAL_VALUES};

/// Score of the side to move when it has been checkmated at ply 0. Mates
/// found deeper in the tree score slightly closer to zero, so the engine
/// prefers the fastest mate and the slowest loss.
pub const CHECKMATE_SCORE: i16 = 30_000;

pub const DRAW_SCORE: i16 = 0;

/// Scores above this magnitude are mate scores.
pub const MATE_THRESHOLD: i16 = CHECKMATE_SCORE - 1_000;

/// Returns the score of the board from the perspective of the side to move.
///
/// Terminal positions are scored from the legality filter: checkmate is a
/// loss adjusted by `ply` (the distance from the search root), stalemate is
/// a draw. Everything else falls through to the static evaluation.
pub fn score(board: &mut Board, move_generator: &MoveGenerator, ply: u8) -> i16 {
    match move_generator.status(board) {
        PositionStatus::Checkmate => -(CHECKMATE_SCORE - ply as i16),
        PositionStatus::Stalemate => DRAW_SCORE,
        PositionStatus::Check | PositionStatus::InPlay => side_to_move_score(board),
    }
}

/// Static evaluation relative to the side to move.
pub fn side_to_move_score(board: &Board) -> i16 {
    match board.turn() {
        Color::White => board_material_score(board),
        Color::Black => -board_material_score(board),
    }
}

/// Static evaluation, positive favoring white.
pub fn board_material_score(board: &Board) -> i16 {
    let white_material = player_material_score(board, Color::White);
    let black_material = player_material_score(board, Color::Black);
    white_material - black_material
}

/// Returns the material score of the board for the given player. The bonus tables
/// incentivize the placement of pieces on specific parts of the board (e.g.
/// knights towards the center, bishops on long diagonals, etc.).
fn player_material_score(board: &Board, color: Color) -> i16 {
    let is_endgame = is_endgame(board) as usize;

    board
        .pieces(color)
        .map(|(square, piece)| {
            let bonus_table = BONUS_TABLES[piece as usize][is_endgame];
            material_value(piece) + bonus_table[bonus_index(square, color)]
        })
        .sum()
}

/// The tables are written from white's side with a8 first, so white reads
/// them rank-flipped and black reads them as they are.
fn bonus_index(square: Square, color: Color) -> usize {
    let square = match color {
        Color::White => square.flip_rank(),
        Color::Black => square,
    };
    square.index()
}

/// Endgame conditions:
/// 1. Both sides have no queens or
/// 2. Every side which has a queen has additionally no other pieces or one minorpiece maximum.
pub fn is_endgame(board: &Board) -> bool {
    Color::ALL.iter().all(|&color| {
        let queens = board.count(Piece::Queen, color);
        let others = board
            .pieces(color)
            .filter(|&(_, piece)| piece != Piece::King && piece != Piece::Pawn)
            .count()
            - queens;
        let minors = board.count(Piece::Knight, color) + board.count(Piece::Bishop, color);
        queens == 0 || (others == minors && minors <= 1)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::square::*;
    use crate::chess_position;
    use crate::input_handler::parse_fen;

    /// Swaps colors and flips ranks, so the mirrored side stands exactly
    /// where the original side stood.
    fn mirror(board: &Board) -> Board {
        let mut mirrored = Board::new();
        for square in Square::all() {
            if let Some((piece, color)) = board.get(square) {
                mirrored
                    .put(square.flip_rank(), piece, color.opposite())
                    .unwrap();
            }
        }
        mirrored.set_turn(board.turn().opposite());
        mirrored
    }

    #[test]
    fn test_starting_position_is_balanced() {
        let board = Board::starting_position();
        assert_eq!(0, board_material_score(&board));
        assert_eq!(
            player_material_score(&board, Color::White),
            player_material_score(&board, Color::Black)
        );
    }

    #[test]
    fn test_material_advantage_favors_white() {
        let mut board = Board::starting_position();
        board.remove(D8);
        assert!(board_material_score(&board) > 800);

        board.set_turn(Color::Black);
        assert!(side_to_move_score(&board) < -800);
    }

    #[test]
    fn test_evaluation_is_side_symmetric() {
        let fens = [
            "r1bqk2r/ppp2ppp/2n2n2/2bpp3/4P3/2PP1N2/PP1N1PPP/R1BQKB1R b KQkq - 0 6",
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
            "4k3/8/8/8/8/8/4P3/4K3 w - - 0 1",
        ];
        for fen in fens.iter() {
            let board = parse_fen(fen).unwrap();
            let mirrored = mirror(&board);
            assert_eq!(
                board_material_score(&board),
                -board_material_score(&mirrored),
                "{}",
                fen
            );
            assert_eq!(side_to_move_score(&board), side_to_move_score(&mirrored));
        }
    }

    #[test]
    fn test_pawn_bonus_near_promotion() {
        let advanced = chess_position! {
            ....k...
            P.......
            ........
            ........
            ........
            ........
            ........
            ....K...
        };
        let home = chess_position! {
            ....k...
            ........
            ........
            ........
            ........
            ........
            P.......
            ....K...
        };
        assert!(board_material_score(&advanced) > board_material_score(&home));
    }

    #[test]
    fn test_is_endgame_one_minor_piece() {
        let mut board = chess_position! {
            .......k
            .......b
            ........
            ...q....
            ........
            ........
            ........
            K.......
        };
        assert!(is_endgame(&board));

        board.put(A8, Piece::Rook, Color::Black).unwrap();
        assert!(!is_endgame(&board));

        board.remove(D5);
        assert!(is_endgame(&board));
    }

    #[test]
    fn test_starting_position_is_not_endgame() {
        let board = Board::starting_position();
        assert!(!is_endgame(&board));
    }

    #[test]
    fn test_score_checkmate_prefers_shorter_mates() {
        let mut board = chess_position! {
            .......k
            ......Q.
            .....K..
            ........
            ........
            ........
            ........
            ........
        };
        board.set_turn(Color::Black);
        let generator = MoveGenerator::new();
        let mated_at_root = score(&mut board, &generator, 0);
        let mated_deeper = score(&mut board, &generator, 3);
        assert_eq!(-CHECKMATE_SCORE, mated_at_root);
        assert!(mated_at_root < mated_deeper);
        assert!(mated_deeper < -MATE_THRESHOLD);
    }

    #[test]
    fn test_score_stalemate_is_draw() {
        let mut board = parse_fen("7k/8/5KQ1/8/8/8/8/8 b - - 0 1").unwrap();
        assert_eq!(DRAW_SCORE, score(&mut board, &MoveGenerator::new(), 2));
    }
}
