use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::Board;

// Fixed seed so keys are stable across runs.
const ZOBRIST_SEED: u64 = 0x5eed_c0de_cafe_f00d;

struct ZobristTables {
    pieces: [[[u64; 64]; 6]; 2],
    castle_rights: [u64; 16],
    en_passant_file: [u64; 8],
    black_to_move: u64,
}

static TABLES: Lazy<ZobristTables> = Lazy::new(|| {
    let mut rng = StdRng::seed_from_u64(ZOBRIST_SEED);
    let mut pieces = [[[0u64; 64]; 6]; 2];
    for color in pieces.iter_mut() {
        for piece in color.iter_mut() {
            for square in piece.iter_mut() {
                *square = rng.gen();
            }
        }
    }
    let mut castle_rights = [0u64; 16];
    for rights in castle_rights.iter_mut() {
        *rights = rng.gen();
    }
    let mut en_passant_file = [0u64; 8];
    for file in en_passant_file.iter_mut() {
        *file = rng.gen();
    }
    ZobristTables {
        pieces,
        castle_rights,
        en_passant_file,
        black_to_move: rng.gen(),
    }
});

pub(super) fn hash(board: &Board) -> u64 {
    let tables = &*TABLES;
    let mut key = 0;
    for (index, square) in board.squares.iter().enumerate() {
        if let Some((piece, color)) = square {
            key ^= tables.pieces[*color as usize][*piece as usize][index];
        }
    }
    key ^= tables.castle_rights[board.castle_rights().bits() as usize];
    if let Some(target) = board.en_passant_target() {
        key ^= tables.en_passant_file[target.file() as usize];
    }
    if board.turn() == super::color::Color::Black {
        key ^= tables.black_to_move;
    }
    key
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::color::Color;
    use crate::board::square::*;

    #[test]
    fn test_hash_depends_on_side_to_move() {
        let mut board = Board::starting_position();
        let white_hash = board.position_hash();
        board.set_turn(Color::Black);
        assert_ne!(white_hash, board.position_hash());
    }

    #[test]
    fn test_hash_is_stable_for_equal_positions() {
        assert_eq!(
            Board::starting_position().position_hash(),
            Board::starting_position().position_hash()
        );
    }

    #[test]
    fn test_hash_depends_on_placement() {
        let board = Board::starting_position();
        let mut moved = board.clone();
        let knight = moved.remove(G1).unwrap();
        moved.put(F3, knight.0, knight.1).unwrap();
        assert_ne!(board.position_hash(), moved.position_hash());
    }
}
