//! Target squares for each piece kind, and the attacked-square test built on
//! the same offset tables.

use smallvec::SmallVec;

use crate::board::color::Color;
use crate::board::piece::Piece;
use crate::board::square::Square;
use crate::board::Board;

/// (file delta, rank delta)
pub type Direction = (i8, i8);

pub const KNIGHT_OFFSETS: [Direction; 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

pub const KING_OFFSETS: [Direction; 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

pub const ROOK_DIRS: [Direction; 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

pub const BISHOP_DIRS: [Direction; 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];

/// A queen slides along every rook and bishop ray.
pub const QUEEN_DIRS: [Direction; 8] = KING_OFFSETS;

/// Enough for a queen in the centre of an open board.
pub type TargetList = SmallVec<[Square; 28]>;

/// Squares reachable by a single step along each offset, excluding squares
/// held by `color`'s own pieces.
pub fn step_targets(board: &Board, from: Square, color: Color, offsets: &[Direction]) -> TargetList {
    offsets
        .iter()
        .filter_map(|&(df, dr)| from.offset(df, dr))
        .filter(|&to| !matches!(board.get(to), Some((_, c)) if c == color))
        .collect()
}

/// Squares reachable by sliding along each direction. A ray stops before an
/// own piece and on (including) an enemy piece.
pub fn ray_targets(board: &Board, from: Square, color: Color, directions: &[Direction]) -> TargetList {
    let mut targets = TargetList::new();
    for &(df, dr) in directions {
        let mut current = from;
        while let Some(next) = current.offset(df, dr) {
            match board.get(next) {
                None => targets.push(next),
                Some((_, c)) if c != color => {
                    targets.push(next);
                    break;
                }
                Some(_) => break,
            }
            current = next;
        }
    }
    targets
}

/// First occupied square along a ray, if any.
fn first_piece_along(board: &Board, from: Square, (df, dr): Direction) -> Option<(Piece, Color)> {
    let mut current = from;
    while let Some(next) = current.offset(df, dr) {
        if let Some(occupant) = board.get(next) {
            return Some(occupant);
        }
        current = next;
    }
    None
}

/// Returns true if any piece of color `by` could capture on `square`. This
/// runs each piece pattern in reverse from the target square rather than
/// generating every attacker's moves.
pub fn is_square_attacked(board: &Board, square: Square, by: Color) -> bool {
    // A pawn of `by` attacks diagonally forward, so look one rank behind.
    let pawn_rank = -by.pawn_direction();
    for df in [-1, 1] {
        if let Some(from) = square.offset(df, pawn_rank) {
            if board.get(from) == Some((Piece::Pawn, by)) {
                return true;
            }
        }
    }

    let steps = [(Piece::Knight, &KNIGHT_OFFSETS), (Piece::King, &KING_OFFSETS)];
    for (piece, offsets) in steps.iter() {
        let attacked = offsets
            .iter()
            .filter_map(|&(df, dr)| square.offset(df, dr))
            .any(|from| board.get(from) == Some((*piece, by)));
        if attacked {
            return true;
        }
    }

    let rays = [(Piece::Rook, &ROOK_DIRS), (Piece::Bishop, &BISHOP_DIRS)];
    for (slider, directions) in rays.iter() {
        for &direction in directions.iter() {
            match first_piece_along(board, square, direction) {
                Some((piece, color))
                    if color == by && (piece == *slider || piece == Piece::Queen) =>
                {
                    return true
                }
                _ => {}
            }
        }
    }

    false
}
