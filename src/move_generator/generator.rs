//! Move generation and the legality filter.
//!
//! Generation runs in two stages. Each piece kind has its own pseudo-legal
//! generator, selected by the piece tag, which knows how the piece moves but
//! not whether the move exposes its own king. `generate_moves` then applies
//! every candidate to the board, keeps it only if the mover's king is not
//! attacked afterwards, and undoes it again.
//!
//! Perft splits the root move list across rayon workers when it is large
//! enough to pay for the board clones; every worker owns its own `Board`.

use log::trace;
use rayon::prelude::*;
use smallvec::SmallVec;

use crate::board::{
    color::Color,
    piece::{Piece, PROMOTION_PIECES},
    square::Square,
    Board,
};
use crate::chess_move::{
    Capture, CastleChessMove, ChessMove, EnPassantChessMove, PawnPromotionChessMove,
    StandardChessMove,
};

use super::targets::{
    is_square_attacked, ray_targets, step_targets, BISHOP_DIRS, KING_OFFSETS, KNIGHT_OFFSETS,
    QUEEN_DIRS, ROOK_DIRS,
};

/// Minimum number of moves required to justify parallelization overhead.
const PARALLEL_MOVE_THRESHOLD: usize = 10;

/// A list of chess moves that is optimized for small sizes.
pub type ChessMoveList = SmallVec<[ChessMove; 64]>;

/// Where the side to move stands, as far as the rules are concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionStatus {
    InPlay,
    Check,
    Checkmate,
    Stalemate,
}

/// Generates pseudo-legal and legal moves for a board.
#[derive(Clone, Copy, Debug, Default)]
pub struct MoveGenerator;

impl MoveGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Pseudo-legal moves of the piece on `square`. Empty if the square is
    /// empty or holds a piece of the side not to move.
    pub fn pseudo_legal_moves_from(&self, board: &Board, square: Square) -> ChessMoveList {
        let mut moves = ChessMoveList::new();
        let color = board.turn();
        if let Some((piece, c)) = board.get(square) {
            if c == color {
                generate_piece_moves(&mut moves, board, square, piece, color);
            }
        }
        moves
    }

    /// Pseudo-legal moves of every piece belonging to the side to move.
    pub fn pseudo_legal_moves(&self, board: &Board) -> ChessMoveList {
        let mut moves = ChessMoveList::new();
        let color = board.turn();
        for (square, piece) in board.pieces(color) {
            generate_piece_moves(&mut moves, board, square, piece, color);
        }
        moves
    }

    /// All strictly legal moves for the side to move. The board is used as
    /// scratch space and is returned unchanged.
    pub fn generate_moves(&self, board: &mut Board) -> ChessMoveList {
        let mut moves = self.pseudo_legal_moves(board);
        moves.retain(|chess_move| is_legal(board, chess_move));
        moves
    }

    /// Like `generate_moves(..).is_empty()`, but stops at the first legal move.
    pub fn has_legal_move(&self, board: &mut Board) -> bool {
        let moves = self.pseudo_legal_moves(board);
        moves.iter().any(|chess_move| is_legal(board, chess_move))
    }

    pub fn is_in_check(&self, board: &Board, color: Color) -> bool {
        match board.king_square(color) {
            Some(king) => is_square_attacked(board, king, color.opposite()),
            None => false,
        }
    }

    pub fn status(&self, board: &mut Board) -> PositionStatus {
        let check = self.is_in_check(board, board.turn());
        match (check, self.has_legal_move(board)) {
            (true, false) => PositionStatus::Checkmate,
            (false, false) => PositionStatus::Stalemate,
            (true, true) => PositionStatus::Check,
            (false, true) => PositionStatus::InPlay,
        }
    }

    /// Number of leaf positions reachable in exactly `depth` plies.
    pub fn perft(&self, depth: u8, board: &mut Board) -> usize {
        if depth == 0 {
            return 1;
        }
        let candidates = self.generate_moves(board);
        if depth == 1 {
            return candidates.len();
        }

        if candidates.len() >= PARALLEL_MOVE_THRESHOLD {
            candidates
                .par_iter()
                .map(|chess_move| {
                    let mut local_board = board.clone();
                    chess_move
                        .apply(&mut local_board)
                        .expect("move application should succeed in perft");
                    self.perft_inner(depth - 1, &mut local_board)
                })
                .sum()
        } else {
            self.perft_inner_moves(depth, board, &candidates)
        }
    }

    /// Per-root-move perft counts, for comparing against other engines.
    pub fn perft_divide(&self, depth: u8, board: &mut Board) -> Vec<(ChessMove, usize)> {
        let candidates = self.generate_moves(board);
        candidates
            .into_iter()
            .map(|chess_move| {
                chess_move
                    .apply(board)
                    .expect("move application should succeed in perft");
                let count = self.perft_inner(depth.saturating_sub(1), board);
                chess_move
                    .undo(board)
                    .expect("move undo should succeed in perft");
                (chess_move, count)
            })
            .collect()
    }

    fn perft_inner(&self, depth: u8, board: &mut Board) -> usize {
        if depth == 0 {
            return 1;
        }
        let candidates = self.generate_moves(board);
        if depth == 1 {
            return candidates.len();
        }
        self.perft_inner_moves(depth, board, &candidates)
    }

    fn perft_inner_moves(&self, depth: u8, board: &mut Board, candidates: &[ChessMove]) -> usize {
        let mut count = 0;
        for chess_move in candidates {
            chess_move
                .apply(board)
                .expect("move application should succeed in perft");
            count += self.perft_inner(depth - 1, board);
            chess_move
                .undo(board)
                .expect("move undo should succeed in perft");
        }
        count
    }
}

/// Applies the candidate, tests the mover's king, and undoes it again.
/// Castling additionally requires the king's start and transit squares to be
/// safe; the landing square is covered by the general test.
fn is_legal(board: &mut Board, chess_move: &ChessMove) -> bool {
    let color = board.turn();
    let opponent = color.opposite();

    if let ChessMove::Castle(castle) = chess_move {
        if is_square_attacked(board, castle.from_square(), opponent)
            || is_square_attacked(board, castle.transit_square(), opponent)
        {
            trace!("rejecting {}: king passes through check", castle);
            return false;
        }
    }

    chess_move
        .apply(board)
        .expect("pseudo-legal move should apply");
    let legal = match board.king_square(color) {
        Some(king) => !is_square_attacked(board, king, opponent),
        None => true,
    };
    chess_move
        .undo(board)
        .expect("pseudo-legal move should undo");

    legal
}

fn generate_piece_moves(
    moves: &mut ChessMoveList,
    board: &Board,
    from: Square,
    piece: Piece,
    color: Color,
) {
    match piece {
        Piece::Pawn => generate_pawn_moves(moves, board, from, color),
        Piece::Knight => {
            let targets = step_targets(board, from, color, &KNIGHT_OFFSETS);
            push_targets(moves, board, from, &targets);
        }
        Piece::Bishop => {
            let targets = ray_targets(board, from, color, &BISHOP_DIRS);
            push_targets(moves, board, from, &targets);
        }
        Piece::Rook => {
            let targets = ray_targets(board, from, color, &ROOK_DIRS);
            push_targets(moves, board, from, &targets);
        }
        Piece::Queen => {
            let targets = ray_targets(board, from, color, &QUEEN_DIRS);
            push_targets(moves, board, from, &targets);
        }
        Piece::King => {
            let targets = step_targets(board, from, color, &KING_OFFSETS);
            push_targets(moves, board, from, &targets);
            generate_castle_moves(moves, board, from, color);
        }
    }
}

/// Turns target squares into standard moves, recording any capture. A king
/// is never captured.
fn push_targets(moves: &mut ChessMoveList, board: &Board, from: Square, targets: &[Square]) {
    for &to in targets {
        let captures = match board.get(to) {
            Some((Piece::King, _)) => continue,
            Some((piece, _)) => Some(Capture(piece)),
            None => None,
        };
        moves.push(ChessMove::Standard(StandardChessMove::new(from, to, captures)));
    }
}

fn generate_pawn_moves(moves: &mut ChessMoveList, board: &Board, from: Square, color: Color) {
    let direction = color.pawn_direction();

    if let Some(single) = from.offset(0, direction) {
        if !board.is_occupied(single) {
            push_pawn_move(moves, from, single, None, color);

            if from.rank() == color.pawn_start_rank() {
                if let Some(double) = from.offset(0, 2 * direction) {
                    if !board.is_occupied(double) {
                        moves.push(ChessMove::Standard(StandardChessMove::new(
                            from, double, None,
                        )));
                    }
                }
            }
        }
    }

    for df in [-1, 1] {
        let target = match from.offset(df, direction) {
            Some(target) => target,
            None => continue,
        };
        match board.get(target) {
            Some((piece, c)) if c != color && piece != Piece::King => {
                push_pawn_move(moves, from, target, Some(Capture(piece)), color)
            }
            None if board.en_passant_target() == Some(target) => {
                let en_passant = EnPassantChessMove::new(from, target);
                if board.get(en_passant.capture_square()) == Some((Piece::Pawn, color.opposite())) {
                    moves.push(ChessMove::EnPassant(en_passant));
                }
            }
            _ => {}
        }
    }
}

/// A pawn move onto the last rank expands into one move per promotion piece.
fn push_pawn_move(
    moves: &mut ChessMoveList,
    from: Square,
    to: Square,
    captures: Option<Capture>,
    color: Color,
) {
    if to.rank() == color.promotion_rank() {
        for &piece in PROMOTION_PIECES.iter() {
            moves.push(ChessMove::PawnPromotion(PawnPromotionChessMove::new(
                from, to, captures, piece,
            )));
        }
    } else {
        moves.push(ChessMove::Standard(StandardChessMove::new(from, to, captures)));
    }
}

/// Castle candidates, bounded by rights and an empty path only. Attacks on
/// the king's path are the legality filter's concern.
fn generate_castle_moves(moves: &mut ChessMoveList, board: &Board, from: Square, color: Color) {
    let rights = board.castle_rights();
    let castles = [
        CastleChessMove::castle_kingside(color),
        CastleChessMove::castle_queenside(color),
    ];
    for castle in castles.iter() {
        if castle.from_square() != from || !rights.contains(castle.required_right()) {
            continue;
        }
        let (rook_from, _) = castle.rook_squares();
        if board.get(rook_from) != Some((Piece::Rook, color)) {
            continue;
        }
        if castle.path_squares().iter().any(|&sq| board.is_occupied(sq)) {
            continue;
        }
        moves.push(ChessMove::Castle(*castle));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::castle_rights::CastleRights;
    use crate::board::square::*;
    use crate::{castle_kingside, castle_queenside, chess_position, en_passant_move, std_move};

    fn sorted(moves: ChessMoveList) -> Vec<ChessMove> {
        let mut moves = moves.to_vec();
        moves.sort();
        moves
    }

    #[test]
    fn test_starting_position_has_twenty_moves() {
        let mut board = Board::starting_position();
        let moves = MoveGenerator::new().generate_moves(&mut board);
        assert_eq!(20, moves.len());
        assert_eq!(Board::starting_position(), board);
    }

    #[test]
    fn test_pawn_pushes_and_captures() {
        let board = chess_position! {
            ....k...
            ........
            ........
            ........
            ........
            .n.p....
            ..P.....
            ....K...
        };
        let moves = MoveGenerator::new().pseudo_legal_moves_from(&board, C2);
        let mut expected = vec![
            std_move!(C2, C3),
            std_move!(C2, C4),
            std_move!(C2, B3, Capture(Piece::Knight)),
            std_move!(C2, D3, Capture(Piece::Pawn)),
        ];
        expected.sort();
        assert_eq!(expected, sorted(moves));
    }

    #[test]
    fn test_blocked_pawn_has_no_double_push() {
        let board = chess_position! {
            ....k...
            ........
            ........
            ........
            ........
            ..n.....
            ..P.....
            ....K...
        };
        let moves = MoveGenerator::new().pseudo_legal_moves_from(&board, C2);
        assert!(moves.is_empty());
    }

    #[test]
    fn test_pseudo_legal_moves_ignore_opponent_pieces() {
        let board = Board::starting_position();
        assert!(MoveGenerator::new()
            .pseudo_legal_moves_from(&board, E7)
            .is_empty());
        assert!(MoveGenerator::new()
            .pseudo_legal_moves_from(&board, E4)
            .is_empty());
    }

    #[test]
    fn test_four_distinct_promotions() {
        let mut board = chess_position! {
            ....k...
            .P......
            ........
            ........
            ........
            ........
            ........
            ....K...
        };
        let moves = MoveGenerator::new().generate_moves(&mut board);
        let promotions: Vec<_> = moves
            .iter()
            .filter(|m| m.from_square() == B7)
            .collect();
        assert_eq!(4, promotions.len());
        let mut pieces: Vec<_> = promotions.iter().filter_map(|m| m.promotion()).collect();
        pieces.sort();
        assert_eq!(
            vec![Piece::Knight, Piece::Bishop, Piece::Rook, Piece::Queen],
            pieces
        );

        for promotion in promotions {
            let mut after = board.clone();
            promotion.apply(&mut after).unwrap();
            assert_eq!(
                Some((promotion.promotion().unwrap(), Color::White)),
                after.get(B8)
            );
            assert_eq!(None, after.get(B7));
        }
    }

    #[test]
    fn test_en_passant_after_double_push() {
        let mut board = chess_position! {
            ....k...
            ...p....
            ........
            ....P...
            ........
            ........
            ........
            ....K...
        };
        board.set_turn(Color::Black);
        let generator = MoveGenerator::new();
        std_move!(D7, D5).apply(&mut board).unwrap();

        let moves = generator.generate_moves(&mut board);
        let captures_onto_d6: Vec<_> = moves
            .iter()
            .filter(|m| m.from_square() == E5 && m.to_square() == D6)
            .collect();
        assert_eq!(vec![&en_passant_move!(E5, D6)], captures_onto_d6);

        en_passant_move!(E5, D6).apply(&mut board).unwrap();
        assert_eq!(None, board.get(D5));
        assert_eq!(Some((Piece::Pawn, Color::White)), board.get(D6));
    }

    #[test]
    fn test_en_passant_expires_after_one_move() {
        let mut board = chess_position! {
            ....k...
            ...p....
            ........
            ....P...
            ........
            ........
            ........
            ....K...
        };
        board.set_turn(Color::Black);
        std_move!(D7, D5).apply(&mut board).unwrap();
        std_move!(E1, F1).apply(&mut board).unwrap();
        std_move!(E8, F8).apply(&mut board).unwrap();

        let moves = MoveGenerator::new().generate_moves(&mut board);
        assert!(!moves.iter().any(|m| matches!(m, ChessMove::EnPassant(_))));
    }

    #[test]
    fn test_en_passant_that_exposes_king_is_illegal() {
        // Removing both pawns from the fifth rank opens the rook's line.
        let mut board = chess_position! {
            ........
            ........
            ........
            K..pP..r
            ........
            ........
            ........
            ....k...
        };
        board.set_en_passant_target(Some(D6));
        let moves = MoveGenerator::new().generate_moves(&mut board);
        assert!(!moves.contains(&en_passant_move!(E5, D6)));
    }

    #[test]
    fn test_castle_candidates_both_sides() {
        let mut board = chess_position! {
            ....k...
            ........
            ........
            ........
            ........
            ........
            ........
            R...K..R
        };
        let moves = MoveGenerator::new().generate_moves(&mut board);
        assert!(moves.contains(&castle_kingside!(Color::White)));
        assert!(moves.contains(&castle_queenside!(Color::White)));
    }

    #[test]
    fn test_no_castling_out_of_or_through_check() {
        // The black rook covers f1, so kingside castling passes through check.
        let mut board = chess_position! {
            ....k...
            .....r..
            ........
            ........
            ........
            ........
            ........
            R...K..R
        };
        let moves = MoveGenerator::new().generate_moves(&mut board);
        assert!(!moves.contains(&castle_kingside!(Color::White)));
        assert!(moves.contains(&castle_queenside!(Color::White)));

        // In check: neither side may castle.
        let mut board = chess_position! {
            ....k...
            ....r...
            ........
            ........
            ........
            ........
            ........
            R...K..R
        };
        let moves = MoveGenerator::new().generate_moves(&mut board);
        assert!(!moves.contains(&castle_kingside!(Color::White)));
        assert!(!moves.contains(&castle_queenside!(Color::White)));
    }

    #[test]
    fn test_queenside_castle_allowed_when_only_b_file_attacked() {
        // b1 is crossed by the rook, not the king.
        let mut board = chess_position! {
            ....k...
            .r......
            ........
            ........
            ........
            ........
            ........
            R...K...
        };
        let moves = MoveGenerator::new().generate_moves(&mut board);
        assert!(moves.contains(&castle_queenside!(Color::White)));
    }

    #[test]
    fn test_no_castle_without_rights() {
        let mut board = chess_position! {
            ....k...
            ........
            ........
            ........
            ........
            ........
            ........
            R...K..R
        };
        board.lose_castle_rights(CastleRights::for_color(Color::White));
        let moves = MoveGenerator::new().generate_moves(&mut board);
        assert!(!moves.iter().any(|m| matches!(m, ChessMove::Castle(_))));
    }

    #[test]
    fn test_pinned_piece_cannot_move() {
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
        let moves = MoveGenerator::new().generate_moves(&mut board);
        assert!(!moves.iter().any(|m| m.from_square() == E2));
    }

    #[test]
    fn test_legal_moves_never_leave_king_attacked() {
        let generator = MoveGenerator::new();
        let mut board = chess_position! {
            r...k..r
            ppp..ppp
            ..n..q..
            ...pp...
            .b..P...
            ..NP.N..
            PPPB.PPP
            R..QK..R
        };
        for _ in 0..2 {
            let color = board.turn();
            let moves = generator.generate_moves(&mut board);
            assert!(!moves.is_empty());
            for chess_move in moves.iter() {
                chess_move.apply(&mut board).unwrap();
                assert!(!generator.is_in_check(&board, color), "{}", chess_move);
                chess_move.undo(&mut board).unwrap();
            }
            board.toggle_turn();
        }
    }

    #[test]
    fn test_status() {
        let generator = MoveGenerator::new();

        let mut board = Board::starting_position();
        assert_eq!(PositionStatus::InPlay, generator.status(&mut board));

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
        assert_eq!(PositionStatus::Checkmate, generator.status(&mut board));

        let mut board = chess_position! {
            .......k
            ........
            .....KQ.
            ........
            ........
            ........
            ........
            ........
        };
        board.set_turn(Color::Black);
        assert_eq!(PositionStatus::Stalemate, generator.status(&mut board));

        let mut board = chess_position! {
            ....k...
            ........
            ........
            ........
            ........
            ........
            ........
            ....R..K
        };
        board.set_turn(Color::Black);
        assert_eq!(PositionStatus::Check, generator.status(&mut board));
    }

    #[test]
    fn test_perft_starting_position() {
        let generator = MoveGenerator::new();
        let mut board = Board::starting_position();
        assert_eq!(1, generator.perft(0, &mut board));
        assert_eq!(20, generator.perft(1, &mut board));
        assert_eq!(400, generator.perft(2, &mut board));
        assert_eq!(8902, generator.perft(3, &mut board));
        assert_eq!(Board::starting_position(), board);
    }

    #[test]
    fn test_perft_divide_sums_to_perft() {
        let generator = MoveGenerator::new();
        let mut board = Board::starting_position();
        let divided = generator.perft_divide(2, &mut board);
        assert_eq!(20, divided.len());
        assert_eq!(400, divided.iter().map(|(_, count)| count).sum::<usize>());
    }
}
