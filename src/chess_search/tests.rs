//! Chess-specific tests for the alpha-beta search.
//!
//! Test coverage:
//! - Mate finding (mate in 1, mate in 2) and preferring the faster mate
//! - Winning undefended material at depth 1
//! - Alpha-beta against plain minimax on real positions
//! - Terminal and invalid root positions
//! - Parallel search, node budget, iterative deepening

use crate::alpha_beta_searcher::{SearchContext, SearchError};
use crate::board::{castle_rights::CastleRights, color::Color, piece::Piece, square::*, Board};
use crate::chess_move::{Capture, ChessMove};
use crate::evaluate::{CHECKMATE_SCORE, DRAW_SCORE};
use crate::input_handler::parse_fen;
use crate::{chess_position, rules, std_move};

use super::*;

fn assert_mates(board: &Board, chess_move: &ChessMove) {
    let mut after = board.clone();
    chess_move.apply(&mut after).unwrap();
    assert!(
        rules::is_checkmate(&mut after).unwrap(),
        "{} does not lead to checkmate",
        chess_move
    );
}

fn mate_in_1_white() -> Board {
    chess_position! {
        .Q......
        ........
        ........
        ........
        ........
        ........
        k.K.....
        ........
    }
}

#[test]
fn test_find_mate_in_1_white() {
    let mut context = SearchContext::new(2);
    let mut board = mate_in_1_white();

    let result = search_best_move(&mut context, &mut board).unwrap();
    let chess_move = result.best_move.unwrap();

    assert_mates(&board, &chess_move);
    assert_eq!(CHECKMATE_SCORE - 1, result.score);
}

#[test]
fn test_find_mate_in_1_black() {
    let mut context = SearchContext::new(2);
    let mut board = chess_position! {
        .q......
        ........
        ........
        ........
        ........
        ........
        K.k.....
        ........
    };
    board.set_turn(Color::Black);

    let result = search_best_move(&mut context, &mut board).unwrap();
    let chess_move = result.best_move.unwrap();

    assert_mates(&board, &chess_move);
    assert_eq!(CHECKMATE_SCORE - 1, result.score);
}

#[test]
fn test_prefers_the_faster_mate() {
    // Deep enough to see slower mates as well; the mate in 1 must win.
    let mut context = SearchContext::new(4);
    let mut board = mate_in_1_white();

    let result = search_best_move(&mut context, &mut board).unwrap();

    assert_mates(&board, &result.best_move.unwrap());
    assert_eq!(CHECKMATE_SCORE - 1, result.score);
    assert_eq!(1, result.principal_variation.len());
}

#[test]
fn test_find_back_rank_mate_in_2_white() {
    let mut context = SearchContext::new(4);
    let mut board = chess_position! {
        .k.....r
        ppp.....
        ........
        ........
        ........
        ........
        ...Q....
        K..R....
    };

    let result = search_best_move(&mut context, &mut board).unwrap();
    assert_eq!(CHECKMATE_SCORE - 3, result.score);
    assert_eq!(Some(std_move!(D2, D8)), result.best_move);

    // The principal variation plays out the whole mate.
    assert_eq!(3, result.principal_variation.len());
    for chess_move in result.principal_variation.iter() {
        rules::apply(&mut board, chess_move).unwrap();
    }
    assert!(rules::is_checkmate(&mut board).unwrap());
    assert_eq!(Color::Black, board.turn());
}

#[test]
fn test_back_rank_mate_replayed_move_by_move() {
    let mut board = chess_position! {
        .k.....r
        ppp.....
        ........
        ........
        ........
        ........
        ...Q....
        K..R....
    };

    let expected_moves = [
        std_move!(D2, D8),
        std_move!(H8, D8, Capture(Piece::Queen)),
        std_move!(D1, D8, Capture(Piece::Rook)),
    ];

    for expected in expected_moves.iter() {
        let mut context = SearchContext::new(4);
        let chess_move = search_best_move(&mut context, &mut board)
            .unwrap()
            .best_move
            .unwrap();
        assert_eq!(expected, &chess_move);
        rules::apply(&mut board, &chess_move).unwrap();
    }
    assert!(rules::is_checkmate(&mut board).unwrap());
}

#[test]
fn test_depth_1_takes_undefended_piece() {
    let mut context = SearchContext::new(1);
    let mut board = chess_position! {
        ......k.
        ........
        ........
        n.......
        ........
        ........
        ........
        R.....K.
    };
    board.set_castle_rights(CastleRights::none());

    let result = search_best_move(&mut context, &mut board).unwrap();
    assert_eq!(
        Some(std_move!(A1, A5, Capture(Piece::Knight))),
        result.best_move
    );
    assert!(result.score > 400);
}

#[test]
fn test_black_takes_undefended_queen() {
    let mut context = SearchContext::new(1);
    let mut board = parse_fen("6k1/8/8/8/3Q4/8/1b6/7K b - - 0 1").unwrap();

    let result = search_best_move(&mut context, &mut board).unwrap();
    assert_eq!(
        Some(std_move!(B2, D4, Capture(Piece::Queen))),
        result.best_move
    );
}

#[test]
fn test_alpha_beta_matches_minimax() {
    let positions = [
        (crate::input_handler::STARTING_POSITION_FEN, 3),
        ("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1", 3),
        ("1k5r/ppp5/8/8/8/8/3Q4/K2R4 w - - 0 1", 3),
        (
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            2,
        ),
        (
            "r1bqk2r/ppp2ppp/2n2n2/2bpp3/4P3/2PP1N2/PP1N1PPP/R1BQKB1R b KQkq - 0 6",
            2,
        ),
    ];

    for (fen, depth) in positions.iter() {
        let mut board = parse_fen(fen).unwrap();

        let mut context = SearchContext::new(*depth);
        let pruned = search_best_move(&mut context, &mut board).unwrap();

        let mut context = SearchContext::new(*depth);
        let full = minimax_best_move(&mut context, &mut board).unwrap();

        assert_eq!(full.score, pruned.score, "{} at depth {}", fen, depth);
        assert_eq!(full.best_move, pruned.best_move, "{} at depth {}", fen, depth);
        assert!(
            pruned.stats.positions <= full.stats.positions,
            "{} at depth {}",
            fen,
            depth
        );
    }
}

#[test]
fn test_search_leaves_board_unchanged() {
    let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    let mut board = parse_fen(fen).unwrap();
    let mut context = SearchContext::new(2);
    let _ = search_best_move(&mut context, &mut board).unwrap();
    assert_eq!(parse_fen(fen).unwrap(), board);
}

#[test]
fn test_checkmated_root_has_no_move() {
    let mut board =
        parse_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3").unwrap();
    let mut context = SearchContext::new(3);
    let result = search_best_move(&mut context, &mut board).unwrap();
    assert_eq!(None, result.best_move);
    assert_eq!(-CHECKMATE_SCORE, result.score);
}

#[test]
fn test_stalemated_root_has_no_move() {
    let mut board = parse_fen("7k/8/5KQ1/8/8/8/8/8 b - - 0 1").unwrap();
    let mut context = SearchContext::new(3);
    let result = search_best_move(&mut context, &mut board).unwrap();
    assert_eq!(None, result.best_move);
    assert_eq!(DRAW_SCORE, result.score);
}

#[test]
fn test_invalid_position_is_rejected() {
    let mut board = Board::starting_position();
    board.remove(E8);
    let mut context = SearchContext::new(2);
    assert!(matches!(
        search_best_move(&mut context, &mut board),
        Err(SearchError::InvalidPosition { .. })
    ));
}

#[test]
fn test_parallel_matches_sequential() {
    let fens = [
        crate::input_handler::STARTING_POSITION_FEN,
        "1k5r/ppp5/8/8/8/8/3Q4/K2R4 w - - 0 1",
        "r1bqk2r/ppp2ppp/2n2n2/2bpp3/4P3/2PP1N2/PP1N1PPP/R1BQKB1R b KQkq - 0 6",
    ];
    for fen in fens.iter() {
        let mut board = parse_fen(fen).unwrap();

        let mut context = SearchContext::new(3);
        let sequential = search_best_move(&mut context, &mut board).unwrap();

        let mut context = SearchContext::new(3).with_parallel(true);
        let parallel = search_best_move(&mut context, &mut board).unwrap();

        assert_eq!(sequential.score, parallel.score, "{}", fen);
        assert_eq!(sequential.best_move, parallel.best_move, "{}", fen);
    }
}

#[test]
fn test_node_budget_still_returns_legal_move() {
    let mut board = Board::starting_position();
    let mut context = SearchContext::new(6).with_node_budget(500);
    let result = search_best_move(&mut context, &mut board).unwrap();

    assert!(result.stats.budget_exhausted);
    let chess_move = result.best_move.unwrap();
    assert!(rules::legal_moves(&mut board).unwrap().contains(&chess_move));
    assert_eq!(Board::starting_position(), board);
}

#[test]
fn test_iterative_deepening_finds_mate() {
    let mut context = SearchContext::new(4);
    let mut board = mate_in_1_white();
    let result = search_best_move_iteratively(&mut context, &mut board).unwrap();

    assert_mates(&board, &result.best_move.unwrap());
    assert_eq!(CHECKMATE_SCORE - 1, result.score);
    assert_eq!(4, result.stats.depth);
}
