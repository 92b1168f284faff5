use std::str::FromStr;

use thiserror::Error;

use crate::board::{
    castle_rights::CastleRights, color::Color, error::BoardError, piece::Piece, square::Square,
    Board,
};
use crate::move_generator::MoveGenerator;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FenParseError {
    #[error("Wrong number of fields: 6 expected, {field_count:?} given")]
    WrongNumberOfFields { field_count: usize },
    #[error("Invalid piece character: {invalid_character:?}")]
    InvalidPieceCharacter { invalid_character: char },
    #[error("Wrong number of ranks: 8 expected, {rank_count:?} given")]
    InvalidRankCount { rank_count: usize },
    #[error("Rank too long: {invalid_rank:?}")]
    InvalidRankLength { invalid_rank: String },
    #[error("Error placing piece: {board_error:?}")]
    ErrorPlacingPiece { board_error: BoardError },
    #[error("Rank incomplete: {incomplete_rank:?}")]
    IncompleteRank { incomplete_rank: String },
    #[error("Invalid color: {invalid_color:?}")]
    InvalidColor { invalid_color: String },
    #[error("Invalid castling rights: {invalid_castling:?}")]
    InvalidCastlingRights { invalid_castling: char },
    #[error("Invalid en passant square: {value:?}")]
    InvalidEnPassant { value: String },
    #[error("Invalid halfmove clock: {invalid_clock:?}")]
    InvalidHalfmoveClock { invalid_clock: String },
    #[error("Invalid fullmove number: {invalid_number:?}")]
    InvalidFullmoveNumber { invalid_number: String },
    #[error("Pawn on its first or last rank: {square}")]
    PawnOnBackRank { square: Square },
    #[error("Invalid position: {board_error}")]
    InvalidPosition { board_error: BoardError },
}

type FenResult<T> = Result<T, FenParseError>;

pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Parses a FEN (Forsyth–Edwards Notation) string into a Board.
/// FEN string contains 6 fields: piece placement, active color, castling rights,
/// en passant target square, halfmove clock, and fullmove number.
///
/// The resulting board is validated: a position without exactly one king per
/// side, or one where the side not to move is in check, is rejected rather
/// than handed to the rest of the engine.
pub fn parse_fen(fen: &str) -> FenResult<Board> {
    let fields = split_fen_fields(fen)?;
    let mut board = Board::new();

    parse_piece_placement(&mut board, fields.position)?;
    parse_active_color(&mut board, fields.active_color)?;
    parse_castle_rights(&mut board, fields.castle_rights)?;
    parse_en_passant(&mut board, fields.en_passant)?;
    parse_halfmove_clock(&mut board, fields.halfmove_clock)?;
    parse_fullmove_number(&mut board, fields.fullmove_number)?;

    board
        .validate()
        .map_err(|board_error| FenParseError::InvalidPosition { board_error })?;

    let waiting = board.turn().opposite();
    if MoveGenerator::new().is_in_check(&board, waiting) {
        return Err(FenParseError::InvalidPosition {
            board_error: BoardError::OpponentInCheckError { color: waiting },
        });
    }

    Ok(board)
}

impl FromStr for Board {
    type Err = FenParseError;

    fn from_str(fen: &str) -> Result<Self, Self::Err> {
        parse_fen(fen)
    }
}

/// Represents the six fields in a FEN string
struct FenFields<'a> {
    position: &'a str,
    active_color: &'a str,
    castle_rights: &'a str,
    en_passant: &'a str,
    halfmove_clock: &'a str,
    fullmove_number: &'a str,
}

/// Splits a FEN string into its six component fields
fn split_fen_fields(fen: &str) -> FenResult<FenFields> {
    let parts: Vec<&str> = fen.split_whitespace().collect();
    if parts.len() != 6 {
        return Err(FenParseError::WrongNumberOfFields {
            field_count: parts.len(),
        });
    }

    Ok(FenFields {
        position: parts[0],
        active_color: parts[1],
        castle_rights: parts[2],
        en_passant: parts[3],
        halfmove_clock: parts[4],
        fullmove_number: parts[5],
    })
}

/// Parses the piece placement section of the FEN string
fn parse_piece_placement(board: &mut Board, position: &str) -> FenResult<()> {
    let ranks: Vec<&str> = position.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenParseError::InvalidRankCount {
            rank_count: ranks.len(),
        });
    }

    for (rank_idx, rank) in ranks.iter().enumerate() {
        parse_rank(board, rank, 7 - rank_idx as u8)?;
    }

    Ok(())
}

/// Parses a single rank of the piece placement section
fn parse_rank(board: &mut Board, rank: &str, rank_number: u8) -> FenResult<()> {
    let mut file = 0u8;

    for c in rank.chars() {
        if file >= 8 {
            return Err(FenParseError::InvalidRankLength {
                invalid_rank: rank.to_string(),
            });
        }

        if let Some(empty_squares) = c.to_digit(10) {
            if !(1..=8).contains(&empty_squares) {
                return Err(FenParseError::InvalidPieceCharacter {
                    invalid_character: c,
                });
            }
            file += empty_squares as u8;
        } else {
            let (piece, color) = Piece::from_fen(c).ok_or(FenParseError::InvalidPieceCharacter {
                invalid_character: c,
            })?;
            let square = Square::new(file, rank_number)
                .map_err(|board_error| FenParseError::ErrorPlacingPiece { board_error })?;
            if piece == Piece::Pawn && (rank_number == 0 || rank_number == 7) {
                return Err(FenParseError::PawnOnBackRank { square });
            }
            board
                .put(square, piece, color)
                .map_err(|board_error| FenParseError::ErrorPlacingPiece { board_error })?;
            file += 1;
        }
    }

    if file > 8 {
        return Err(FenParseError::InvalidRankLength {
            invalid_rank: rank.to_string(),
        });
    }
    if file != 8 {
        return Err(FenParseError::IncompleteRank {
            incomplete_rank: rank.to_string(),
        });
    }

    Ok(())
}

/// Parses the active color field
fn parse_active_color(board: &mut Board, active_color: &str) -> FenResult<()> {
    match active_color {
        "w" => {
            board.set_turn(Color::White);
            Ok(())
        }
        "b" => {
            board.set_turn(Color::Black);
            Ok(())
        }
        _ => Err(FenParseError::InvalidColor {
            invalid_color: active_color.to_string(),
        }),
    }
}

/// Parses the castling rights field
fn parse_castle_rights(board: &mut Board, castle_rights: &str) -> FenResult<()> {
    if castle_rights == "-" {
        board.set_castle_rights(CastleRights::none());
        return Ok(());
    }

    let mut rights = CastleRights::none();
    for c in castle_rights.chars() {
        rights = rights
            | match c {
                'K' => CastleRights::white_kingside(),
                'Q' => CastleRights::white_queenside(),
                'k' => CastleRights::black_kingside(),
                'q' => CastleRights::black_queenside(),
                _ => {
                    return Err(FenParseError::InvalidCastlingRights {
                        invalid_castling: c,
                    })
                }
            };
    }
    board.set_castle_rights(rights);
    Ok(())
}

/// Parses the en passant target square field. The target sits behind the
/// pawn that just double-pushed: on the sixth rank when white is to move, the
/// third when black is.
fn parse_en_passant(board: &mut Board, en_passant: &str) -> FenResult<()> {
    if en_passant == "-" {
        board.set_en_passant_target(None);
        return Ok(());
    }

    let invalid = || FenParseError::InvalidEnPassant {
        value: en_passant.to_string(),
    };
    let square = Square::from_algebraic(en_passant).map_err(|_| invalid())?;
    let expected_rank = match board.turn() {
        Color::White => 5,
        Color::Black => 2,
    };
    if square.rank() != expected_rank {
        return Err(invalid());
    }

    board.set_en_passant_target(Some(square));
    Ok(())
}

/// Parses the halfmove clock field
fn parse_halfmove_clock(board: &mut Board, halfmove_clock: &str) -> FenResult<()> {
    let halfmove =
        halfmove_clock
            .parse::<u16>()
            .map_err(|_| FenParseError::InvalidHalfmoveClock {
                invalid_clock: halfmove_clock.to_string(),
            })?;
    board.set_halfmove_clock(halfmove);
    Ok(())
}

/// Parses the fullmove number field
fn parse_fullmove_number(board: &mut Board, fullmove_number: &str) -> FenResult<()> {
    let invalid = || FenParseError::InvalidFullmoveNumber {
        invalid_number: fullmove_number.to_string(),
    };
    let fullmove = fullmove_number.parse::<u16>().map_err(|_| invalid())?;
    if fullmove == 0 {
        return Err(invalid());
    }
    board.set_fullmove_number(fullmove);
    Ok(())
}
