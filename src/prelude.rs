//! Common types re-exported for convenience.

pub use crate::alpha_beta_searcher::{SearchContext, SearchError, SearchResult};
pub use crate::board::{color::Color, error::BoardError, piece::Piece, square::Square, Board};
pub use crate::chess_move::{
    CastleChessMove, ChessMove, EnPassantChessMove, PawnPromotionChessMove, StandardChessMove,
};
pub use crate::chess_search::search_best_move;
pub use crate::game::{ChessEngine, EngineConfig, Game, GameEnding};
pub use crate::input_handler::{parse_fen, to_fen, STARTING_POSITION_FEN};
pub use crate::move_generator::{MoveGenerator, PositionStatus};
