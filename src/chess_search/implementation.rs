//! Chess-specific trait implementations for the alpha-beta search.

use log::debug;

use crate::alpha_beta_searcher::{
    alpha_beta_search, iterative_deepening_search, minimax_search, Evaluator, GameMove,
    GameState, MoveCollection, MoveGenerator, SearchContext, SearchError, SearchResult,
};
use crate::board::{error::BoardError, Board};
use crate::chess_move::ChessMove;
use crate::evaluate;
use crate::move_generator::{ChessMoveList, MoveGenerator as ChessMoveGen};

use super::move_orderer::ChessMoveOrderer;

impl GameState for Board {}

impl GameMove for ChessMove {
    type State = Board;
    type Error = BoardError;

    #[inline]
    fn apply(&self, state: &mut Board) -> Result<(), BoardError> {
        ChessMove::apply(self, state)
    }

    #[inline]
    fn undo(&self, state: &mut Board) -> Result<(), BoardError> {
        ChessMove::undo(self, state)
    }
}

impl MoveCollection<ChessMove> for ChessMoveList {
    fn is_empty(&self) -> bool {
        ChessMoveList::is_empty(self)
    }

    fn len(&self) -> usize {
        ChessMoveList::len(self)
    }
}

#[derive(Clone, Default)]
pub struct ChessMoveGenerator {
    inner: ChessMoveGen,
}

impl ChessMoveGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inner(&self) -> &ChessMoveGen {
        &self.inner
    }
}

impl MoveGenerator<Board> for ChessMoveGenerator {
    type Move = ChessMove;
    type MoveList = ChessMoveList;

    #[inline]
    fn generate_moves(&self, state: &mut Board) -> ChessMoveList {
        self.inner.generate_moves(state)
    }
}

#[derive(Clone, Default)]
pub struct ChessEvaluator {
    move_generator: ChessMoveGen,
}

impl ChessEvaluator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Evaluator<Board> for ChessEvaluator {
    #[inline]
    fn evaluate(&self, state: &mut Board, ply: u8) -> i16 {
        evaluate::score(state, &self.move_generator, ply)
    }
}

fn validate(board: &Board) -> Result<(), SearchError> {
    board.validate().map_err(|error| SearchError::InvalidPosition {
        reason: error.to_string(),
    })
}

/// Searches for the best chess move from the given position, to the depth
/// configured in `context`. The board is handed back unchanged.
#[must_use = "search returns the best move found"]
pub fn search_best_move(
    context: &mut SearchContext,
    board: &mut Board,
) -> Result<SearchResult<ChessMove>, SearchError> {
    validate(board)?;
    debug!("searching {:?} to depth {}", board, context.search_depth());

    let move_generator = ChessMoveGenerator::default();
    let evaluator = ChessEvaluator::default();
    let move_orderer = ChessMoveOrderer;

    alpha_beta_search(context, board, &move_generator, &evaluator, &move_orderer)
}

/// Like `search_best_move`, but deepens one ply at a time so that a node
/// budget cuts the search off at the last completed depth.
#[must_use = "search returns the best move found"]
pub fn search_best_move_iteratively(
    context: &mut SearchContext,
    board: &mut Board,
) -> Result<SearchResult<ChessMove>, SearchError> {
    validate(board)?;

    let move_generator = ChessMoveGenerator::default();
    let evaluator = ChessEvaluator::default();
    let move_orderer = ChessMoveOrderer;

    iterative_deepening_search(context, board, &move_generator, &evaluator, &move_orderer)
}

/// Unpruned minimax over the same tree as `search_best_move`.
#[must_use = "search returns the best move found"]
pub fn minimax_best_move(
    context: &mut SearchContext,
    board: &mut Board,
) -> Result<SearchResult<ChessMove>, SearchError> {
    validate(board)?;

    let move_generator = ChessMoveGenerator::default();
    let evaluator = ChessEvaluator::default();
    let move_orderer = ChessMoveOrderer;

    minimax_search(context, board, &move_generator, &evaluator, &move_orderer)
}
