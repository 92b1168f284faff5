//! Players. A `ChessEngine` looks at a position and picks the move to play,
//! whether that means searching or asking a human.

use log::{debug, info};
use thiserror::Error;

use crate::alpha_beta_searcher::{SearchContext, SearchError, SearchResult};
use crate::board::error::BoardError;
use crate::board::Board;
use crate::chess_move::ChessMove;
use crate::chess_search::{search_best_move, search_best_move_iteratively};
use crate::input_handler::{FenParseError, InputError, MoveInput};
use crate::rules;

use super::input_source::InputSource;

/// Core engine configuration
#[derive(Clone, Debug)]
pub struct EngineConfig {
    pub search_depth: u8,
    pub node_budget: Option<usize>,
    pub parallel: bool,
    pub starting_position: Board,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            search_depth: 4,
            node_budget: None,
            parallel: false,
            starting_position: Board::starting_position(),
        }
    }
}

impl EngineConfig {
    pub fn search_context(&self) -> SearchContext {
        let context = SearchContext::new(self.search_depth).with_parallel(self.parallel);
        match self.node_budget {
            Some(budget) => context.with_node_budget(budget),
            None => context,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Board error: {error}")]
    BoardError {
        #[from]
        error: BoardError,
    },
    #[error("Search error: {error}")]
    SearchError {
        #[from]
        error: SearchError,
    },
    #[error("Input error: {error}")]
    InputError {
        #[from]
        error: InputError,
    },
    #[error("Invalid position: {error}")]
    FenError {
        #[from]
        error: FenParseError,
    },
    #[error("The player asked to take back the last move")]
    UndoRequested,
}

impl EngineError {
    /// Whether asking the same player again can help: the text did not parse,
    /// or named a move that is not legal here. A corrupt position, a search
    /// failure or a closed input stream is final.
    pub fn is_retryable(&self) -> bool {
        match self {
            EngineError::InputError {
                error: InputError::InvalidInput { .. },
            } => true,
            EngineError::BoardError { error } => matches!(
                error,
                BoardError::IllegalMoveError { .. }
                    | BoardError::MissingPromotionChoiceError
                    | BoardError::InvalidPromotionContextError
                    | BoardError::InvalidPromotionPieceError
            ),
            _ => false,
        }
    }
}

pub trait ChessEngine {
    /// Picks a move for the side to move, or `None` when it has no legal
    /// move. The board is not modified.
    fn choose_move(&mut self, board: &Board) -> Result<Option<ChessMove>, EngineError>;

    fn name(&self) -> &str;

    /// The search behind the last chosen move, for engines that search.
    fn last_search(&self) -> Option<&SearchResult<ChessMove>> {
        None
    }
}

/// A human at the keyboard (or a script standing in for one).
///
/// Each call reads a single input. Unparseable text, illegal moves and
/// requests to take a move back come back as errors, and the caller decides
/// whether to ask again.
pub struct HumanEngine<I: InputSource> {
    input: I,
}

impl<I: InputSource> HumanEngine<I> {
    pub fn new(input: I) -> Self {
        Self { input }
    }

    pub fn input(&self) -> &I {
        &self.input
    }
}

impl<I: InputSource> ChessEngine for HumanEngine<I> {
    fn choose_move(&mut self, board: &Board) -> Result<Option<ChessMove>, EngineError> {
        let mut board = board.clone();
        if rules::legal_moves(&mut board)?.is_empty() {
            return Ok(None);
        }

        let chess_move = match self.input.next_move_input()? {
            MoveInput::Coordinate {
                from,
                to,
                promotion,
            } => rules::resolve_move(&mut board, from, to, promotion)?,
            MoveInput::CastleKingside => rules::resolve_castle(&mut board, true)?,
            MoveInput::CastleQueenside => rules::resolve_castle(&mut board, false)?,
            MoveInput::Undo => return Err(EngineError::UndoRequested),
        };
        Ok(Some(chess_move))
    }

    fn name(&self) -> &str {
        "human"
    }
}

/// Plays the best move of a fixed-depth alpha-beta search.
pub struct MinimaxEngine {
    context: SearchContext,
    last_result: Option<SearchResult<ChessMove>>,
}

impl MinimaxEngine {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            context: config.search_context(),
            last_result: None,
        }
    }

    pub fn with_depth(depth: u8) -> Self {
        Self::new(&EngineConfig {
            search_depth: depth,
            ..EngineConfig::default()
        })
    }
}

impl ChessEngine for MinimaxEngine {
    fn choose_move(&mut self, board: &Board) -> Result<Option<ChessMove>, EngineError> {
        let mut board = board.clone();
        let result = search_best_move(&mut self.context, &mut board)?;
        log_search(self.name(), &result);
        let best_move = result.best_move;
        self.last_result = Some(result);
        Ok(best_move)
    }

    fn name(&self) -> &str {
        "minimax"
    }

    fn last_search(&self) -> Option<&SearchResult<ChessMove>> {
        self.last_result.as_ref()
    }
}

/// Deepens one ply at a time up to the configured depth. With a node budget
/// it plays the best move of the deepest search that finished.
pub struct IterativeDeepeningEngine {
    context: SearchContext,
    last_result: Option<SearchResult<ChessMove>>,
}

impl IterativeDeepeningEngine {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            context: config.search_context(),
            last_result: None,
        }
    }
}

impl ChessEngine for IterativeDeepeningEngine {
    fn choose_move(&mut self, board: &Board) -> Result<Option<ChessMove>, EngineError> {
        let mut board = board.clone();
        let result = search_best_move_iteratively(&mut self.context, &mut board)?;
        log_search(self.name(), &result);
        let best_move = result.best_move;
        self.last_result = Some(result);
        Ok(best_move)
    }

    fn name(&self) -> &str {
        "iterative deepening"
    }

    fn last_search(&self) -> Option<&SearchResult<ChessMove>> {
        self.last_result.as_ref()
    }
}

fn log_search(engine: &str, result: &SearchResult<ChessMove>) {
    match result.best_move {
        Some(chess_move) => info!(
            "{} chose {} (score {}, depth {}, {} positions in {:?})",
            engine,
            chess_move,
            result.score,
            result.stats.depth,
            result.stats.positions,
            result.stats.duration
        ),
        None => info!("{} has no legal move (score {})", engine, result.score),
    }
    debug!("principal variation: {:?}", result.principal_variation);
}
