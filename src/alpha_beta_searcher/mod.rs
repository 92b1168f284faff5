//! Game-agnostic minimax search with alpha-beta pruning.
//!
//! The search only sees a game through the traits in `traits`: a state, the
//! moves that can be applied to and undone from it, a move generator, an
//! evaluator, and an optional move orderer. Chess plugs in through
//! `crate::chess_search`.

mod search;
mod traits;


pub use search::{
    alpha_beta_search, iterative_deepening_search, minimax_search, SearchContext, SearchError,
    SearchResult, SearchStats, SCORE_INFINITY,
};
pub use traits::{
    Evaluator, GameMove, GameState, MoveCollection, MoveGenerator, MoveOrderer, NoOpMoveOrderer,
};
