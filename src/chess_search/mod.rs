//! Chess-specific implementation of the alpha-beta search traits.

pub mod implementation;
mod move_orderer;

#[cfg(test)]
mod tests;

pub use implementation::{
    minimax_best_move, search_best_move, search_best_move_iteratively, ChessEvaluator,
    ChessMoveGenerator,
};
pub use move_orderer::ChessMoveOrderer;
