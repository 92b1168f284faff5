//! Playing games: engines that pick moves, where human moves come from, and
//! the game record that detects how a game ends.

pub mod engine;
#[allow(clippy::module_inception)]
pub mod game;
pub mod input_source;

pub use engine::{
    ChessEngine, EngineConfig, EngineError, HumanEngine, IterativeDeepeningEngine, MinimaxEngine,
};
pub use game::{has_insufficient_material, Game, GameEnding};
pub use input_source::{InputSource, ScriptedInput, StdinInput};
