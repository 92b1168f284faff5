//! Shared utilities for CLI commands.

use std::thread;
use std::time::Duration;

use minimax_chess::board::color::Color;
use minimax_chess::board::Board;
use minimax_chess::game::{
    ChessEngine, EngineConfig, EngineError, Game, IterativeDeepeningEngine, MinimaxEngine,
};
use minimax_chess::input_handler::InputError;
use structopt::StructOpt;

/// Search options shared by every command that runs the engine.
#[derive(StructOpt)]
pub struct SearchArgs {
    #[structopt(short, long, default_value = "4")]
    pub depth: u8,
    #[structopt(
        long = "node-budget",
        help = "Stop searching after this many positions and play the best move found so far"
    )]
    pub node_budget: Option<usize>,
    #[structopt(long, help = "Search the root moves on all cores")]
    pub parallel: bool,
    #[structopt(
        long,
        help = "Deepen one ply at a time; with a node budget, play the deepest completed search"
    )]
    pub iterative: bool,
}

pub(crate) fn create_config(search: &SearchArgs, starting_position: Board) -> EngineConfig {
    EngineConfig {
        search_depth: search.depth,
        node_budget: search.node_budget,
        parallel: search.parallel,
        starting_position,
    }
}

pub(crate) fn computer_engine(search: &SearchArgs, config: &EngineConfig) -> Box<dyn ChessEngine> {
    if search.iterative {
        Box::new(IterativeDeepeningEngine::new(config))
    } else {
        Box::new(MinimaxEngine::new(config))
    }
}

pub(crate) struct GameLoopOptions {
    pub max_moves: Option<usize>,
    pub delay: Duration,
    pub show_search: bool,
}

/// Plays a game between `white` and `black` from the configured position,
/// printing the board after every move.
pub(crate) fn run_game_loop(
    config: &EngineConfig,
    mut white: Box<dyn ChessEngine>,
    mut black: Box<dyn ChessEngine>,
    options: GameLoopOptions,
) {
    let mut game = Game::new(config.starting_position.clone());
    println!("{}\n", game.board().to_ascii());

    loop {
        if let Some(ending) = game.game_ending() {
            println!("Game over: {}", ending);
            return;
        }
        if let Some(max_moves) = options.max_moves {
            if game.history().len() >= max_moves {
                println!("Stopping after {} moves", max_moves);
                return;
            }
        }

        let turn = game.board().turn();
        let engine = match turn {
            Color::White => white.as_mut(),
            Color::Black => black.as_mut(),
        };

        match game.play_turn(&mut *engine) {
            Ok(Some(chess_move)) => {
                println!("{} ({}) plays {}", turn, engine.name(), chess_move);
                if options.show_search {
                    if let Some(search) = engine.last_search() {
                        println!(
                            "score: {}, depth: {}, positions: {}, time: {:?}",
                            search.score,
                            search.stats.depth,
                            search.stats.positions,
                            search.stats.duration
                        );
                    }
                }
                println!("{}\n", game.board().to_ascii());
                thread::sleep(options.delay);
            }
            Ok(None) => return,
            Err(EngineError::UndoRequested) => {
                take_back_turn(&mut game);
                println!("{}\n", game.board().to_ascii());
            }
            Err(EngineError::InputError {
                error: InputError::UserExit,
            })
            | Err(EngineError::InputError {
                error: InputError::EndOfInput,
            }) => {
                println!("Goodbye!");
                return;
            }
            Err(error) if error.is_retryable() => {
                println!("{}, try again", error);
            }
            Err(error) => {
                eprintln!("{}", error);
                return;
            }
        }
    }
}

/// Takes back the player's last move and the reply to it, so the same
/// player is to move again.
fn take_back_turn(game: &mut Game) {
    for _ in 0..2 {
        match game.undo_last_move() {
            Ok(Some(chess_move)) => println!("took back {}", chess_move),
            Ok(None) => {
                println!("No moves to take back");
                return;
            }
            Err(error) => {
                eprintln!("{}", error);
                return;
            }
        }
    }
}
