//! CLI argument parsing using StructOpt.

use structopt::StructOpt;

use crate::cli::commands::{
    calculate_best_move::CalculateBestMoveArgs, perft::PerftArgs, play::PlayArgs,
    watch::WatchArgs,
};

#[derive(StructOpt)]
#[structopt(
    name = "minimax-chess",
    about = "A chess engine that searches with minimax and alpha-beta pruning ♛"
)]
pub enum Chess {
    #[structopt(
        name = "play",
        about = "Play a game against the computer, which searches for the best move at the given `--depth` (default: 4). Your color is chosen at random unless you specify it with `--color`. The initial position can be given in FEN notation with `--fen` (default: starting position). Type moves like `e2e4`, `e7e8q` or `O-O`, `undo` to take back your last move, and `quit` to leave."
    )]
    Play(PlayArgs),
    #[structopt(
        name = "watch",
        about = "Watch the computer play against itself at the given `--depth` (default: 4). The initial position can be given in FEN notation with `--fen` (default: starting position)."
    )]
    Watch(WatchArgs),
    #[structopt(
        name = "calculate-best-move",
        about = "Search for the best move from a position given in FEN notation with `--fen` (required), to the given `--depth` (default: 4). Prints the move, its score and the expected line of play."
    )]
    CalculateBestMove(CalculateBestMoveArgs),
    #[structopt(
        name = "perft",
        about = "Count the leaf positions of the legal move tree to the given `--depth` (default: 4), and report the time it took. `--divide` breaks the count down by root move."
    )]
    Perft(PerftArgs),
}

impl crate::cli::commands::Command for Chess {
    fn execute(self) {
        macro_rules! execute_command {
            ($($variant:ident($cmd:ident)),+ $(,)?) => {
                match self {
                    $(Self::$variant($cmd) => $cmd.execute(),)+
                }
            };
        }

        execute_command! {
            Play(cmd),
            Watch(cmd),
            CalculateBestMove(cmd),
            Perft(cmd),
        }
    }
}
