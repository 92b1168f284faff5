//! Watch command - watch the computer play against itself.

use std::time::Duration;

use minimax_chess::board::Board;
use minimax_chess::input_handler::STARTING_POSITION_FEN;
use structopt::StructOpt;

use super::util::{computer_engine, create_config, run_game_loop, GameLoopOptions, SearchArgs};
use super::Command;

#[derive(StructOpt)]
pub struct WatchArgs {
    #[structopt(flatten)]
    pub search: SearchArgs,
    #[structopt(long = "fen", default_value = STARTING_POSITION_FEN)]
    pub starting_position: Board,
    #[structopt(long = "max-moves", help = "Stop after this many moves (plies)")]
    pub max_moves: Option<usize>,
    #[structopt(
        long = "delay",
        default_value = "1000",
        help = "Delay between moves in milliseconds"
    )]
    pub delay_ms: u64,
}

impl Command for WatchArgs {
    fn execute(self) {
        let config = create_config(&self.search, self.starting_position);
        run_game_loop(
            &config,
            computer_engine(&self.search, &config),
            computer_engine(&self.search, &config),
            GameLoopOptions {
                max_moves: self.max_moves,
                delay: Duration::from_millis(self.delay_ms),
                show_search: true,
            },
        );
    }
}
