//! Play command - play a game against the computer.

use std::time::Duration;

use minimax_chess::board::color::Color;
use minimax_chess::board::Board;
use minimax_chess::game::{ChessEngine, HumanEngine, StdinInput};
use minimax_chess::input_handler::STARTING_POSITION_FEN;
use structopt::StructOpt;

use super::util::{computer_engine, create_config, run_game_loop, GameLoopOptions, SearchArgs};
use super::Command;

#[derive(StructOpt)]
pub struct PlayArgs {
    #[structopt(flatten)]
    pub search: SearchArgs,
    #[structopt(short = "c", long = "color", default_value = "random")]
    pub color: Color,
    #[structopt(long = "fen", default_value = STARTING_POSITION_FEN)]
    pub starting_position: Board,
}

impl Command for PlayArgs {
    fn execute(self) {
        let config = create_config(&self.search, self.starting_position);
        let human: Box<dyn ChessEngine> = Box::new(HumanEngine::new(StdinInput));
        let computer = computer_engine(&self.search, &config);

        println!("You are playing {}.", self.color);
        let (white, black) = match self.color {
            Color::White => (human, computer),
            Color::Black => (computer, human),
        };
        run_game_loop(
            &config,
            white,
            black,
            GameLoopOptions {
                max_moves: None,
                delay: Duration::from_millis(0),
                show_search: false,
            },
        );
    }
}
