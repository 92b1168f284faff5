//! Perft command - count the leaf positions of the move tree.

use std::time::Instant;

use minimax_chess::board::Board;
use minimax_chess::input_handler::STARTING_POSITION_FEN;
use minimax_chess::move_generator::MoveGenerator;
use structopt::StructOpt;

use super::Command;

#[derive(StructOpt)]
pub struct PerftArgs {
    #[structopt(short, long, default_value = "4")]
    pub depth: u8,
    #[structopt(long = "fen", default_value = STARTING_POSITION_FEN)]
    pub starting_position: Board,
    #[structopt(long, help = "Break the count down by root move")]
    pub divide: bool,
}

impl Command for PerftArgs {
    fn execute(self) {
        let move_generator = MoveGenerator::new();
        let mut board = self.starting_position;

        if let Err(error) = board.validate() {
            eprintln!("{}", error);
            return;
        }

        if self.divide {
            let mut total = 0;
            for (chess_move, count) in move_generator.perft_divide(self.depth, &mut board) {
                println!("{}: {}", chess_move, count);
                total += count;
            }
            println!("\ntotal: {}", total);
            return;
        }

        let mut total_positions = 0;
        let started = Instant::now();
        for depth in 1..=self.depth {
            let depth_started = Instant::now();
            let count = move_generator.perft(depth, &mut board);
            let duration = depth_started.elapsed();
            total_positions += count;
            println!(
                "depth: {}, positions: {}, positions per second: {:.0}",
                depth,
                count,
                count as f64 / duration.as_secs_f64()
            );
        }

        let duration = started.elapsed();
        println!(
            "total positions: {}, total duration: {:?}, average positions per second: {:.0}",
            total_positions,
            duration,
            total_positions as f64 / duration.as_secs_f64()
        );
    }
}
