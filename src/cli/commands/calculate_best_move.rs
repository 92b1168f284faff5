//! Calculate best move command - determine the best move from a position.

use minimax_chess::board::Board;
use minimax_chess::chess_search::{search_best_move, search_best_move_iteratively};
use structopt::StructOpt;

use super::util::{create_config, SearchArgs};
use super::Command;

#[derive(StructOpt)]
pub struct CalculateBestMoveArgs {
    #[structopt(flatten)]
    pub search: SearchArgs,
    #[structopt(long = "fen")]
    pub starting_position: Board,
}

impl Command for CalculateBestMoveArgs {
    fn execute(self) {
        let config = create_config(&self.search, self.starting_position);
        let mut context = config.search_context();
        let mut board = config.starting_position;

        let result = if self.search.iterative {
            search_best_move_iteratively(&mut context, &mut board)
        } else {
            search_best_move(&mut context, &mut board)
        };

        match result {
            Ok(result) => match result.best_move {
                Some(best_move) => {
                    println!("{}", best_move);
                    let line: Vec<String> = result
                        .principal_variation
                        .iter()
                        .map(|chess_move| chess_move.to_string())
                        .collect();
                    println!("score: {}", result.score);
                    println!("line: {}", line.join(" "));
                    println!(
                        "depth: {}, positions: {}, cutoffs: {}, time: {:?}",
                        result.stats.depth,
                        result.stats.positions,
                        result.stats.cutoffs,
                        result.stats.duration
                    );
                }
                None => eprintln!("There are no valid moves in the given position."),
            },
            Err(err) => eprintln!("Failed to calculate best move: {}", err),
        }
    }
}
