mod cli;

use structopt::StructOpt;

use crate::cli::commands::Command;
use crate::cli::Chess;

fn main() {
    env_logger::init();
    Chess::from_args().execute();
}
