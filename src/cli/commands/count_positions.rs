//! Count positions command - count possible positions at a given depth.

use chessmatch::board::Board;
use chessmatch::game::position_counter::{run_count_positions, CountPositionsStrategy};
use structopt::StructOpt;

use super::util::starting_position;
use super::Command;

#[derive(StructOpt)]
pub struct CountPositionsArgs {
    #[structopt(short, long, default_value = "3")]
    pub depth: u8,
    #[structopt(short, long, default_value = "all")]
    pub strategy: CountPositionsStrategy,
    #[structopt(long = "fen")]
    pub starting_position: Option<Board>,
}

impl Command for CountPositionsArgs {
    fn execute(self) {
        let board = starting_position(self.starting_position);
        if let Err(err) = run_count_positions(&board, self.depth, self.strategy) {
            eprintln!("Failed to count positions: {}", err);
        }
    }
}
