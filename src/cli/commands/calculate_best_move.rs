//! Calculate best move command - determine the best move from a position.

use chessmatch::board::Board;
use chessmatch::searcher::SearchContext;
use log::info;
use structopt::StructOpt;

use super::Command;

#[derive(StructOpt)]
pub struct CalculateBestMoveArgs {
    #[structopt(short, long, default_value = "3")]
    pub depth: u8,
    #[structopt(long = "fen")]
    pub starting_position: Board,
}

impl Command for CalculateBestMoveArgs {
    fn execute(self) {
        let mut board = self.starting_position;
        let mut search_context = SearchContext::new(self.depth);

        match search_context.search(&mut board) {
            Ok(best_move) => {
                println!("{}", best_move);
                info!(
                    "score: {:?}, positions searched: {}, duration: {:?}",
                    search_context.last_score(),
                    search_context.searched_position_count(),
                    search_context.last_duration()
                );
            }
            Err(err) => eprintln!("Failed to calculate best move: {}", err),
        }
    }
}
