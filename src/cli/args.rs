//! CLI argument parsing using StructOpt.

use structopt::StructOpt;

use crate::cli::commands::{
    calculate_best_move::CalculateBestMoveArgs, count_positions::CountPositionsArgs,
    play_match::MatchArgs,
};

#[derive(StructOpt)]
#[structopt(
    name = "chessmatch",
    about = "Play chess matches between interchangeable move providers ♛"
)]
pub enum Chess {
    #[structopt(
        name = "match",
        about = "Play a match between two move providers chosen with `--white` and `--black` (search, random, human, remote, engine; default: search). The search provider looks `--depth` plies ahead (default: 3). Providers that fail fall back to random moves. The initial position can be specified using FEN notation with `--fen` (default: starting position)."
    )]
    Match(MatchArgs),
    #[structopt(
        name = "calculate-best-move",
        about = "Use the search to determine the best move from a given position, provided in FEN notation with `--fen` (required). You can optionally specify the depth of the search with the `--depth` arg (default: 3)."
    )]
    CalculateBestMove(CalculateBestMoveArgs),
    #[structopt(
        name = "count-positions",
        about = "Count the number of possible positions for a given `--depth` (default: 3), and reports the time it took to do so. By default, this counts all positions (perft). The routine can be run with alpha-beta pruning by selecting `--strategy alpha-beta`."
    )]
    CountPositions(CountPositionsArgs),
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
            Match(cmd),
            CalculateBestMove(cmd),
            CountPositions(cmd),
        }
    }
}
