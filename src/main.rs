mod cli;

use cli::commands::Command;
use structopt::StructOpt;

fn main() {
    env_logger::init();
    #[cfg(feature = "instrumentation")]
    chessmatch::instrumentation::init_tracing();

    cli::Chess::from_args().execute();
}
