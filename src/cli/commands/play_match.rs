//! Match command - play one or more games between two move providers.

use std::path::PathBuf;
use std::time::Duration;

use chessmatch::board::Board;
use chessmatch::game::{LogReporter, MatchConfig, MatchLoop, ScoreTally};
use chessmatch::provider::{
    MoveProvider, ProviderConfig, ProviderKind, RemoteServiceConfig, SubprocessEngineConfig,
};
use structopt::StructOpt;

use super::util::starting_position;
use super::Command;

#[derive(StructOpt)]
pub struct MatchArgs {
    /// Provider for white: search, random, human, remote or engine.
    #[structopt(long, default_value = "search")]
    pub white: ProviderKind,
    /// Provider for black: search, random, human, remote or engine.
    #[structopt(long, default_value = "search")]
    pub black: ProviderKind,
    #[structopt(short, long, default_value = "3")]
    pub depth: u8,
    #[structopt(long = "fen")]
    pub starting_position: Option<Board>,
    /// Pause between moves, in milliseconds.
    #[structopt(long, default_value = "1000")]
    pub delay: u64,
    #[structopt(long)]
    pub move_limit: Option<usize>,
    #[structopt(long, default_value = "1")]
    pub games: u32,
    #[structopt(long, default_value = "http://127.0.0.1:8000/move")]
    pub remote_url: String,
    #[structopt(long, default_value = "10000")]
    pub remote_timeout_ms: u64,
    #[structopt(long, default_value = "stockfish", parse(from_os_str))]
    pub engine_path: PathBuf,
    #[structopt(long, default_value = "1000")]
    pub movetime_ms: u64,
    /// Search root moves in parallel.
    #[structopt(long)]
    pub parallel: bool,
    #[structopt(long)]
    pub seed: Option<u64>,
}

impl MatchArgs {
    fn provider_config(&self, game: u32) -> ProviderConfig {
        ProviderConfig {
            remote: RemoteServiceConfig {
                url: self.remote_url.clone(),
                timeout: Duration::from_millis(self.remote_timeout_ms),
            },
            engine: SubprocessEngineConfig {
                path: self.engine_path.clone(),
                movetime: Duration::from_millis(self.movetime_ms),
                ..Default::default()
            },
            parallel_search: self.parallel,
            seed: self.seed.map(|seed| seed.wrapping_add(game as u64)),
        }
    }
}

impl Command for MatchArgs {
    fn execute(self) {
        let board = starting_position(self.starting_position.clone());
        let mut tally = ScoreTally::new();

        for game in 0..self.games {
            let provider_config = self.provider_config(game);
            let providers = MoveProvider::from_kind(self.white, &provider_config).and_then(
                |white| Ok((white, MoveProvider::from_kind(self.black, &provider_config)?)),
            );
            let (white, black) = match providers {
                Ok(providers) => providers,
                Err(err) => {
                    eprintln!("Failed to set up move providers: {}", err);
                    return;
                }
            };

            let config = MatchConfig {
                starting_position: board.clone(),
                search_depth: self.depth,
                turn_delay: Duration::from_millis(self.delay),
                move_limit: self.move_limit,
                seed: provider_config.seed,
            };
            let mut match_loop = MatchLoop::new(white, black, config);

            match match_loop.run(&mut (LogReporter, &mut tally)) {
                Ok(outcome) => {
                    println!("{}", match_loop.board());
                    println!("game {}: {}", game + 1, outcome);
                }
                Err(err) => {
                    eprintln!("Match aborted: {}", err);
                    return;
                }
            }
        }

        println!("{}", tally);
    }
}
