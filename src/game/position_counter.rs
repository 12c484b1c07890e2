use std::str::FromStr;
use std::time::{Duration, Instant};

use crate::board::error::BoardError;
use crate::board::Board;
use crate::move_generator;
use crate::searcher::{SearchContext, SearchError};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountPositionsStrategy {
    All,
    AlphaBeta,
}

impl FromStr for CountPositionsStrategy {
    type Err = &'static str;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(CountPositionsStrategy::All),
            "alpha-beta" => Ok(CountPositionsStrategy::AlphaBeta),
            _ => Err("invalid strategy; options are: all, alpha-beta"),
        }
    }
}

#[derive(Error, Debug)]
pub enum CountPositionsError {
    #[error("Board error: {0}")]
    BoardError(#[from] BoardError),
    #[error("Search error: {0}")]
    SearchError(#[from] SearchError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DepthCount {
    pub depth: u8,
    pub positions: usize,
    pub duration: Duration,
}

/// Counts positions for every depth from 1 to `depth`, either every leaf
/// (perft) or the nodes visited by the alpha-beta search.
pub fn count_positions_by_depth(
    board: &Board,
    depth: u8,
    strategy: CountPositionsStrategy,
) -> Result<Vec<DepthCount>, CountPositionsError> {
    let mut counts = Vec::new();

    for depth in 1..=depth {
        let mut board = board.clone();
        let started_at = Instant::now();
        let positions = match strategy {
            CountPositionsStrategy::All => move_generator::count_positions(depth, &mut board)?,
            CountPositionsStrategy::AlphaBeta => {
                let mut search_context = SearchContext::new(depth);
                search_context.search(&mut board)?;
                search_context.searched_position_count()
            }
        };
        counts.push(DepthCount {
            depth,
            positions,
            duration: started_at.elapsed(),
        });
    }

    Ok(counts)
}

pub fn run_count_positions(
    board: &Board,
    depth: u8,
    strategy: CountPositionsStrategy,
) -> Result<(), CountPositionsError> {
    let mut total_positions = 0;
    let mut total_duration = Duration::from_secs(0);

    for count in count_positions_by_depth(board, depth, strategy)? {
        let positions_per_second = count.positions as f64 / count.duration.as_secs_f64();
        total_positions += count.positions;
        total_duration += count.duration;

        println!(
            "depth: {}, positions: {}, positions per second: {:.0}",
            count.depth, count.positions, positions_per_second
        );
    }

    println!(
        "total positions: {}, total duration: {:?}, positions per second: {:.0}",
        total_positions,
        total_duration,
        total_positions as f64 / total_duration.as_secs_f64()
    );
    Ok(())
}
