//! Depth-limited minimax search with alpha-beta pruning over material
//! evaluation. Moves are searched in generation order, without ordering
//! heuristics or caching, so the result depends only on the position and the
//! depth.

use std::time::{Duration, Instant};

use log::debug;
use rayon::prelude::*;
use thiserror::Error;
#[cfg(feature = "instrumentation")]
use tracing::instrument;

use crate::board::{Board, Color};
use crate::chess_move::ChessMove;
use crate::evaluate;


/// Search window sentinels. They bound alpha and beta and are never returned
/// as the score of a position.
pub const SCORE_MIN: i32 = i32::MIN;
pub const SCORE_MAX: i32 = i32::MAX;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SearchError {
    #[error("no legal moves in the current position")]
    NoLegalMoves,
    #[error("search depth must be at least 1")]
    ZeroDepth,
}

/// Picks the best move for the side to move. The board is restored before
/// returning.
pub fn best_move(board: &mut Board, depth: u8) -> Result<ChessMove, SearchError> {
    SearchContext::new(depth).search(board)
}

/// Same result as `best_move`, with root moves searched on separate threads.
pub fn best_move_parallel(board: &Board, depth: u8) -> Result<ChessMove, SearchError> {
    SearchContext::new(depth).search_parallel(board)
}

/// Minimax value of `board` searched `depth` plies deep within the
/// `(alpha, beta)` window. `maximizing` is true when the side to move is the
/// one trying to raise the score.
pub fn minimax(board: &mut Board, depth: u8, alpha: i32, beta: i32, maximizing: bool) -> i32 {
    let mut searched_position_count = 0;
    alpha_beta(
        board,
        depth,
        alpha,
        beta,
        maximizing,
        &mut searched_position_count,
    )
}

/// Holds the depth bound and the statistics of the most recent search.
#[derive(Debug, Clone)]
pub struct SearchContext {
    search_depth: u8,
    searched_position_count: usize,
    last_score: Option<i32>,
    last_duration: Option<Duration>,
}

impl SearchContext {
    pub fn new(depth: u8) -> Self {
        Self {
            search_depth: depth,
            searched_position_count: 0,
            last_score: None,
            last_duration: None,
        }
    }

    pub fn search_depth(&self) -> u8 {
        self.search_depth
    }

    pub fn set_search_depth(&mut self, depth: u8) {
        self.search_depth = depth;
    }

    pub fn searched_position_count(&self) -> usize {
        self.searched_position_count
    }

    /// Score of the move picked by the last successful search.
    pub fn last_score(&self) -> Option<i32> {
        self.last_score
    }

    pub fn last_duration(&self) -> Option<Duration> {
        self.last_duration
    }

    pub fn reset_stats(&mut self) {
        self.searched_position_count = 0;
        self.last_score = None;
        self.last_duration = None;
    }

    #[cfg_attr(feature = "instrumentation", instrument(skip_all))]
    pub fn search(&mut self, board: &mut Board) -> Result<ChessMove, SearchError> {
        self.reset_stats();
        let started_at = Instant::now();
        let depth = self.check_depth()?;

        let candidates = board.legal_moves();
        if candidates.is_empty() {
            return Err(SearchError::NoLegalMoves);
        }

        let opponent_maximizes = board.turn().opposite().maximize_score();
        let mut scored = Vec::with_capacity(candidates.len());
        for &chess_move in candidates.iter() {
            let mut count = 0;
            let score = score_child(board, chess_move, |board| {
                alpha_beta(
                    board,
                    depth - 1,
                    SCORE_MIN,
                    SCORE_MAX,
                    opponent_maximizes,
                    &mut count,
                )
            });
            self.searched_position_count += count;
            if let Some(score) = score {
                debug!("root move {} scored {}", chess_move, score);
                scored.push((chess_move, score));
            }
        }

        self.finish(board.turn(), scored, started_at)
    }

    #[cfg_attr(feature = "instrumentation", instrument(skip_all))]
    pub fn search_parallel(&mut self, board: &Board) -> Result<ChessMove, SearchError> {
        self.reset_stats();
        let started_at = Instant::now();
        let depth = self.check_depth()?;

        let mut root = board.clone();
        let candidates = root.legal_moves();
        if candidates.is_empty() {
            return Err(SearchError::NoLegalMoves);
        }

        let opponent_maximizes = board.turn().opposite().maximize_score();
        let results: Vec<(ChessMove, Option<i32>, usize)> = candidates
            .par_iter()
            .map(|&chess_move| {
                let mut local_board = board.clone();
                let mut count = 0;
                let score = score_child(&mut local_board, chess_move, |board| {
                    alpha_beta(
                        board,
                        depth - 1,
                        SCORE_MIN,
                        SCORE_MAX,
                        opponent_maximizes,
                        &mut count,
                    )
                });
                (chess_move, score, count)
            })
            .collect();

        self.searched_position_count = results.iter().map(|(_, _, count)| count).sum();
        let scored = results
            .into_iter()
            .filter_map(|(chess_move, score, _)| score.map(|score| (chess_move, score)))
            .collect();

        self.finish(board.turn(), scored, started_at)
    }

    fn check_depth(&self) -> Result<u8, SearchError> {
        match self.search_depth {
            0 => Err(SearchError::ZeroDepth),
            depth => Ok(depth),
        }
    }

    fn finish(
        &mut self,
        mover: Color,
        scored: Vec<(ChessMove, i32)>,
        started_at: Instant,
    ) -> Result<ChessMove, SearchError> {
        let (best_move, best_score) =
            select_root_move(mover, &scored).ok_or(SearchError::NoLegalMoves)?;

        self.last_score = Some(best_score);
        self.last_duration = Some(started_at.elapsed());
        debug!(
            "searched {} positions in {:?}, best move {} ({})",
            self.searched_position_count,
            started_at.elapsed(),
            best_move,
            best_score
        );
        Ok(best_move)
    }
}

/// White keeps the first strictly greatest score, black the first strictly
/// smallest.
fn select_root_move(mover: Color, scored: &[(ChessMove, i32)]) -> Option<(ChessMove, i32)> {
    let maximize = mover.maximize_score();
    let mut best: Option<(ChessMove, i32)> = None;
    for &(chess_move, score) in scored {
        let improves = match best {
            None => true,
            Some((_, best_score)) if maximize => score > best_score,
            Some((_, best_score)) => score < best_score,
        };
        if improves {
            best = Some((chess_move, score));
        }
    }
    best
}

/// Applies `chess_move`, scores the resulting position with `score_fn` and
/// restores the board. `None` if the move could not be applied.
fn score_child<F>(board: &mut Board, chess_move: ChessMove, score_fn: F) -> Option<i32>
where
    F: FnOnce(&mut Board) -> i32,
{
    board.apply(chess_move).ok()?;
    let score = score_fn(board);
    board.undo().ok()?;
    Some(score)
}

fn alpha_beta(
    board: &mut Board,
    depth: u8,
    mut alpha: i32,
    mut beta: i32,
    maximizing: bool,
    searched_position_count: &mut usize,
) -> i32 {
    *searched_position_count += 1;

    if depth == 0 {
        return evaluate::score(board);
    }

    let candidates = board.legal_moves();
    if candidates.is_empty() || evaluate::is_draw_by_rule(board) {
        return evaluate::score(board);
    }

    let mut best = if maximizing { SCORE_MIN } else { SCORE_MAX };
    for &chess_move in candidates.iter() {
        let score = score_child(board, chess_move, |board| {
            alpha_beta(
                board,
                depth - 1,
                alpha,
                beta,
                !maximizing,
                searched_position_count,
            )
        });
        let score = match score {
            Some(score) => score,
            None => continue,
        };

        if maximizing {
            best = best.max(score);
            alpha = alpha.max(best);
        } else {
            best = best.min(score);
            beta = beta.min(best);
        }

        if beta <= alpha {
            break;
        }
    }

    best
}
