//! Chess move generation algorithms.

mod targets;
#[cfg(test)]
mod tests;

use log::error;
use rayon::prelude::*;
use smallvec::SmallVec;
#[cfg(feature = "instrumentation")]
use tracing::instrument;

use crate::board::error::BoardError;
use crate::board::{Board, Color};
use crate::chess_move::ChessMove;

pub use targets::{generate_pseudo_legal_moves, is_square_attacked};

/// A list of chess moves that is optimized for small sizes.
pub type ChessMoveList = SmallVec<[ChessMove; 64]>;

/// Minimum number of root moves before perft splits work across threads.
const PARALLEL_MOVE_THRESHOLD: usize = 10;

pub fn is_in_check(board: &Board, color: Color) -> bool {
    match board.king_square(color) {
        Some(king) => is_square_attacked(board, king, color.opposite()),
        None => false,
    }
}

/// Generates every legal move for the side to move. The board is mutated while
/// each candidate is tried and is restored before returning.
#[cfg_attr(feature = "instrumentation", instrument(skip_all))]
pub fn generate_legal_moves(board: &mut Board) -> ChessMoveList {
    let mut candidates = ChessMoveList::new();
    generate_pseudo_legal_moves(board, &mut candidates);

    let player = board.turn();
    candidates.retain(|chess_move| {
        if board.apply(*chess_move).is_err() {
            return false;
        }
        let is_legal = !is_in_check(board, player);
        match board.undo() {
            Ok(_) => is_legal,
            Err(err) => {
                error!("failed to undo {} while filtering legal moves: {}", chess_move, err);
                debug_assert!(false, "undo of a just applied move failed: {}", err);
                false
            }
        }
    });
    candidates
}

/// True if the side to move has at least one legal move.
pub fn has_legal_move(board: &mut Board) -> bool {
    !generate_legal_moves(board).is_empty()
}

/// Counts leaf positions reachable in exactly `depth` plies (perft).
pub fn count_positions(depth: u8, board: &mut Board) -> Result<usize, BoardError> {
    if depth == 0 {
        return Ok(1);
    }

    let candidates = generate_legal_moves(board);
    if depth == 1 {
        return Ok(candidates.len());
    }

    if candidates.len() >= PARALLEL_MOVE_THRESHOLD {
        candidates
            .par_iter()
            .map(|chess_move| {
                let mut local_board = board.clone();
                local_board.apply(*chess_move)?;
                count_positions(depth - 1, &mut local_board)
            })
            .sum()
    } else {
        let mut count = 0;
        for chess_move in candidates.iter() {
            board.apply(*chess_move)?;
            count += count_positions(depth - 1, board)?;
            board.undo()?;
        }
        Ok(count)
    }
}
