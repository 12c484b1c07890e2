use log::debug;

use crate::board::Board;
use crate::chess_move::ChessMove;
use crate::searcher::{SearchContext, SearchError};

use super::{MoveSource, ProviderError};

/// Local minimax search at the depth requested by the match.
#[derive(Debug, Clone)]
pub struct SearchProvider {
    context: SearchContext,
    parallel: bool,
}

impl SearchProvider {
    pub fn new() -> Self {
        Self {
            context: SearchContext::new(1),
            parallel: false,
        }
    }

    /// Searches root moves on the rayon thread pool. The chosen move is the
    /// same as with the sequential search.
    pub fn parallel() -> Self {
        Self {
            parallel: true,
            ..Self::new()
        }
    }

    pub fn context(&self) -> &SearchContext {
        &self.context
    }
}

impl Default for SearchProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveSource for SearchProvider {
    fn provide(&mut self, board: &mut Board, depth: u8) -> Result<ChessMove, ProviderError> {
        self.context.set_search_depth(depth);
        let result = if self.parallel {
            self.context.search_parallel(board)
        } else {
            self.context.search(board)
        };

        match result {
            Ok(chess_move) => {
                debug!(
                    "search picked {} with score {:?} after {} positions",
                    chess_move,
                    self.context.last_score(),
                    self.context.searched_position_count()
                );
                Ok(chess_move)
            }
            Err(SearchError::NoLegalMoves) => Err(ProviderError::NoLegalMoves),
            Err(error @ SearchError::ZeroDepth) => Err(ProviderError::Unavailable {
                reason: error.to_string(),
            }),
        }
    }
}
