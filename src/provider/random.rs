use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::board::Board;
use crate::chess_move::ChessMove;

use super::{MoveSource, ProviderError};

/// Picks uniformly among the legal moves. Also the fallback for providers
/// that depend on something outside the process.
#[derive(Debug, Clone)]
pub struct RandomProvider {
    rng: StdRng,
}

impl RandomProvider {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }

    pub fn choose(&mut self, board: &mut Board) -> Result<ChessMove, ProviderError> {
        let candidates = board.legal_moves();
        candidates
            .choose(&mut self.rng)
            .copied()
            .ok_or(ProviderError::NoLegalMoves)
    }
}

impl Default for RandomProvider {
    fn default() -> Self {
        Self::new(None)
    }
}

impl MoveSource for RandomProvider {
    fn provide(&mut self, board: &mut Board, _depth: u8) -> Result<ChessMove, ProviderError> {
        self.choose(board)
    }
}
