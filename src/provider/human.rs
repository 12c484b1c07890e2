use common::bitboard::Square;
use log::{info, warn};

use crate::board::{Board, Piece};
use crate::chess_move::ChessMove;
use crate::input_handler::{InputError, SquareSelector, TerminalSquareSelector};
use crate::move_generator::ChessMoveList;

use super::{MoveSource, ProviderError};

/// A person choosing moves by selecting an origin square and then a
/// destination square. Selections that do not form a legal move are logged
/// and ignored. Pawns reaching the last rank become queens.
pub struct HumanProvider {
    selector: Box<dyn SquareSelector>,
}

impl HumanProvider {
    pub fn new(selector: Box<dyn SquareSelector>) -> Self {
        Self { selector }
    }

    pub fn stdin() -> Self {
        Self::new(Box::new(TerminalSquareSelector::stdin()))
    }

    fn next_square(&mut self) -> Result<Option<Square>, ProviderError> {
        match self.selector.select_square() {
            Ok(square) => Ok(Some(square)),
            Err(error @ InputError::InvalidInput { .. }) => {
                warn!("ignoring selection: {}", error);
                Ok(None)
            }
            Err(error) => Err(ProviderError::Unavailable {
                reason: error.to_string(),
            }),
        }
    }
}

/// The legal move from `from` to `to`, preferring a queen when the move
/// promotes.
fn find_move(candidates: &ChessMoveList, from: Square, to: Square) -> Option<ChessMove> {
    candidates
        .iter()
        .filter(|m| m.from_square() == from && m.to_square() == to)
        .find(|m| matches!(m.promotion(), None | Some(Piece::Queen)))
        .copied()
}

fn has_moves_from(candidates: &ChessMoveList, square: Square) -> bool {
    candidates.iter().any(|m| m.from_square() == square)
}

impl MoveSource for HumanProvider {
    fn provide(&mut self, board: &mut Board, _depth: u8) -> Result<ChessMove, ProviderError> {
        let candidates = board.legal_moves();
        if candidates.is_empty() {
            return Err(ProviderError::NoLegalMoves);
        }

        info!("{} to move, select a piece", board.turn());
        let mut origin: Option<Square> = None;
        loop {
            let square = match self.next_square()? {
                Some(square) => square,
                None => continue,
            };

            match origin {
                None if has_moves_from(&candidates, square) => origin = Some(square),
                None => warn!("no legal moves from {}", square),
                Some(from) => {
                    if let Some(chess_move) = find_move(&candidates, from, square) {
                        return Ok(chess_move);
                    }
                    if has_moves_from(&candidates, square) {
                        origin = Some(square);
                    } else {
                        warn!("{} to {} is not a legal move", from, square);
                        origin = None;
                    }
                }
            }
        }
    }
}
