use common::bitboard::Square;

use super::castle_rights::CastleRights;
use super::fullmove_number::FullmoveNumber;
use super::halfmove_clock::HalfmoveClock;
use super::piece::Piece;
use crate::chess_move::ChessMove;

/// Everything `Board::undo` needs to restore the position before a move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveRecord {
    pub chess_move: ChessMove,
    pub captured: Option<(Piece, Square)>,
    pub castle_rights: CastleRights,
    pub en_passant_target: Option<Square>,
    pub halfmove_clock: HalfmoveClock,
    pub fullmove_number: FullmoveNumber,
    /// Key of the position the move was played from, for repetition counting.
    pub position_key: u64,
}

/// Stores the per-move state that is not derivable from piece placement:
/// en passant target, castle rights, position clocks, and the stack of
/// applied moves used to undo them.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct MoveInfo {
    pub castle_rights: CastleRights,
    pub en_passant_target: Option<Square>,
    pub halfmove_clock: HalfmoveClock,
    pub fullmove_number: FullmoveNumber,
    history: Vec<MoveRecord>,
}

impl MoveInfo {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn push(&mut self, record: MoveRecord) {
        self.history.push(record);
    }

    pub fn pop(&mut self) -> Option<MoveRecord> {
        self.history.pop()
    }

    pub fn last_move(&self) -> Option<ChessMove> {
        self.history.last().map(|record| record.chess_move)
    }

    pub fn ply_count(&self) -> usize {
        self.history.len()
    }

    /// How many earlier positions since the last irreversible move share `key`.
    pub fn count_previous_occurrences(&self, key: u64) -> usize {
        self.history
            .iter()
            .rev()
            .take(self.halfmove_clock.value() as usize)
            .filter(|record| record.position_key == key)
            .count()
    }
}
