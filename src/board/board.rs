//! Chess board state representation.

use std::hash::{Hash, Hasher};
use std::str::FromStr;

use common::bitboard::{Bitboard, Square};
use rustc_hash::FxHasher;
#[cfg(feature = "instrumentation")]
use tracing::instrument;

use crate::chess_move::ChessMove;
use crate::evaluate::{self, GameEnding};
use crate::input_handler::fen::{parse_fen, FenParseError};
use crate::move_generator::{self, ChessMoveList};
use crate::chess_position;

use super::{
    castle_rights::CastleRights,
    error::BoardError,
    fullmove_number::FullmoveNumber,
    halfmove_clock::HalfmoveClock,
    move_info::{MoveInfo, MoveRecord},
    piece_set::PieceSet,
    Color, Piece,
};

/// Represents the state of a chess board. The top level struct holds piece
/// placement and the side to move, whereas `move_info` holds castling rights,
/// the en passant target, the clocks, and the undo history.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Board {
    white: PieceSet,
    black: PieceSet,
    turn: Color,
    move_info: MoveInfo,
}

impl Default for Board {
    fn default() -> Self {
        chess_position! {
            rnbqkbnr
            pppppppp
            ........
            ........
            ........
            ........
            PPPPPPPP
            RNBQKBNR
        }
    }
}

impl Board {
    /// An empty board with white to move and every castle right still set.
    /// Callers building positions by hand usually want `lose_castle_rights`.
    pub fn new() -> Self {
        Self {
            white: PieceSet::new(),
            black: PieceSet::new(),
            turn: Color::White,
            move_info: MoveInfo::new(),
        }
    }

    pub fn pieces(&self, color: Color) -> &PieceSet {
        match color {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }

    fn pieces_mut(&mut self, color: Color) -> &mut PieceSet {
        match color {
            Color::White => &mut self.white,
            Color::Black => &mut self.black,
        }
    }

    pub fn occupied(&self) -> Bitboard {
        self.white.occupied() | self.black.occupied()
    }

    pub fn is_square_occupied(&self, square: Square) -> bool {
        square.overlaps(self.occupied())
    }

    pub fn get(&self, square: Square) -> Option<(Piece, Color)> {
        if let Some(piece) = self.white.get(square) {
            return Some((piece, Color::White));
        }
        self.black.get(square).map(|piece| (piece, Color::Black))
    }

    #[must_use = "placing a piece may fail if the square is occupied"]
    pub fn put(&mut self, square: Square, piece: Piece, color: Color) -> Result<(), BoardError> {
        if self.is_square_occupied(square) {
            return Err(BoardError::SquareOccupiedBoardPutError);
        }
        self.pieces_mut(color).put(square, piece)
    }

    pub fn remove(&mut self, square: Square) -> Option<(Piece, Color)> {
        let (_, color) = self.get(square)?;
        let piece = self.pieces_mut(color).remove(square)?;
        Some((piece, color))
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces(color).locate(Piece::King).squares().next()
    }

    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn set_turn(&mut self, turn: Color) -> Color {
        self.turn = turn;
        turn
    }

    pub fn toggle_turn(&mut self) -> Color {
        self.turn = self.turn.opposite();
        self.turn
    }

    pub fn peek_castle_rights(&self) -> CastleRights {
        self.move_info.castle_rights
    }

    pub fn set_castle_rights(&mut self, rights: CastleRights) -> CastleRights {
        self.move_info.castle_rights = rights;
        rights
    }

    pub fn lose_castle_rights(&mut self, lost_rights: CastleRights) -> CastleRights {
        let rights = self.move_info.castle_rights.without(lost_rights);
        self.set_castle_rights(rights)
    }

    pub fn peek_en_passant_target(&self) -> Option<Square> {
        self.move_info.en_passant_target
    }

    pub fn set_en_passant_target(&mut self, target: Option<Square>) -> Option<Square> {
        self.move_info.en_passant_target = target;
        target
    }

    pub fn halfmove_clock(&self) -> HalfmoveClock {
        self.move_info.halfmove_clock
    }

    pub fn set_halfmove_clock(&mut self, clock: HalfmoveClock) -> HalfmoveClock {
        self.move_info.halfmove_clock = clock;
        clock
    }

    pub fn fullmove_number(&self) -> FullmoveNumber {
        self.move_info.fullmove_number
    }

    pub fn set_fullmove_number(&mut self, number: FullmoveNumber) -> FullmoveNumber {
        self.move_info.fullmove_number = number;
        number
    }

    pub fn last_move(&self) -> Option<ChessMove> {
        self.move_info.last_move()
    }

    /// Number of moves applied to this board instance that can still be undone.
    pub fn ply_count(&self) -> usize {
        self.move_info.ply_count()
    }

    /// Hash of everything that identifies a position for repetition purposes:
    /// placement, side to move, castle rights and en passant target.
    pub fn position_key(&self) -> u64 {
        let mut hasher = FxHasher::default();
        self.white.hash(&mut hasher);
        self.black.hash(&mut hasher);
        self.turn.hash(&mut hasher);
        self.move_info.castle_rights.hash(&mut hasher);
        self.move_info.en_passant_target.hash(&mut hasher);
        hasher.finish()
    }

    /// How many times the current position has occurred, this one included.
    pub fn repetition_count(&self) -> usize {
        1 + self
            .move_info
            .count_previous_occurrences(self.position_key())
    }

    pub fn is_in_check(&self, color: Color) -> bool {
        move_generator::is_in_check(self, color)
    }

    /// All legal moves for the side to move, in a deterministic order.
    pub fn legal_moves(&mut self) -> ChessMoveList {
        move_generator::generate_legal_moves(self)
    }

    /// `None` while the game is ongoing.
    pub fn game_ending(&mut self) -> Option<GameEnding> {
        evaluate::game_ending(self)
    }

    /// Validates `chess_move` against the legal move list before applying it.
    /// An illegal move leaves the board untouched.
    pub fn apply_legal(&mut self, chess_move: ChessMove) -> Result<(), BoardError> {
        if !self.legal_moves().contains(&chess_move) {
            return Err(BoardError::IllegalMoveRequested { chess_move });
        }
        self.apply(chess_move)
    }

    /// Applies a pseudo-legal move in place. The move is not checked for
    /// leaving the mover's king in check; use `apply_legal` for untrusted input.
    #[cfg_attr(feature = "instrumentation", instrument(skip_all))]
    pub fn apply(&mut self, chess_move: ChessMove) -> Result<(), BoardError> {
        let from = chess_move.from_square();
        let to = chess_move.to_square();
        let color = self.turn;

        let (piece, piece_color) = self
            .get(from)
            .ok_or(BoardError::FromSquareIsEmptyMoveApplicationError { square: from })?;
        if piece_color != color {
            return Err(BoardError::NotSideToMoveError { square: from });
        }
        if let Some((_, target_color)) = self.get(to) {
            if target_color == color {
                return Err(BoardError::SquareOccupiedBoardPutError);
            }
        }

        let reaches_last_rank = to.overlaps(color.promotion_rank());
        match (piece, chess_move.promotion()) {
            (Piece::Pawn, None) if reaches_last_rank => {
                return Err(BoardError::PawnPromotionRequiredError)
            }
            (Piece::Pawn, Some(Piece::Pawn | Piece::King)) => {
                return Err(BoardError::InvalidPromotionError)
            }
            (Piece::Pawn, Some(_)) if !reaches_last_rank => {
                return Err(BoardError::InvalidPromotionError)
            }
            (Piece::Pawn, _) | (_, None) => (),
            (_, Some(_)) => return Err(BoardError::InvalidPromotionError),
        }

        let castle_rook = if chess_move.is_castle(self) {
            let rook_squares = castle_rook_squares(from, to);
            if self.get(rook_squares.0) != Some((Piece::Rook, color)) {
                return Err(BoardError::InvalidCastleStateError {
                    msg: "no rook on the castling corner",
                });
            }
            Some(rook_squares)
        } else {
            None
        };

        let position_key = self.position_key();
        let is_en_passant = chess_move.is_en_passant(self);

        // From here on nothing can fail: every square written below was
        // vacated first.
        let captured = if is_en_passant {
            let captured_square = Square::from_rank_file(from.rank(), to.file());
            self.remove(captured_square)
                .map(|(captured_piece, _)| (captured_piece, captured_square))
        } else {
            self.remove(to).map(|(captured_piece, _)| (captured_piece, to))
        };

        self.remove(from);
        let placed = chess_move.promotion().unwrap_or(piece);
        self.put(to, placed, color)?;

        if let Some((rook_from, rook_to)) = castle_rook {
            self.remove(rook_from);
            self.put(rook_to, Piece::Rook, color)?;
        }

        let record = MoveRecord {
            chess_move,
            captured,
            castle_rights: self.move_info.castle_rights,
            en_passant_target: self.move_info.en_passant_target,
            halfmove_clock: self.move_info.halfmove_clock,
            fullmove_number: self.move_info.fullmove_number,
            position_key,
        };

        let is_double_push =
            piece == Piece::Pawn && (to.rank() as i8 - from.rank() as i8).abs() == 2;
        self.move_info.en_passant_target = if is_double_push {
            Some(Square::from_rank_file((from.rank() + to.rank()) / 2, from.file()))
        } else {
            None
        };

        let lost_rights =
            CastleRights::lost_by_touching(from).with(CastleRights::lost_by_touching(to));
        self.move_info.castle_rights = self.move_info.castle_rights.without(lost_rights);

        self.move_info.halfmove_clock = if piece == Piece::Pawn || captured.is_some() {
            self.move_info.halfmove_clock.reset()
        } else {
            self.move_info.halfmove_clock.increment()
        };
        if color == Color::Black {
            self.move_info.fullmove_number = self.move_info.fullmove_number.increment();
        }

        self.turn = color.opposite();
        self.move_info.push(record);
        Ok(())
    }

    /// Reverts the most recently applied move, restoring every field it changed.
    #[cfg_attr(feature = "instrumentation", instrument(skip_all))]
    pub fn undo(&mut self) -> Result<ChessMove, BoardError> {
        let record = match self.move_info.pop() {
            Some(record) => record,
            None => {
                debug_assert!(false, "undo called without a matching apply");
                return Err(BoardError::NothingToUndoError);
            }
        };
        let chess_move = record.chess_move;
        let from = chess_move.from_square();
        let to = chess_move.to_square();
        let color = self.turn.opposite();

        let (moved, _) = self
            .remove(to)
            .ok_or(BoardError::ToSquareIsEmptyMoveUndoError { square: to })?;
        let original = match chess_move.promotion() {
            Some(_) => Piece::Pawn,
            None => moved,
        };
        self.put(from, original, color)?;

        let was_castle = original == Piece::King && (to.file() as i8 - from.file() as i8).abs() == 2;
        if was_castle {
            let (rook_from, rook_to) = castle_rook_squares(from, to);
            self.remove(rook_to);
            self.put(rook_from, Piece::Rook, color)?;
        }

        if let Some((captured_piece, captured_square)) = record.captured {
            self.put(captured_square, captured_piece, color.opposite())?;
        }

        self.move_info.castle_rights = record.castle_rights;
        self.move_info.en_passant_target = record.en_passant_target;
        self.move_info.halfmove_clock = record.halfmove_clock;
        self.move_info.fullmove_number = record.fullmove_number;
        self.turn = color;

        Ok(chess_move)
    }

    /// Convert the board position to FEN (Forsyth-Edwards Notation) string
    pub fn to_fen(&self) -> String {
        crate::input_handler::fen_serialize::to_fen(self)
    }
}

/// Rook origin and destination for a castle whose king travels `from` -> `to`.
fn castle_rook_squares(from: Square, to: Square) -> (Square, Square) {
    let rank = from.rank();
    if to.file() > from.file() {
        (Square::from_rank_file(rank, 7), Square::from_rank_file(rank, 5))
    } else {
        (Square::from_rank_file(rank, 0), Square::from_rank_file(rank, 3))
    }
}

impl FromStr for Board {
    type Err = FenParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        parse_fen(input)
    }
}
