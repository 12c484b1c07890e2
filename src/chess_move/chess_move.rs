use std::fmt;
use std::str::FromStr;

use common::bitboard::Square;
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::board::{Board, Piece};

static UCI_MOVE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new("^([a-h][1-8])([a-h][1-8])([qrbn])?$").expect("UCI_MOVE_RE regex should be valid")
});

#[derive(Error, Debug, PartialEq, Eq)]
pub enum MoveParseError {
    #[error("invalid move notation: {input:?}")]
    InvalidMoveNotation { input: String },
}

/// A move from one square to another, with an optional promotion piece.
/// Whether the move captures, castles or takes en passant depends on the
/// position it is played in, so those properties are computed on demand.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChessMove {
    from_square: Square,
    to_square: Square,
    promotion: Option<Piece>,
}

impl ChessMove {
    pub fn new(from_square: Square, to_square: Square) -> Self {
        Self {
            from_square,
            to_square,
            promotion: None,
        }
    }

    pub fn with_promotion(from_square: Square, to_square: Square, promotion: Piece) -> Self {
        Self {
            from_square,
            to_square,
            promotion: Some(promotion),
        }
    }

    pub fn from_square(&self) -> Square {
        self.from_square
    }

    pub fn to_square(&self) -> Square {
        self.to_square
    }

    pub fn promotion(&self) -> Option<Piece> {
        self.promotion
    }

    pub fn is_capture(&self, board: &Board) -> bool {
        let opponent = board.turn().opposite();
        matches!(board.get(self.to_square), Some((_, color)) if color == opponent)
            || self.is_en_passant(board)
    }

    /// A king moving two files along its rank.
    pub fn is_castle(&self, board: &Board) -> bool {
        matches!(board.get(self.from_square), Some((Piece::King, _)))
            && self.from_square.rank() == self.to_square.rank()
            && (self.to_square.file() as i8 - self.from_square.file() as i8).abs() == 2
    }

    /// A pawn moving diagonally onto the current en passant target.
    /// A diagonal pawn step onto the en passant target, with the enemy pawn
    /// that double-pushed standing beside the mover.
    pub fn is_en_passant(&self, board: &Board) -> bool {
        let color = match board.get(self.from_square) {
            Some((Piece::Pawn, color)) => color,
            _ => return false,
        };
        if board.peek_en_passant_target() != Some(self.to_square)
            || self.from_square.file() == self.to_square.file()
            || board.is_square_occupied(self.to_square)
        {
            return false;
        }
        let captured = Square::from_rank_file(self.from_square.rank(), self.to_square.file());
        board.get(captured) == Some((Piece::Pawn, color.opposite()))
    }

    pub fn to_uci(&self) -> String {
        match self.promotion {
            Some(piece) => format!(
                "{}{}{}",
                self.from_square.to_algebraic(),
                self.to_square.to_algebraic(),
                piece.to_lowercase_char()
            ),
            None => format!(
                "{}{}",
                self.from_square.to_algebraic(),
                self.to_square.to_algebraic()
            ),
        }
    }

    /// Parses long algebraic notation such as `e2e4` or `e7e8q`. The result
    /// is only syntactically valid; legality is up to the caller.
    pub fn from_uci(input: &str) -> Result<Self, MoveParseError> {
        let invalid = || MoveParseError::InvalidMoveNotation {
            input: input.to_string(),
        };
        let caps = UCI_MOVE_RE.captures(input.trim()).ok_or_else(invalid)?;

        let from_square = Square::from_algebraic(&caps[1]).ok_or_else(invalid)?;
        let to_square = Square::from_algebraic(&caps[2]).ok_or_else(invalid)?;
        let promotion = match caps.get(3) {
            Some(m) => {
                let c = m.as_str().chars().next().ok_or_else(invalid)?;
                Some(Piece::from_lowercase_char(c).ok_or_else(invalid)?)
            }
            None => None,
        };

        Ok(Self {
            from_square,
            to_square,
            promotion,
        })
    }
}

impl FromStr for ChessMove {
    type Err = MoveParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_uci(s)
    }
}

impl fmt::Display for ChessMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}

impl fmt::Debug for ChessMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChessMove({})", self.to_uci())
    }
}

#[macro_export]
macro_rules! std_move {
    ($from:expr, $to:expr) => {
        $crate::chess_move::ChessMove::new($from, $to)
    };
}

#[macro_export]
macro_rules! promotion_move {
    ($from:expr, $to:expr, $piece:expr) => {
        $crate::chess_move::ChessMove::with_promotion($from, $to, $piece)
    };
}
