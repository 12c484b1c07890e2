use common::bitboard::Square;
use thiserror::Error;

use crate::chess_move::ChessMove;

#[derive(Error, Debug, PartialEq)]
pub enum BoardError {
    #[error("Cannot put a piece on a square that is already occupied")]
    SquareOccupiedBoardPutError,
    #[error("Cannot apply chess move, the `from` square {square} is empty")]
    FromSquareIsEmptyMoveApplicationError { square: Square },
    #[error("Cannot apply chess move, the piece on {square} does not belong to the side to move")]
    NotSideToMoveError { square: Square },
    #[error("Illegal move requested: {chess_move}")]
    IllegalMoveRequested { chess_move: ChessMove },
    #[error("This move is for a pawn on the final rank, it must be a promotion move")]
    PawnPromotionRequiredError,
    #[error("Only a pawn reaching the final rank can promote, and not to a pawn or king")]
    InvalidPromotionError,
    #[error("Invalid castle move: {msg}")]
    InvalidCastleStateError { msg: &'static str },
    #[error("Cannot undo, no move has been applied")]
    NothingToUndoError,
    #[error("Cannot undo chess move, the `to` square {square} is empty")]
    ToSquareIsEmptyMoveUndoError { square: Square },
}
