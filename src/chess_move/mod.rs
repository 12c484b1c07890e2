pub mod chess_move;

pub use chess_move::{ChessMove, MoveParseError};
