#[allow(clippy::module_inception)]
mod board;
pub mod castle_rights;
pub mod color;
pub mod error;
pub mod fullmove_number;
pub mod halfmove_clock;
pub mod piece;

mod display;
mod move_info;
mod piece_set;


pub use board::Board;
pub use color::Color;
pub use piece::Piece;
pub use piece_set::PieceSet;
