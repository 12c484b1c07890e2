//! Square and bitboard primitives shared by the board and move generator.

#[allow(clippy::module_inception)]
pub mod bitboard;
pub mod square;

pub use bitboard::Bitboard;
pub use square::*;
