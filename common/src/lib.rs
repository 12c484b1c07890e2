pub mod bitboard;
