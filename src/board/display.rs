use common::bitboard::Square;

use super::Board;
use std::fmt;

/// Plain text rendering, white at the bottom.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut board_str = String::new();
        board_str.push_str("    a   b   c   d   e   f   g   h\n");
        board_str.push_str("  +---+---+---+---+---+---+---+---+\n");
        for rank in (0..8).rev() {
            board_str.push_str(&format!("{} |", rank + 1));
            for file in 0..8 {
                let square = Square::from_rank_file(rank, file);
                let cell = match self.get(square) {
                    Some((piece, color)) => piece.to_fen_char(color),
                    None => '.',
                };
                board_str.push_str(&format!(" {} |", cell));
            }
            board_str.push_str(&format!(" {}\n", rank + 1));
            board_str.push_str("  +---+---+---+---+---+---+---+---+\n");
        }
        board_str.push_str("    a   b   c   d   e   f   g   h\n");
        write!(f, "{}", board_str)
    }
}

/// Builds a `Board` from an 8x8 grid of FEN piece letters and `.` for empty
/// squares, rank 8 first. Expects `Board`, `Piece` and `Color` in scope.
#[macro_export]
macro_rules! chess_position {
    ($($piece:tt)*) => {{
        let mut board = Board::new();
        // Convert all input tokens to a string and filter out whitespace characters.
        let pieces: Vec<_> = stringify!($($piece)*)
            .chars()
            .filter(|&c| !c.is_whitespace())
            .collect();
        assert_eq!(pieces.len(), 64, "Invalid number of squares. Expected 64, got {}", pieces.len());
        for (i, &c) in pieces.iter().enumerate() {
            if c != '.' {
                let (piece, color): (Piece, Color) = Piece::from_fen_char(c)
                    .expect("Invalid character in chess position");
                // The grid is written from white's perspective, so the first
                // character is A8 rather than A1.
                let row = i / 8;
                let col = i % 8;
                let transposed_row = 7 - row;
                let square_num = (8 * transposed_row + col) as u8;
                board
                    .put(common::bitboard::Square::new(square_num), piece, color)
                    .expect("chess_position squares are unique");
            }
        }
        board
    }};
}
