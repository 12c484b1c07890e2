//! FEN serialization - converts Board to FEN string.

use crate::board::Board;
use common::bitboard::Square;

/// Converts a Board to FEN (Forsyth–Edwards Notation) string.
pub fn to_fen(board: &Board) -> String {
    let mut fen = String::new();

    for rank in (0..8).rev() {
        let mut empty_count = 0;
        for file in 0..8 {
            let square = Square::from_rank_file(rank, file);
            if let Some((piece, color)) = board.get(square) {
                if empty_count > 0 {
                    fen.push_str(&empty_count.to_string());
                    empty_count = 0;
                }
                fen.push(piece.to_fen_char(color));
            } else {
                empty_count += 1;
            }
        }
        if empty_count > 0 {
            fen.push_str(&empty_count.to_string());
        }
        if rank > 0 {
            fen.push('/');
        }
    }

    let en_passant = match board.peek_en_passant_target() {
        Some(square) => square.to_algebraic(),
        None => "-",
    };

    format!(
        "{} {} {} {} {} {}",
        fen,
        board.turn().to_fen(),
        board.peek_castle_rights().to_fen(),
        en_passant,
        board.halfmove_clock().value(),
        board.fullmove_number().value()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input_handler::fen::STARTING_POSITION_FEN;

    #[test]
    fn test_starting_position_fen() {
        let board = Board::default();
        let fen = to_fen(&board);
        assert_eq!(fen, STARTING_POSITION_FEN);
    }

    #[test]
    fn test_roundtrip() {
        let original_fen = "r1bqk2r/ppp2ppp/2n2n2/2bpp3/4P3/2PP1N2/PP1N1PPP/R1BQKB1R b KQkq - 0 6";
        let board: Board = original_fen.parse().unwrap();
        let serialized_fen = to_fen(&board);
        assert_eq!(serialized_fen, original_fen);
    }

    #[test]
    fn test_en_passant() {
        let fen = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1";
        let board: Board = fen.parse().unwrap();
        let serialized = to_fen(&board);
        assert_eq!(serialized, fen);
    }

    #[test]
    fn test_clocks_follow_moves() {
        let mut board = Board::default();
        for uci in ["g1f3", "g8f6", "f3g1"] {
            board.apply_legal(uci.parse().unwrap()).unwrap();
        }
        assert_eq!(
            to_fen(&board),
            "rnbqkb1r/pppppppp/5n2/8/8/8/PPPPPPPP/RNBQKBNR b KQkq - 3 2"
        );
    }

    #[test]
    fn test_no_castle_rights() {
        let fen = "r3k2r/8/8/8/8/8/8/R3K2R w - - 0 1";
        let board: Board = fen.parse().unwrap();
        let serialized = to_fen(&board);
        assert_eq!(serialized, fen);
    }
}
