use crate::board::{
    castle_rights::CastleRights, color::Color, error::BoardError,
    fullmove_number::FullmoveNumber, halfmove_clock::HalfmoveClock, piece::Piece, Board,
};
use crate::move_generator::is_in_check;
use common::bitboard::Square;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum FenParseError {
    #[error("Wrong number of fields")]
    WrongNumberOfFields,
    #[error("Invalid piece character: {invalid_character:?}")]
    InvalidPieceCharacter { invalid_character: char },
    #[error("Wrong number of ranks: 8 expected, {rank_count:?} given")]
    InvalidRankCount { rank_count: usize },
    #[error("Rank too long: {invalid_rank:?}")]
    InvalidRankLength { invalid_rank: String },
    #[error("Error placing piece: {board_error:?}")]
    ErrorPlacingPiece { board_error: BoardError },
    #[error("Rank incomplete: {incomplete_rank:?}")]
    IncompleteRank { incomplete_rank: String },
    #[error("Expected exactly one {color} king, found {count}")]
    InvalidKingCount { color: Color, count: u32 },
    #[error("Invalid color: {invalid_color:?}")]
    InvalidColor { invalid_color: String },
    #[error("Invalid castling rights: {invalid_castling:?}")]
    InvalidCastlingRights { invalid_castling: char },
    #[error("Invalid en passant square: {value:?}")]
    InvalidEnPassant { value: String },
    #[error("The side not to move ({color}) is in check")]
    OpponentInCheck { color: Color },
    #[error("Invalid halfmove clock: {invalid_clock:?}")]
    InvalidHalfmoveClock { invalid_clock: String },
    #[error("Invalid fullmove number: {invalid_number:?}")]
    InvalidFullmoveNumber { invalid_number: String },
}

type FenResult<T> = Result<T, FenParseError>;

pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Parses a FEN (Forsyth–Edwards Notation) string into a Board.
/// FEN string contains 6 fields: piece placement, active color, castling rights,
/// en passant target square, halfmove clock, and fullmove number.
/// The clocks may be omitted, in which case they default to `0 1`.
pub fn parse_fen(fen: &str) -> FenResult<Board> {
    let fields = split_fen_fields(fen)?;
    let mut board = Board::new();

    parse_piece_placement(&mut board, fields.position)?;
    parse_active_color(&mut board, fields.active_color)?;
    parse_castle_rights(&mut board, fields.castle_rights)?;
    parse_en_passant(&mut board, fields.en_passant)?;
    parse_halfmove_clock(&mut board, fields.halfmove_clock)?;
    parse_fullmove_number(&mut board, fields.fullmove_number)?;

    let waiting = board.turn().opposite();
    if is_in_check(&board, waiting) {
        return Err(FenParseError::OpponentInCheck { color: waiting });
    }

    Ok(board)
}

struct FenFields<'a> {
    position: &'a str,
    active_color: &'a str,
    castle_rights: &'a str,
    en_passant: &'a str,
    halfmove_clock: &'a str,
    fullmove_number: &'a str,
}

fn split_fen_fields(fen: &str) -> FenResult<FenFields> {
    let parts: Vec<&str> = fen.split_whitespace().collect();
    let (halfmove_clock, fullmove_number) = match parts.len() {
        4 => ("0", "1"),
        6 => (parts[4], parts[5]),
        _ => return Err(FenParseError::WrongNumberOfFields),
    };

    Ok(FenFields {
        position: parts[0],
        active_color: parts[1],
        castle_rights: parts[2],
        en_passant: parts[3],
        halfmove_clock,
        fullmove_number,
    })
}

fn parse_piece_placement(board: &mut Board, position: &str) -> FenResult<()> {
    let ranks: Vec<&str> = position.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenParseError::InvalidRankCount {
            rank_count: ranks.len(),
        });
    }

    for (rank_idx, rank) in ranks.iter().enumerate() {
        parse_rank(board, rank, 7 - rank_idx as u8)?;
    }

    for color in Color::ALL {
        let count = board.pieces(color).locate(Piece::King).count_ones();
        if count != 1 {
            return Err(FenParseError::InvalidKingCount { color, count });
        }
    }

    Ok(())
}

fn parse_rank(board: &mut Board, rank: &str, rank_number: u8) -> FenResult<()> {
    let mut file = 0u8;
    let too_long = || FenParseError::InvalidRankLength {
        invalid_rank: rank.to_string(),
    };

    for c in rank.chars() {
        if file >= 8 {
            return Err(too_long());
        }

        if let Some(empty_squares) = c.to_digit(10) {
            file += empty_squares as u8;
            if file > 8 {
                return Err(too_long());
            }
        } else {
            let (piece, color) =
                Piece::from_fen_char(c).ok_or(FenParseError::InvalidPieceCharacter {
                    invalid_character: c,
                })?;
            board
                .put(Square::from_rank_file(rank_number, file), piece, color)
                .map_err(|e| FenParseError::ErrorPlacingPiece { board_error: e })?;
            file += 1;
        }
    }

    if file != 8 {
        return Err(FenParseError::IncompleteRank {
            incomplete_rank: rank.to_string(),
        });
    }

    Ok(())
}

fn parse_active_color(board: &mut Board, active_color: &str) -> FenResult<()> {
    let color = match active_color {
        "w" => Color::White,
        "b" => Color::Black,
        _ => {
            return Err(FenParseError::InvalidColor {
                invalid_color: active_color.to_string(),
            })
        }
    };
    board.set_turn(color);
    Ok(())
}

fn parse_castle_rights(board: &mut Board, castle_rights: &str) -> FenResult<()> {
    if castle_rights == "-" {
        board.set_castle_rights(CastleRights::none());
        return Ok(());
    }

    let mut rights = CastleRights::none();
    for c in castle_rights.chars() {
        rights = rights.with(match c {
            'K' => CastleRights::white_kingside(),
            'Q' => CastleRights::white_queenside(),
            'k' => CastleRights::black_kingside(),
            'q' => CastleRights::black_queenside(),
            _ => {
                return Err(FenParseError::InvalidCastlingRights {
                    invalid_castling: c,
                })
            }
        });
    }
    board.set_castle_rights(rights);
    Ok(())
}

fn parse_en_passant(board: &mut Board, en_passant: &str) -> FenResult<()> {
    if en_passant == "-" {
        board.set_en_passant_target(None);
        return Ok(());
    }

    let target = Square::from_algebraic(en_passant)
        .filter(|&target| is_en_passant_target_consistent(board, target))
        .ok_or_else(|| FenParseError::InvalidEnPassant {
            value: en_passant.to_string(),
        })?;
    board.set_en_passant_target(Some(target));
    Ok(())
}

/// The target must be the square an enemy pawn just skipped with a double
/// push: empty, with the pawn in front of it and its start square empty.
fn is_en_passant_target_consistent(board: &Board, target: Square) -> bool {
    let pusher = board.turn().opposite();
    let expected_rank = match pusher {
        Color::White => 2,
        Color::Black => 5,
    };
    if target.rank() != expected_rank || board.is_square_occupied(target) {
        return false;
    }

    let direction = pusher.pawn_direction();
    let pushed_to = target.offset(direction, 0);
    let pushed_from = target.offset(-direction, 0);
    match (pushed_to, pushed_from) {
        (Some(pushed_to), Some(pushed_from)) => {
            board.get(pushed_to) == Some((Piece::Pawn, pusher))
                && !board.is_square_occupied(pushed_from)
        }
        _ => false,
    }
}

fn parse_halfmove_clock(board: &mut Board, halfmove_clock: &str) -> FenResult<()> {
    let halfmove =
        halfmove_clock
            .parse::<u16>()
            .map_err(|_| FenParseError::InvalidHalfmoveClock {
                invalid_clock: halfmove_clock.to_string(),
            })?;
    board.set_halfmove_clock(HalfmoveClock::new(halfmove));
    Ok(())
}

fn parse_fullmove_number(board: &mut Board, fullmove_number: &str) -> FenResult<()> {
    let fullmove = fullmove_number
        .parse::<u16>()
        .ok()
        .filter(|&n| n > 0)
        .ok_or_else(|| FenParseError::InvalidFullmoveNumber {
            invalid_number: fullmove_number.to_string(),
        })?;
    board.set_fullmove_number(FullmoveNumber::new(fullmove));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::bitboard::*;

    #[test]
    fn test_parse_starting_position() {
        let board: Board = STARTING_POSITION_FEN.parse().unwrap();
        assert_eq!(board, Board::default());
    }

    #[test]
    fn test_parse_complex_position() {
        let fen = "r1bqk2r/ppp2ppp/2n2n2/2bpp3/4P3/2PP1N2/PP1N1PPP/R1BQKB1R b KQkq - 0 6";
        let board = parse_fen(fen).unwrap();

        assert_eq!(board.turn(), Color::Black);
        assert_eq!(board.halfmove_clock().value(), 0);
        assert_eq!(board.fullmove_number().value(), 6);
        assert_eq!(board.get(A8), Some((Piece::Rook, Color::Black)));
        assert_eq!(board.get(E5), Some((Piece::Pawn, Color::Black)));
        assert_eq!(board.get(F3), Some((Piece::Knight, Color::White)));
    }

    #[test]
    fn test_invalid_fen() {
        // wrong number of fields
        assert_eq!(
            parse_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0"),
            Err(FenParseError::WrongNumberOfFields)
        );
        // short rank
        assert!(parse_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBN w KQkq - 0 1").is_err());
        // long rank
        assert!(parse_fen("rnbqkbnr/pppppppp/9/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").is_err());
        assert!(parse_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1").is_err());
        assert!(parse_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w XYZx - 0 1").is_err());
        assert!(parse_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq e5 0 1").is_err());
        assert!(parse_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - x 1").is_err());
        assert!(parse_fen("rnbqkbnr/ppxppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").is_err());
    }

    #[test]
    fn test_king_count_is_validated() {
        assert_eq!(
            parse_fen("8/8/8/8/8/8/8/8 w - - 0 1"),
            Err(FenParseError::InvalidKingCount {
                color: Color::White,
                count: 0
            })
        );
        assert_eq!(
            parse_fen("k7/8/8/8/8/8/8/KK6 w - - 0 1"),
            Err(FenParseError::InvalidKingCount {
                color: Color::White,
                count: 2
            })
        );
    }

    #[test]
    fn test_clocks_are_optional() {
        let board = parse_fen("4k3/8/8/8/8/8/8/4K3 b - -").unwrap();
        assert_eq!(board.halfmove_clock().value(), 0);
        assert_eq!(board.fullmove_number().value(), 1);
        assert_eq!(board.turn(), Color::Black);
    }

    #[test]
    fn test_en_passant_parsing() {
        let fen = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1";
        let board = parse_fen(fen).unwrap();
        assert_eq!(board.peek_en_passant_target(), Some(E3));
    }

    #[test]
    fn test_en_passant_target_must_match_a_double_push() {
        for fen in [
            // target on the wrong rank for the side to move
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR w KQkq e3 0 1",
            // own pawn in front of the target
            "4k3/8/8/3PP3/8/8/8/4K3 w - e6 0 1",
            // no pawn in front of the target
            "4k3/8/8/8/8/8/3P4/4K3 w - e3 0 1",
            "4k3/8/8/8/8/8/8/4K3 w - d6 0 1",
            // target square occupied
            "4k3/8/3n4/3p4/8/8/8/4K3 w - d6 0 1",
            // start square of the double push occupied
            "4k3/3p4/8/3p4/8/8/8/4K3 w - d6 0 1",
        ] {
            assert!(
                matches!(parse_fen(fen), Err(FenParseError::InvalidEnPassant { .. })),
                "{} should be rejected",
                fen
            );
        }

        let board = parse_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").unwrap();
        assert_eq!(board.peek_en_passant_target(), Some(D6));
    }

    #[test]
    fn test_side_not_to_move_cannot_be_in_check() {
        assert_eq!(
            parse_fen("4k3/8/8/8/8/8/8/r3K3 b - - 0 1"),
            Err(FenParseError::OpponentInCheck {
                color: Color::White
            })
        );
        assert!(parse_fen("4k3/8/8/8/8/8/8/4K2R w - - 0 1").is_ok());
        assert_eq!(
            parse_fen("4k3/4R3/8/8/8/8/8/4K3 w - - 0 1"),
            Err(FenParseError::OpponentInCheck {
                color: Color::Black
            })
        );
    }

    #[test]
    fn test_castle_rights() {
        let fen = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1";
        let board = parse_fen(fen).unwrap();
        assert_eq!(board.peek_castle_rights(), CastleRights::all());

        let fen = "r3k2r/8/8/8/8/8/8/R3K2R w - - 0 1";
        let board = parse_fen(fen).unwrap();
        assert_eq!(board.peek_castle_rights(), CastleRights::none());

        let fen = "r3k2r/8/8/8/8/8/8/R3K2R w Kq - 0 1";
        let board = parse_fen(fen).unwrap();
        assert_eq!(
            board.peek_castle_rights(),
            CastleRights::white_kingside().with(CastleRights::black_queenside())
        );
    }
}
