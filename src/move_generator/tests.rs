use super::*;
use crate::board::castle_rights::CastleRights;
use crate::board::Piece;
use crate::input_handler::fen::parse_fen;
use crate::{chess_position, promotion_move, std_move};
use common::bitboard::*;

fn perft(fen: &str, depth: u8) -> usize {
    let mut board = parse_fen(fen).unwrap();
    count_positions(depth, &mut board).unwrap()
}

#[test]
fn test_count_positions_from_starting_position() {
    let mut board = Board::default();
    assert_eq!(count_positions(1, &mut board).unwrap(), 20);
    assert_eq!(count_positions(2, &mut board).unwrap(), 400);
    assert_eq!(count_positions(3, &mut board).unwrap(), 8902);
    assert_eq!(board, Board::default());
}

#[test]
fn test_count_positions_with_castling_and_promotions() {
    let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    assert_eq!(perft(fen, 1), 48);
    assert_eq!(perft(fen, 2), 2039);
}

#[test]
fn test_count_positions_with_en_passant_and_pins() {
    let fen = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";
    assert_eq!(perft(fen, 1), 14);
    assert_eq!(perft(fen, 2), 191);
    assert_eq!(perft(fen, 3), 2812);
}

#[test]
fn test_move_order_is_deterministic() {
    let mut board = Board::default();
    let moves = generate_legal_moves(&mut board);
    assert_eq!(
        &moves[..6],
        &[
            std_move!(B1, C3),
            std_move!(B1, A3),
            std_move!(G1, H3),
            std_move!(G1, F3),
            std_move!(A2, A3),
            std_move!(A2, A4),
        ]
    );
    assert_eq!(moves, generate_legal_moves(&mut board));
}

#[test]
fn test_promotions_are_ordered_queen_first() {
    let mut board = chess_position! {
        ....k...
        P.......
        ........
        ........
        ........
        ........
        ........
        ....K...
    };
    board.set_castle_rights(CastleRights::none());

    let moves = generate_legal_moves(&mut board);
    let promotions: Vec<_> = moves
        .iter()
        .filter(|m| m.from_square() == A7)
        .copied()
        .collect();
    assert_eq!(
        promotions,
        vec![
            promotion_move!(A7, A8, Piece::Queen),
            promotion_move!(A7, A8, Piece::Rook),
            promotion_move!(A7, A8, Piece::Bishop),
            promotion_move!(A7, A8, Piece::Knight),
        ]
    );
}

#[test]
fn test_castling_comes_after_king_moves() {
    let mut board = chess_position! {
        ....k...
        ........
        ........
        ........
        ........
        ........
        ........
        R...K..R
    };
    board.set_castle_rights(CastleRights::white_kingside().with(CastleRights::white_queenside()));

    let king_moves: Vec<_> = generate_legal_moves(&mut board)
        .into_iter()
        .filter(|m| m.from_square() == E1)
        .collect();
    assert_eq!(
        king_moves,
        vec![
            std_move!(E1, E2),
            std_move!(E1, F2),
            std_move!(E1, F1),
            std_move!(E1, D1),
            std_move!(E1, D2),
            std_move!(E1, G1),
            std_move!(E1, C1),
        ]
    );
}

#[test]
fn test_cannot_castle_through_attacked_square() {
    let mut board = chess_position! {
        ....k...
        ........
        ........
        ........
        ........
        ........
        .....r..
        R...K..R
    };
    board.set_castle_rights(CastleRights::white_kingside().with(CastleRights::white_queenside()));

    let moves = generate_legal_moves(&mut board);
    assert!(!moves.contains(&std_move!(E1, G1)));
    assert!(moves.contains(&std_move!(E1, C1)));
}

#[test]
fn test_cannot_castle_out_of_check_or_without_rights() {
    let mut board = chess_position! {
        ....k...
        ....r...
        ........
        ........
        ........
        ........
        ........
        R...K..R
    };
    board.set_castle_rights(CastleRights::white_kingside().with(CastleRights::white_queenside()));
    let moves = generate_legal_moves(&mut board);
    assert!(!moves.contains(&std_move!(E1, G1)));
    assert!(!moves.contains(&std_move!(E1, C1)));

    board.remove(E7);
    board.set_castle_rights(CastleRights::none());
    let moves = generate_legal_moves(&mut board);
    assert!(!moves.contains(&std_move!(E1, G1)));
    assert!(!moves.contains(&std_move!(E1, C1)));
}

#[test]
fn test_moves_must_resolve_check() {
    let mut board = chess_position! {
        ....k...
        ........
        ........
        ........
        ........
        ........
        ...P....
        r...K...
    };
    board.set_castle_rights(CastleRights::none());

    assert!(is_in_check(&board, Color::White));
    let moves = generate_legal_moves(&mut board);
    assert_eq!(moves.as_slice(), &[std_move!(E1, E2), std_move!(E1, F2)]);

    for chess_move in moves {
        board.apply(chess_move).unwrap();
        assert!(!is_in_check(&board, Color::White));
        board.undo().unwrap();
    }
}

#[test]
fn test_pinned_piece_cannot_leave_the_pin() {
    let mut board = chess_position! {
        ....r..k
        ........
        ........
        ........
        ........
        ........
        ....N...
        ....K...
    };
    board.set_castle_rights(CastleRights::none());

    let moves = generate_legal_moves(&mut board);
    assert!(moves.iter().all(|m| m.from_square() != E2));
}

#[test]
fn test_en_passant_capture_is_generated() {
    let mut board = Board::default();
    for uci in ["e2e4", "a7a6", "e4e5", "d7d5"] {
        board.apply_legal(uci.parse().unwrap()).unwrap();
    }
    let moves = generate_legal_moves(&mut board);
    assert!(moves.contains(&std_move!(E5, D6)));

    board.apply_legal(std_move!(E5, D6)).unwrap();
    assert_eq!(board.get(D5), None);
    assert_eq!(board.get(D6), Some((Piece::Pawn, Color::White)));
}

#[test]
fn test_stale_en_passant_target_is_not_a_capture() {
    let mut board = chess_position! {
        ....k...
        ........
        ........
        ...PP...
        ........
        ........
        ........
        ....K...
    };
    board.set_castle_rights(CastleRights::none());
    board.set_en_passant_target(Some(E6));
    let before = board.clone();

    let moves = generate_legal_moves(&mut board);
    assert_eq!(board, before);
    assert!(moves.contains(&std_move!(E5, E6)));
    assert!(!moves.contains(&std_move!(D5, E6)));
    assert_eq!(board.get(E5), Some((Piece::Pawn, Color::White)));
}

#[test]
fn test_en_passant_target_without_enemy_pawn_is_ignored() {
    let mut board = chess_position! {
        ....k...
        ........
        ........
        ........
        ........
        ........
        ...P....
        ....K...
    };
    board.set_castle_rights(CastleRights::none());
    board.set_en_passant_target(Some(E3));
    let before = board.clone();

    let moves = generate_legal_moves(&mut board);
    assert_eq!(board, before);
    assert!(!moves.contains(&std_move!(D2, E3)));
    assert!(moves.contains(&std_move!(D2, D3)));
}

#[test]
fn test_square_attacks() {
    let board = chess_position! {
        ....k...
        ........
        ........
        ...p....
        ........
        ..N.....
        ........
        ....K..R
    };

    assert!(is_square_attacked(&board, E4, Color::Black));
    assert!(is_square_attacked(&board, C4, Color::Black));
    assert!(!is_square_attacked(&board, D4, Color::Black));
    assert!(is_square_attacked(&board, D5, Color::White));
    assert!(is_square_attacked(&board, H8, Color::White));
    assert!(is_square_attacked(&board, F1, Color::White));
    assert!(!is_square_attacked(&board, A8, Color::White));
}
