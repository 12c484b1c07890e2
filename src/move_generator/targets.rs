//! Pseudo-legal target generation and attack detection.
//!
//! Everything here walks offset tables square by square. Output order is
//! fixed by the tables below, which is what makes move enumeration
//! deterministic.

use common::bitboard::{Bitboard, Square};

use crate::board::piece::PROMOTION_PIECES;
use crate::board::{castle_rights::CastleRights, Board, Color, Piece};
use crate::chess_move::ChessMove;

use super::ChessMoveList;

pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (2, 1),
    (1, 2),
    (-1, 2),
    (-2, 1),
    (-2, -1),
    (-1, -2),
    (1, -2),
    (2, -1),
];

pub const KING_OFFSETS: [(i8, i8); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

pub const ORTHOGONAL_DIRECTIONS: [(i8, i8); 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];
pub const DIAGONAL_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (-1, 1), (-1, -1), (1, -1)];

/// Appends every pseudo-legal move for the side to move. Moves may leave the
/// mover's own king in check; `generate_legal_moves` filters those out.
pub fn generate_pseudo_legal_moves(board: &Board, moves: &mut ChessMoveList) {
    let player = board.turn();
    for from in board.pieces(player).occupied().squares() {
        let piece = match board.pieces(player).get(from) {
            Some(piece) => piece,
            None => continue,
        };
        match piece {
            Piece::Pawn => generate_pawn_moves(board, from, player, moves),
            Piece::Knight => generate_step_moves(board, from, player, &KNIGHT_OFFSETS, moves),
            Piece::Bishop => generate_sliding_moves(board, from, player, &DIAGONAL_DIRECTIONS, moves),
            Piece::Rook => generate_sliding_moves(board, from, player, &ORTHOGONAL_DIRECTIONS, moves),
            Piece::Queen => {
                generate_sliding_moves(board, from, player, &ORTHOGONAL_DIRECTIONS, moves);
                generate_sliding_moves(board, from, player, &DIAGONAL_DIRECTIONS, moves);
            }
            Piece::King => {
                generate_step_moves(board, from, player, &KING_OFFSETS, moves);
                generate_castle_moves(board, from, player, moves);
            }
        }
    }
}

fn push_pawn_move(from: Square, to: Square, player: Color, moves: &mut ChessMoveList) {
    if to.overlaps(player.promotion_rank()) {
        for piece in PROMOTION_PIECES {
            moves.push(ChessMove::with_promotion(from, to, piece));
        }
    } else {
        moves.push(ChessMove::new(from, to));
    }
}

fn generate_pawn_moves(board: &Board, from: Square, player: Color, moves: &mut ChessMoveList) {
    let direction = player.pawn_direction();
    let occupied = board.occupied();

    if let Some(single) = from.offset(direction, 0) {
        if !single.overlaps(occupied) {
            push_pawn_move(from, single, player, moves);

            if from.rank() == player.pawn_start_rank() {
                if let Some(double) = single.offset(direction, 0) {
                    if !double.overlaps(occupied) {
                        moves.push(ChessMove::new(from, double));
                    }
                }
            }
        }
    }

    let enemies = board.pieces(player.opposite()).occupied();
    for file_delta in [-1, 1] {
        if let Some(to) = from.offset(direction, file_delta) {
            if to.overlaps(enemies) || ChessMove::new(from, to).is_en_passant(board) {
                push_pawn_move(from, to, player, moves);
            }
        }
    }
}

fn generate_step_moves(
    board: &Board,
    from: Square,
    player: Color,
    offsets: &[(i8, i8)],
    moves: &mut ChessMoveList,
) {
    let own = board.pieces(player).occupied();
    for &(rank_delta, file_delta) in offsets {
        if let Some(to) = from.offset(rank_delta, file_delta) {
            if !to.overlaps(own) {
                moves.push(ChessMove::new(from, to));
            }
        }
    }
}

fn generate_sliding_moves(
    board: &Board,
    from: Square,
    player: Color,
    directions: &[(i8, i8)],
    moves: &mut ChessMoveList,
) {
    let own = board.pieces(player).occupied();
    let enemies = board.pieces(player.opposite()).occupied();
    for &(rank_delta, file_delta) in directions {
        let mut current = from;
        while let Some(to) = current.offset(rank_delta, file_delta) {
            if to.overlaps(own) {
                break;
            }
            moves.push(ChessMove::new(from, to));
            if to.overlaps(enemies) {
                break;
            }
            current = to;
        }
    }
}

fn generate_castle_moves(board: &Board, from: Square, player: Color, moves: &mut ChessMoveList) {
    let back_rank = match player {
        Color::White => 0,
        Color::Black => 7,
    };
    if from != Square::from_rank_file(back_rank, 4) {
        return;
    }

    let rights = board.peek_castle_rights();
    let opponent = player.opposite();
    let occupied = board.occupied();
    let rook = Some((Piece::Rook, player));
    let square = |file| Square::from_rank_file(back_rank, file);

    let is_clear = |files: &[u8]| files.iter().all(|&file| !square(file).overlaps(occupied));
    let is_safe =
        |files: &[u8]| files.iter().all(|&file| !is_square_attacked(board, square(file), opponent));

    if rights.contains(CastleRights::kingside(player))
        && board.get(square(7)) == rook
        && is_clear(&[5, 6])
        && is_safe(&[4, 5, 6])
    {
        moves.push(ChessMove::new(from, square(6)));
    }

    if rights.contains(CastleRights::queenside(player))
        && board.get(square(0)) == rook
        && is_clear(&[1, 2, 3])
        && is_safe(&[4, 3, 2])
    {
        moves.push(ChessMove::new(from, square(2)));
    }
}

/// Returns true if any piece of color `by` attacks `square`.
pub fn is_square_attacked(board: &Board, square: Square, by: Color) -> bool {
    let attackers = board.pieces(by);

    // A pawn of `by` attacks `square` from one rank behind it, relative to `by`.
    let pawns = attackers.locate(Piece::Pawn);
    for file_delta in [-1, 1] {
        if let Some(origin) = square.offset(-by.pawn_direction(), file_delta) {
            if origin.overlaps(pawns) {
                return true;
            }
        }
    }

    if any_step_attacker(square, &KNIGHT_OFFSETS, attackers.locate(Piece::Knight))
        || any_step_attacker(square, &KING_OFFSETS, attackers.locate(Piece::King))
    {
        return true;
    }

    let queens = attackers.locate(Piece::Queen);
    let occupied = board.occupied();
    any_sliding_attacker(
        square,
        &ORTHOGONAL_DIRECTIONS,
        attackers.locate(Piece::Rook) | queens,
        occupied,
    ) || any_sliding_attacker(
        square,
        &DIAGONAL_DIRECTIONS,
        attackers.locate(Piece::Bishop) | queens,
        occupied,
    )
}

fn any_step_attacker(square: Square, offsets: &[(i8, i8)], attackers: Bitboard) -> bool {
    offsets.iter().any(|&(rank_delta, file_delta)| {
        square
            .offset(rank_delta, file_delta)
            .map_or(false, |origin| origin.overlaps(attackers))
    })
}

fn any_sliding_attacker(
    square: Square,
    directions: &[(i8, i8)],
    attackers: Bitboard,
    occupied: Bitboard,
) -> bool {
    for &(rank_delta, file_delta) in directions {
        let mut current = square;
        while let Some(next) = current.offset(rank_delta, file_delta) {
            if next.overlaps(attackers) {
                return true;
            }
            if next.overlaps(occupied) {
                break;
            }
            current = next;
        }
    }
    false
}
