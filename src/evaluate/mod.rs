use common::bitboard::Bitboard;
#[cfg(feature = "instrumentation")]
use tracing::instrument;

use crate::board::color::Color;
use crate::board::piece::{Piece, ALL_PIECES};
use crate::board::Board;
use crate::move_generator;

use self::piece_values::material_value;

pub mod piece_values;

/// A side with this many pieces or fewer, king included, has its king left
/// out of the material count.
const KING_EXCLUSION_PIECE_COUNT: u32 = 2;

/// Seventy-five moves by each side without a capture or pawn move.
const SEVENTY_FIVE_MOVE_RULE_PLIES: u16 = 150;

const FIVEFOLD_REPETITION_COUNT: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEnding {
    Checkmate { winner: Color },
    Stalemate,
    InsufficientMaterial,
    SeventyFiveMoveRule,
    FivefoldRepetition,
}

impl GameEnding {
    pub fn winner(&self) -> Option<Color> {
        match self {
            GameEnding::Checkmate { winner } => Some(*winner),
            _ => None,
        }
    }
}

#[inline(always)]
pub fn current_player_is_in_check(board: &Board) -> bool {
    board.is_in_check(board.turn())
}

/// Returns the game ending state if the game has ended, otherwise returns None.
/// Checkmate takes precedence over every draw, then insufficient material,
/// stalemate, the seventy-five-move rule and fivefold repetition.
#[cfg_attr(feature = "instrumentation", instrument(skip_all))]
pub fn game_ending(board: &mut Board) -> Option<GameEnding> {
    let has_legal_move = move_generator::has_legal_move(board);
    let check = current_player_is_in_check(board);

    if !has_legal_move && check {
        return Some(GameEnding::Checkmate {
            winner: board.turn().opposite(),
        });
    }

    if is_insufficient_material(board) {
        return Some(GameEnding::InsufficientMaterial);
    }

    if !has_legal_move {
        return Some(GameEnding::Stalemate);
    }

    if board.halfmove_clock().value() >= SEVENTY_FIVE_MOVE_RULE_PLIES {
        return Some(GameEnding::SeventyFiveMoveRule);
    }

    if board.repetition_count() >= FIVEFOLD_REPETITION_COUNT {
        return Some(GameEnding::FivefoldRepetition);
    }

    None
}

/// Draws that can be decided without enumerating moves: insufficient
/// material, the seventy-five-move rule and fivefold repetition.
pub fn is_draw_by_rule(board: &Board) -> bool {
    is_insufficient_material(board)
        || board.halfmove_clock().value() >= SEVENTY_FIVE_MOVE_RULE_PLIES
        || board.repetition_count() >= FIVEFOLD_REPETITION_COUNT
}

/// No pawns, rooks or queens remain, and the minor pieces left cannot force
/// mate: either bishops only, all on one square color, or a lone knight.
pub fn is_insufficient_material(board: &Board) -> bool {
    let locate_both = |piece: Piece| {
        board.pieces(Color::White).locate(piece) | board.pieces(Color::Black).locate(piece)
    };

    let heavy = locate_both(Piece::Pawn) | locate_both(Piece::Rook) | locate_both(Piece::Queen);
    if !heavy.is_empty() {
        return false;
    }

    let knights = locate_both(Piece::Knight);
    let bishops = locate_both(Piece::Bishop);

    let bishops_on_one_shade = !bishops.overlaps(Bitboard::LIGHT_SQUARES)
        || !bishops.overlaps(Bitboard::DARK_SQUARES);

    (knights.is_empty() && bishops_on_one_shade)
        || (bishops.is_empty() && knights.count_ones() <= 1)
}

/// Material balance from white's perspective: positive favours white.
#[inline(always)]
pub fn score(board: &Board) -> i32 {
    player_material_score(board, Color::White) - player_material_score(board, Color::Black)
}

fn player_material_score(board: &Board, color: Color) -> i32 {
    let pieces = board.pieces(color);
    let skip_king = pieces.count() <= KING_EXCLUSION_PIECE_COUNT;

    ALL_PIECES
        .iter()
        .filter(|&&piece| !(skip_king && piece == Piece::King))
        .map(|&piece| material_value(piece) * pieces.locate(piece).count_ones() as i32)
        .sum()
}
