use std::fmt;

use super::color::Color;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, PartialOrd, Ord)]
pub enum Piece {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

pub const ALL_PIECES: [Piece; 6] = [
    Piece::Pawn,
    Piece::Knight,
    Piece::Bishop,
    Piece::Rook,
    Piece::Queen,
    Piece::King,
];

/// Promotion choices, in the order the move generator emits them.
pub const PROMOTION_PIECES: [Piece; 4] = [Piece::Queen, Piece::Rook, Piece::Bishop, Piece::Knight];

impl Piece {
    pub fn from_usize(index: usize) -> Self {
        ALL_PIECES[index]
    }

    pub fn to_fen_char(&self, color: Color) -> char {
        let c = self.to_lowercase_char();
        match color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    pub fn from_fen_char(c: char) -> Option<(Piece, Color)> {
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let piece = Self::from_lowercase_char(c.to_ascii_lowercase())?;
        Some((piece, color))
    }

    /// Lowercase letter used in FEN and in the promotion suffix of coordinate notation.
    pub fn to_lowercase_char(&self) -> char {
        match self {
            Piece::Pawn => 'p',
            Piece::Knight => 'n',
            Piece::Bishop => 'b',
            Piece::Rook => 'r',
            Piece::Queen => 'q',
            Piece::King => 'k',
        }
    }

    pub fn from_lowercase_char(c: char) -> Option<Piece> {
        match c {
            'p' => Some(Piece::Pawn),
            'n' => Some(Piece::Knight),
            'b' => Some(Piece::Bishop),
            'r' => Some(Piece::Rook),
            'q' => Some(Piece::Queen),
            'k' => Some(Piece::King),
            _ => None,
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Piece::Pawn => "pawn",
            Piece::Knight => "knight",
            Piece::Bishop => "bishop",
            Piece::Rook => "rook",
            Piece::Queen => "queen",
            Piece::King => "king",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fen_chars() {
        assert_eq!('N', Piece::Knight.to_fen_char(Color::White));
        assert_eq!('q', Piece::Queen.to_fen_char(Color::Black));
        assert_eq!(Some((Piece::King, Color::White)), Piece::from_fen_char('K'));
        assert_eq!(Some((Piece::Pawn, Color::Black)), Piece::from_fen_char('p'));
        assert_eq!(None, Piece::from_fen_char('x'));
    }

    #[test]
    fn test_from_usize_matches_discriminant() {
        for piece in ALL_PIECES {
            assert_eq!(piece, Piece::from_usize(piece as usize));
        }
    }
}
