use common::bitboard::{Square, A1, A8, E1, E8, H1, H8};

use super::color::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CastleRights(u8);

impl Default for CastleRights {
    fn default() -> Self {
        Self::all()
    }
}

impl CastleRights {
    pub const fn white_kingside() -> Self {
        Self(0b1000)
    }

    pub const fn black_kingside() -> Self {
        Self(0b0100)
    }

    pub const fn white_queenside() -> Self {
        Self(0b0010)
    }

    pub const fn black_queenside() -> Self {
        Self(0b0001)
    }

    pub const fn all() -> Self {
        Self(
            Self::white_kingside().0
                | Self::black_kingside().0
                | Self::white_queenside().0
                | Self::black_queenside().0,
        )
    }

    pub const fn none() -> Self {
        Self(0)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn contains(self, other: CastleRights) -> bool {
        (self.0 & other.0) == other.0
    }

    pub const fn without(self, other: CastleRights) -> CastleRights {
        CastleRights(self.0 & !other.0)
    }

    pub const fn with(self, other: CastleRights) -> CastleRights {
        CastleRights(self.0 | other.0)
    }

    pub fn kingside(color: Color) -> Self {
        match color {
            Color::White => Self::white_kingside(),
            Color::Black => Self::black_kingside(),
        }
    }

    pub fn queenside(color: Color) -> Self {
        match color {
            Color::White => Self::white_queenside(),
            Color::Black => Self::black_queenside(),
        }
    }

    /// Rights that disappear once a piece moves from, or is captured on, `square`.
    pub fn lost_by_touching(square: Square) -> Self {
        match square {
            A1 => Self::white_queenside(),
            H1 => Self::white_kingside(),
            E1 => Self::white_kingside().with(Self::white_queenside()),
            A8 => Self::black_queenside(),
            H8 => Self::black_kingside(),
            E8 => Self::black_kingside().with(Self::black_queenside()),
            _ => Self::none(),
        }
    }

    pub fn to_fen(self) -> String {
        if self.is_empty() {
            return "-".to_string();
        }
        let mut fen = String::new();
        for (rights, c) in [
            (Self::white_kingside(), 'K'),
            (Self::white_queenside(), 'Q'),
            (Self::black_kingside(), 'k'),
            (Self::black_queenside(), 'q'),
        ] {
            if self.contains(rights) {
                fen.push(c);
            }
        }
        fen
    }
}
