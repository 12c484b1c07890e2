use core::fmt;
use std::{
    fmt::{Display, Formatter},
    ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not},
};

use crate::bitboard::square::Square;

/// A set of squares, one bit per square, A1 in the least significant bit.
#[derive(Clone, Copy, PartialEq, Debug, PartialOrd, Eq, Ord, Hash, Default)]
pub struct Bitboard(pub u64);

impl Bitboard {
    pub const EMPTY: Self = Self(0x0000000000000000);
    pub const ALL: Self = Self(0xFFFFFFFFFFFFFFFF);

    pub const A_FILE: Self = Self(0x0101010101010101);
    pub const H_FILE: Self = Self(0x8080808080808080);

    pub const RANK_1: Self = Self(0xFF);
    pub const RANK_2: Self = Self(0xFF00);
    pub const RANK_7: Self = Self(0xFF000000000000);
    pub const RANK_8: Self = Self(0xFF00000000000000);

    /// Squares of the same shade as A1.
    pub const DARK_SQUARES: Self = Self(0xAA55AA55AA55AA55);
    pub const LIGHT_SQUARES: Self = Self(!0xAA55AA55AA55AA55);

    pub fn overlaps(&self, other: Self) -> bool {
        (self.0 & other.0) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn count_ones(&self) -> u32 {
        self.0.count_ones()
    }

    /// Iterates the squares in the set from A1 towards H8.
    pub fn squares(self) -> BitboardSquares {
        BitboardSquares(self.0)
    }
}

pub struct BitboardSquares(u64);

impl Iterator for BitboardSquares {
    type Item = Square;

    fn next(&mut self) -> Option<Square> {
        if self.0 == 0 {
            return None;
        }
        let index = self.0.trailing_zeros() as u8;
        self.0 &= self.0 - 1;
        Some(Square::new(index))
    }
}

impl From<Square> for Bitboard {
    fn from(square: Square) -> Self {
        square.to_bitboard()
    }
}

impl BitAnd for Bitboard {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl Not for Bitboard {
    type Output = Self;

    fn not(self) -> Self {
        Self(!self.0)
    }
}

impl BitOr for Bitboard {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitXor for Bitboard {
    type Output = Self;

    fn bitxor(self, rhs: Self) -> Self {
        Self(self.0 ^ rhs.0)
    }
}

impl BitAndAssign for Bitboard {
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}

impl BitOrAssign for Bitboard {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitXorAssign for Bitboard {
    fn bitxor_assign(&mut self, rhs: Self) {
        self.0 ^= rhs.0;
    }
}

impl Display for Bitboard {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let mut result = String::new();
        for rank in (0..8).rev() {
            for file in 0..8 {
                let sq = Square::from_rank_file(rank, file);
                let cell = match sq.overlaps(*self) {
                    true => 'X',
                    false => '.',
                };
                result.push(cell);
            }
            result.push('\n');
        }
        write!(f, "{}", result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitboard::square::*;

    #[test]
    fn test_squares_iterates_in_ascending_order() {
        let bitboard = Bitboard::from(H8) | Bitboard::from(A1) | Bitboard::from(E4);
        let squares: Vec<Square> = bitboard.squares().collect();
        assert_eq!(vec![A1, E4, H8], squares);
    }

    #[test]
    fn test_square_shades() {
        assert!(A1.overlaps(Bitboard::DARK_SQUARES));
        assert!(H1.overlaps(Bitboard::LIGHT_SQUARES));
        assert!(H8.overlaps(Bitboard::DARK_SQUARES));
        assert!(!Bitboard::DARK_SQUARES.overlaps(Bitboard::LIGHT_SQUARES));
    }
}
