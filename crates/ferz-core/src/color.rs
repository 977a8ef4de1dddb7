//! Side colors and the board geometry that depends on them.

use std::fmt;
use std::ops::Not;

use crate::rank::Rank;

/// A side: White or Black.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    /// Total number of colors.
    pub const COUNT: usize = 2;

    /// All colors in index order.
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    /// Return the index (0 for White, 1 for Black).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Return the opposite color.
    #[inline]
    pub const fn flip(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Rank step a pawn of this color advances by: +1 for White, -1 for Black.
    #[inline]
    pub const fn pawn_direction(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// The rank this color's king and rooks start on.
    #[inline]
    pub const fn back_rank(self) -> Rank {
        match self {
            Color::White => Rank::Rank1,
            Color::Black => Rank::Rank8,
        }
    }

    /// The rank this color's pawns start on (and may double-step from).
    #[inline]
    pub const fn pawn_rank(self) -> Rank {
        match self {
            Color::White => Rank::Rank2,
            Color::Black => Rank::Rank7,
        }
    }

    /// The farthest rank from this color's start, where its pawns promote.
    #[inline]
    pub const fn promotion_rank(self) -> Rank {
        self.flip().back_rank()
    }

    /// Lowercase English name, used in error messages.
    pub const fn name(self) -> &'static str {
        match self {
            Color::White => "white",
            Color::Black => "black",
        }
    }
}

impl Not for Color {
    type Output = Color;

    #[inline]
    fn not(self) -> Color {
        self.flip()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "w"),
            Color::Black => write!(f, "b"),
        }
    }
}
