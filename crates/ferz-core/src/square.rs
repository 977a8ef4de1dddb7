//! Board squares, indexed `rank * 8 + file` from a1.

use std::fmt;
use std::str::FromStr;

use crate::error::SquareError;
use crate::file::File;
use crate::rank::Rank;

/// A square on the board. Index = rank * 8 + file, so a1 = 0, b1 = 1, ..., h8 = 63.
///
/// A `Square` is always on the board; off-board coordinates are rejected when
/// one is constructed.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Square(u8);

macro_rules! rank_squares {
    ($rank:ident: $($name:ident => $file:ident),+ $(,)?) => {
        $(pub const $name: Square = Square::new(Rank::$rank, File::$file);)+
    };
}

impl Square {
    /// Total number of squares.
    pub const COUNT: usize = 64;

    #[inline]
    pub const fn new(rank: Rank, file: File) -> Square {
        Square(rank as u8 * 8 + file as u8)
    }

    /// Create a square from a zero-based index, `None` if out of range.
    #[inline]
    pub const fn from_index(index: u8) -> Option<Square> {
        if index < 64 { Some(Square(index)) } else { None }
    }

    /// Create a square from zero-based `(file, rank)` coordinates counted from a1.
    ///
    /// # Errors
    ///
    /// Returns [`SquareError::OffBoard`] if either coordinate is outside `0..8`.
    pub fn from_coords(file: i32, rank: i32) -> Result<Square, SquareError> {
        if (0..8).contains(&file) && (0..8).contains(&rank) {
            Ok(Square((rank * 8 + file) as u8))
        } else {
            Err(SquareError::OffBoard { file, rank })
        }
    }

    /// Parse algebraic notation such as `e4`.
    pub fn from_algebraic(s: &str) -> Option<Square> {
        let mut chars = s.chars();
        let file = File::from_char(chars.next()?)?;
        let rank = Rank::from_char(chars.next()?)?;
        if chars.next().is_some() {
            return None;
        }
        Some(Square::new(rank, file))
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Return `(file, rank)`, both zero-based from a1.
    #[inline]
    pub const fn coords(self) -> (u8, u8) {
        (self.0 % 8, self.0 / 8)
    }

    #[inline]
    pub fn rank(self) -> Rank {
        Rank::ALL[usize::from(self.0 / 8)]
    }

    #[inline]
    pub fn file(self) -> File {
        File::ALL[usize::from(self.0 % 8)]
    }

    /// The square `df` files and `dr` ranks away, or `None` if that leaves the board.
    #[inline]
    pub fn offset(self, df: i8, dr: i8) -> Option<Square> {
        let (file, rank) = self.coords();
        let file = (file as i8).checked_add(df)?;
        let rank = (rank as i8).checked_add(dr)?;
        if (0..8).contains(&file) && (0..8).contains(&rank) {
            Some(Square((rank * 8 + file) as u8))
        } else {
            None
        }
    }

    /// Iterate over all 64 squares in index order (a1, b1, ..., h8).
    pub fn all() -> impl Iterator<Item = Square> {
        (0u8..64).map(Square)
    }

    rank_squares!(Rank1: A1 => FileA, B1 => FileB, C1 => FileC, D1 => FileD, E1 => FileE, F1 => FileF, G1 => FileG, H1 => FileH);
    rank_squares!(Rank2: A2 => FileA, B2 => FileB, C2 => FileC, D2 => FileD, E2 => FileE, F2 => FileF, G2 => FileG, H2 => FileH);
    rank_squares!(Rank3: A3 => FileA, B3 => FileB, C3 => FileC, D3 => FileD, E3 => FileE, F3 => FileF, G3 => FileG, H3 => FileH);
    rank_squares!(Rank4: A4 => FileA, B4 => FileB, C4 => FileC, D4 => FileD, E4 => FileE, F4 => FileF, G4 => FileG, H4 => FileH);
    rank_squares!(Rank5: A5 => FileA, B5 => FileB, C5 => FileC, D5 => FileD, E5 => FileE, F5 => FileF, G5 => FileG, H5 => FileH);
    rank_squares!(Rank6: A6 => FileA, B6 => FileB, C6 => FileC, D6 => FileD, E6 => FileE, F6 => FileF, G6 => FileG, H6 => FileH);
    rank_squares!(Rank7: A7 => FileA, B7 => FileB, C7 => FileC, D7 => FileD, E7 => FileE, F7 => FileF, G7 => FileG, H7 => FileH);
    rank_squares!(Rank8: A8 => FileA, B8 => FileB, C8 => FileC, D8 => FileD, E8 => FileE, F8 => FileF, G8 => FileG, H8 => FileH);
}

impl FromStr for Square {
    type Err = SquareError;

    fn from_str(s: &str) -> Result<Square, SquareError> {
        Square::from_algebraic(s).ok_or_else(|| SquareError::BadAlgebraic {
            text: s.to_string(),
        })
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({self})")
    }
}
