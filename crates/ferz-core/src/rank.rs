//! Board ranks (rows 1 to 8).

use std::fmt;

/// A rank (row), Rank1 on White's side to Rank8 on Black's side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Rank {
    Rank1 = 0,
    Rank2 = 1,
    Rank3 = 2,
    Rank4 = 3,
    Rank5 = 4,
    Rank6 = 5,
    Rank7 = 6,
    Rank8 = 7,
}

impl Rank {
    pub const COUNT: usize = 8;

    pub const ALL: [Rank; 8] = [
        Rank::Rank1,
        Rank::Rank2,
        Rank::Rank3,
        Rank::Rank4,
        Rank::Rank5,
        Rank::Rank6,
        Rank::Rank7,
        Rank::Rank8,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Zero-based index to rank, `None` past Rank8.
    #[inline]
    pub fn from_index(index: u8) -> Option<Rank> {
        Rank::ALL.get(usize::from(index)).copied()
    }

    /// Parse a rank digit `1`..`8`.
    pub fn from_char(c: char) -> Option<Rank> {
        match c.to_digit(10) {
            Some(d @ 1..=8) => Rank::from_index(d as u8 - 1),
            _ => None,
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index() + 1)
    }
}
